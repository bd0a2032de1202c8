use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::wiki::types::{ApiErrorBody, ExtractResponse, MembersBatch, MembersResponse};
use crate::wiki::{WikiClient, WikiConfig, WikiError};

/// [`WikiClient`] backed by the MediaWiki action API over HTTP.
#[derive(Debug, Clone)]
pub struct LiveWikiClient {
    client: Client,
    api_url: String,
}

impl LiveWikiClient {
    pub fn new(config: &WikiConfig) -> Result<Self, WikiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(WikiError::Client)?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn query<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, WikiError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("action", "query"), ("format", "json"), ("formatversion", "1")])
            .query(params)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

fn api_error(body: ApiErrorBody) -> WikiError {
    WikiError::Api {
        code: body.code,
        info: body.info,
    }
}

#[async_trait]
impl WikiClient for LiveWikiClient {
    async fn category_members(
        &self,
        category: &str,
        limit: u32,
        continuation: Option<&str>,
    ) -> Result<MembersBatch, WikiError> {
        let title = format!("Category:{category}");
        let limit = limit.to_string();
        let mut params = vec![
            ("list", "categorymembers"),
            ("cmtitle", title.as_str()),
            ("cmlimit", limit.as_str()),
        ];
        if let Some(token) = continuation {
            params.push(("cmcontinue", token));
        }

        let response: MembersResponse = self.query(&params).await?;
        if let Some(error) = response.error {
            return Err(api_error(error));
        }

        let members = response
            .query
            .ok_or_else(|| WikiError::Malformed("categorymembers response has no query".into()))?
            .categorymembers;
        let continuation = response.continuation.and_then(|c| c.cmcontinue);

        debug!(
            "fetched {} members of {} (more: {})",
            members.len(),
            title,
            continuation.is_some()
        );

        Ok(MembersBatch {
            members,
            continuation,
        })
    }

    async fn page_extract(&self, title: &str) -> Result<String, WikiError> {
        let response: ExtractResponse = self
            .query(&[("titles", title), ("prop", "extracts"), ("explaintext", "1")])
            .await?;
        if let Some(error) = response.error {
            return Err(api_error(error));
        }

        let extract = response
            .query
            .and_then(|query| query.pages.into_values().next())
            .and_then(|page| page.extract)
            .unwrap_or_default();

        debug!("fetched {} bytes of text for {}", extract.len(), title);
        Ok(extract)
    }
}
