use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::cache::{cache_key, CacheKind, CacheStore};
use crate::wiki::{WikiClient, WikiError};

/// Lists the article titles of a category, consulting the page-list cache
/// before going to the network.
#[derive(Clone)]
pub struct CategoryEnumerator {
    client: Arc<dyn WikiClient>,
    cache: CacheStore,
    limit: u32,
}

impl CategoryEnumerator {
    pub fn new(client: Arc<dyn WikiClient>, cache: CacheStore, limit: u32) -> Self {
        Self {
            client,
            cache,
            limit,
        }
    }

    /// Returns every namespace-0 title in `category`, in API order.
    ///
    /// An API-level error yields an empty list and is not cached. Transport
    /// failures are returned to the caller.
    pub async fn enumerate(&self, category: &str) -> Result<Vec<String>, WikiError> {
        let token = cache_key(category, CacheKind::Pages);
        if let Some(pages) = self.cache.load::<Vec<String>>(&token).await {
            info!("Using {} cached category members for {}", pages.len(), category);
            return Ok(pages);
        }

        let mut pages = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let batch = match self
                .client
                .category_members(category, self.limit, continuation.as_deref())
                .await
            {
                Ok(batch) => batch,
                Err(WikiError::Api { code, info }) => {
                    error!("Error listing category {}: {} ({})", category, info, code);
                    return Ok(Vec::new());
                }
                Err(e) => return Err(e),
            };

            pages.extend(
                batch
                    .members
                    .into_iter()
                    .filter(|member| member.is_article())
                    .map(|member| member.title),
            );

            match batch.continuation {
                Some(next) => {
                    debug!("continuing {} listing at {}", category, next);
                    continuation = Some(next);
                }
                None => break,
            }
        }

        info!("Found {} pages in category {}", pages.len(), category);

        if let Err(e) = self.cache.save(&token, &pages).await {
            warn!("Failed to cache members of {}: {}", category, e);
        }

        Ok(pages)
    }
}
