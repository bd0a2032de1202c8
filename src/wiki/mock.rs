use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::wiki::types::{CategoryMember, MembersBatch};
use crate::wiki::{WikiClient, WikiError};

/// In-memory [`WikiClient`] with canned categories and extracts.
///
/// Categories are served in the batches they were registered with; batch
/// `n` carries the continuation token `"batch-{n + 1}"` when more follow.
/// Titles with no registered extract return an empty string.
#[derive(Debug, Default)]
pub struct MockWikiClient {
    categories: HashMap<String, Vec<Vec<CategoryMember>>>,
    errors: HashMap<String, String>,
    extracts: HashMap<String, String>,
    failing_pages: Vec<String>,
    latency: Option<Duration>,
    member_requests: AtomicUsize,
    extract_requests: AtomicUsize,
}

impl MockWikiClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: &str, batches: Vec<Vec<CategoryMember>>) -> Self {
        self.categories.insert(category.to_string(), batches);
        self
    }

    pub fn with_category_error(mut self, category: &str, info: &str) -> Self {
        self.errors.insert(category.to_string(), info.to_string());
        self
    }

    pub fn with_extract(mut self, title: &str, text: &str) -> Self {
        self.extracts.insert(title.to_string(), text.to_string());
        self
    }

    pub fn with_failing_page(mut self, title: &str) -> Self {
        self.failing_pages.push(title.to_string());
        self
    }

    /// Delays every response, so concurrent callers overlap.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn member_requests(&self) -> usize {
        self.member_requests.load(Ordering::SeqCst)
    }

    pub fn extract_requests(&self) -> usize {
        self.extract_requests.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> usize {
        self.member_requests() + self.extract_requests()
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl WikiClient for MockWikiClient {
    async fn category_members(
        &self,
        category: &str,
        _limit: u32,
        continuation: Option<&str>,
    ) -> Result<MembersBatch, WikiError> {
        self.member_requests.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if let Some(info) = self.errors.get(category) {
            return Err(WikiError::Api {
                code: "invalidcategory".to_string(),
                info: info.clone(),
            });
        }

        let Some(batches) = self.categories.get(category) else {
            return Ok(MembersBatch::default());
        };

        let index = match continuation {
            None => 0,
            Some(token) => token
                .strip_prefix("batch-")
                .and_then(|n| n.parse::<usize>().ok())
                .filter(|&n| n < batches.len())
                .ok_or_else(|| WikiError::Malformed(format!("unknown continuation '{token}'")))?,
        };

        let members = batches.get(index).cloned().unwrap_or_default();
        let continuation = (index + 1 < batches.len()).then(|| format!("batch-{}", index + 1));

        Ok(MembersBatch {
            members,
            continuation,
        })
    }

    async fn page_extract(&self, title: &str) -> Result<String, WikiError> {
        self.extract_requests.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if self.failing_pages.iter().any(|page| page == title) {
            return Err(WikiError::Malformed(format!("simulated failure for '{title}'")));
        }

        Ok(self.extracts.get(title).cloned().unwrap_or_default())
    }
}
