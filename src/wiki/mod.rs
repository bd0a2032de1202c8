pub mod config;
pub mod error;
pub mod live;
pub mod members;
pub mod mock;
pub mod types;

use async_trait::async_trait;

pub use config::WikiConfig;
pub use error::WikiError;
pub use live::LiveWikiClient;
pub use members::CategoryEnumerator;
pub use mock::MockWikiClient;
pub use types::{CategoryMember, MembersBatch};

/// The two encyclopedia API operations the pipeline depends on.
#[async_trait]
pub trait WikiClient: Send + Sync {
    /// Fetches one batch of members of `Category:<category>`.
    ///
    /// An `error` object in the response is reported as [`WikiError::Api`].
    async fn category_members(
        &self,
        category: &str,
        limit: u32,
        continuation: Option<&str>,
    ) -> Result<MembersBatch, WikiError>;

    /// Plain-text extract of `title`, or an empty string when the page has
    /// no extract.
    async fn page_extract(&self, title: &str) -> Result<String, WikiError>;
}
