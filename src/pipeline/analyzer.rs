//! Category aggregation: enumerate pages, fetch and count their text, and
//! keep the totals in the on-disk cache.
//!
//! Page extracts are fetched through a bounded worker pool, but results are
//! merged in enumeration order, so the totals (and the tie-break order of
//! `most_common`) are the same as a strictly sequential run. Concurrent
//! callers for the same cold category share a single computation.

use std::sync::Arc;

use futures::{stream, StreamExt};
use moka::future::Cache;
use tracing::{debug, info, warn};

use crate::cache::{cache_key, CacheKind, CacheStore, CacheToken};
use crate::config::AnalyzerConfig;
use crate::pipeline::error::AnalysisError;
use crate::pipeline::events::{PipelineEvent, PipelineObserver};
use crate::pipeline::report::AnalysisReport;
use crate::text::{self, WordFrequencies};
use crate::wiki::{CategoryEnumerator, LiveWikiClient, WikiClient, WikiError};

/// Upper bound on distinct categories being computed at the same time.
const MAX_IN_FLIGHT: u64 = 1_024;

type Aggregate = Arc<Option<WordFrequencies>>;

#[derive(Clone)]
pub struct Analyzer {
    client: Arc<dyn WikiClient>,
    cache: CacheStore,
    enumerator: CategoryEnumerator,
    concurrency: usize,
    top_n: usize,
    in_flight: Cache<CacheToken, Aggregate>,
    observer: Option<Arc<dyn PipelineObserver>>,
}

impl Analyzer {
    pub fn new(client: Arc<dyn WikiClient>, cache: CacheStore, config: &AnalyzerConfig) -> Self {
        let enumerator =
            CategoryEnumerator::new(Arc::clone(&client), cache.clone(), config.wiki.member_limit);

        Self {
            client,
            cache,
            enumerator,
            concurrency: config.concurrency.max(1),
            top_n: config.top_n,
            in_flight: Cache::builder().max_capacity(MAX_IN_FLIGHT).build(),
            observer: None,
        }
    }

    /// Builds an analyzer against the live API, opening the cache directory.
    pub async fn from_config(config: &AnalyzerConfig) -> Result<Self, AnalysisError> {
        let client = LiveWikiClient::new(&config.wiki).map_err(AnalysisError::Client)?;
        let cache = CacheStore::open(&config.cache_dir, config.cache_max_age).await?;

        info!(
            "Analyzer ready (api: {}, cache: {})",
            client.api_url(),
            cache.dir().display()
        );
        Ok(Self::new(Arc::new(client), cache, config))
    }

    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub async fn analyze(&self, category: &str) -> Result<AnalysisReport, AnalysisError> {
        let Some(frequencies) = self.aggregate(category).await? else {
            info!("No pages found for category: {}", category);
            return Ok(AnalysisReport::no_pages(category));
        };

        let report = AnalysisReport::from_words(category, frequencies.most_common(self.top_n));
        debug!("{}", report.message);
        Ok(report)
    }

    /// Total word frequencies over every article in `category`, or `None`
    /// when the category has no article pages.
    pub async fn aggregate(
        &self,
        category: &str,
    ) -> Result<Option<WordFrequencies>, AnalysisError> {
        let token = cache_key(category, CacheKind::Frequencies);

        let shared = self
            .in_flight
            .try_get_with(token.clone(), self.compute(category, &token))
            .await;
        // The disk cache owns expiry; only pending work is shared in memory.
        self.in_flight.invalidate(&token).await;

        let shared = shared?;
        Ok(Option::clone(&shared))
    }

    async fn compute(&self, category: &str, token: &CacheToken) -> Result<Aggregate, WikiError> {
        if let Some(frequencies) = self.cache.load::<WordFrequencies>(token).await {
            info!("Using cached data for category: {}", category);
            self.emit(PipelineEvent::CacheHit);
            return Ok(Arc::new(Some(frequencies)));
        }

        info!("Fetching pages for category: {}", category);
        self.emit(PipelineEvent::Enumerating);
        let pages = self.enumerator.enumerate(category).await?;
        if pages.is_empty() {
            return Ok(Arc::new(None));
        }
        self.emit(PipelineEvent::PagesFound(pages.len()));

        let total = self.count_pages(&pages).await?;
        info!(
            "Counted {} distinct words across {} pages of {}",
            total.len(),
            pages.len(),
            category
        );

        match self.cache.save(token, &total).await {
            Ok(()) => self.emit(PipelineEvent::Saved),
            Err(e) => warn!("Failed to cache frequencies for {}: {}", category, e),
        }

        Ok(Arc::new(Some(total)))
    }

    async fn count_pages(&self, pages: &[String]) -> Result<WordFrequencies, WikiError> {
        // Owned titles and client handles keep each fetch future `Send` for
        // any caller lifetime, which the axum handlers require.
        let mut counted = stream::iter(pages.iter().cloned())
            .map(|title: String| {
                let client = Arc::clone(&self.client);
                async move {
                    let content = client.page_extract(&title).await?;
                    Ok::<_, WikiError>((title, text::process(&content)))
                }
            })
            .buffered(self.concurrency);

        let mut total = WordFrequencies::new();
        while let Some(page) = counted.next().await {
            let (title, frequencies) = page?;
            debug!("{} distinct words in {}", frequencies.len(), title);

            total.merge(&frequencies);
            self.emit(PipelineEvent::PageProcessed { title });
        }

        Ok(total)
    }

    fn emit(&self, event: PipelineEvent) {
        if let Some(observer) = &self.observer {
            observer.on_event(&event);
        }
    }
}
