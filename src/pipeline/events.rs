/// Progress notifications emitted while a category is aggregated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    CacheHit,
    /// No cached totals; the category's pages are about to be listed.
    Enumerating,
    PagesFound(usize),
    PageProcessed { title: String },
    Saved,
}

pub trait PipelineObserver: Send + Sync {
    fn on_event(&self, event: &PipelineEvent);
}

impl<F> PipelineObserver for F
where
    F: Fn(&PipelineEvent) + Send + Sync,
{
    fn on_event(&self, event: &PipelineEvent) {
        self(event)
    }
}
