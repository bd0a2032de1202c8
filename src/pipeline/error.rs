use std::sync::Arc;

use thiserror::Error;

use crate::cache::CacheError;
use crate::wiki::WikiError;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Error initialising the cache store")]
    Cache(#[from] CacheError),

    #[error("Error building the encyclopedia client")]
    Client(#[source] WikiError),

    #[error("Error fetching category data: {0}")]
    Fetch(#[source] Arc<WikiError>),
}

impl From<WikiError> for AnalysisError {
    fn from(error: WikiError) -> Self {
        AnalysisError::Fetch(Arc::new(error))
    }
}

impl From<Arc<WikiError>> for AnalysisError {
    fn from(error: Arc<WikiError>) -> Self {
        AnalysisError::Fetch(error)
    }
}
