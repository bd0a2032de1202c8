pub mod analyzer;
pub mod error;
pub mod events;
pub mod report;

pub use analyzer::Analyzer;
pub use error::AnalysisError;
pub use events::{PipelineEvent, PipelineObserver};
pub use report::{AnalysisReport, Status};
