pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod pipeline;
pub mod text;
pub mod wiki;

pub use config::AnalyzerConfig;
pub use error::RestError;
pub use pipeline::{AnalysisError, AnalysisReport, Analyzer};
