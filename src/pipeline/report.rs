use serde::{Deserialize, Serialize};

use crate::text::WordCount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Externally visible outcome of analysing one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub status: Status,
    pub message: String,
    pub words: Vec<WordCount>,
}

impl AnalysisReport {
    pub fn no_pages(category: &str) -> Self {
        Self {
            status: Status::Error,
            message: format!(
                "No pages found in category '{category}'. Please check the category name and try again."
            ),
            words: Vec::new(),
        }
    }

    pub fn no_words(category: &str) -> Self {
        Self {
            status: Status::Error,
            message: format!(
                "No significant words found in category '{category}'. This might be an empty category or contain only common words."
            ),
            words: Vec::new(),
        }
    }

    /// A success report, or [`AnalysisReport::no_words`] when `words` is empty.
    pub fn from_words(category: &str, words: Vec<WordCount>) -> Self {
        if words.is_empty() {
            return Self::no_words(category);
        }

        Self {
            status: Status::Success,
            message: format!("Found {} words in category '{category}'", words.len()),
            words,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}
