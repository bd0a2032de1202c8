pub mod frequencies;
pub mod stopwords;
pub mod tokenizer;

pub use frequencies::{WordCount, WordFrequencies};
pub use stopwords::is_stop_word;
pub use tokenizer::tokenize;

/// Counts the significant words in `text`: lowercased tokens made only of
/// letters that are not stop words.
pub fn process(text: &str) -> WordFrequencies {
    tokenize(&text.to_lowercase())
        .iter()
        .map(String::as_str)
        .filter(|token| is_significant(token))
        .collect()
}

fn is_significant(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic) && !is_stop_word(token)
}
