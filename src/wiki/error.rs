use thiserror::Error;

#[derive(Error, Debug)]
pub enum WikiError {
    #[error("Error building HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Request to the encyclopedia API failed")]
    Request(#[from] reqwest::Error),

    #[error("Encyclopedia API returned an error ({code}): {info}")]
    Api { code: String, info: String },

    #[error("Malformed API response: {0}")]
    Malformed(String),
}
