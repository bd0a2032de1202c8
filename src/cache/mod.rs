pub mod error;
pub mod store;

pub use error::CacheError;
pub use store::{cache_key, CacheKind, CacheStore, CacheToken, DEFAULT_MAX_AGE};
