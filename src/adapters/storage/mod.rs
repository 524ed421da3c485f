//! Local storage adapters.

mod file_response_cache;

pub use file_response_cache::FileResponseCache;
