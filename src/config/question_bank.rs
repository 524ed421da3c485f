//! Question bank configuration

use serde::Deserialize;

/// Question bank configuration
///
/// With no path configured the built-in catalog is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionBankConfig {
    /// Path to an authored YAML question bank
    pub path: Option<String>,

    /// Shuffle scored questions per session; a fixed seed makes the
    /// order reproducible
    #[serde(default)]
    pub shuffle: bool,
    pub shuffle_seed: Option<u64>,
}

/// Local response cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Directory holding per-user response cache files
    #[serde(default = "default_cache_dir")]
    pub dir: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
        }
    }
}

fn default_cache_dir() -> String {
    "./data/response_cache".to_string()
}
