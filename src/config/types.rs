// Configuration type definitions

use serde::Deserialize;

pub const DEFAULT_MIN_CHARS_TO_SEARCH: usize = 2;
pub const DEFAULT_DEBOUNCE_MS: u64 = 333;
pub const DEFAULT_BASE_URL: &str = "https://public-api.wordpress.com/wpcom/v2";
pub const DEFAULT_LIMIT: u32 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Search box behavior
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Trimmed length at which a remote lookup is triggered
    pub min_chars_to_search: usize,
    /// Quiet window before a debounced lookup fires
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            min_chars_to_search: DEFAULT_MIN_CHARS_TO_SEARCH,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Verticals API section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Maximum number of verticals requested per lookup
    pub limit: u32,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: DEFAULT_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub api: ApiConfig,
}
