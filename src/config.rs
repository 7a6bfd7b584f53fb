// Configuration for go-extractor
// Reads from environment variables with sensible defaults

use std::env;
use std::sync::OnceLock;

use tracing::warn;

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Emit single-line JSON (GO_EXTRACTOR_COMPACT)
    pub compact: bool,

    /// Largest input file accepted, in bytes (GO_EXTRACTOR_MAX_FILE_BYTES)
    pub max_file_bytes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            compact: false,
            max_file_bytes: 8 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();

        if let Some(val) = lookup("GO_EXTRACTOR_COMPACT") {
            match parse_bool(&val) {
                Some(parsed) => config.compact = parsed,
                None => warn!(
                    value = %val,
                    default = config.compact,
                    "invalid GO_EXTRACTOR_COMPACT, using default"
                ),
            }
        }

        if let Some(val) = lookup("GO_EXTRACTOR_MAX_FILE_BYTES") {
            match val.trim().parse() {
                Ok(parsed) => config.max_file_bytes = parsed,
                Err(_) => warn!(
                    value = %val,
                    default = config.max_file_bytes,
                    "invalid GO_EXTRACTOR_MAX_FILE_BYTES, using default"
                ),
            }
        }

        config
    }

    /// Get the global configuration instance
    pub fn get() -> &'static Config {
        CONFIG.get_or_init(Config::from_env)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
