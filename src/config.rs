//! Configuration module - generation service and data directory settings

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::utils::data_dir::default_data_dir;

/// Environment variable holding the generation service API key
pub const ENV_API_KEY: &str = "API_KEY";

/// Alternate environment variable for the API key
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Environment variable for a custom generation service base URL
pub const ENV_BASE_URL: &str = "PROMPT_FORGE_BASE_URL";

/// Environment variable for the generation model
pub const ENV_MODEL: &str = "PROMPT_FORGE_MODEL";

/// Environment variable for an optional request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "PROMPT_FORGE_TIMEOUT_SECS";

/// Default Gemini API base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default generation model
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Optional configuration parameters for Config::new()
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub data_dir: Option<PathBuf>,
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// No timeout is applied when unset
    pub request_timeout_secs: Option<u64>,
    pub data_dir: PathBuf,
}

impl Config {
    /// Create a new Config from an API key plus optional settings.
    /// The key may be empty; its presence is checked before each call.
    pub fn new(api_key: String, options: ConfigOptions) -> Result<Arc<Self>> {
        let base_url = normalize_base_url(options.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL));

        let model = options
            .model
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        if let Some(0) = options.request_timeout_secs {
            return Err(anyhow!("request timeout must be greater than zero"));
        }

        Ok(Arc::new(Self {
            api_key: api_key.trim().to_string(),
            base_url,
            model,
            request_timeout_secs: options.request_timeout_secs,
            data_dir: options.data_dir.unwrap_or_else(default_data_dir),
        }))
    }

    /// Build a Config from environment variables.
    /// Values already present in `options` win over the environment.
    pub fn from_env(mut options: ConfigOptions) -> Result<Arc<Self>> {
        let api_key = env_non_empty(ENV_API_KEY)
            .or_else(|| env_non_empty(ENV_GEMINI_API_KEY))
            .unwrap_or_default();

        if options.base_url.is_none() {
            options.base_url = env_non_empty(ENV_BASE_URL);
        }
        if options.model.is_none() {
            options.model = env_non_empty(ENV_MODEL);
        }
        if options.request_timeout_secs.is_none() {
            if let Some(raw) = env_non_empty(ENV_TIMEOUT_SECS) {
                let secs = raw.parse::<u64>().map_err(|_| {
                    anyhow!("{} must be a positive integer, got '{}'", ENV_TIMEOUT_SECS, raw)
                })?;
                options.request_timeout_secs = Some(secs);
            }
        }

        Self::new(api_key, options)
    }

    /// Whether an API key was supplied
    pub fn has_credential(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Read an environment variable, treating blank values as unset
fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Add a scheme when missing and strip trailing slashes
pub fn normalize_base_url(raw: &str) -> String {
    let raw = raw.trim();
    let raw = if raw.is_empty() { DEFAULT_BASE_URL } else { raw };

    // Plain http is kept so local mock servers keep working
    let with_scheme = if raw.starts_with("https://") || raw.starts_with("http://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    with_scheme.trim_end_matches('/').to_string()
}
