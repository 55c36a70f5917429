//! Application configuration, read from the environment.
//!
//! The only externally tunable behaviour is where the character API lives;
//! the application name and version are display strings.

/// Environment variable naming the character API base URL.
pub const API_BASE_URL_VAR: &str = "PCM_API_BASE_URL";
pub const APP_NAME_VAR: &str = "PCM_APP_NAME";
pub const APP_VERSION_VAR: &str = "PCM_APP_VERSION";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8765";
pub const DEFAULT_APP_NAME: &str = "PC Character Manager";
pub const DEFAULT_APP_VERSION: &str = "1.0.0";

/// Fixed request timeout for the character API.
pub const API_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL ({value}): {reason}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub app: AppInfo,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_API_BASE_URL.to_string(),
                timeout_secs: API_TIMEOUT_SECS,
            },
            app: AppInfo {
                name: DEFAULT_APP_NAME.to_string(),
                version: DEFAULT_APP_VERSION.to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Build from process environment variables, falling back to defaults.
    ///
    /// Call after `.env` files have been loaded.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let base_url = read(API_BASE_URL_VAR, DEFAULT_API_BASE_URL);
        let parsed = url::Url::parse(&base_url).map_err(|e| ConfigError::InvalidUrl {
            var: API_BASE_URL_VAR,
            value: base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                var: API_BASE_URL_VAR,
                value: base_url,
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            api: ApiConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                timeout_secs: API_TIMEOUT_SECS,
            },
            app: AppInfo {
                name: read(APP_NAME_VAR, DEFAULT_APP_NAME),
                version: read(APP_VERSION_VAR, DEFAULT_APP_VERSION),
            },
        })
    }
}

/// Load `.env.local` then `.env` from the working directory, if present.
/// Values already in the environment win.
pub fn load_dotenv() {
    for filename in [".env.local", ".env"] {
        let path = std::path::Path::new(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
