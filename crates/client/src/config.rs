use std::{env, path::PathBuf, time::Duration};

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory of the issuer store (default: "~/.nvl")
    pub config_dir: PathBuf,
    /// Tracing filter directive (default: "warn")
    pub log_filter: String,
    /// HTTP request timeout in seconds (default: 30)
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `NVL_CONFIG_DIR` - Issuer store directory (default: "~/.nvl")
    /// - `NVL_LOG` - Tracing filter (default: "warn")
    /// - `NVL_HTTP_TIMEOUT_SECS` - HTTP timeout in seconds (default: 30)
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            config_dir: var("NVL_CONFIG_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(default_config_dir),
            log_filter: var("NVL_LOG").unwrap_or_else(|| "warn".to_string()),
            http_timeout_secs: var("NVL_HTTP_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Override the issuer store directory (e.g. from a command-line flag).
    pub fn with_config_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.config_dir = dir;
        }
        self
    }

    /// Directory holding one JSON file per issuer.
    pub fn issuers_dir(&self) -> PathBuf {
        self.config_dir.join("issuers")
    }

    /// Get HTTP timeout as a Duration.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn default_config_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".nvl"))
        .unwrap_or_else(|| PathBuf::from(".nvl"))
}
