use std::path::PathBuf;

use crate::rules::{ReportRules, RulesError};

/// Application-level constants
pub const APP_NAME: &str = "pathlab-report";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_QR_WIDTH: u32 = 200;

pub const ENV_PUBLIC_BASE_URL: &str = "PATHLAB_PUBLIC_BASE_URL";
pub const ENV_QR_WIDTH: &str = "PATHLAB_QR_WIDTH";
pub const ENV_RULES_PATH: &str = "PATHLAB_RULES_PATH";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "info,pathlab_lib=debug"
    } else {
        "info"
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// Settings shared by every render request.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Origin used to build the public verification link, without trailing `/`.
    pub public_base_url: String,
    /// Pixel width of the square verification QR code.
    pub qr_width: u32,
    pub rules: ReportRules,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            public_base_url: DEFAULT_PUBLIC_BASE_URL.into(),
            qr_width: DEFAULT_QR_WIDTH,
            rules: ReportRules::default(),
        }
    }
}

impl RenderConfig {
    /// Read `PATHLAB_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_PUBLIC_BASE_URL) {
            config.public_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(width) = get(ENV_QR_WIDTH) {
            config.qr_width = width
                .parse::<u32>()
                .ok()
                .filter(|w| *w > 0)
                .ok_or(ConfigError::InvalidValue(ENV_QR_WIDTH, width))?;
        }

        if let Some(path) = get(ENV_RULES_PATH) {
            config.rules = ReportRules::load(&PathBuf::from(path))?;
        }

        Ok(config)
    }
}
