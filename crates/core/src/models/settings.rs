use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::CoreError;

/// Environment variable overriding [`DashboardConfig::base_url`].
pub const API_URL_ENV: &str = "FUND_DASHBOARD_API_URL";

/// Client configuration for the dashboard controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Base path of the analytics service, e.g. "http://localhost:5000/api".
    pub base_url: String,

    /// How long a notification banner stays fully visible.
    pub notification_duration_ms: u64,

    /// Length of the banner exit animation.
    pub exit_animation_ms: u64,

    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            notification_duration_ms: 5000,
            exit_animation_ms: 300,
            request_timeout_secs: None,
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.base_url = normalize_base_url(&config.base_url)?;
        Ok(config)
    }

    /// Defaults, with the base URL taken from `FUND_DASHBOARD_API_URL` when set.
    pub fn from_env() -> Result<Self, CoreError> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.base_url = normalize_base_url(&url)?;
        }
        Ok(config)
    }

    /// Replace the base URL after validating it.
    pub fn with_base_url(mut self, url: &str) -> Result<Self, CoreError> {
        self.base_url = normalize_base_url(url)?;
        Ok(self)
    }

    #[must_use]
    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_duration_ms)
    }

    #[must_use]
    pub fn exit_animation(&self) -> Duration {
        Duration::from_millis(self.exit_animation_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Trim whitespace and trailing slashes; require an http(s) scheme.
fn normalize_base_url(url: &str) -> Result<String, CoreError> {
    let trimmed = url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(CoreError::ValidationError(format!(
            "Invalid service URL '{url}': must start with http:// or https://"
        )));
    }
    Ok(trimmed.to_string())
}
