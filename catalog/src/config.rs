use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Public v1 endpoint with the shared test key.
pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Connection settings for [`crate::HttpCatalog`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base endpoint; every request path is joined onto it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Overall per-request timeout. A request that exceeds it resolves to
    /// an empty result, the same as "no matches".
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Optional `User-Agent` header
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            user_agent: None,
        }
    }
}

impl CatalogConfig {
    /// Config pointing at a different endpoint (mirrors, mock servers)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|err| format!("base_url `{}` is not a valid URL: {err}", self.base_url))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "base_url must use http or https, got `{}`",
                url.scheme()
            ));
        }

        if self.request_timeout_ms == 0 {
            return Err("request_timeout_ms must be > 0".to_string());
        }

        Ok(())
    }
}
