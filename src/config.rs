//! API configuration parsed from explicit values or environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const API_URL_ENV: &str = "GOALBINGO_API_URL";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("api base url is empty")]
    EmptyBaseUrl,
    #[error("unsupported api base url '{0}' (expected http:// or https://)")]
    UnsupportedScheme(String),
}

/// Where the goals API lives. Passed into the board controller and the
/// creation flow at construction; nothing reads a global base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_base_url: String,
}

impl ApiConfig {
    /// Build a config from a base URL, dropping trailing slashes.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is blank or not http(s).
    pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = api_base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::UnsupportedScheme(trimmed.to_owned()));
        }
        Ok(Self { api_base_url: trimmed.to_owned() })
    }

    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `GOALBINGO_API_URL`: default `http://localhost:8080`
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL is rejected by [`ApiConfig::new`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned());
        Self::new(&raw)
    }

    /// Join an absolute API path onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { api_base_url: DEFAULT_API_BASE_URL.to_owned() }
    }
}
