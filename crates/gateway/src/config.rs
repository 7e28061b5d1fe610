use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where the API lives and how long a single request may take.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ApiConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base_url` is not an http(s) url.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout,
        })
    }

    /// Reads `TUTOR_API_URL` and `TUTOR_API_TIMEOUT_SECS`, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("TUTOR_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let timeout = match env::var("TUTOR_API_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout_secs(&raw)?,
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        Self::new(&base_url, timeout)
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// # Errors
///
/// Returns `ConfigError::InvalidTimeout` unless `raw` is a positive integer.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            raw: raw.to_string(),
        }),
    }
}

// Endpoints are joined as relative paths, so the base must end with '/'.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|_| ConfigError::InvalidUrl {
        raw: raw.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::InvalidUrl {
            raw: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let config = ApiConfig::new("http://localhost:5000/api", Duration::from_secs(1)).unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:5000/api/");
        assert_eq!(
            config.base_url.join("articles").unwrap().as_str(),
            "http://localhost:5000/api/articles"
        );
    }

    #[test]
    fn rejects_non_http_urls() {
        let err = ApiConfig::new("ftp://example.com", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn timeout_must_be_positive() {
        assert_eq!(parse_timeout_secs("15").unwrap(), Duration::from_secs(15));
        assert!(parse_timeout_secs("0").is_err());
        assert!(parse_timeout_secs("soon").is_err());
    }

    #[test]
    fn default_base_url_points_at_local_server() {
        let config =
            ApiConfig::new(DEFAULT_BASE_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS)).unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:5000/");
    }
}
