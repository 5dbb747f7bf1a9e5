use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const BACKEND_URL_ENV: &str = "QUIZ_BACKEND_URL";
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Pause between a graded answer and the next question.
pub const ADVANCE_DELAY: Duration = Duration::from_secs(3);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: Url,
}

impl BackendConfig {
    /// Parse and validate a backend base url.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unparsable urls or non-http schemes.
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        let mut base_url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidUrl {
            raw: trimmed.to_string(),
            source,
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(base_url.scheme().to_string()));
        }
        // Endpoint paths are joined relative to the base.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url })
    }

    /// Read `QUIZ_BACKEND_URL`, falling back to the local development server.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the variable holds an invalid url.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(BACKEND_URL_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::new(&raw),
            _ => Self::new(DEFAULT_BACKEND_URL),
        }
    }

    /// Absolute url for an endpoint such as `get_users`.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the endpoint cannot be joined.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_below_base_path() {
        let config = BackendConfig::new("https://quiz.example.com/api").unwrap();
        let url = config.endpoint("get_users").unwrap();
        assert_eq!(url.as_str(), "https://quiz.example.com/api/get_users");
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = BackendConfig::new("ftp://quiz.example.com").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(scheme) if scheme == "ftp"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            BackendConfig::new("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn default_points_at_local_server() {
        let config = BackendConfig::new(DEFAULT_BACKEND_URL).unwrap();
        assert_eq!(
            config.endpoint("get_random_question").unwrap().as_str(),
            "http://127.0.0.1:5000/get_random_question"
        );
    }
}
