use std::env;

/// API client configuration.
///
/// Reads from the `WORKOUT_API_URL` environment variable, falling back to
/// `http://localhost:8080/api` when unset.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every resource path is appended to.
    pub base_url: String,
}

impl ApiConfig {
    /// The default base URL used when no environment variable is set.
    pub const DEFAULT_URL: &str = "http://localhost:8080/api";

    /// Environment variable consulted by [`ApiConfig::from_env`].
    pub const ENV_VAR: &str = "WORKOUT_API_URL";

    /// Build a config from the environment.
    pub fn from_env() -> Self {
        let base_url = env::var(Self::ENV_VAR).unwrap_or_else(|_| Self::DEFAULT_URL.to_owned());
        Self::new(base_url)
    }

    /// Build a config from an explicit URL. A trailing slash is dropped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Join a resource path (starting with `/`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_url() {
        let cfg = ApiConfig::new(ApiConfig::DEFAULT_URL);
        assert_eq!(cfg.base_url, "http://localhost:8080/api");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let cfg = ApiConfig::new("http://example.test/api//");
        assert_eq!(cfg.base_url, "http://example.test/api");
    }

    #[test]
    fn endpoint_joins_path() {
        let cfg = ApiConfig::new("http://example.test/api");
        assert_eq!(
            cfg.endpoint("/workout-plans/3"),
            "http://example.test/api/workout-plans/3"
        );
    }
}
