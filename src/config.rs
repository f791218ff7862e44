use std::env;

/// Environment variable naming the telemetry service base URL.
pub const API_BASE_ENV: &str = "PLANTWATCH_API_URL";

/// Service address used when `PLANTWATCH_API_URL` is not set.
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Connection settings for the telemetry service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Resolve configuration from the environment, loading `.env` from the
    /// working directory first if one exists.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let base = env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::new(base)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_service() {
        assert_eq!(ApiConfig::default().base_url, "http://localhost:5000");
    }

    #[test]
    fn trailing_slashes_are_stripped() {
        let config = ApiConfig::new("http://plant.example:5000///");
        assert_eq!(config.base_url, "http://plant.example:5000");
    }

    #[test]
    fn from_env_falls_back_to_default() {
        // The variable is not set in the test environment.
        let config = ApiConfig::from_env();
        assert_eq!(config.base_url, DEFAULT_API_BASE);
    }
}
