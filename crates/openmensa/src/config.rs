use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "https://openmensa.org/api/v2";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings shared by every request made through one [`crate::OpenMensa`].
///
/// Read-only once the client is built. Can be read from toml, all keys are
/// optional:
///
/// ```toml
/// endpoint = "https://openmensa.org/api/v2"
/// timeout_secs = 10
/// user_agent = "my-app/1.0"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoint: String,
    #[serde(rename = "timeout_secs", deserialize_with = "secs")]
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("openmensa-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

fn secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where D: serde::Deserializer<'de>
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("openmensa-rs/"));
    }

    #[test]
    fn toml_overrides_fields() {
        let config = ClientConfig::from_toml(r#"
            endpoint = "http://localhost:3000/api/v2"
            timeout_secs = 3
        "#).unwrap();

        assert_eq!(config.endpoint, "http://localhost:3000/api/v2");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.user_agent, ClientConfig::default().user_agent);
    }

    #[test]
    fn toml_rejects_wrong_types() {
        assert!(ClientConfig::from_toml("timeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn builder_setters() {
        let config = ClientConfig::default()
            .with_endpoint("http://example.org")
            .with_timeout(Duration::from_millis(500))
            .with_user_agent("test");

        assert_eq!(config.endpoint, "http://example.org");
        assert_eq!(config.timeout, Duration::from_millis(500));
        assert_eq!(config.user_agent, "test");
    }
}
