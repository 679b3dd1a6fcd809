use std::fmt;

use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or, env_required};

use crate::models::DEFAULT_NAMESPACE;

const DEFAULT_CONTROLLER_URL: &str = "https://api.pinecone.io";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Pinecone connection configuration
#[derive(Clone)]
pub struct PineconeConfig {
    pub api_key: String,
    pub index_name: String,
    /// Data plane host; resolved from the control plane when `None`
    pub index_host: Option<String>,
    pub controller_url: String,
    pub namespace: String,
    pub timeout_secs: u64,
}

impl PineconeConfig {
    pub fn new(api_key: String, index_name: String) -> Self {
        Self {
            api_key,
            index_name,
            index_host: None,
            controller_url: DEFAULT_CONTROLLER_URL.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_index_host(mut self, host: String) -> Self {
        self.index_host = Some(host);
        self
    }

    pub fn with_controller_url(mut self, url: String) -> Self {
        self.controller_url = url;
        self
    }

    pub fn with_namespace(mut self, namespace: String) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl fmt::Debug for PineconeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PineconeConfig")
            .field("api_key", &"[REDACTED]")
            .field("index_name", &self.index_name)
            .field("index_host", &self.index_host)
            .field("controller_url", &self.controller_url)
            .field("namespace", &self.namespace)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl FromEnv for PineconeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let index_host = std::env::var("PINECONE_INDEX_HOST")
            .ok()
            .filter(|host| !host.trim().is_empty());

        Ok(Self {
            api_key: env_required("PINECONE_API_KEY")?,
            index_name: env_required("PINECONE_INDEX_NAME")?,
            index_host,
            controller_url: env_or_default("PINECONE_CONTROLLER_URL", DEFAULT_CONTROLLER_URL),
            namespace: env_or_default("PINECONE_NAMESPACE", DEFAULT_NAMESPACE),
            timeout_secs: env_parse_or("PINECONE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars(
            [
                ("PINECONE_API_KEY", Some("pc-key")),
                ("PINECONE_INDEX_NAME", Some("memories")),
                ("PINECONE_INDEX_HOST", None),
                ("PINECONE_CONTROLLER_URL", None),
                ("PINECONE_NAMESPACE", None),
                ("PINECONE_TIMEOUT_SECS", None),
            ],
            || {
                let config = PineconeConfig::from_env().unwrap();
                assert_eq!(config.index_name, "memories");
                assert!(config.index_host.is_none());
                assert_eq!(config.controller_url, "https://api.pinecone.io");
                assert_eq!(config.namespace, "default");
                assert_eq!(config.timeout_secs, 30);
            },
        );
    }

    #[test]
    fn test_from_env_custom_values() {
        temp_env::with_vars(
            [
                ("PINECONE_API_KEY", Some("pc-key")),
                ("PINECONE_INDEX_NAME", Some("memories")),
                ("PINECONE_INDEX_HOST", Some("memories-abc.svc.pinecone.io")),
                ("PINECONE_NAMESPACE", Some("chat")),
                ("PINECONE_TIMEOUT_SECS", Some("10")),
            ],
            || {
                let config = PineconeConfig::from_env().unwrap();
                assert_eq!(
                    config.index_host.as_deref(),
                    Some("memories-abc.svc.pinecone.io")
                );
                assert_eq!(config.namespace, "chat");
                assert_eq!(config.timeout_secs, 10);
            },
        );
    }

    #[test]
    fn test_from_env_requires_index_name() {
        temp_env::with_vars(
            [
                ("PINECONE_API_KEY", Some("pc-key")),
                ("PINECONE_INDEX_NAME", None),
            ],
            || {
                let err = PineconeConfig::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "PINECONE_INDEX_NAME"));
            },
        );
    }

    #[test]
    fn test_builders_override_defaults() {
        let config = PineconeConfig::new("pc-key".to_string(), "memories".to_string())
            .with_index_host("http://localhost:5080".to_string())
            .with_namespace("chat".to_string())
            .with_timeout(5);

        assert_eq!(config.index_host.as_deref(), Some("http://localhost:5080"));
        assert_eq!(config.controller_url, "https://api.pinecone.io");
        assert_eq!(config.namespace, "chat");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = PineconeConfig::new("pc-secret".to_string(), "memories".to_string());
        assert!(!format!("{:?}", config).contains("pc-secret"));
    }
}
