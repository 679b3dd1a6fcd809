use core_config::{FromEnv, server::ServerConfig};
use domain_memory::{OpenAIConfig, PineconeConfig};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub openai: OpenAIConfig,
    pub pinecone: PineconeConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=3000
        let openai = OpenAIConfig::from_env()?; // Requires OPENAI_API_KEY
        let pinecone = PineconeConfig::from_env()?; // Requires PINECONE_API_KEY, PINECONE_INDEX_NAME

        Ok(Self {
            environment,
            server,
            openai,
            pinecone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_loads_with_required_keys() {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", Some("sk-test")),
                ("PINECONE_API_KEY", Some("pc-test")),
                ("PINECONE_INDEX_NAME", Some("memories")),
                ("APP_ENV", None),
                ("PORT", None),
                ("OPENAI_EMBEDDING_MODEL", None),
                ("PINECONE_NAMESPACE", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.server.port, 3000);
                assert_eq!(config.openai.model, "text-embedding-ada-002");
                assert_eq!(config.pinecone.index_name, "memories");
                assert_eq!(config.pinecone.namespace, "default");
            },
        );
    }

    #[test]
    fn test_config_reads_dotenv_file_without_overriding_process() {
        let path = std::env::temp_dir().join(format!("memory-api-{}.env", std::process::id()));
        std::fs::write(
            &path,
            "OPENAI_API_KEY=sk-from-file\nPINECONE_API_KEY=pc-from-file\nPINECONE_INDEX_NAME=notes\n",
        )
        .unwrap();

        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", None),
                ("PINECONE_API_KEY", Some("pc-process")),
                ("PINECONE_INDEX_NAME", None),
            ],
            || {
                dotenvy::from_path(&path).unwrap();
                let config = Config::from_env().unwrap();
                assert_eq!(config.openai.api_key, "sk-from-file");
                assert_eq!(config.pinecone.api_key, "pc-process");
                assert_eq!(config.pinecone.index_name, "notes");
            },
        );

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_config_fails_without_openai_key() {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", None),
                ("PINECONE_API_KEY", Some("pc-test")),
                ("PINECONE_INDEX_NAME", Some("memories")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("OPENAI_API_KEY"));
            },
        );
    }

    #[test]
    fn test_config_fails_without_pinecone_index() {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", Some("sk-test")),
                ("PINECONE_API_KEY", Some("pc-test")),
                ("PINECONE_INDEX_NAME", None),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("PINECONE_INDEX_NAME"));
            },
        );
    }

    #[test]
    fn test_config_fails_on_bad_timeout() {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", Some("sk-test")),
                ("PINECONE_API_KEY", Some("pc-test")),
                ("PINECONE_INDEX_NAME", Some("memories")),
                ("EMBEDDING_TIMEOUT_SECS", Some("soon")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("EMBEDDING_TIMEOUT_SECS"));
            },
        );
    }
}
