use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File system error: {0}")]
    IO(#[from] std::io::Error),
    #[error("YAML parsing error: {0}")]
    YAMLError(#[from] serde_yaml::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Account used against the authentication endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Target service and account the suite runs against.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SuiteConfig {
    pub base_url: String,
    pub credentials: Credentials,
}

impl Default for SuiteConfig {
    /// The public demo deployment the suite was written against.
    fn default() -> Self {
        Self {
            base_url: "http://softuni-qa-loadbalancer-2137572849.eu-north-1.elb.amazonaws.com:86"
                .to_string(),
            credentials: Credentials {
                username: "userbg1".to_string(),
                password: "user01".to_string(),
            },
        }
    }
}

impl SuiteConfig {
    /// Reads a suite config from a YAML file and resolves secret
    /// indirections in the credentials.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let mut config: SuiteConfig = serde_yaml::from_str(&text)?;
        if config.base_url.trim().is_empty() {
            return Err(ConfigError::Config("base_url must not be empty".to_string()));
        }
        config.credentials.password = resolve_secret(&config.credentials.password)?;
        Ok(config)
    }
}

// If the value starts with "env:", read it from the named environment variable.
fn resolve_secret(value: &str) -> Result<String, ConfigError> {
    match value.strip_prefix("env:") {
        Some(env_key) => {
            let env_key = env_key.trim();
            std::env::var(env_key).map_err(|_| {
                ConfigError::Config(format!("Environment variable {env_key} not found"))
            })
        }
        None => Ok(value.to_string()),
    }
}
