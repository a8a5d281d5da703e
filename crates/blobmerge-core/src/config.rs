//! Configuration module
//!
//! Reads the storage connection string and container name from the
//! environment. Both are required; there are no defaults and no fallbacks.
//! A [`Config`] is built once at startup and handed to the storage factory
//! and the orchestrator by reference.

use std::env;
use std::fmt;

use crate::constants::{CONNECTION_STRING_VAR, CONTAINER_NAME_VAR};
use crate::merge::MergePlan;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "Please set {} and {} environment variables (missing: {})",
        CONNECTION_STRING_VAR,
        CONTAINER_NAME_VAR,
        .missing.join(", ")
    )]
    Missing { missing: Vec<&'static str> },
}

/// Application configuration.
#[derive(Clone)]
pub struct Config {
    connection_string: String,
    container_name: String,
    plan: MergePlan,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Unset and empty values are both reported as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|s| !s.is_empty());

        let connection_string = read(CONNECTION_STRING_VAR);
        let container_name = read(CONTAINER_NAME_VAR);

        match (connection_string, container_name) {
            (Some(connection_string), Some(container_name)) => {
                tracing::debug!(container = %container_name, "Configuration loaded");
                Ok(Config {
                    connection_string,
                    container_name,
                    plan: MergePlan::default(),
                })
            }
            (connection_string, container_name) => {
                let mut missing = Vec::new();
                if connection_string.is_none() {
                    missing.push(CONNECTION_STRING_VAR);
                }
                if container_name.is_none() {
                    missing.push(CONTAINER_NAME_VAR);
                }
                Err(ConfigError::Missing { missing })
            }
        }
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    pub fn plan(&self) -> &MergePlan {
        &self.plan
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("connection_string", &"<redacted>")
            .field("container_name", &self.container_name)
            .field("plan", &self.plan)
            .finish()
    }
}
