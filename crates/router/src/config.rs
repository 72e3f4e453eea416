//! Router configuration via `contract.toml`
//!
//! Every field is optional; an empty file yields the defaults. The file is
//! read once when the router is built.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use contractapi_core::NAMESPACE_SEPARATOR;

/// Config file name looked up by embedders.
pub const CONFIG_FILE_NAME: &str = "contract.toml";

/// Errors loading or writing `contract.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config file '{}': {source}", .path.display())]
    Read {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// File is not valid TOML for this schema
    #[error("failed to parse config file '{}': {reason}", .path.display())]
    Parse {
        /// Path that was parsed
        path: PathBuf,
        /// Parser detail
        reason: String,
    },

    /// File could not be written
    #[error("failed to write config file '{}': {source}", .path.display())]
    Write {
        /// Path that was written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Config could not be serialized
    #[error("failed to serialize config: {reason}")]
    Serialize {
        /// Serializer detail
        reason: String,
    },

    /// A field holds an unusable value
    #[error("invalid {field} in {}: {reason}", CONFIG_FILE_NAME)]
    Invalid {
        /// Offending field
        field: &'static str,
        /// Why it is unusable
        reason: String,
    },
}

/// The `[metadata]` section: the `info` block of the metadata document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// Chaincode title
    #[serde(default = "default_title")]
    pub title: String,
    /// Chaincode version
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_title() -> String {
    "undefined".to_string()
}

fn default_version() -> String {
    "latest".to_string()
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            version: default_version(),
        }
    }
}

/// Router configuration loaded from `contract.toml`.
///
/// # Example
///
/// ```toml
/// default_contract = "simpleasset"
/// system_contract = true
///
/// [metadata]
/// title = "asset-transfer"
/// version = "1.0.0"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Namespace bare function names resolve against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_contract: Option<String>,
    /// Register `org.hyperledger.fabric:GetMetadata`.
    #[serde(default = "default_system_contract")]
    pub system_contract: bool,
    /// Metadata `info` block.
    #[serde(default)]
    pub metadata: MetadataConfig,
}

fn default_system_contract() -> bool {
    true
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_contract: None,
            system_contract: default_system_contract(),
            metadata: MetadataConfig::default(),
        }
    }
}

impl RouterConfig {
    /// Check field values that parse but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for an empty default contract name or
    /// one containing the namespace separator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = &self.default_contract {
            if name.is_empty() || name.contains(NAMESPACE_SEPARATOR) {
                return Err(ConfigError::Invalid {
                    field: "default_contract",
                    reason: format!(
                        "'{}' must be non-empty and not contain '{}'",
                        name, NAMESPACE_SEPARATOR
                    ),
                });
            }
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Contract router configuration
#
# Namespace that bare function names (no "contract:" prefix) resolve against.
# When unset, the first contract registered without an explicit name is used,
# otherwise the first contract registered.
# default_contract = "simpleasset"

# Register the org.hyperledger.fabric system contract (GetMetadata).
system_contract = true

[metadata]
title = "undefined"
version = "latest"
"#
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema or a
    /// field value is unusable.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, Path::new(CONFIG_FILE_NAME))
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: RouterConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            reason: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
