//! Runtime configuration
//!
//! Where the model artifacts live and where the server listens.
//!
//! ## Configuration Resolution
//!
//! 1. Explicit path (`--config`), which must exist
//! 2. Override in the data dir (~/.local/share/spendwise/config/spendwise.toml)
//! 3. Embedded defaults (compiled into binary)
//!
//! Keys missing from a file keep their defaults. `SPENDWISE_MODEL_DIR`
//! replaces `artifacts.dir` after the file is read.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::artifacts::ArtifactPaths;
use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/spendwise.toml");

/// Environment variable that overrides the model directory
pub const MODEL_DIR_ENV: &str = "SPENDWISE_MODEL_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactConfig {
    pub dir: PathBuf,
    pub preprocessor: String,
    pub primary: String,
    pub secondary: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("models"),
            preprocessor: "preprocessor.json".to_string(),
            primary: "model_tree.json".to_string(),
            secondary: "model_mlp.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub artifacts: ArtifactConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Resolve the config file, then apply the environment override
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(path)?
            }
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::from_toml(DEFAULT_CONFIG)?,
            },
        };

        config.apply_model_dir(std::env::var(MODEL_DIR_ENV).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "Using config file");
        Self::from_toml(&content)
    }

    /// Parse TOML, keeping defaults for anything not set
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::default();

        if let Some(artifacts) = raw.artifacts {
            if let Some(dir) = artifacts.dir {
                config.artifacts.dir = dir;
            }
            if let Some(name) = artifacts.preprocessor {
                config.artifacts.preprocessor = name;
            }
            if let Some(name) = artifacts.primary {
                config.artifacts.primary = name;
            }
            if let Some(name) = artifacts.secondary {
                config.artifacts.secondary = name;
            }
        }

        if let Some(server) = raw.server {
            if let Some(host) = server.host {
                config.server.host = host;
            }
            if let Some(port) = server.port {
                config.server.port = port;
            }
        }

        Ok(config)
    }

    /// Replace the model directory when a non-empty value is given
    pub fn apply_model_dir(&mut self, dir: Option<String>) {
        if let Some(dir) = dir.filter(|d| !d.trim().is_empty()) {
            self.artifacts.dir = PathBuf::from(dir);
        }
    }

    /// Full paths of the three artifacts
    pub fn artifact_paths(&self) -> ArtifactPaths {
        let dir = &self.artifacts.dir;
        ArtifactPaths {
            preprocessor: dir.join(&self.artifacts.preprocessor),
            primary: dir.join(&self.artifacts.primary),
            secondary: dir.join(&self.artifacts.secondary),
        }
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("spendwise").join("config").join("spendwise.toml"))
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    artifacts: Option<RawArtifacts>,
    server: Option<RawServer>,
}

#[derive(Debug, Deserialize)]
struct RawArtifacts {
    dir: Option<PathBuf>,
    preprocessor: Option<String>,
    primary: Option<String>,
    secondary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawServer {
    host: Option<String>,
    port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_config() {
        let config = Config::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_toml("[server]\nport = 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.artifacts.primary, "model_tree.json");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml("[server\nport = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_model_dir_override() {
        let mut config = Config::default();
        config.apply_model_dir(Some("/srv/models".to_string()));
        assert_eq!(
            config.artifact_paths().secondary,
            PathBuf::from("/srv/models/model_mlp.json")
        );

        config.apply_model_dir(Some("  ".to_string()));
        assert_eq!(config.artifacts.dir, PathBuf::from("/srv/models"));
        config.apply_model_dir(None);
        assert_eq!(config.artifacts.dir, PathBuf::from("/srv/models"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spendwise.toml");
        std::fs::write(
            &path,
            "[artifacts]\ndir = \"/opt/spendwise\"\nprimary = \"trees.json\"\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(
            config.artifact_paths().primary,
            PathBuf::from("/opt/spendwise/trees.json")
        );
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
