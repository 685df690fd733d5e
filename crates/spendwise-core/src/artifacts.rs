//! Model artifact files
//!
//! Reading and fingerprinting of the three fitted artifacts. Any failure here
//! is reported as [`Error::ModelLoad`] so startup aborts before serving.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Which pipeline slot an artifact fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactRole {
    Preprocessor,
    Primary,
    Secondary,
}

impl ArtifactRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preprocessor => "preprocessor",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl std::fmt::Display for ArtifactRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Locations of the three artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub preprocessor: PathBuf,
    pub primary: PathBuf,
    pub secondary: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside a model directory
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            preprocessor: dir.join("preprocessor.json"),
            primary: dir.join("model_tree.json"),
            secondary: dir.join("model_mlp.json"),
        }
    }

    pub fn path_for(&self, role: ArtifactRole) -> &Path {
        match role {
            ArtifactRole::Preprocessor => &self.preprocessor,
            ArtifactRole::Primary => &self.primary,
            ArtifactRole::Secondary => &self.secondary,
        }
    }
}

/// Identity of a loaded artifact, reported by health checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactInfo {
    pub role: ArtifactRole,
    pub path: String,
    /// Hex-encoded SHA-256 of the file contents
    pub sha256: String,
    pub bytes: u64,
}

impl ArtifactInfo {
    /// First 12 hex digits, enough to tell artifacts apart in logs
    pub fn short_digest(&self) -> &str {
        &self.sha256[..self.sha256.len().min(12)]
    }
}

/// Read an artifact file and fingerprint its contents
pub fn read_artifact(role: ArtifactRole, path: &Path) -> Result<(String, ArtifactInfo)> {
    let contents = fs::read_to_string(path).map_err(|e| {
        Error::model_load(
            path.display().to_string(),
            format!("cannot read {} artifact: {}", role, e),
        )
    })?;

    let info = ArtifactInfo {
        role,
        path: path.display().to_string(),
        sha256: sha256_hex(contents.as_bytes()),
        bytes: contents.len() as u64,
    };

    tracing::debug!(
        role = %role,
        path = %info.path,
        sha256 = %info.short_digest(),
        bytes = info.bytes,
        "Read model artifact"
    );

    Ok((contents, info))
}

pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
