//! Build version metadata.
//!
//! The version substituted for `{{version}}` (used for cache-busting asset
//! links) comes from a small JSON file:
//!
//! ```json
//! { "version": "1.4.0" }
//! ```
//!
//! Both the file and the field are required.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Version file not found: {0}")]
    Missing(PathBuf),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid version file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Version file {0} has no non-empty \"version\" field")]
    MissingField(PathBuf),
}

#[derive(Debug, Deserialize)]
struct VersionFile {
    version: Option<String>,
}

/// Read the `version` field from `path`.
pub fn load_version(path: &Path) -> Result<String, VersionError> {
    if !path.is_file() {
        return Err(VersionError::Missing(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|source| VersionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: VersionFile = serde_json::from_str(&content).map_err(|source| VersionError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    file.version
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| VersionError::MissingField(path.to_path_buf()))
}
