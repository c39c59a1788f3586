//! Source-file collaborator: discovery and YAML decoding.
//!
//! The flattener itself never touches the filesystem; this module hands it
//! decoded record trees one at a time. Discovery returns paths in sorted
//! order so that identifier assignment is deterministic across runs of the
//! same directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::error::{SourceError, SourceResult};

/// List the `*.yaml` match files directly under `dir`, sorted by path.
///
/// Other file extensions and subdirectories are ignored. An empty directory
/// yields an empty list (and, downstream, header-only tables).
pub fn discover(dir: &Path) -> SourceResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| SourceError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SourceError::Io {
            path: dir.display().to_string(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "yaml") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Decode one match file into a YAML value tree.
pub fn decode_file(path: &Path) -> SourceResult<Value> {
    let content = fs::read_to_string(path).map_err(|e| SourceError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_yaml::from_str(&content).map_err(|e| SourceError::Yaml {
        path: path.display().to_string(),
        source: e,
    })
}
