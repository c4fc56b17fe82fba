//! YAML layer loading.
//!
//! Each YAML layer is named by an environment variable holding a path
//! (`CONFIG_BASE_PATH`, `CONFIG_ENV_PATH` by default). Loading is split in two
//! so the resolve pipeline can stay free of I/O:
//!
//! - [`read_yaml_source`] does the file I/O and returns a [`YamlSource`].
//! - [`parse_yaml`] turns a source's content into a mapping.
//!
//! An unset or empty path variable, a missing file, an empty document, or a
//! document that is not a mapping all contribute an empty mapping. Only
//! malformed YAML and real I/O failures (permissions, etc.) are errors: a
//! named file that cannot be parsed is a misconfiguration, not an absence.

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::LayerfigError;
use crate::types::ConfigLayer;

/// Raw contents of one YAML layer. No parsing has happened yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YamlSource {
    /// The configured path, if the path variable was set and non-empty.
    pub path: Option<PathBuf>,
    /// File contents, `None` when no path was configured or the file is missing.
    pub content: Option<String>,
}

/// Look up a path variable in an environment snapshot.
/// Unset and empty values both mean "no file".
pub fn path_from_vars(vars: &[(String, String)], name: &str) -> Option<PathBuf> {
    vars.iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Read a YAML layer from disk. Missing files are silently skipped.
pub fn read_yaml_source(path: Option<PathBuf>) -> Result<YamlSource, LayerfigError> {
    let Some(path) = path else {
        return Ok(YamlSource::default());
    };
    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(YamlSource {
            path: Some(path),
            content: Some(content),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "config file not found, skipping");
            Ok(YamlSource {
                path: Some(path),
                content: None,
            })
        }
        Err(e) => Err(LayerfigError::IoError { path, source: e }),
    }
}

/// Parse a YAML layer into a mapping.
///
/// Null documents and non-mapping documents yield an empty mapping; malformed
/// YAML is a [`LayerfigError::ParseError`].
pub fn parse_yaml(layer: ConfigLayer, source: &YamlSource) -> Result<Mapping, LayerfigError> {
    let (Some(path), Some(content)) = (&source.path, &source.content) else {
        return Ok(Mapping::new());
    };
    if content.trim().is_empty() {
        return Ok(Mapping::new());
    }

    let value: Value = serde_yaml::from_str(content).map_err(|e| LayerfigError::ParseError {
        layer,
        path: path.clone(),
        source: e,
    })?;

    match value {
        Value::Mapping(mapping) => {
            tracing::debug!(%layer, path = %path.display(), keys = mapping.len(), "loaded config layer");
            Ok(mapping)
        }
        Value::Null => Ok(Mapping::new()),
        _ => {
            tracing::warn!(
                %layer,
                path = %path.display(),
                "config file is not a mapping, ignoring it"
            );
            Ok(Mapping::new())
        }
    }
}

/// Read and parse a single YAML file in one step.
///
/// `None`, an empty path, and a missing file all return an empty mapping.
pub fn load_yaml_file(layer: ConfigLayer, path: Option<&Path>) -> Result<Mapping, LayerfigError> {
    let path = path
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf);
    let source = read_yaml_source(path)?;
    parse_yaml(layer, &source)
}
