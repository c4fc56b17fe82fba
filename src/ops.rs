//! Settings operations: template generation, key lookup, listing, and result types.
//!
//! Provides the logic behind `list`, `gen`, `get` and `url`, plus the
//! `ConfigResult` enum that callers use to display results.

use std::fmt;
use std::path::PathBuf;

use confique::Config;
use confique::meta::{FieldKind, Meta};
use serde_yaml::{Mapping, Value};

use crate::error::LayerfigError;
use crate::settings::Settings;

/// Keys whose values are never printed by [`list_values`].
const REDACTED_KEYS: &[&str] = &["database.password"];

/// Result of a settings operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// A generated YAML template string.
    Template(String),
    /// Confirmation that a template was written to a file.
    TemplateWritten { path: PathBuf },
    /// A key's resolved value and its doc comment.
    KeyValue {
        key: String,
        value: String,
        doc: Vec<String>,
    },
    /// All resolved key-value pairs.
    Listing { entries: Vec<(String, String)> },
    /// The derived database connection string.
    Url(String),
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::Template(t) => write!(f, "{}", t.trim_end()),
            ConfigResult::TemplateWritten { path } => {
                write!(f, "Settings template written to {}", path.display())
            }
            ConfigResult::KeyValue { key, value, doc } => {
                for line in doc {
                    writeln!(f, "# {line}")?;
                }
                write!(f, "{key} = {value}")
            }
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
            ConfigResult::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Generate a commented YAML template from the schema's doc comments and defaults.
pub fn generate_template() -> String {
    confique::yaml::template::<Settings>(confique::yaml::FormatOptions::default())
}

/// Get a resolved value by dotted key, including its doc comment.
pub fn get_value(settings: &Settings, key: &str) -> Result<ConfigResult, LayerfigError> {
    let root = to_mapping(settings, key)?;
    let value = mapping_get(&root, key).ok_or_else(|| LayerfigError::KeyNotFound(key.into()))?;

    Ok(ConfigResult::KeyValue {
        key: key.into(),
        value: format_value(value),
        doc: lookup_doc(&Settings::META, key),
    })
}

/// List all resolved values as flattened dotted key-value pairs.
///
/// Unset optional values show as `<not set>`; a non-empty password shows as
/// `<redacted>`.
pub fn list_values(settings: &Settings) -> Result<ConfigResult, LayerfigError> {
    let root = to_mapping(settings, "<list>")?;
    let mut entries = Vec::new();
    flatten_into(&root, "", &mut entries);
    Ok(ConfigResult::Listing { entries })
}

fn to_mapping(settings: &Settings, key: &str) -> Result<Mapping, LayerfigError> {
    match serde_yaml::to_value(settings) {
        Ok(Value::Mapping(mapping)) => Ok(mapping),
        Ok(_) => Err(LayerfigError::InvalidValue {
            key: key.into(),
            reason: "settings did not serialize to a mapping".into(),
        }),
        Err(e) => Err(LayerfigError::InvalidValue {
            key: key.into(),
            reason: e.to_string(),
        }),
    }
}

fn flatten_into(mapping: &Mapping, prefix: &str, entries: &mut Vec<(String, String)>) {
    for (key, value) in mapping {
        let key = format_value(key);
        let dotted = if prefix.is_empty() {
            key
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Mapping(nested) => flatten_into(nested, &dotted, entries),
            Value::Null => entries.push((dotted, "<not set>".to_string())),
            Value::String(s) if !s.is_empty() && REDACTED_KEYS.contains(&dotted.as_str()) => {
                entries.push((dotted, "<redacted>".to_string()))
            }
            other => {
                let display = format_value(other);
                entries.push((dotted, display));
            }
        }
    }
}

/// Navigate a mapping by dotted key path (e.g. `"database.host"`).
pub fn mapping_get<'a>(mapping: &'a Mapping, dotted_key: &str) -> Option<&'a Value> {
    let (path, leaf) = match dotted_key.rsplit_once('.') {
        Some((p, l)) => (Some(p), l),
        None => (None, dotted_key),
    };

    let map = match path {
        Some(path) => {
            let mut current = mapping;
            for segment in path.split('.') {
                current = current.get(segment)?.as_mapping()?;
            }
            current
        }
        None => mapping,
    };

    map.get(leaf)
}

/// Format a YAML value for display.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "<not set>".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{other:?}")),
    }
}

/// Walk confique's `Meta` tree to find the doc comment for a dotted key path.
fn lookup_doc(meta: &Meta, dotted_key: &str) -> Vec<String> {
    let segments: Vec<&str> = dotted_key.split('.').collect();
    lookup_doc_recursive(meta, &segments)
}

fn lookup_doc_recursive(meta: &Meta, segments: &[&str]) -> Vec<String> {
    let Some((first, rest)) = segments.split_first() else {
        return vec![];
    };

    for field in meta.fields {
        if field.name == *first {
            if rest.is_empty() {
                return field.doc.iter().map(|s| s.trim().to_string()).collect();
            }
            if let FieldKind::Nested { meta: nested, .. } = &field.kind {
                return lookup_doc_recursive(nested, rest);
            }
        }
    }
    vec![]
}
