use std::path::PathBuf;

use thiserror::Error;

use crate::types::{ConfigLayer, Section};

#[derive(Debug, Error)]
pub enum LayerfigError {
    #[error("Unknown key '{key}'")]
    UnknownKey { key: String },

    #[error("Unknown keys in configuration: {}", join_errors(.0))]
    UnknownKeys(Vec<LayerfigError>),

    #[error("Failed to parse {layer} file {path}: {source}")]
    ParseError {
        layer: ConfigLayer,
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid [{section}] section: {reason}")]
    InvalidSection { section: Section, reason: String },

    #[error("Invalid settings: {}", join_errors(.0))]
    InvalidSections(Vec<LayerfigError>),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid description: {0}")]
    InvalidDescription(String),

    #[error("Directory already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn join_errors(errors: &[LayerfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_section_names_section() {
        let err = LayerfigError::InvalidSection {
            section: Section::Database,
            reason: "invalid type: string \"abc\", expected u16".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("[database]"));
        assert!(msg.contains("expected u16"));
    }

    #[test]
    fn invalid_sections_lists_every_failure() {
        let err = LayerfigError::InvalidSections(vec![
            LayerfigError::InvalidSection {
                section: Section::Database,
                reason: "bad port".into(),
            },
            LayerfigError::InvalidSection {
                section: Section::App,
                reason: "bad max_workers".into(),
            },
        ]);
        let msg = err.to_string();
        assert!(msg.contains("bad port"));
        assert!(msg.contains("bad max_workers"));
    }

    #[test]
    fn key_not_found_formats() {
        let err = LayerfigError::KeyNotFound("database.hots".into());
        assert!(err.to_string().contains("database.hots"));
    }

    #[test]
    fn already_exists_mentions_path() {
        let err = ScaffoldError::AlreadyExists("/tmp/skills/excel-handler".into());
        assert!(err.to_string().contains("excel-handler"));
    }
}
