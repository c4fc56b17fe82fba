//! Convert dotted-key programmatic overrides into a nested `serde_yaml::Mapping`.
//!
//! Each `("database.host", Value)` pair is expanded into the nested structure
//! needed for deep-merge with the other layers.

use std::collections::HashSet;

use confique::meta::{FieldKind, Meta};
use serde_yaml::{Mapping, Value};

/// Convert dotted-key overrides into a nested mapping.
///
/// `("database.host", Value::String("db"))` becomes `{database: {host: db}}`
///
/// If multiple entries target the same key, the last one wins.
pub fn overrides_to_mapping(entries: &[(String, Value)]) -> Mapping {
    let mut mapping = Mapping::new();
    for (dotted_key, value) in entries {
        set_nested(&mut mapping, dotted_key, value.clone());
    }
    mapping
}

fn set_nested(mapping: &mut Mapping, dotted_key: &str, value: Value) {
    let segments: Vec<&str> = dotted_key.split('.').collect();
    let Some((leaf, parents)) = segments.split_last() else {
        return;
    };

    let mut current = mapping;
    for segment in parents {
        let slot = current
            .entry(Value::String(segment.to_string()))
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        if !slot.is_mapping() {
            *slot = Value::Mapping(Mapping::new());
        }
        current = match slot {
            Value::Mapping(next) => next,
            _ => return,
        };
    }

    current.insert(Value::String(leaf.to_string()), value);
}

/// Collect all valid leaf key paths from a confique `Meta` tree.
///
/// Returns dotted paths like `"config_base_path"`, `"database.host"`,
/// `"app.max_workers"`. Section names (nested structs) are excluded; only leaf
/// fields are returned.
pub fn valid_keys(meta: &Meta) -> HashSet<String> {
    let mut keys = HashSet::new();
    collect_keys(meta, "", &mut keys);
    keys
}

fn collect_keys(meta: &Meta, prefix: &str, keys: &mut HashSet<String>) {
    for field in meta.fields {
        let dotted = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{prefix}.{}", field.name)
        };
        match &field.kind {
            FieldKind::Leaf { .. } => {
                keys.insert(dotted);
            }
            FieldKind::Nested { meta, .. } => {
                collect_keys(meta, &dotted, keys);
            }
        }
    }
}
