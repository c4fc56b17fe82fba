use std::collections::HashSet;

use serde_yaml::{Mapping, Value};

/// Build a nested mapping from environment variables that name settings keys.
///
/// Double underscore `__` separates nesting levels and single `_` is literal,
/// so `APP__MAX_WORKERS` binds to `app.max_workers`. Names are matched
/// case-insensitively. With a prefix, only `{PREFIX}__*` variables are
/// considered and the prefix is stripped first.
///
/// Only names that resolve to a key in `valid_keys` are kept; everything else
/// in the environment (`PATH`, `HOME`, ...) is ignored.
///
/// Values bound to a key in `text_keys` are kept verbatim. Everything else is
/// parsed heuristically: bool > integer > float > string.
///
/// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
pub fn env_to_mapping<'a>(
    prefix: Option<&str>,
    vars: impl IntoIterator<Item = &'a (String, String)>,
    valid_keys: &HashSet<String>,
    text_keys: &HashSet<String>,
) -> Mapping {
    let needle = prefix.map(|p| format!("{p}__"));
    let mut mapping = Mapping::new();

    for (key, value) in vars {
        let rest = match &needle {
            Some(needle) => match key.strip_prefix(needle.as_str()) {
                Some(rest) => rest,
                None => continue,
            },
            None => key.as_str(),
        };
        if rest.is_empty() {
            continue;
        }

        let segments: Vec<String> = rest.split("__").map(str::to_lowercase).collect();
        let dotted = segments.join(".");
        if !valid_keys.contains(&dotted) {
            continue;
        }
        tracing::debug!(var = %key, "binding environment variable");
        let value = if text_keys.contains(&dotted) {
            Value::String(value.clone())
        } else {
            parse_env_value(value)
        };
        insert_nested(&mut mapping, &segments, value);
    }

    mapping
}

/// Dotted paths of the text leaves in a serialized settings tree: strings and
/// unset optionals.
pub fn text_keys(tree: &Value) -> HashSet<String> {
    let mut keys = HashSet::new();
    if let Value::Mapping(mapping) = tree {
        collect_text_keys(mapping, "", &mut keys);
    }
    keys
}

fn collect_text_keys(mapping: &Mapping, prefix: &str, keys: &mut HashSet<String>) {
    for (key, value) in mapping {
        let Some(key) = key.as_str() else { continue };
        let dotted = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Mapping(nested) => collect_text_keys(nested, &dotted, keys),
            Value::String(_) | Value::Null => {
                keys.insert(dotted);
            }
            _ => {}
        }
    }
}

fn insert_nested(mapping: &mut Mapping, segments: &[String], value: Value) {
    debug_assert!(!segments.is_empty());

    let key = Value::String(segments[0].clone());

    if segments.len() == 1 {
        mapping.insert(key, value);
    } else {
        let sub = mapping
            .entry(key)
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        if let Value::Mapping(sub_mapping) = sub {
            insert_nested(sub_mapping, &segments[1..], value);
        }
    }
}

/// Parse an env var value into a typed YAML value.
/// Tries: bool → integer → float → string.
fn parse_env_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(f) = s.parse::<f64>() {
        // Only use float if the string actually contains a dot,
        // to avoid "NaN" / "inf" being parsed as float.
        if s.contains('.') {
            return Value::Number(f.into());
        }
    }
    Value::String(s.to_string())
}
