use serde_yaml::{Mapping, Value};

/// Deep-merge `overlay` on top of `base`, returning a new mapping.
/// If both sides have a mapping for the same key, recurse.
/// Otherwise, `overlay`'s value wins, sequences and nulls included.
///
/// Neither input is modified, so `base` can be reused for further merges.
pub fn deep_merge(base: &Mapping, overlay: &Mapping) -> Mapping {
    let mut merged = base.clone();
    for (key, overlay_val) in overlay {
        let replacement = match (merged.get(key), overlay_val) {
            (Some(Value::Mapping(base_map)), Value::Mapping(overlay_map)) => {
                Value::Mapping(deep_merge(base_map, overlay_map))
            }
            (_, overlay_val) => overlay_val.clone(),
        };
        merged.insert(key.clone(), replacement);
    }
    merged
}
