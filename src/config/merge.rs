//! Deep merge functionality for YAML configuration trees.
//!
//! Implements field-by-field merging where override values win over base
//! values. Sequences are replaced entirely, not concatenated, and an
//! explicit null override replaces the base value rather than unsetting it.

use serde_yaml::{Mapping, Value};

/// Deep merge two YAML values, with `overlay` taking precedence over `base`.
///
/// - Mappings are merged recursively: keys in overlay override keys in base.
///   Base keys keep their position; keys new in overlay append in overlay
///   order.
/// - Sequences, strings, numbers, booleans, and nulls are replaced entirely.
///   An explicit null overlay sets the value to null (it does not delete
///   the key and it does not preserve the base).
///
/// # Example
/// ```
/// use serde_yaml::Value;
/// use config_cascade::config::merge_two;
///
/// let base: Value = serde_yaml::from_str("server: {port: 8080, host: localhost}").unwrap();
/// let overlay: Value = serde_yaml::from_str("server: {port: 9000}").unwrap();
/// let merged = merge_two(base, overlay);
/// assert_eq!(merged["server"]["port"], Value::from(9000));
/// assert_eq!(merged["server"]["host"], Value::from("localhost"));
/// ```
pub fn merge_two(base: Value, overlay: Value) -> Value {
    let mut base = base;
    merge_into(&mut base, overlay);
    base
}

/// Merge multiple trees in order, with later trees taking precedence.
///
/// An empty iterator yields an empty mapping; a single tree is returned
/// unchanged.
pub fn merge_all(trees: impl IntoIterator<Item = Value>) -> Value {
    trees
        .into_iter()
        .fold(Value::Mapping(Mapping::new()), merge_two)
}

/// Recursive worker. Mutates only the owned accumulator, so callers' trees
/// are never touched.
fn merge_into(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_into(existing, overlay_value),
                    None => {
                        base_map.insert(key, overlay_value);
                    }
                }
            }
        }
        (slot, overlay) => *slot = overlay,
    }
}
