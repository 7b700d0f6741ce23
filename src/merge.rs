//! Deep-merge over JSON documents.
//!
//! Inheritance merge rules: mappings combine key-by-key with the child
//! winning per field, while sequences and scalars present in the child
//! replace the parent value outright.

use serde_json::Value;

/// Deep merge two JSON values, `child` taking precedence.
///
/// Nested mappings merge recursively: a project's `stages` mapping merges
/// stage-by-stage rather than being replaced wholesale. Sequences and scalars
/// present in the child replace the parent value outright.
pub fn deep_merge(parent: Value, child: Value) -> Value {
    match (parent, child) {
        (Value::Object(mut parent_map), Value::Object(child_map)) => {
            for (key, child_value) in child_map {
                let merged = if let Some(parent_value) = parent_map.remove(&key) {
                    deep_merge(parent_value, child_value)
                } else {
                    child_value
                };
                parent_map.insert(key, merged);
            }
            Value::Object(parent_map)
        }

        // Sequences never concatenate; the child's list stands alone.
        (Value::Array(_), child @ Value::Array(_)) => child,

        (_, child) => child,
    }
}

/// Merge an inheritance chain in order (first is the eldest ancestor, last is
/// the child and has highest precedence).
pub fn merge_chain(chain: Vec<Value>) -> Value {
    chain.into_iter().fold(Value::Null, deep_merge)
}
