//! Inheritance merge logic
//!
//! Implements the parent/child merge for device and project entries:
//! - Objects: deep-merge by key (child wins per key)
//! - Arrays: REPLACE (child wins entirely)
//! - Scalars: override (child wins)

use serde_json::Value;

/// Merge a resolved parent entry with a child entry.
///
/// Merge semantics:
/// - Objects: deep-merge by key (recursive); attributes present only on the
///   parent propagate unchanged
/// - Arrays: REPLACE (child wins entirely)
/// - Scalars: override (child wins)
/// - Null: override (a child null can override any parent value)
pub fn merge_entries(parent: Value, child: Value) -> Value {
    match (parent, child) {
        // Both objects: deep merge, child entries take precedence
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, child_value) in overlay {
                let merged = match base.get_mut(&key) {
                    Some(slot) => merge_entries(slot.take(), child_value),
                    None => child_value,
                };
                // insert() reuses the existing slot, keeping key order stable
                base.insert(key, merged);
            }
            Value::Object(base)
        }

        // Scalars, arrays, and any other case: the child wins
        (_, child) => child,
    }
}
