//! Dest-biased deep merge of JSON values.
//!
//! Used for inheritance (`tm:extends`) and inline references (`tm:ref`).
//! The destination always wins: a value already present locally is never
//! replaced by an inherited or referenced one.

use serde_json::{Map, Value};

use crate::domain::error::{DomainError, kind_of};

/// Merge `src` into `dest`.
///
/// - object into object: shared keys merge recursively, missing keys are
///   inserted
/// - anything into a list: no-op, lists are never merged
/// - object against a non-object (either side): a
///   [`DomainError::ShapeMismatch`] is recorded and that step is skipped
/// - scalar collisions keep `dest`
///
/// Conflicts never abort the merge. They are returned so the caller can log
/// them.
pub fn merge(dest: &mut Value, src: Value, depth: usize) -> Vec<DomainError> {
    let mut conflicts = Vec::new();
    merge_into(dest, src, depth, &mut conflicts);
    conflicts
}

/// [`merge`] into an object that is not wrapped in a [`Value`].
pub fn merge_object(
    dest: &mut Map<String, Value>,
    src: Value,
    depth: usize,
) -> Vec<DomainError> {
    let mut conflicts = Vec::new();
    match src {
        Value::Object(src_map) => merge_maps(dest, src_map, depth, &mut conflicts),
        other => conflicts.push(DomainError::ShapeMismatch {
            dest: "object",
            src: kind_of(&other),
            depth,
        }),
    }
    conflicts
}

fn merge_maps(
    dest: &mut Map<String, Value>,
    src: Map<String, Value>,
    depth: usize,
    conflicts: &mut Vec<DomainError>,
) {
    for (key, element) in src {
        match dest.get_mut(&key) {
            Some(existing) => merge_into(existing, element, depth + 1, conflicts),
            None => {
                dest.insert(key, element);
            }
        }
    }
}

fn merge_into(dest: &mut Value, src: Value, depth: usize, conflicts: &mut Vec<DomainError>) {
    match (dest, src) {
        (Value::Object(dest_map), Value::Object(src_map)) => {
            merge_maps(dest_map, src_map, depth, conflicts);
        }
        (Value::Array(_), _) => {}
        (dest @ Value::Object(_), src) | (dest, src @ Value::Object(_)) => {
            conflicts.push(DomainError::ShapeMismatch {
                dest: kind_of(dest),
                src: kind_of(&src),
                depth,
            });
        }
        _ => {}
    }
}
