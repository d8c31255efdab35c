//! Output projector
//!
//! Two steps, both optional:
//! - unwrap: replace an object with its `result` field
//! - select: keep only the requested paths, rebuilding the nesting
//!
//! Paths that do not resolve are skipped silently. JSON `null` counts as a
//! present value; only objects are walked, so a path through an array or a
//! scalar does not resolve.

use serde_json::{Map, Value};
use suitegate_domain::constants::RESULT_FIELD;
use suitegate_domain::{FieldPath, ProjectionSpec};

/// Reshapes service responses for output
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputProjector;

impl OutputProjector {
    /// Create a projector
    pub fn new() -> Self {
        Self
    }

    /// Apply `spec` to `value`; an identity spec returns it unchanged
    pub fn project(&self, value: Value, spec: &ProjectionSpec) -> Value {
        let value = if spec.results_only { unwrap_result(value) } else { value };

        if spec.select().is_empty() {
            return value;
        }

        let mut out = Map::new();
        for path in spec.select() {
            if let Some(found) = lookup(&value, path) {
                insert(&mut out, path.segments(), found.clone());
            }
        }
        Value::Object(out)
    }
}

fn unwrap_result(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key(RESULT_FIELD) => {
            map.remove(RESULT_FIELD).unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn lookup<'v>(value: &'v Value, path: &FieldPath) -> Option<&'v Value> {
    path.segments().iter().try_fold(value, |current, segment| current.as_object()?.get(segment))
}

fn insert(out: &mut Map<String, Value>, segments: &[String], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut cursor = out;
    for segment in parents {
        let slot = cursor.entry(segment.clone()).or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else {
            return;
        };
        cursor = next;
    }
    cursor.insert(last.clone(), value);
}
