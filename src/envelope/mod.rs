pub mod registry;

pub use registry::{EnvelopeRegistry, GENERATED_MARKER};

use serde_json::Value;

use crate::response::ErrorInstance;

/// Reads the `errors` sequence out of a serialized envelope shape.
/// Returns `None` unless the shape is an object whose `errors` key holds
/// an array.
pub(crate) fn envelope_entries(shape: &Value) -> Option<&Vec<Value>> {
    shape.as_object()?.get("errors")?.as_array()
}

/// Walks a detected envelope shape and produces one [`ErrorInstance`] per
/// populated entry, in source order.
///
/// Null entries are skipped outright rather than rendered as blank
/// instances. Each surviving entry has `title`, `detail`, `id` and `code`
/// probed independently, so a partially populated entry still yields a
/// usable instance.
pub fn extract_instances(shape: &Value) -> Vec<ErrorInstance> {
    let Some(entries) = envelope_entries(shape) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter(|entry| !entry.is_null())
        .map(|entry| ErrorInstance {
            title: string_field(entry, "title").unwrap_or_default(),
            detail: string_field(entry, "detail"),
            id: string_field(entry, "id"),
            code: string_field(entry, "code"),
        })
        .collect()
}

/// Best-effort string read of a named entry field.
///
/// A missing key or a null reads as absent. Non-string shapes are rendered
/// as compact JSON rather than rejected: the entry types come from a codegen
/// pipeline this crate does not control, and a shape it has tolerated so far
/// must not start failing hard when that pipeline evolves.
fn string_field(entry: &Value, name: &str) -> Option<String> {
    match entry.get(name)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
