//! Helpers over the loosely-typed document tree.
//!
//! The compiler works on `serde_json::Value` throughout; key order follows the
//! source document (`preserve_order`), which keeps route output deterministic.

use serde_json::{Map, Value};

use crate::error::{CompileError, OrphanRef};

/// HTTP methods recognized on a path item.
pub const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Prefix shared by every internal component pointer.
pub const COMPONENTS_PREFIX: &str = "#/components/";

/// Return the `$ref` target if this node is a reference object.
pub fn ref_target(value: &Value) -> Option<&str> {
    value.as_object()?.get("$ref")?.as_str()
}

/// Build the pointer naming `key` inside component `group`.
pub fn component_pointer(group: &str, key: &str) -> String {
    format!(
        "{}{}/{}",
        COMPONENTS_PREFIX,
        escape_pointer_segment(group),
        escape_pointer_segment(key)
    )
}

/// Escape a JSON Pointer segment (`~` -> `~0`, `/` -> `~1`).
pub fn escape_pointer_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Make sure the root is an object with a `components` registry set.
///
/// A missing `components` key defaults to an empty object.
pub fn ensure_components(doc: &mut Value) -> Result<(), CompileError> {
    let root = doc
        .as_object_mut()
        .ok_or_else(|| CompileError::InvalidDocument("document root must be an object".into()))?;

    let components = root
        .entry("components")
        .or_insert_with(|| Value::Object(Map::new()));
    if components.is_null() {
        *components = Value::Object(Map::new());
    }
    if !components.is_object() {
        return Err(CompileError::InvalidDocument(
            "'components' must be an object".into(),
        ));
    }
    Ok(())
}

/// Collect every `$ref` string left in `value`, with the JSON pointer of the
/// node holding it.
pub fn collect_refs(value: &Value, location: &str, out: &mut Vec<OrphanRef>) {
    match value {
        Value::Object(obj) => {
            if let Some(pointer) = obj.get("$ref").and_then(|v| v.as_str()) {
                out.push(OrphanRef {
                    pointer: pointer.to_string(),
                    location: if location.is_empty() {
                        "/".to_string()
                    } else {
                        location.to_string()
                    },
                });
            }
            for (key, child) in obj {
                let child_location = format!("{}/{}", location, escape_pointer_segment(key));
                collect_refs(child, &child_location, out);
            }
        }
        Value::Array(arr) => {
            for (idx, child) in arr.iter().enumerate() {
                collect_refs(child, &format!("{}/{}", location, idx), out);
            }
        }
        _ => {}
    }
}

/// Whether a media type carries JSON (`application/json`, `application/*+json`,
/// with or without parameters).
pub fn is_json_media_type(media_type: &str) -> bool {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Schema of the first JSON media type under `node.content`.
pub fn json_content_schema(node: &Value) -> Option<&Value> {
    node.get("content")?
        .as_object()?
        .iter()
        .find(|(media_type, _)| is_json_media_type(media_type))
        .and_then(|(_, media)| media.get("schema"))
}
