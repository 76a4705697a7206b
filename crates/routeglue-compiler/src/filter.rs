//! Read-only / write-only property filtering.
//!
//! Request schemas drop `readOnly` properties (server-assigned fields), response
//! schemas drop `writeOnly` properties (client-only secrets). Removed names are
//! pruned from `required` as well. By default only the top-level property set
//! is inspected, or the `items` property set for array schemas.
//!
//! Schemas with nothing to filter (scalars, free-form objects, compositions)
//! pass through. A schema whose filtering structure is missing or wrong-typed
//! is malformed: an array without `items`, a `required` list without
//! `properties`, or a non-object `properties` / `items`.

use serde_json::{Map, Value};

use crate::error::CompileError;
use crate::options::FilterDepth;

const COMPOSITION_KEYS: [&str; 3] = ["allOf", "anyOf", "oneOf"];

/// Property flag a filter removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessFlag {
    ReadOnly,
    WriteOnly,
}

impl AccessFlag {
    fn key(self) -> &'static str {
        match self {
            Self::ReadOnly => "readOnly",
            Self::WriteOnly => "writeOnly",
        }
    }
}

/// Remove every property flagged `readOnly: true` (request use).
pub fn filter_read_only(
    schema: &Value,
    depth: FilterDepth,
    location: &str,
) -> Result<Value, CompileError> {
    filter_schema(schema, AccessFlag::ReadOnly, depth, location)
}

/// Remove every property flagged `writeOnly: true` (response use).
pub fn filter_write_only(
    schema: &Value,
    depth: FilterDepth,
    location: &str,
) -> Result<Value, CompileError> {
    filter_schema(schema, AccessFlag::WriteOnly, depth, location)
}

/// Filter `schema`, leaving every key other than `properties` / `required`
/// (or `items.properties` / `items.required`) untouched.
pub fn filter_schema(
    schema: &Value,
    flag: AccessFlag,
    depth: FilterDepth,
    location: &str,
) -> Result<Value, CompileError> {
    let obj = schema.as_object().ok_or_else(|| malformed(location, "schema must be an object"))?;
    if obj.is_empty() {
        return Ok(schema.clone());
    }

    if is_array_schema(obj) {
        let items = obj
            .get("items")
            .ok_or_else(|| malformed(location, "array schema has no 'items'"))?;
        let items_location = format!("{}/items", location);
        let items_obj = items
            .as_object()
            .ok_or_else(|| malformed(&items_location, "'items' must be an object"))?;

        let mut out = obj.clone();
        out.insert(
            "items".to_string(),
            Value::Object(filter_level(items_obj, flag, depth, &items_location)?),
        );
        return Ok(Value::Object(out));
    }

    Ok(Value::Object(filter_level(obj, flag, depth, location)?))
}

/// Filter one property set.
fn filter_level(
    obj: &Map<String, Value>,
    flag: AccessFlag,
    depth: FilterDepth,
    location: &str,
) -> Result<Map<String, Value>, CompileError> {
    let mut out = obj.clone();

    if !obj.contains_key("properties")
        && obj.contains_key("required")
        && !COMPOSITION_KEYS.iter().any(|key| obj.contains_key(*key))
    {
        return Err(malformed(location, "'required' is declared without 'properties'"));
    }

    if let Some(properties) = obj.get("properties") {
        let properties = properties
            .as_object()
            .ok_or_else(|| malformed(location, "'properties' must be an object"))?;

        let mut kept = Map::with_capacity(properties.len());
        let mut removed = Vec::new();
        for (name, prop) in properties {
            if prop.get(flag.key()).and_then(|v| v.as_bool()) == Some(true) {
                removed.push(name.as_str());
                continue;
            }
            let prop = match depth {
                FilterDepth::Recursive if prop.is_object() => {
                    let prop_location = format!("{}/properties/{}", location, name);
                    filter_schema(prop, flag, depth, &prop_location)?
                }
                _ => prop.clone(),
            };
            kept.insert(name.clone(), prop);
        }
        out.insert("properties".to_string(), Value::Object(kept));

        if let Some(required) = obj.get("required") {
            let required = required
                .as_array()
                .ok_or_else(|| malformed(location, "'required' must be an array"))?;
            let pruned: Vec<Value> = required
                .iter()
                .filter(|name| !name.as_str().is_some_and(|n| removed.contains(&n)))
                .cloned()
                .collect();
            out.insert("required".to_string(), Value::Array(pruned));
        }
    }

    if depth == FilterDepth::Recursive {
        if let Some(additional) = obj.get("additionalProperties").filter(|v| v.is_object()) {
            let nested = format!("{}/additionalProperties", location);
            out.insert(
                "additionalProperties".to_string(),
                filter_schema(additional, flag, depth, &nested)?,
            );
        }
        for key in COMPOSITION_KEYS {
            if let Some(Value::Array(members)) = obj.get(key) {
                let mut filtered = Vec::with_capacity(members.len());
                for (idx, member) in members.iter().enumerate() {
                    if member.is_object() {
                        let nested = format!("{}/{}/{}", location, key, idx);
                        filtered.push(filter_schema(member, flag, depth, &nested)?);
                    } else {
                        filtered.push(member.clone());
                    }
                }
                out.insert(key.to_string(), Value::Array(filtered));
            }
        }
    }

    Ok(out)
}

fn is_array_schema(obj: &Map<String, Value>) -> bool {
    match obj.get("type") {
        Some(Value::String(t)) => t == "array",
        Some(Value::Array(types)) => types.iter().any(|t| t == "array"),
        _ => false,
    }
}

fn malformed(location: &str, reason: &str) -> CompileError {
    CompileError::MalformedSchema {
        location: location.to_string(),
        reason: reason.to_string(),
    }
}
