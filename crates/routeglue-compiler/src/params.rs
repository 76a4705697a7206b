//! Parameter grouping by transport location.
//!
//! Declared parameters are folded left to right into one object schema per
//! location. A name declared twice in the same location keeps the later
//! declaration's schema.

use serde_json::{json, Map, Value};

use crate::error::CompileError;

/// Where a parameter travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    /// Parse an OpenAPI `in` value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            "cookie" => Some(Self::Cookie),
            _ => None,
        }
    }

    /// Key of this location in a route schema.
    pub fn schema_key(self) -> &'static str {
        match self {
            Self::Path => "params",
            Self::Query => "querystring",
            Self::Header => "header",
            Self::Cookie => "cookie",
        }
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Query => write!(f, "query"),
            ParameterLocation::Header => write!(f, "header"),
            ParameterLocation::Cookie => write!(f, "cookie"),
        }
    }
}

#[derive(Debug, Default)]
struct LocationGroup {
    properties: Map<String, Value>,
    required: Vec<String>,
}

/// Fold `parameters` into per-location object schemas.
///
/// The result maps `params` / `querystring` / `header` / `cookie` to
/// `{"type": "object", "properties": {...}}`, in order of first appearance.
/// With `derive_required`, a `required` array lists parameters flagged
/// `required: true`; path parameters always count as required.
pub fn map_parameters<'a>(
    parameters: impl IntoIterator<Item = &'a Value>,
    context: &str,
    derive_required: bool,
) -> Result<Map<String, Value>, CompileError> {
    let mut groups: Vec<(ParameterLocation, LocationGroup)> = Vec::new();

    for (idx, param) in parameters.into_iter().enumerate() {
        let location = || format!("{} parameters[{}]", context, idx);

        let param_obj = param.as_object().ok_or_else(|| CompileError::InvalidParameter {
            location: location(),
            reason: "parameter must be an object".into(),
        })?;
        let name = param_obj
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| CompileError::InvalidParameter {
                location: location(),
                reason: "missing 'name'".into(),
            })?;
        let raw_in = param_obj
            .get("in")
            .and_then(|v| v.as_str())
            .ok_or_else(|| CompileError::InvalidParameter {
                location: location(),
                reason: format!("parameter '{}' is missing 'in'", name),
            })?;
        let param_in =
            ParameterLocation::parse(raw_in).ok_or_else(|| CompileError::InvalidParameter {
                location: location(),
                reason: format!("parameter '{}' has unsupported location '{}'", name, raw_in),
            })?;

        let schema = parameter_schema(param_obj);
        let required = param_in == ParameterLocation::Path
            || param_obj
                .get("required")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);

        let group = match groups.iter_mut().position(|(loc, _)| *loc == param_in) {
            Some(pos) => &mut groups[pos].1,
            None => {
                groups.push((param_in, LocationGroup::default()));
                let last = groups.len() - 1;
                &mut groups[last].1
            }
        };

        if group.properties.insert(name.to_string(), schema).is_some() {
            tracing::warn!(
                context,
                parameter = name,
                location = %param_in,
                "parameter declared twice, keeping the later declaration"
            );
            group.required.retain(|n| n != name);
        }
        if required {
            group.required.push(name.to_string());
        }
    }

    let mut out = Map::new();
    for (loc, group) in groups {
        let mut schema = json!({
            "type": "object",
            "properties": Value::Object(group.properties),
        });
        if derive_required && !group.required.is_empty() {
            schema["required"] = json!(group.required);
        }
        out.insert(loc.schema_key().to_string(), schema);
    }
    Ok(out)
}

/// The parameter's schema, or the first `content` entry's schema, or `{}`.
fn parameter_schema(param: &Map<String, Value>) -> Value {
    if let Some(schema) = param.get("schema") {
        return schema.clone();
    }
    param
        .get("content")
        .and_then(|c| c.as_object())
        .and_then(|c| c.values().next())
        .and_then(|media| media.get("schema"))
        .cloned()
        .unwrap_or_else(|| json!({}))
}
