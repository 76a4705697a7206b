//! Request-body and response schema extraction.

use serde_json::{Map, Value};

use crate::document::json_content_schema;
use crate::error::CompileError;
use crate::filter::{filter_read_only, filter_write_only};
use crate::options::FilterDepth;

/// Build `{"body": <schema>}` from an operation's `requestBody`.
///
/// Only JSON content contributes; read-only properties are stripped since
/// clients never submit server-assigned fields. Returns an empty map when
/// there is no JSON body.
pub fn build_request_body(
    request_body: Option<&Value>,
    depth: FilterDepth,
    context: &str,
) -> Result<Map<String, Value>, CompileError> {
    let mut out = Map::new();
    let Some(schema) = request_body.and_then(json_content_schema) else {
        return Ok(out);
    };

    let location = format!("{} requestBody", context);
    out.insert("body".to_string(), filter_read_only(schema, depth, &location)?);
    Ok(out)
}

/// Build `{"response": {<status>: <schema>, ...}}` from an operation's `responses`.
///
/// Keys (`200`, `4xx`, `default`, ...) are kept as declared. Entries without
/// JSON content are dropped, and write-only properties are stripped so
/// responses never echo client-only secrets. Returns an empty map when no
/// entry carries a JSON schema.
pub fn build_responses(
    responses: Option<&Value>,
    depth: FilterDepth,
    context: &str,
) -> Result<Map<String, Value>, CompileError> {
    let mut out = Map::new();
    let Some(responses) = responses.and_then(|r| r.as_object()) else {
        return Ok(out);
    };

    let mut by_status = Map::new();
    for (status, response) in responses {
        let Some(schema) = json_content_schema(response) else {
            continue;
        };
        let location = format!("{} responses/{}", context, status);
        by_status.insert(status.clone(), filter_write_only(schema, depth, &location)?);
    }

    if !by_status.is_empty() {
        out.insert("response".to_string(), Value::Object(by_status));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn request_body_strips_read_only_fields() {
        let body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": {
                        "type": "object",
                        "properties": { "id": { "type": "string", "readOnly": true }, "title": { "type": "string" } },
                        "required": ["id", "title"]
                    }
                }
            }
        });
        let out = build_request_body(Some(&body), FilterDepth::Shallow, "POST /docs").unwrap();
        assert_eq!(
            Value::Object(out),
            json!({
                "body": {
                    "type": "object",
                    "properties": { "title": { "type": "string" } },
                    "required": ["title"]
                }
            })
        );
    }

    #[test]
    fn non_json_or_missing_body_yields_nothing() {
        assert!(build_request_body(None, FilterDepth::Shallow, "GET /").unwrap().is_empty());

        let body = json!({ "content": { "multipart/form-data": { "schema": { "type": "object" } } } });
        assert!(build_request_body(Some(&body), FilterDepth::Shallow, "POST /upload")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn malformed_body_schema_names_the_operation() {
        let body = json!({ "content": { "application/json": { "schema": { "properties": "oops" } } } });
        let err = build_request_body(Some(&body), FilterDepth::Shallow, "POST /docs").unwrap_err();
        assert!(
            matches!(err, CompileError::MalformedSchema { ref location, .. } if location == "POST /docs requestBody"),
            "got: {:?}",
            err
        );
    }

    #[test]
    fn responses_keep_status_keys_and_strip_write_only() {
        let responses = json!({
            "200": {
                "description": "ok",
                "content": {
                    "application/json": {
                        "schema": {
                            "type": "object",
                            "properties": { "name": {}, "password": { "writeOnly": true } },
                            "required": ["name", "password"]
                        }
                    }
                }
            },
            "204": { "description": "no content" },
            "4xx": {
                "description": "client error",
                "content": { "application/problem+json": { "schema": { "type": "object" } } }
            }
        });
        let out = build_responses(Some(&responses), FilterDepth::Shallow, "GET /me").unwrap();
        assert_eq!(
            Value::Object(out),
            json!({
                "response": {
                    "200": { "type": "object", "properties": { "name": {} }, "required": ["name"] },
                    "4xx": { "type": "object" }
                }
            })
        );
    }

    #[test]
    fn responses_without_json_yield_nothing() {
        let responses = json!({
            "204": { "description": "no content" },
            "200": { "content": { "text/plain": { "schema": { "type": "string" } } } }
        });
        assert!(build_responses(Some(&responses), FilterDepth::Shallow, "GET /")
            .unwrap()
            .is_empty());
        assert!(build_responses(None, FilterDepth::Shallow, "GET /").unwrap().is_empty());
    }
}
