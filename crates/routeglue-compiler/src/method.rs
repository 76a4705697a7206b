//! Per-path-item compilation: one route descriptor per declared HTTP method.

use serde_json::Value;

use crate::body::{build_request_body, build_responses};
use crate::document::HTTP_METHODS;
use crate::error::{CompileError, MissingHandler};
use crate::handlers::{handler_name, HandlerRegistry};
use crate::options::CompileOptions;
use crate::params::map_parameters;
use crate::routes::{RouteDescriptor, RouteSchema};

/// Compiles the operations of path items against a handler registry.
pub struct MethodCompiler<'a, R: HandlerRegistry> {
    registry: &'a R,
    options: &'a CompileOptions,
}

impl<'a, R: HandlerRegistry> MethodCompiler<'a, R> {
    pub fn new(registry: &'a R, options: &'a CompileOptions) -> Self {
        Self { registry, options }
    }

    /// Compile every recognized method of `item`, in declared order.
    ///
    /// Every operation's schema is built, so schema errors surface whether or
    /// not a handler exists. Operations whose handler is missing are appended
    /// to `missing` and left out; the caller must not use the returned routes
    /// when `missing` is non-empty.
    pub fn compile_path_item(
        &self,
        path: &str,
        url: &str,
        item: &Value,
        missing: &mut Vec<MissingHandler>,
    ) -> Result<Vec<RouteDescriptor<R::Handler>>, CompileError> {
        let item_obj = item.as_object().ok_or_else(|| {
            CompileError::InvalidDocument(format!("path item for '{}' must be an object", path))
        })?;

        let shared_params = parameter_list(item_obj.get("parameters"), path)?;

        let mut routes = Vec::new();
        for (key, operation) in item_obj {
            if !HTTP_METHODS.contains(&key.as_str()) {
                continue;
            }
            let method = key.to_uppercase();
            let context = format!("{} {}", method, path);

            let op_obj = operation.as_object().ok_or_else(|| {
                CompileError::InvalidDocument(format!("operation {} must be an object", context))
            })?;

            let operation_id = op_obj
                .get("operationId")
                .and_then(|v| v.as_str())
                .ok_or_else(|| CompileError::MissingOperationId {
                    method: method.clone(),
                    path: path.to_string(),
                })?;
            let name = handler_name(operation_id);

            // Operation parameters first, then the path item's shared ones.
            let local_params = parameter_list(op_obj.get("parameters"), &context)?;
            let mut schema = map_parameters(
                local_params.iter().chain(shared_params.iter()),
                &context,
                self.options.derive_required_parameters,
            )?;
            schema.extend(build_request_body(
                op_obj.get("requestBody"),
                self.options.filter_depth,
                &context,
            )?);
            schema.extend(build_responses(
                op_obj.get("responses"),
                self.options.filter_depth,
                &context,
            )?);

            let Some(handler) = self.registry.handler(&name) else {
                missing.push(MissingHandler {
                    method,
                    path: path.to_string(),
                    operation_id: operation_id.to_string(),
                    handler_name: name,
                });
                continue;
            };

            tracing::debug!(method = %method, url, handler = %name, "compiled route");

            routes.push(RouteDescriptor {
                method,
                url: url.to_string(),
                path: path.to_string(),
                operation_id: operation_id.to_string(),
                handler_name: name,
                schema: RouteSchema::from(schema),
                handler,
            });
        }

        Ok(routes)
    }
}

/// The `parameters` array of a path item or operation (absent means none).
fn parameter_list<'v>(value: Option<&'v Value>, context: &str) -> Result<&'v [Value], CompileError> {
    match value {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(params)) => Ok(params.as_slice()),
        Some(_) => Err(CompileError::InvalidDocument(format!(
            "'parameters' of {} must be an array",
            context
        ))),
    }
}
