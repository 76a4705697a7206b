use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CompileError;
use crate::handlers::HandlerRegistry;
use crate::method::MethodCompiler;
use crate::options::CompileOptions;
use crate::path::{to_route_pattern, with_prefix};
use crate::resolver::resolve_references;

/// Validation schema of one route.
///
/// Keys are `params`, `querystring`, `header`, `cookie`, `body` and
/// `response`; each is present only when the operation declares it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RouteSchema(Map<String, Value>);

impl RouteSchema {
    pub fn params(&self) -> Option<&Value> {
        self.0.get("params")
    }

    pub fn querystring(&self) -> Option<&Value> {
        self.0.get("querystring")
    }

    pub fn header(&self) -> Option<&Value> {
        self.0.get("header")
    }

    pub fn cookie(&self) -> Option<&Value> {
        self.0.get("cookie")
    }

    pub fn body(&self) -> Option<&Value> {
        self.0.get("body")
    }

    /// Response schemas keyed by status code or class (`200`, `4xx`, `default`).
    pub fn response(&self) -> Option<&Value> {
        self.0.get("response")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for RouteSchema {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A compiled, ready-to-register route.
///
/// Serializes without the handler, for tooling output.
#[derive(Debug, Clone, Serialize)]
pub struct RouteDescriptor<H> {
    /// Upper-cased HTTP method.
    pub method: String,
    /// Routing pattern (`/docs/:id`), prefix included.
    pub url: String,
    /// Path template as declared (`/docs/{id}`).
    pub path: String,
    pub operation_id: String,
    /// Registry key the handler was found under.
    pub handler_name: String,
    pub schema: RouteSchema,
    #[serde(skip)]
    pub handler: H,
}

/// Resolve every internal reference and return the self-contained document.
pub fn resolve_document(mut document: Value) -> Result<Value, CompileError> {
    resolve_references(&mut document)?;
    Ok(document)
}

/// Compile a document into route descriptors with default options.
pub fn compile_routes<R: HandlerRegistry>(
    document: Value,
    registry: &R,
) -> Result<Vec<RouteDescriptor<R::Handler>>, CompileError> {
    compile_routes_with_options(document, registry, &CompileOptions::default())
}

/// Compile a document into route descriptors.
///
/// References are resolved once over the whole document, then every path
/// item is compiled in document order. Any error, including handlers missing
/// from `registry`, fails the whole run: no partial route set is returned.
/// When another error ends the run first, the handlers found missing so far
/// are logged at `warn`.
pub fn compile_routes_with_options<R: HandlerRegistry>(
    mut document: Value,
    registry: &R,
    options: &CompileOptions,
) -> Result<Vec<RouteDescriptor<R::Handler>>, CompileError> {
    // Also defaults `components` to an empty registry set.
    resolve_references(&mut document)?;

    let paths = match document.get("paths") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(paths)) => paths,
        Some(_) => {
            return Err(CompileError::InvalidDocument(
                "'paths' must be an object".into(),
            ))
        }
    };

    let compiler = MethodCompiler::new(registry, options);
    let mut routes = Vec::new();
    let mut missing = Vec::new();

    for (path, item) in paths {
        let url = with_prefix(options.prefix.as_deref(), &to_route_pattern(path));
        match compiler.compile_path_item(path, &url, item, &mut missing) {
            Ok(compiled) => routes.extend(compiled),
            Err(e) => {
                // The run ends on `e`; keep what was already found.
                for m in &missing {
                    tracing::warn!(
                        method = %m.method,
                        path = %m.path,
                        operation_id = %m.operation_id,
                        handler = %m.handler_name,
                        "operation without a handler"
                    );
                }
                return Err(e);
            }
        }
    }

    if !missing.is_empty() {
        return Err(CompileError::MissingHandler { missing });
    }

    tracing::info!(
        paths = paths.len(),
        routes = routes.len(),
        "routes compiled"
    );
    Ok(routes)
}
