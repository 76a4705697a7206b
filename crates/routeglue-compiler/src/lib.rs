//! Compiles OpenAPI 3.0 documents into route descriptors.
//!
//! Inlines internal `$ref` pointers, derives per-location parameter schemas,
//! request-body schemas (read-only fields stripped) and response schemas
//! (write-only fields stripped), and binds every operation to a handler from
//! a caller-supplied registry. Compilation is a single synchronous pass over
//! an in-memory document; any error fails the whole run.

pub mod body;
pub mod document;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod method;
pub mod options;
pub mod params;
pub mod path;
pub mod resolver;
pub mod routes;

pub use error::{CompileError, MissingHandler, OrphanRef};
pub use filter::{filter_read_only, filter_write_only, AccessFlag};
pub use handlers::{handler_name, AnyHandler, HandlerNames, HandlerRegistry};
pub use options::{CompileOptions, FilterDepth};
pub use params::{map_parameters, ParameterLocation};
pub use path::to_route_pattern;
pub use resolver::{resolve_references, ReferenceResolver};
pub use routes::{
    compile_routes, compile_routes_with_options, resolve_document, RouteDescriptor, RouteSchema,
};
