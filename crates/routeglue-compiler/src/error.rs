use serde::Serialize;
use thiserror::Error;

/// A `$ref` that did not resolve to any known component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrphanRef {
    /// The pointer text exactly as written (e.g. `#/components/schemas/Missing`).
    pub pointer: String,
    /// JSON pointer to the node holding the reference.
    pub location: String,
}

/// An operation whose derived handler name has no entry in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingHandler {
    /// Upper-cased HTTP method.
    pub method: String,
    /// Path template as declared.
    pub path: String,
    pub operation_id: String,
    /// Registry key derived from the operationId.
    pub handler_name: String,
}

/// Errors produced while compiling a document into routes (E2001–E2007).
///
/// Every variant is fatal: no partial route set is ever returned alongside one.
#[derive(Debug, Error)]
pub enum CompileError {
    /// E2001: One or more `$ref` pointers survived resolution.
    #[error("E2001: {} unresolved $ref pointer(s): {}", .orphans.len(), orphan_list(.orphans))]
    UnresolvedReference { orphans: Vec<OrphanRef> },

    /// E2002: The component reference graph contains a cycle.
    #[error("E2002: cyclic $ref chain: {}", .chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    /// E2003: One or more operations have no handler in the registry.
    #[error("E2003: {} operation(s) without a handler: {}", .missing.len(), handler_list(.missing))]
    MissingHandler { missing: Vec<MissingHandler> },

    /// E2004: A schema's filtering structure is missing or wrong-typed.
    #[error("E2004: malformed schema at {location}: {reason}")]
    MalformedSchema { location: String, reason: String },

    /// E2005: An operation declares no operationId.
    #[error("E2005: operation {method} {path} has no operationId")]
    MissingOperationId { method: String, path: String },

    /// E2006: A parameter object is unusable.
    #[error("E2006: invalid parameter at {location}: {reason}")]
    InvalidParameter { location: String, reason: String },

    /// E2007: The document shape is not an OpenAPI 3.0 document.
    #[error("E2007: invalid document: {0}")]
    InvalidDocument(String),
}

impl CompileError {
    /// Stable diagnostic code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnresolvedReference { .. } => "E2001",
            Self::CyclicReference { .. } => "E2002",
            Self::MissingHandler { .. } => "E2003",
            Self::MalformedSchema { .. } => "E2004",
            Self::MissingOperationId { .. } => "E2005",
            Self::InvalidParameter { .. } => "E2006",
            Self::InvalidDocument(_) => "E2007",
        }
    }

    /// Human-readable multi-line report, one offending item per line.
    ///
    /// The core never prints this itself; hosts decide where it goes.
    pub fn report(&self) -> String {
        match self {
            Self::UnresolvedReference { orphans } => {
                let mut out = format!("{}: unresolved $ref pointers:", self.code());
                for orphan in orphans {
                    out.push_str(&format!("\n  - {} (at {})", orphan.pointer, orphan.location));
                }
                out
            }
            Self::CyclicReference { chain } => {
                let mut out = format!("{}: cyclic $ref chain:", self.code());
                for (idx, pointer) in chain.iter().enumerate() {
                    out.push_str(&format!("\n  {}. {}", idx + 1, pointer));
                }
                out
            }
            Self::MissingHandler { missing } => {
                let mut out = format!("{}: operations without a handler:", self.code());
                for m in missing {
                    out.push_str(&format!(
                        "\n  - {} {}: operationId '{}' expects handler '{}'",
                        m.method, m.path, m.operation_id, m.handler_name
                    ));
                }
                out
            }
            other => other.to_string(),
        }
    }
}

fn orphan_list(orphans: &[OrphanRef]) -> String {
    orphans
        .iter()
        .map(|o| o.pointer.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn handler_list(missing: &[MissingHandler]) -> String {
    missing
        .iter()
        .map(|m| m.handler_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
