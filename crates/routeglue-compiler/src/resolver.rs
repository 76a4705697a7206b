//! Internal `$ref` inlining.
//!
//! Every component under `#/components/<group>/<key>` is resolved once
//! (transitively, with cycle detection), then each reference node in the
//! document is replaced in place by the resolved content. Substitution is
//! structural: pointers are matched exactly and values keep their JSON types.
//! Whatever reference survives is an orphan.

use std::collections::HashMap;

use serde_json::Value;

use crate::document::{collect_refs, component_pointer, ensure_components, ref_target};
use crate::error::CompileError;

/// Registry of raw components keyed by their full pointer.
#[derive(Debug, Default)]
pub struct ReferenceResolver {
    /// Pointers in document order (group, then key).
    order: Vec<String>,
    raw: HashMap<String, Value>,
}

impl ReferenceResolver {
    /// Index every component declared under the document's `components`.
    pub fn from_document(doc: &Value) -> Result<Self, CompileError> {
        let mut resolver = Self::default();
        let Some(groups) = doc.get("components").and_then(|v| v.as_object()) else {
            return Ok(resolver);
        };

        for (group, entries) in groups {
            let Some(entries) = entries.as_object() else {
                if group.starts_with("x-") {
                    continue;
                }
                return Err(CompileError::InvalidDocument(format!(
                    "component group '{}' must be an object",
                    group
                )));
            };
            for (key, component) in entries {
                let pointer = component_pointer(group, key);
                resolver.order.push(pointer.clone());
                resolver.raw.insert(pointer, component.clone());
            }
        }

        Ok(resolver)
    }

    /// Number of indexed components.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Resolve every component to a reference-free value.
    ///
    /// References to unknown pointers are left untouched so the final scan can
    /// report them with their location.
    pub fn resolve_all(&self) -> Result<HashMap<String, Value>, CompileError> {
        let mut done = HashMap::with_capacity(self.order.len());
        for pointer in &self.order {
            let mut chain = Vec::new();
            self.resolve_component(pointer, &mut chain, &mut done)?;
        }
        Ok(done)
    }

    fn resolve_component(
        &self,
        pointer: &str,
        chain: &mut Vec<String>,
        done: &mut HashMap<String, Value>,
    ) -> Result<Value, CompileError> {
        if let Some(resolved) = done.get(pointer) {
            return Ok(resolved.clone());
        }
        if let Some(start) = chain.iter().position(|p| p == pointer) {
            let mut cycle = chain[start..].to_vec();
            cycle.push(pointer.to_string());
            return Err(CompileError::CyclicReference { chain: cycle });
        }
        let Some(raw) = self.raw.get(pointer) else {
            // Callers only pass known pointers.
            return Ok(Value::Null);
        };

        chain.push(pointer.to_string());
        let resolved = self.inline(raw, chain, done)?;
        chain.pop();

        tracing::debug!(pointer, "resolved component");
        done.insert(pointer.to_string(), resolved.clone());
        Ok(resolved)
    }

    fn inline(
        &self,
        value: &Value,
        chain: &mut Vec<String>,
        done: &mut HashMap<String, Value>,
    ) -> Result<Value, CompileError> {
        match value {
            Value::Object(obj) => {
                if let Some(target) = ref_target(value) {
                    if self.raw.contains_key(target) {
                        return self.resolve_component(target, chain, done);
                    }
                    return Ok(value.clone());
                }
                let mut new_obj = serde_json::Map::with_capacity(obj.len());
                for (key, child) in obj {
                    new_obj.insert(key.clone(), self.inline(child, chain, done)?);
                }
                Ok(Value::Object(new_obj))
            }
            Value::Array(arr) => {
                let items: Result<Vec<_>, _> = arr
                    .iter()
                    .map(|child| self.inline(child, chain, done))
                    .collect();
                Ok(Value::Array(items?))
            }
            other => Ok(other.clone()),
        }
    }
}

/// Replace every known reference node in `value` with its resolved content.
///
/// Returns the number of substitutions made.
fn substitute(value: &mut Value, resolved: &HashMap<String, Value>) -> usize {
    if let Some(replacement) = ref_target(value).and_then(|target| resolved.get(target)) {
        *value = replacement.clone();
        return 1;
    }
    match value {
        Value::Object(obj) => obj
            .values_mut()
            .map(|child| substitute(child, resolved))
            .sum(),
        Value::Array(arr) => arr
            .iter_mut()
            .map(|child| substitute(child, resolved))
            .sum(),
        _ => 0,
    }
}

/// Inline every internal `$ref` of `doc` in place.
///
/// `components` defaults to an empty registry set when absent. Fails with
/// [`CompileError::CyclicReference`] on a component cycle and with
/// [`CompileError::UnresolvedReference`] listing every surviving pointer.
pub fn resolve_references(doc: &mut Value) -> Result<(), CompileError> {
    ensure_components(doc)?;

    let resolver = ReferenceResolver::from_document(doc)?;
    let resolved = resolver.resolve_all()?;
    let substituted = substitute(doc, &resolved);

    let mut orphans = Vec::new();
    collect_refs(doc, "", &mut orphans);
    if !orphans.is_empty() {
        return Err(CompileError::UnresolvedReference { orphans });
    }

    tracing::debug!(
        components = resolver.len(),
        substituted,
        "references resolved"
    );
    Ok(())
}
