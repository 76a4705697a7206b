//! Handler lookup.
//!
//! The compiler only reads the registry; what a handler *is* belongs to the
//! host router, so descriptors carry whatever `Handler` type the registry yields.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::BuildHasher;

/// Source of handler capabilities, keyed by camelCase operation name.
pub trait HandlerRegistry {
    /// What a route descriptor holds for its handler.
    type Handler: Clone;

    /// Look up the handler registered under `name`.
    fn handler(&self, name: &str) -> Option<Self::Handler>;
}

impl<H: Clone, S: BuildHasher> HandlerRegistry for HashMap<String, H, S> {
    type Handler = H;

    fn handler(&self, name: &str) -> Option<H> {
        self.get(name).cloned()
    }
}

impl<H: Clone> HandlerRegistry for BTreeMap<String, H> {
    type Handler = H;

    fn handler(&self, name: &str) -> Option<H> {
        self.get(name).cloned()
    }
}

impl<R: HandlerRegistry + ?Sized> HandlerRegistry for &R {
    type Handler = R::Handler;

    fn handler(&self, name: &str) -> Option<R::Handler> {
        (**self).handler(name)
    }
}

/// A registry of bare names; the handler is the name itself.
#[derive(Debug, Clone, Default)]
pub struct HandlerNames(BTreeSet<String>);

impl HandlerNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.0.insert(name.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for HandlerNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl HandlerRegistry for HandlerNames {
    type Handler = String;

    fn handler(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

/// Accepts every name. Useful to check a document without real handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyHandler;

impl HandlerRegistry for AnyHandler {
    type Handler = String;

    fn handler(&self, name: &str) -> Option<String> {
        Some(name.to_string())
    }
}

/// Registry key for an operationId: its first character lower-cased.
pub fn handler_name(operation_id: &str) -> String {
    let mut chars = operation_id.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
