//! routeglue CLI library.
//!
//! This library exposes the file loading and output rendering used by the
//! `routeglue` binary, for testing purposes.

pub mod loader;
pub mod output;
