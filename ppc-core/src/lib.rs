//! PPC Core
//!
//! Core library for exposing Power Systems cloud objects as declarative
//! data sources: attribute schemas, read state, identifier assignment and
//! the schema-driven flattening of remote records.

pub mod flatten;
pub mod identifier;
pub mod provider;
pub mod resource;
pub mod schema;
