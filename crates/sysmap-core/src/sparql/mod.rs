//! SPARQL endpoint access.
//!
//! - `SparqlSource` - trait for anything that can answer a query
//! - `SparqlClient` - HTTP implementation
//! - `queries` - query text built from config and view state
//! - `project` - result rows into model values

mod bindings;
mod client;
mod error;
pub mod project;
pub mod queries;

pub use bindings::{QueryResults, Row, Term};
pub use client::{SparqlClient, SparqlSource};
pub use error::SparqlError;
pub use queries::QuerySet;
