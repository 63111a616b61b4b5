//! Entities, relationships and their metadata.
//!
//! - `Entity` - a node: organization, system, service or dataset
//! - `Relationship` - a directed, typed edge identified by `(source, type, target)`
//! - `PredicateMetadata` / `ClassMetadata` - labels for relationship types and legend classes
//! - `Dataset` - everything loaded at startup
//! - `Layout` - optional precomputed positions and ranks

mod dataset;
mod entity;
mod group;
mod layout;
mod metadata;
mod relationship;

pub use dataset::Dataset;
pub use entity::Entity;
pub use group::Group;
pub use layout::{Layout, LayoutEntry};
pub use metadata::{ClassMetadata, PredicateMetadata};
pub use relationship::{Relationship, RelationshipKey};
