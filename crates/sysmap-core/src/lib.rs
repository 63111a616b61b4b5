//! View engine for an interactive map of organizations, systems, services
//! and datasets loaded from a SPARQL endpoint.
//!
//! Given the loaded [`Dataset`] and a [`ViewState`] read from the address
//! bar, the engine decides what is visible ([`filter`]), how far each element
//! is from the focus ([`neighborhood`]) and how it is painted ([`style`]).
//! Layout and drawing belong to the caller.

pub mod color;
pub mod config;
pub mod filter;
pub mod iri;
pub mod label;
pub mod loader;
pub mod locale;
pub mod messages;
pub mod model;
pub mod neighborhood;
pub mod session;
pub mod sparql;
pub mod style;
pub mod view_state;

pub use color::{Paint, Rgb};
pub use config::{Config, ConfigError};
pub use filter::{compute_visible, GraphDiff, VisibleGraph};
pub use loader::{load_dataset, LoadError};
pub use locale::{LangText, Resolved};
pub use model::{Dataset, Entity, Group, Relationship, RelationshipKey};
pub use session::{RenderUpdate, SearchDebouncer, Session};
pub use sparql::{SparqlClient, SparqlError, SparqlSource};
pub use style::{Emphasis, PaintSet, StyleComposer};
pub use view_state::{Focus, Location, MemoryLocation, Settings, ViewState, ViewStateStore};
