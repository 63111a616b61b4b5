//! API response models for the viewer.
//!
//! These are Data Transfer Objects (DTOs) that define the shape of
//! JSON responses sent to the page. Colors are CSS hex strings; hidden
//! elements carry the fully transparent `#00000000`.

use serde::{Deserialize, Serialize};

use sysmap_core::{Emphasis, Group};

// =============================================================================
// View (for `/api/view`)
// =============================================================================

/// Everything the page draws for one view state.
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub title: String,
    pub language: String,
    /// Set when the data could not be loaded; `title` then holds the message.
    pub load_failed: bool,
    /// Membership changes since the view the page says it shows.
    pub diff: ViewDiff,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Ids to add and remove; edge ids use the `source predicate target` form.
#[derive(Debug, Serialize)]
pub struct ViewDiff {
    pub added_nodes: Vec<String>,
    pub removed_nodes: Vec<String>,
    pub added_edges: Vec<String>,
    pub removed_edges: Vec<String>,
}

/// A visible entity.
#[derive(Debug, Serialize)]
pub struct GraphNode {
    pub id: String,
    /// Caption in the view language.
    pub label: String,
    /// Shortened identifier.
    pub curie: String,
    pub group: Group,
    /// Precomputed position, when a layout file is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    pub fill: String,
    pub border: String,
    pub text: String,
    pub emphasis: Emphasis,
    pub highlighted: bool,
}

/// A visible relationship.
#[derive(Debug, Serialize)]
pub struct GraphEdge {
    /// `source predicate target`, as used in the `edge` parameter.
    pub id: String,
    pub source: String,
    pub target: String,
    pub predicate: String,
    pub label: String,
    pub line: String,
    pub text: String,
    pub width: f64,
    pub dashed: bool,
    pub emphasis: Emphasis,
}

// =============================================================================
// Node Details (for `/api/node/{id}`)
// =============================================================================

/// Query parameters shared by the detail endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
    pub subgraph: Option<String>,
}

/// Popup content for one entity.
#[derive(Debug, Serialize)]
pub struct NodeDetails {
    pub id: String,
    pub curie: String,
    pub name: String,
    pub abbreviation: String,
    pub comment: String,
    pub group: Group,
    /// Legend label of the entity's class.
    pub class_label: String,
    pub outgoing: Vec<LinkSummary>,
    pub incoming: Vec<LinkSummary>,
}

/// One relationship as seen from an entity.
#[derive(Debug, Serialize)]
pub struct LinkSummary {
    pub relationship: String,
    pub predicate_label: String,
    pub other_id: String,
    pub other_label: String,
}

// =============================================================================
// Legend (for `/api/legend`)
// =============================================================================

#[derive(Debug, Serialize)]
pub struct Legend {
    pub groups: Vec<LegendGroup>,
    pub relationship_types: Vec<LegendRelationshipType>,
}

#[derive(Debug, Serialize)]
pub struct LegendGroup {
    pub group: Group,
    pub label: String,
    pub comment: String,
    pub fill: String,
    pub border: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct LegendRelationshipType {
    /// Key used in the `predicates` parameter.
    pub key: String,
    pub iri: String,
    pub curie: String,
    pub label: String,
    pub comment: String,
    pub dashed: bool,
    /// Declared source type, when the ontology gives one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<LegendClass>,
    /// Declared target type, when the ontology gives one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<LegendClass>,
}

/// A class named in a relationship type's domain or range.
#[derive(Debug, Serialize)]
pub struct LegendClass {
    pub iri: String,
    pub curie: String,
    pub label: String,
    pub group: Group,
}
