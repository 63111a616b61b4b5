//! Visible subset of the graph for a given view state.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::model::{Dataset, RelationshipKey};
use crate::neighborhood::Adjacency;
use crate::view_state::ViewState;

/// Entities and relationships currently on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleGraph {
    entities: BTreeSet<String>,
    relationships: BTreeSet<RelationshipKey>,
    adjacency: HashMap<String, Vec<String>>,
}

impl VisibleGraph {
    fn new(entities: BTreeSet<String>, relationships: BTreeSet<RelationshipKey>) -> Self {
        let mut adjacency: HashMap<String, Vec<String>> = HashMap::new();
        for key in &relationships {
            adjacency
                .entry(key.source.clone())
                .or_default()
                .push(key.target.clone());
            adjacency
                .entry(key.target.clone())
                .or_default()
                .push(key.source.clone());
        }
        Self {
            entities,
            relationships,
            adjacency,
        }
    }

    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(String::as_str)
    }

    pub fn relationships(&self) -> impl Iterator<Item = &RelationshipKey> {
        self.relationships.iter()
    }

    pub fn contains_entity(&self, id: &str) -> bool {
        self.entities.contains(id)
    }

    pub fn contains_relationship(&self, key: &RelationshipKey) -> bool {
        self.relationships.contains(key)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Membership changes since `previous`; `None` means nothing was shown yet.
    pub fn diff(&self, previous: Option<&VisibleGraph>) -> GraphDiff {
        let empty = VisibleGraph::default();
        let previous = previous.unwrap_or(&empty);
        GraphDiff {
            added_entities: self.entities.difference(&previous.entities).cloned().collect(),
            removed_entities: previous.entities.difference(&self.entities).cloned().collect(),
            added_relationships: self
                .relationships
                .difference(&previous.relationships)
                .cloned()
                .collect(),
            removed_relationships: previous
                .relationships
                .difference(&self.relationships)
                .cloned()
                .collect(),
        }
    }
}

impl Adjacency for VisibleGraph {
    fn neighbors(&self, id: &str) -> Vec<&str> {
        self.adjacency.neighbors(id)
    }
}

/// Incremental update for the renderer; unchanged elements keep their state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphDiff {
    pub added_entities: Vec<String>,
    pub removed_entities: Vec<String>,
    pub added_relationships: Vec<RelationshipKey>,
    pub removed_relationships: Vec<RelationshipKey>,
}

impl GraphDiff {
    pub fn is_empty(&self) -> bool {
        self.added_entities.is_empty()
            && self.removed_entities.is_empty()
            && self.added_relationships.is_empty()
            && self.removed_relationships.is_empty()
    }
}

/// Compute the visible graph.
///
/// Steps, each narrowing the previous one:
/// 1. entities whose group is not hidden
/// 2. relationships of an enabled type with both endpoints from step 1
/// 3. entities touched by a relationship from step 2; isolated ones are dropped
/// 4. with a hide percentage set, the lowest-ranked `floor(n * pct / 100)`
///    entities of step 3 are dropped
/// 5. relationships from step 2 whose endpoints both survive step 4
pub fn compute_visible(dataset: &Dataset, view: &ViewState) -> VisibleGraph {
    let preliminary: BTreeSet<&str> = dataset
        .entities()
        .filter(|e| view.is_group_visible(e.group))
        .map(|e| e.id.as_str())
        .collect();

    let candidates: Vec<&RelationshipKey> = dataset
        .relationships()
        .map(|r| &r.key)
        .filter(|k| view.is_predicate_enabled(&k.predicate))
        .filter(|k| preliminary.contains(k.source.as_str()) && preliminary.contains(k.target.as_str()))
        .collect();

    let mut connected: BTreeSet<&str> = candidates
        .iter()
        .flat_map(|k| [k.source.as_str(), k.target.as_str()])
        .collect();

    if view.hide_percent > 0 {
        let hidden = rank_hidden(dataset, &connected, view.hide_percent);
        connected.retain(|id| !hidden.contains(id));
    }

    let relationships: BTreeSet<RelationshipKey> = candidates
        .into_iter()
        .filter(|k| connected.contains(k.source.as_str()) && connected.contains(k.target.as_str()))
        .cloned()
        .collect();

    let visible = VisibleGraph::new(
        connected.into_iter().map(str::to_string).collect(),
        relationships,
    );
    tracing::debug!(
        entities = visible.entity_count(),
        relationships = visible.relationship_count(),
        hide_percent = view.hide_percent,
        "computed visible graph"
    );
    visible
}

/// Lowest-ranked `floor(count * percent / 100)` entities.
///
/// Ranking is descending by layout rank. Entities without a rank sort to the
/// top and are therefore hidden last. Ties are broken by id.
fn rank_hidden<'a>(dataset: &Dataset, connected: &BTreeSet<&'a str>, percent: u8) -> BTreeSet<&'a str> {
    let mut ranked: Vec<(&str, Option<f64>)> = connected
        .iter()
        .map(|id| (*id, dataset.layout.rank(id)))
        .collect();

    ranked.sort_by(|(a_id, a), (b_id, b)| {
        let by_rank = match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => b.total_cmp(a),
        };
        by_rank.then_with(|| a_id.cmp(b_id))
    });

    let hide_count = ranked.len() * usize::from(percent) / 100;
    ranked
        .iter()
        .rev()
        .take(hide_count)
        .map(|(id, _)| *id)
        .collect()
}
