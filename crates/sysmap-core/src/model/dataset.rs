use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::{ClassMetadata, Entity, Layout, PredicateMetadata, Relationship, RelationshipKey};
use crate::locale::LangText;

/// Everything loaded at startup. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub title: LangText,
    pub layout: Layout,
    entities: BTreeMap<String, Entity>,
    relationships: BTreeMap<RelationshipKey, Relationship>,
    predicates: BTreeMap<String, PredicateMetadata>,
    classes: BTreeMap<String, ClassMetadata>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity, merging texts into an existing entry with the same id.
    pub fn add_entity(&mut self, entity: Entity) {
        match self.entities.entry(entity.id.clone()) {
            Entry::Occupied(mut e) => e.get_mut().merge(entity),
            Entry::Vacant(e) => {
                e.insert(entity);
            }
        }
    }

    /// Add a relationship. Returns false if the same `(source, type, target)`
    /// was already present.
    pub fn add_relationship(&mut self, relationship: Relationship) -> bool {
        match self.relationships.entry(relationship.key.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(e) => {
                e.insert(relationship);
                true
            }
        }
    }

    pub fn add_predicate(&mut self, metadata: PredicateMetadata) {
        match self.predicates.entry(metadata.iri.clone()) {
            Entry::Occupied(mut e) => e.get_mut().merge(metadata),
            Entry::Vacant(e) => {
                e.insert(metadata);
            }
        }
    }

    pub fn add_class(&mut self, class: ClassMetadata) {
        match self.classes.entry(class.iri.clone()) {
            Entry::Occupied(mut e) => e.get_mut().merge(class),
            Entry::Vacant(e) => {
                e.insert(class);
            }
        }
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Entities ordered by id.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn relationship(&self, key: &RelationshipKey) -> Option<&Relationship> {
        self.relationships.get(key)
    }

    /// Relationships ordered by `(source, predicate, target)`.
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.values()
    }

    pub fn predicate(&self, iri: &str) -> Option<&PredicateMetadata> {
        self.predicates.get(iri)
    }

    pub fn predicates(&self) -> impl Iterator<Item = &PredicateMetadata> {
        self.predicates.values()
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassMetadata> {
        self.classes.values()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }
}
