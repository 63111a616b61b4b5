//! Conversion from engine output to the JSON the page draws.

use sysmap_core::iri::PrefixTable;
use sysmap_core::{Config, Dataset, Group, LangText, Relationship, RenderUpdate};

use super::models::{
    GraphEdge, GraphNode, Legend, LegendClass, LegendGroup, LegendRelationshipType, LinkSummary, NodeDetails,
    ViewDiff, ViewResponse,
};

/// Builds API responses in one language.
pub struct GraphBuilder<'a> {
    config: &'a Config,
    prefixes: PrefixTable,
    language: &'a str,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(config: &'a Config, language: &'a str) -> Self {
        Self {
            config,
            prefixes: config.prefix_table(),
            language,
        }
    }

    fn text(&self, texts: &LangText) -> String {
        texts.text(self.language, &self.config.display.fallback_languages)
    }

    fn entity_label(&self, dataset: &Dataset, id: &str) -> String {
        dataset
            .entity(id)
            .map(|e| e.caption(self.language, &self.config.display.fallback_languages, self.config.display.label_max_chars))
            .unwrap_or_else(|| self.prefixes.shorten(id))
    }

    /// Localized label of a relationship type, or its CURIE.
    fn predicate_label(&self, dataset: &Dataset, iri: &str) -> String {
        let label = dataset
            .predicate(iri)
            .map(|p| self.text(&p.label))
            .unwrap_or_default();
        if label.is_empty() {
            self.prefixes.shorten(iri)
        } else {
            label
        }
    }

    fn group_label(&self, dataset: &Dataset, group: Group) -> (String, String) {
        dataset
            .classes()
            .find(|c| c.group == group)
            .map(|c| (self.text(&c.label), self.text(&c.comment)))
            .filter(|(label, _)| !label.is_empty())
            .unwrap_or_else(|| (group.name().to_string(), String::new()))
    }

    /// Legend label of a class, or its CURIE.
    fn class_label(&self, dataset: &Dataset, iri: &str) -> String {
        dataset
            .classes()
            .find(|c| c.iri == iri)
            .map(|c| self.text(&c.label))
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| self.prefixes.shorten(iri))
    }

    fn legend_class(&self, dataset: &Dataset, iri: &str) -> LegendClass {
        LegendClass {
            iri: iri.to_string(),
            curie: self.prefixes.shorten(iri),
            label: self.class_label(dataset, iri),
            group: self.config.group_for_class(iri),
        }
    }

    pub fn view(&self, dataset: Option<&Dataset>, update: &RenderUpdate) -> ViewResponse {
        let mut response = ViewResponse {
            title: update.title.clone(),
            language: self.language.to_string(),
            load_failed: update.load_failed,
            diff: ViewDiff {
                added_nodes: update.diff.added_entities.clone(),
                removed_nodes: update.diff.removed_entities.clone(),
                added_edges: update.diff.added_relationships.iter().map(ToString::to_string).collect(),
                removed_edges: update.diff.removed_relationships.iter().map(ToString::to_string).collect(),
            },
            nodes: Vec::new(),
            edges: Vec::new(),
        };
        let Some(dataset) = dataset else {
            return response;
        };

        for (id, paint) in &update.paints.nodes {
            let Some(entity) = dataset.entity(id) else {
                continue;
            };
            let position = dataset.layout.get(id);
            response.nodes.push(GraphNode {
                id: id.clone(),
                label: self.entity_label(dataset, id),
                curie: self.prefixes.shorten(id),
                group: entity.group,
                x: position.map(|p| p.x),
                y: position.map(|p| p.y),
                fill: paint.fill.to_string(),
                border: paint.border.to_string(),
                text: paint.text.to_string(),
                emphasis: paint.emphasis,
                highlighted: paint.highlighted,
            });
        }

        for (key, paint) in &update.paints.edges {
            response.edges.push(GraphEdge {
                id: key.to_string(),
                source: key.source.clone(),
                target: key.target.clone(),
                predicate: key.predicate.clone(),
                label: self.predicate_label(dataset, &key.predicate),
                line: paint.line.to_string(),
                text: paint.text.to_string(),
                width: paint.width,
                dashed: paint.dashed,
                emphasis: paint.emphasis,
            });
        }

        response
    }

    pub fn node_details(&self, dataset: &Dataset, id: &str) -> Option<NodeDetails> {
        let entity = dataset.entity(id)?;
        let link = |relationship: &Relationship, other: &str| LinkSummary {
            relationship: relationship.key.to_string(),
            predicate_label: self.predicate_label(dataset, relationship.predicate()),
            other_id: other.to_string(),
            other_label: self.entity_label(dataset, other),
        };

        let mut outgoing = Vec::new();
        let mut incoming = Vec::new();
        for relationship in dataset.relationships() {
            if relationship.source() == id {
                outgoing.push(link(relationship, relationship.target()));
            } else if relationship.target() == id {
                incoming.push(link(relationship, relationship.source()));
            }
        }

        let class_label = self.class_label(dataset, &entity.class);

        Some(NodeDetails {
            id: entity.id.clone(),
            curie: self.prefixes.shorten(&entity.id),
            name: self.text(&entity.name),
            abbreviation: self.text(&entity.abbreviation),
            comment: self.text(&entity.comment),
            group: entity.group,
            class_label,
            outgoing,
            incoming,
        })
    }

    pub fn legend(&self, dataset: Option<&Dataset>) -> Legend {
        let empty = Dataset::new();
        let dataset = dataset.unwrap_or(&empty);
        let palette = &self.config.palette.groups;

        let groups = Group::ALL
            .into_iter()
            .map(|group| {
                let (label, comment) = self.group_label(dataset, group);
                let colors = palette.get(group);
                LegendGroup {
                    group,
                    label,
                    comment,
                    fill: colors.fill.to_string(),
                    border: colors.border.to_string(),
                    text: colors.text.to_string(),
                }
            })
            .collect();

        let relationship_types = self
            .config
            .vocabulary
            .predicates
            .iter()
            .filter_map(|entry| {
                let iri = self.prefixes.expand(&entry.iri)?;
                let metadata = dataset.predicate(&iri);
                let comment = metadata.map(|p| self.text(&p.comment)).unwrap_or_default();
                let domain = metadata
                    .and_then(|p| p.domain.as_deref())
                    .map(|class| self.legend_class(dataset, class));
                let range = metadata
                    .and_then(|p| p.range.as_deref())
                    .map(|class| self.legend_class(dataset, class));
                Some(LegendRelationshipType {
                    key: entry.key.clone(),
                    curie: self.prefixes.shorten(&iri),
                    label: self.predicate_label(dataset, &iri),
                    comment,
                    dashed: self.config.is_dashed(&iri),
                    domain,
                    range,
                    iri,
                })
            })
            .collect();

        Legend {
            groups,
            relationship_types,
        }
    }
}
