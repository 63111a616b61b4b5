//! Paint instructions for the visible graph.
//!
//! Recomputed in full on every state change. With a focus, entities within
//! one hop keep their base colors, entities two hops out are blended toward
//! the dim palette, and everything farther is hidden. Search matches are
//! painted with the highlight colors on top of that, whatever their distance.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::color::{Paint, Rgb};
use crate::config::{Config, NodeColors};
use crate::filter::VisibleGraph;
use crate::model::{Dataset, RelationshipKey};
use crate::neighborhood::distances_from;
use crate::view_state::Focus;

/// How strongly an element is de-emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    Full,
    Dimmed,
    Hidden,
}

/// Paint of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodePaint {
    pub fill: Paint,
    pub border: Paint,
    pub text: Paint,
    pub emphasis: Emphasis,
    /// Painted with the search highlight.
    pub highlighted: bool,
}

/// Paint of one relationship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgePaint {
    pub line: Paint,
    pub text: Paint,
    pub width: f64,
    pub dashed: bool,
    pub emphasis: Emphasis,
}

/// Paint for every visible element.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaintSet {
    pub nodes: BTreeMap<String, NodePaint>,
    pub edges: BTreeMap<RelationshipKey, EdgePaint>,
}

impl PaintSet {
    pub fn node(&self, id: &str) -> Option<&NodePaint> {
        self.nodes.get(id)
    }

    pub fn edge(&self, key: &RelationshipKey) -> Option<&EdgePaint> {
        self.edges.get(key)
    }
}

/// Turns a visible graph, focus and search term into paint.
pub struct StyleComposer<'a> {
    config: &'a Config,
}

impl<'a> StyleComposer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn compute(
        &self,
        dataset: &Dataset,
        visible: &VisibleGraph,
        focus: &Focus,
        search: Option<&str>,
    ) -> PaintSet {
        let distances = self.focus_distances(visible, focus);
        let tier = |id: &str| -> Emphasis {
            match &distances {
                None => Emphasis::Full,
                Some(d) => self.emphasis(d.get(id).copied()),
            }
        };

        let palette = &self.config.palette;
        let mut paints = PaintSet::default();

        for id in visible.entities() {
            let Some(entity) = dataset.entity(id) else {
                continue;
            };
            let highlighted = search.is_some_and(|term| entity.matches_search(term));
            let paint = if highlighted {
                self.node_paint(palette.highlight, Emphasis::Full, true)
            } else {
                self.node_paint(palette.groups.get(entity.group), tier(id), false)
            };
            paints.nodes.insert(id.to_string(), paint);
        }

        for key in visible.relationships() {
            let emphasis = tier(&key.source).max(tier(&key.target));
            let dashed = dataset
                .relationship(key)
                .map(|r| r.dashed)
                .unwrap_or_else(|| self.config.is_dashed(&key.predicate));
            let width = match focus {
                Focus::Relationship(focused) if focused == key => self.config.display.focused_edge_width,
                _ => self.config.display.edge_width,
            };
            paints.edges.insert(
                key.clone(),
                EdgePaint {
                    line: self.shade(palette.edge.line.into(), palette.dim_edge.line, emphasis),
                    text: self.shade(palette.edge.text.into(), palette.dim_edge.text, emphasis),
                    width,
                    dashed,
                    emphasis,
                },
            );
        }

        paints
    }

    /// Hop distances from the focus over the visible graph, or `None`
    /// when nothing visible is focused.
    fn focus_distances(&self, visible: &VisibleGraph, focus: &Focus) -> Option<HashMap<String, usize>> {
        let max_hops = self.config.display.max_hops;
        match focus {
            Focus::None => None,
            Focus::Entity(id) if visible.contains_entity(id) => {
                Some(distances_from(visible, &[id.as_str()], max_hops))
            }
            Focus::Relationship(key) if visible.contains_relationship(key) => Some(distances_from(
                visible,
                &[key.source.as_str(), key.target.as_str()],
                max_hops,
            )),
            _ => {
                tracing::debug!(?focus, "focused element is not visible; painting without focus");
                None
            }
        }
    }

    fn emphasis(&self, distance: Option<usize>) -> Emphasis {
        match distance {
            Some(0 | 1) => Emphasis::Full,
            Some(d) if d <= self.config.display.max_hops => Emphasis::Dimmed,
            _ => Emphasis::Hidden,
        }
    }

    fn shade(&self, base: Paint, dim: Rgb, emphasis: Emphasis) -> Paint {
        match emphasis {
            Emphasis::Full => base,
            Emphasis::Dimmed => base.toward(dim, self.config.display.dim_ratio),
            Emphasis::Hidden => Paint::Hidden,
        }
    }

    fn node_paint(&self, colors: NodeColors, emphasis: Emphasis, highlighted: bool) -> NodePaint {
        let dim = &self.config.palette.dim;
        NodePaint {
            fill: self.shade(colors.fill.into(), dim.fill, emphasis),
            border: self.shade(colors.border.into(), dim.border, emphasis),
            text: self.shade(colors.text.into(), dim.text, emphasis),
            emphasis,
            highlighted,
        }
    }
}
