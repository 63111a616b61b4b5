//! Query text for the startup batch.
//!
//! Every query is scoped to the configured named graph and returns one row
//! per language for multilingual fields, with the language in a companion
//! `<var>Lang` variable.

use crate::config::Config;
use crate::model::Group;
use crate::view_state::ViewState;

const SYSTEMMAP: &str = "https://agriculture.ld.admin.ch/system-map/";

/// The five queries issued at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySet {
    pub title: String,
    pub classes: String,
    pub predicates: String,
    pub entities: String,
    pub relationships: String,
}

impl QuerySet {
    pub fn build(config: &Config, view: &ViewState) -> Self {
        Self {
            title: title_query(config, view.subgraph.as_deref()),
            classes: class_query(config),
            predicates: predicate_metadata_query(config),
            entities: entity_query(config, view),
            relationships: relationship_query(config, view),
        }
    }
}

fn prologue(config: &Config) -> String {
    config
        .vocabulary
        .prefixes
        .iter()
        .map(|p| format!("PREFIX {}: <{}>\n", p.short, p.base))
        .collect()
}

fn values<'a>(iris: impl IntoIterator<Item = &'a str>) -> String {
    iris.into_iter()
        .map(|iri| format!("<{iri}>"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The subgraph name as it is used in queries, or `None` when absent or
/// malformed.
///
/// Names end up inside an IRI, so anything but a plain local name is
/// dropped and the full graph is used instead.
pub fn subgraph_name(subgraph: Option<&str>) -> Option<&str> {
    let name = subgraph?.trim();
    if name.is_empty() {
        return None;
    }
    let valid = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Some(name)
    } else {
        tracing::warn!(subgraph = name, "ignoring malformed subgraph name");
        None
    }
}

fn subgraph_iri(subgraph: Option<&str>) -> Option<String> {
    subgraph_name(subgraph).map(|name| format!("{SYSTEMMAP}{name}"))
}

/// Ontology title, or the subgraph's own name when one is selected.
pub fn title_query(config: &Config, subgraph: Option<&str>) -> String {
    let id = subgraph_iri(subgraph).unwrap_or_else(|| format!("{SYSTEMMAP}metadata"));
    format!(
        "{prologue}SELECT ?title ?titleLang\nWHERE {{\n  GRAPH <{graph}> {{\n    BIND(<{id}> AS ?id)\n    OPTIONAL {{ ?id schema:name ?title . BIND(LANG(?title) AS ?titleLang) }}\n  }}\n}}\n",
        prologue = prologue(config),
        graph = config.sparql.graph,
    )
}

/// Legend labels for every configured class.
pub fn class_query(config: &Config) -> String {
    let classes = values(config.vocabulary.groups.iter().map(|g| g.class.as_str()));
    format!(
        "{prologue}SELECT ?iri ?label ?labelLang ?comment ?commentLang\nWHERE {{\n  GRAPH <{graph}> {{\n    VALUES ?iri {{ {classes} }}\n    OPTIONAL {{ ?iri schema:name ?label . BIND(LANG(?label) AS ?labelLang) }}\n    OPTIONAL {{ ?iri schema:description ?comment . BIND(LANG(?comment) AS ?commentLang) }}\n  }}\n}}\n",
        prologue = prologue(config),
        graph = config.sparql.graph,
    )
}

/// Labels, comments and root domain/range classes of relationship types in use.
pub fn predicate_metadata_query(config: &Config) -> String {
    let iris = config.predicate_iris();
    let predicates = values(iris.iter().map(String::as_str));
    format!(
        "{prologue}SELECT DISTINCT ?predicate ?label ?labelLang ?comment ?commentLang ?domain ?range\nWHERE {{\n  GRAPH <{graph}> {{\n    VALUES ?predicate {{ {predicates} }}\n    ?from ?predicate ?to .\n    OPTIONAL {{ ?predicate schema:name ?label . BIND(LANG(?label) AS ?labelLang) }}\n    OPTIONAL {{ ?predicate schema:description ?comment . BIND(LANG(?comment) AS ?commentLang) }}\n    OPTIONAL {{ ?predicate rdfs:domain/rdfs:subClassOf* ?domain . FILTER NOT EXISTS {{ ?domain rdfs:subClassOf ?domainParent }} }}\n    OPTIONAL {{ ?predicate rdfs:range/rdfs:subClassOf* ?range . FILTER NOT EXISTS {{ ?range rdfs:subClassOf ?rangeParent }} }}\n  }}\n}}\nORDER BY ?domain\n",
        prologue = prologue(config),
        graph = config.sparql.graph,
    )
}

/// Entities of the visible groups, optionally narrowed to a subgraph.
///
/// `Other` has no class of its own, so it never widens the class list.
pub fn entity_query(config: &Config, view: &ViewState) -> String {
    let classes: Vec<&str> = Group::ALL
        .iter()
        .filter(|g| view.is_group_visible(**g))
        .flat_map(|g| config.classes_for_group(*g))
        .collect();
    let subgraph = subgraph_iri(view.subgraph.as_deref())
        .map(|iri| format!("    <{iri}> systemmap:containsNodes ?id .\n"))
        .unwrap_or_default();
    format!(
        "{prologue}SELECT ?id ?class ?name ?nameLang ?comment ?commentLang ?abbreviation ?abbreviationLang\nWHERE {{\n  GRAPH <{graph}> {{\n{subgraph}    ?id a ?class .\n    VALUES ?class {{ {classes} }}\n    OPTIONAL {{ ?id schema:name ?name . BIND(LANG(?name) AS ?nameLang) }}\n    OPTIONAL {{ ?id schema:description ?comment . BIND(LANG(?comment) AS ?commentLang) }}\n    OPTIONAL {{ ?id systemmap:abbreviation ?abbreviation . BIND(LANG(?abbreviation) AS ?abbreviationLang) }}\n  }}\n}}\n",
        prologue = prologue(config),
        graph = config.sparql.graph,
        classes = values(classes),
    )
}

/// Relationship instances of the enabled types.
pub fn relationship_query(config: &Config, view: &ViewState) -> String {
    let iris = view.enabled_predicates(config);
    format!(
        "{prologue}SELECT ?from ?property ?to\nWHERE {{\n  GRAPH <{graph}> {{\n    ?from ?property ?to .\n    VALUES ?property {{ {predicates} }}\n  }}\n}}\n",
        prologue = prologue(config),
        graph = config.sparql.graph,
        predicates = values(iris.iter().map(String::as_str)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_query_only_visible_groups() {
        let config = Config::default();
        let view = ViewState::from_query("system=false&information=false", &config);
        let q = entity_query(&config, &view);
        assert!(q.contains("<http://schema.org/Organization>"));
        assert!(q.contains("<http://purl.org/ontology/service#Service>"));
        assert!(!q.contains("<http://schema.org/SoftwareApplication>"));
        assert!(!q.contains("<http://www.w3.org/ns/dcat#Dataset>"));
        assert!(!q.contains("containsNodes"));
    }

    #[test]
    fn test_subgraph_narrows_entities_and_title() {
        let config = Config::default();
        let view = ViewState::from_query("subgraph=DigiFLI", &config);
        let q = entity_query(&config, &view);
        assert!(q.contains("<https://agriculture.ld.admin.ch/system-map/DigiFLI> systemmap:containsNodes ?id"));
        let t = title_query(&config, Some("DigiFLI"));
        assert!(t.contains("BIND(<https://agriculture.ld.admin.ch/system-map/DigiFLI> AS ?id)"));
    }

    #[test]
    fn test_malformed_subgraph_ignored() {
        let config = Config::default();
        let t = title_query(&config, Some("x> } DROP"));
        assert!(t.contains("system-map/metadata>"));
    }

    #[test]
    fn test_subgraph_name() {
        assert_eq!(subgraph_name(Some(" DigiFLI ")), Some("DigiFLI"));
        assert_eq!(subgraph_name(Some("x>1")), None);
        assert_eq!(subgraph_name(Some("")), None);
        assert_eq!(subgraph_name(None), None);
    }

    #[test]
    fn test_relationship_query_enabled_types() {
        let config = Config::default();
        let view = ViewState::from_query("predicates=owns,operates", &config);
        let q = relationship_query(&config, &view);
        assert!(q.contains("<https://agriculture.ld.admin.ch/system-map/owns>"));
        assert!(q.contains("<https://agriculture.ld.admin.ch/system-map/operates>"));
        assert!(!q.contains("<http://schema.org/memberOf>"));
    }

    #[test]
    fn test_queries_scoped_to_graph() {
        let config = Config::default();
        let set = QuerySet::build(&config, &ViewState::new(&config));
        for q in [&set.title, &set.classes, &set.predicates, &set.entities, &set.relationships] {
            assert!(q.contains(&format!("GRAPH <{}>", config.sparql.graph)));
            assert!(q.contains("PREFIX schema: <http://schema.org/>"));
        }
    }
}
