//! HTTP route handlers for the viewer.
//!
//! Handlers are kept thin: view state comes from the query string, the engine
//! decides what is visible and how it is painted, and [`GraphBuilder`] shapes
//! the result for the page.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, RawQuery, State},
    http::HeaderMap,
    response::Html,
    Json,
};

use sysmap_core::{MemoryLocation, Session, ViewState};

use super::graph::GraphBuilder;
use super::models::{LangQuery, Legend, NodeDetails, ViewResponse};
use super::templates;
use super::AppState;

// =============================================================================
// Page Handlers
// =============================================================================

/// GET `/` - The viewer page.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(templates::render_page(&state.config))
}

// =============================================================================
// API Handlers
// =============================================================================

/// Header carrying the query of the view the page currently shows.
pub const RENDERED_HEADER: &str = "x-sysmap-rendered";

/// GET `/api/view?<address-bar query>` - What to draw for a view state.
///
/// The query string is passed through verbatim, so the page can forward its
/// own `location.search`. With [`RENDERED_HEADER`] set, the diff is relative
/// to that view; without it everything visible is added.
pub async fn api_view(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Json<ViewResponse> {
    let query = query.unwrap_or_default();
    let rendered = headers.get(RENDERED_HEADER).and_then(|v| v.to_str().ok());
    let config = state.config.clone();
    let view = ViewState::from_query(&query, &config);
    let location = MemoryLocation::new(query);
    let builder = GraphBuilder::new(&config, &view.language);

    match state.datasets.get(view.subgraph.as_deref()).await {
        Ok(dataset) => {
            let mut session = Session::new(config.clone(), dataset.clone(), location);
            if let Some(rendered) = rendered {
                session = session.resume_from(rendered);
            }
            let update = session.render();
            Json(builder.view(Some(dataset.as_ref()), &update))
        }
        Err(e) => {
            tracing::error!(error = %e, "could not load the system map");
            let mut session = Session::failed(config.clone(), location);
            let update = session.render();
            Json(builder.view(None, &update))
        }
    }
}

/// GET `/api/node/{id}` - Popup details for one entity.
pub async fn api_node(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<LangQuery>,
) -> Json<Option<NodeDetails>> {
    let language = params
        .lang
        .unwrap_or_else(|| state.config.display.default_language.clone());
    let Ok(dataset) = state.datasets.get(params.subgraph.as_deref()).await else {
        return Json(None);
    };
    Json(GraphBuilder::new(&state.config, &language).node_details(&dataset, &id))
}

/// GET `/api/legend` - Group colors and relationship types.
pub async fn api_legend(State(state): State<Arc<AppState>>, Query(params): Query<LangQuery>) -> Json<Legend> {
    let language = params
        .lang
        .unwrap_or_else(|| state.config.display.default_language.clone());
    let dataset = state.datasets.get(params.subgraph.as_deref()).await.ok();
    Json(GraphBuilder::new(&state.config, &language).legend(dataset.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sysmap_core::sparql::QueryResults;
    use sysmap_core::{Config, Group, SparqlError, SparqlSource};

    const OPERATES: &str = "https://agriculture.ld.admin.ch/system-map/operates";

    struct Fixture {
        fail: bool,
    }

    #[async_trait]
    impl SparqlSource for Fixture {
        async fn select(&self, query: &str) -> Result<QueryResults, SparqlError> {
            if self.fail {
                return Err(SparqlError::Network("connection refused".into()));
            }
            let body = if query.contains("SELECT ?id") {
                r#"{ "results": { "bindings": [
                    { "id": { "type": "uri", "value": "http://x/blw" },
                      "class": { "type": "uri", "value": "http://schema.org/Organization" },
                      "name": { "type": "literal", "value": "Bundesamt" }, "nameLang": { "type": "literal", "value": "de" } },
                    { "id": { "type": "uri", "value": "http://x/agate" },
                      "class": { "type": "uri", "value": "http://schema.org/SoftwareApplication" },
                      "name": { "type": "literal", "value": "Agate" }, "nameLang": { "type": "literal", "value": "de" } }
                ] } }"#
            } else if query.contains("SELECT DISTINCT ?predicate") {
                r#"{ "results": { "bindings": [
                    { "predicate": { "type": "uri", "value": "https://agriculture.ld.admin.ch/system-map/operates" },
                      "comment": { "type": "literal", "value": "Runs a system", "xml:lang": "en" },
                      "domain": { "type": "uri", "value": "http://schema.org/Organization" },
                      "range": { "type": "uri", "value": "http://schema.org/SoftwareApplication" } }
                ] } }"#
            } else if query.contains("SELECT ?from") {
                r#"{ "results": { "bindings": [
                    { "from": { "type": "uri", "value": "http://x/blw" },
                      "property": { "type": "uri", "value": "https://agriculture.ld.admin.ch/system-map/operates" },
                      "to": { "type": "uri", "value": "http://x/agate" } }
                ] } }"#
            } else {
                r#"{ "results": { "bindings": [] } }"#
            };
            Ok(QueryResults::from_json(body)?)
        }
    }

    fn state(fail: bool) -> Arc<AppState> {
        Arc::new(AppState::new(Arc::new(Config::default()), Arc::new(Fixture { fail })))
    }

    #[tokio::test]
    async fn test_api_view() {
        let Json(view) = api_view(State(state(false)), HeaderMap::new(), RawQuery(Some("lang=en&search=agate".into()))).await;
        assert!(!view.load_failed);
        assert_eq!(view.title, "System Map");
        assert_eq!(view.nodes.len(), 2);
        assert_eq!(view.edges.len(), 1);
        assert_eq!(view.edges[0].predicate, OPERATES);
        assert_eq!(view.edges[0].label, "systemmap:operates");
        let agate = view.nodes.iter().find(|n| n.id == "http://x/agate").unwrap();
        assert!(agate.highlighted);
        assert_eq!(view.diff.added_nodes.len(), 2);
        assert_eq!(view.diff.added_edges, vec![format!("http://x/blw {OPERATES} http://x/agate")]);
    }

    #[tokio::test]
    async fn test_api_view_diff_against_rendered() {
        let mut headers = HeaderMap::new();
        headers.insert(RENDERED_HEADER, "lang=en".parse().unwrap());

        let Json(same) = api_view(State(state(false)), headers.clone(), RawQuery(Some("lang=en&search=agate".into()))).await;
        assert!(same.diff.added_nodes.is_empty());
        assert!(same.diff.removed_nodes.is_empty());
        assert_eq!(same.nodes.len(), 2);

        let Json(hidden) = api_view(State(state(false)), headers, RawQuery(Some("lang=en&predicates=owns".into()))).await;
        assert!(hidden.diff.added_nodes.is_empty());
        assert_eq!(hidden.diff.removed_nodes.len(), 2);
        assert_eq!(hidden.diff.removed_edges.len(), 1);
        assert!(hidden.nodes.is_empty());
    }

    #[tokio::test]
    async fn test_api_view_load_failure() {
        let Json(view) = api_view(State(state(true)), HeaderMap::new(), RawQuery(Some("lang=de".into()))).await;
        assert!(view.load_failed);
        assert!(view.title.starts_with("Die Systemlandkarte"));
        assert!(view.nodes.is_empty());
    }

    #[tokio::test]
    async fn test_api_node() {
        let params = LangQuery {
            lang: Some("fr".into()),
            subgraph: None,
        };
        let Json(details) = api_node(State(state(false)), Path("http://x/blw".into()), Query(params)).await;
        let details = details.unwrap();
        assert_eq!(details.name, "Bundesamt");
        assert_eq!(details.outgoing.len(), 1);
        assert_eq!(details.outgoing[0].other_label, "Agate");
        assert!(details.incoming.is_empty());
    }

    #[tokio::test]
    async fn test_api_legend() {
        let Json(legend) = api_legend(State(state(false)), Query(LangQuery::default())).await;
        assert_eq!(legend.groups.len(), 5);
        assert_eq!(legend.relationship_types.len(), 12);
        let owns = legend.relationship_types.iter().find(|t| t.key == "owns").unwrap();
        assert!(owns.dashed);
        assert!(owns.domain.is_none());

        let operates = legend.relationship_types.iter().find(|t| t.key == "operates").unwrap();
        let domain = operates.domain.as_ref().unwrap();
        let range = operates.range.as_ref().unwrap();
        assert_eq!(domain.curie, "schema:Organization");
        assert_eq!(domain.group, Group::Organization);
        assert_eq!(range.iri, "http://schema.org/SoftwareApplication");
        assert_eq!(range.group, Group::System);
    }

    #[tokio::test]
    async fn test_api_legend_comment_in_language() {
        let params = LangQuery {
            lang: Some("en".into()),
            subgraph: None,
        };
        let Json(legend) = api_legend(State(state(false)), Query(params)).await;
        let operates = legend.relationship_types.iter().find(|t| t.key == "operates").unwrap();
        assert_eq!(operates.comment, "Runs a system");
    }
}
