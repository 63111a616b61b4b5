//! Local viewer for the system map.
//!
//! Serves a single page that reads its view state from the address bar and
//! asks `/api/view` what to draw. Data is fetched from the SPARQL endpoint
//! on first use and kept for the lifetime of the server.
//!
//! # Module Structure
//!
//! - `handlers` - HTTP route handlers
//! - `models` - API response types (DTOs)
//! - `graph` - render updates into API responses
//! - `templates` - HTML/CSS/JS template rendering

mod graph;
mod handlers;
mod models;
mod templates;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use color_eyre::eyre::Result;
use tokio::sync::{Mutex, OnceCell};
use tower_http::cors::{Any, CorsLayer};

use sysmap_core::sparql::queries::subgraph_name;
use sysmap_core::{load_dataset, Config, Dataset, LoadError, SparqlClient, SparqlSource, ViewState};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state for the server.
pub struct AppState {
    pub config: Arc<Config>,
    pub datasets: DatasetCache,
}

impl AppState {
    pub fn new(config: Arc<Config>, source: Arc<dyn SparqlSource>) -> Self {
        Self {
            datasets: DatasetCache::new(config.clone(), source),
            config,
        }
    }
}

/// Loaded datasets, one per subgraph.
///
/// Group and relationship-type filters are applied after loading, so only
/// the subgraph changes what has to be fetched. Malformed subgraph names
/// share the full-graph entry. The map lock is only held to find a slot;
/// loading happens on the slot, so a slow subgraph never delays cached
/// ones. Failed loads leave the slot empty and are retried.
pub struct DatasetCache {
    config: Arc<Config>,
    source: Arc<dyn SparqlSource>,
    slots: Mutex<HashMap<Option<String>, Arc<OnceCell<Arc<Dataset>>>>>,
}

impl DatasetCache {
    pub fn new(config: Arc<Config>, source: Arc<dyn SparqlSource>) -> Self {
        Self {
            config,
            source,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get(&self, subgraph: Option<&str>) -> Result<Arc<Dataset>, LoadError> {
        let key = subgraph_name(subgraph).map(str::to_string);
        let slot = self.slots.lock().await.entry(key.clone()).or_default().clone();

        let dataset = slot
            .get_or_try_init(move || async move {
                let mut view = ViewState::new(&self.config);
                view.subgraph = key;
                let dataset = load_dataset(self.source.as_ref(), &self.config, &view).await?;
                Ok::<_, LoadError>(Arc::new(dataset))
            })
            .await?;
        Ok(dataset.clone())
    }

    /// Number of subgraphs with a slot, loaded or not.
    #[cfg(test)]
    pub async fn slot_count(&self) -> usize {
        self.slots.lock().await.len()
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

/// Configuration for the viewer server.
pub struct ServeConfig {
    /// Port to listen on.
    pub port: u16,
    /// Whether to open the browser automatically.
    pub open_browser: bool,
}

// =============================================================================
// Server Entry Point
// =============================================================================

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/view", get(handlers::api_view))
        .route("/api/node/{id}", get(handlers::api_node))
        .route("/api/legend", get(handlers::api_legend))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Start the viewer server.
pub async fn start_server(config: Arc<Config>, serve: ServeConfig) -> Result<()> {
    let source: Arc<dyn SparqlSource> = Arc::new(SparqlClient::from_config(&config.sparql));
    let state = Arc::new(AppState::new(config.clone(), source));

    // Warm the cache so the first page load does not wait on the endpoint.
    if let Err(e) = state.datasets.get(None).await {
        tracing::error!(error = %e, "initial load failed; the viewer will show an error");
    }

    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], serve.port));
    let url = format!("http://localhost:{}", serve.port);

    println!("Starting sysmap viewer...");
    println!("Endpoint: {}", config.sparql.endpoint);
    println!("Viewer: {}", url);
    println!("Press Ctrl+C to stop\n");

    if serve.open_browser {
        if let Err(e) = open::that(&url) {
            eprintln!("Could not open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use sysmap_core::sparql::QueryResults;
    use sysmap_core::SparqlError;

    /// Answers every query with no rows, counting calls. Queries naming
    /// `slowgraph` take a while.
    #[derive(Default)]
    struct Counting {
        selects: AtomicUsize,
    }

    #[async_trait]
    impl SparqlSource for Counting {
        async fn select(&self, query: &str) -> Result<QueryResults, SparqlError> {
            self.selects.fetch_add(1, Ordering::SeqCst);
            if query.contains("slowgraph") {
                tokio::time::sleep(Duration::from_millis(800)).await;
            }
            Ok(QueryResults::from_json(r#"{ "results": { "bindings": [] } }"#)?)
        }
    }

    fn cache() -> (Arc<Counting>, Arc<DatasetCache>) {
        let source = Arc::new(Counting::default());
        let cache = DatasetCache::new(Arc::new(Config::default()), source.clone());
        (source, Arc::new(cache))
    }

    #[tokio::test]
    async fn test_malformed_subgraphs_share_full_graph() {
        let (source, cache) = cache();
        cache.get(None).await.unwrap();
        let after_first = source.selects.load(Ordering::SeqCst);

        for i in 0..20 {
            cache.get(Some(&format!("x>{i}"))).await.unwrap();
        }
        cache.get(Some("  ")).await.unwrap();

        assert_eq!(source.selects.load(Ordering::SeqCst), after_first);
        assert_eq!(cache.slot_count().await, 1);
    }

    #[tokio::test]
    async fn test_valid_subgraph_loaded_once() {
        let (source, cache) = cache();
        cache.get(Some("DigiFLI")).await.unwrap();
        let after_first = source.selects.load(Ordering::SeqCst);
        cache.get(Some(" DigiFLI ")).await.unwrap();

        assert_eq!(source.selects.load(Ordering::SeqCst), after_first);
        assert_eq!(cache.slot_count().await, 1);
    }

    #[tokio::test]
    async fn test_cached_read_not_blocked_by_slow_load() {
        let (_source, cache) = cache();
        cache.get(None).await.unwrap();

        let slow = tokio::spawn({
            let cache = cache.clone();
            async move { cache.get(Some("slowgraph")).await.map(|_| ()) }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;

        let started = tokio::time::Instant::now();
        cache.get(None).await.unwrap();
        assert!(started.elapsed() < Duration::from_millis(400));

        slow.await.unwrap().unwrap();
        assert_eq!(cache.slot_count().await, 2);
    }
}
