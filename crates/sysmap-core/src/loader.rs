//! Startup batch: fetch everything, then build the dataset.
//!
//! All queries run concurrently. A single failure aborts the whole load;
//! there is no partial dataset.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::Config;
use crate::model::{Dataset, Layout};
use crate::sparql::{project, QuerySet, SparqlError, SparqlSource};
use crate::view_state::ViewState;

/// Fatal startup errors.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Query failed: {0}")]
    Query(#[from] SparqlError),

    #[error("Failed to read layout file {path}: {source}")]
    LayoutRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse layout file {path}: {source}")]
    LayoutParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Fetch and assemble the dataset for `view`.
pub async fn load_dataset<S>(source: &S, config: &Config, view: &ViewState) -> Result<Dataset, LoadError>
where
    S: SparqlSource + ?Sized,
{
    let queries = QuerySet::build(config, view);
    let layout_path = config.layout.path.as_deref().map(Path::new);

    let (title, classes, predicates, entities, relationships, layout) = tokio::try_join!(
        async { source.select(&queries.title).await.map_err(LoadError::from) },
        async { source.select(&queries.classes).await.map_err(LoadError::from) },
        async { source.select(&queries.predicates).await.map_err(LoadError::from) },
        async { source.select(&queries.entities).await.map_err(LoadError::from) },
        async { source.select(&queries.relationships).await.map_err(LoadError::from) },
        load_layout(layout_path),
    )?;

    let mut dataset = Dataset::new();
    dataset.title = project::title(&title);
    dataset.layout = layout;
    for class in project::classes(&classes, config) {
        dataset.add_class(class);
    }
    for metadata in project::predicates(&predicates) {
        dataset.add_predicate(metadata);
    }
    for entity in project::entities(&entities, config) {
        dataset.add_entity(entity);
    }
    let mut duplicates = 0usize;
    for relationship in project::relationships(&relationships, config) {
        if !dataset.add_relationship(relationship) {
            duplicates += 1;
        }
    }

    tracing::info!(
        entities = dataset.entity_count(),
        relationships = dataset.relationship_count(),
        duplicates,
        "dataset loaded"
    );
    Ok(dataset)
}

/// Read the optional layout file; no path means an empty layout.
pub async fn load_layout(path: Option<&Path>) -> Result<Layout, LoadError> {
    let Some(path) = path else {
        return Ok(Layout::default());
    };
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::LayoutRead {
            path: path.to_path_buf(),
            source,
        })?;
    let layout = Layout::from_json(&content).map_err(|source| LoadError::LayoutParse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), entries = layout.len(), "loaded layout");
    Ok(layout)
}
