//! One viewer session: view-state in, render updates out.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::filter::{compute_visible, GraphDiff, VisibleGraph};
use crate::messages;
use crate::model::Dataset;
use crate::style::{PaintSet, StyleComposer};
use crate::view_state::{Focus, Location, Settings, ViewState, ViewStateStore};

/// What the renderer applies after a state change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderUpdate {
    pub title: String,
    /// Membership changes since the previous update.
    pub diff: GraphDiff,
    /// Full paint of everything visible.
    pub paints: PaintSet,
    /// Set when the dataset could not be loaded; nothing else is shown.
    pub load_failed: bool,
}

/// Owns the loaded dataset and the address bar for one viewer.
pub struct Session<L: Location> {
    config: Arc<Config>,
    dataset: Option<Arc<Dataset>>,
    store: ViewStateStore<L>,
    previous: Option<VisibleGraph>,
}

impl<L: Location> Session<L> {
    pub fn new(config: Arc<Config>, dataset: Arc<Dataset>, location: L) -> Self {
        Self {
            store: ViewStateStore::new(location, config.clone()),
            config,
            dataset: Some(dataset),
            previous: None,
        }
    }

    /// Session whose startup load failed. It only ever renders the error.
    pub fn failed(config: Arc<Config>, location: L) -> Self {
        Self {
            store: ViewStateStore::new(location, config.clone()),
            config,
            dataset: None,
            previous: None,
        }
    }

    /// Treat `rendered_query` as the view the renderer already shows, so the
    /// next update only carries what changed since then.
    pub fn resume_from(mut self, rendered_query: &str) -> Self {
        if let Some(dataset) = &self.dataset {
            let rendered = ViewState::from_query(rendered_query, &self.config);
            self.previous = Some(compute_visible(dataset, &rendered));
        }
        self
    }

    pub fn store(&self) -> &ViewStateStore<L> {
        &self.store
    }

    pub fn view(&self) -> ViewState {
        self.store.state()
    }

    /// Recompute visibility and paint from the current view state.
    pub fn render(&mut self) -> RenderUpdate {
        let view = self.store.state();
        let fallbacks = &self.config.display.fallback_languages;

        let Some(dataset) = self.dataset.clone() else {
            return RenderUpdate {
                title: messages::load_error(&view.language, fallbacks),
                diff: GraphDiff::default(),
                paints: PaintSet::default(),
                load_failed: true,
            };
        };

        let visible = compute_visible(&dataset, &view);
        let paints = StyleComposer::new(&self.config).compute(&dataset, &visible, &view.focus, view.search_term());
        let diff = visible.diff(self.previous.as_ref());
        self.previous = Some(visible);

        let mut title = dataset.title.text(&view.language, fallbacks);
        if title.is_empty() {
            title = messages::default_title(&view.language, fallbacks);
        }

        RenderUpdate {
            title,
            diff,
            paints,
            load_failed: false,
        }
    }

    /// Pin, hover or release an element and re-render.
    pub fn focus(&mut self, focus: &Focus) -> RenderUpdate {
        self.store.on_focus_changed(focus);
        self.render()
    }

    /// Store new search text and re-render.
    pub fn search(&mut self, text: &str) -> RenderUpdate {
        self.store.on_search_changed(text);
        self.render()
    }

    /// Persist the settings panel. Returns the query the view reloads with.
    pub fn save_settings(&mut self, settings: &Settings) -> String {
        self.store.on_settings_saved(settings)
    }
}

/// Delays search recomputation until typing pauses.
///
/// Scheduling a new task aborts the pending one, so at most one is waiting.
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Duration::from_millis(config.display.search_debounce_ms))
    }

    /// Run `task` once the delay has passed without another call.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, Group, Relationship, RelationshipKey};
    use crate::view_state::MemoryLocation;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const OWNS: &str = "https://agriculture.ld.admin.ch/system-map/owns";

    fn dataset() -> Arc<Dataset> {
        let mut ds = Dataset::new();
        ds.title.insert("de", "Systemlandkarte BLW");
        ds.title.insert("en", "FOAG system map");
        ds.add_entity(Entity::new("a", "c", Group::Organization).with_name("de", "Amt"));
        ds.add_entity(Entity::new("b", "c", Group::System).with_name("de", "Register"));
        ds.add_relationship(Relationship::new(RelationshipKey::new("a", OWNS, "b"), true));
        Arc::new(ds)
    }

    #[test]
    fn test_render_then_incremental() {
        let config = Arc::new(Config::default());
        let mut session = Session::new(config, dataset(), MemoryLocation::new("lang=en"));

        let first = session.render();
        assert_eq!(first.title, "FOAG system map");
        assert_eq!(first.diff.added_entities.len(), 2);
        assert!(!first.load_failed);

        let second = session.search("amt");
        assert!(second.diff.is_empty());
        assert!(second.paints.node("a").unwrap().highlighted);
        assert_eq!(session.store().location().replacements(), 1);
        assert_eq!(session.store().location().reloads(), 0);
    }

    #[test]
    fn test_resume_from_rendered_view() {
        let config = Arc::new(Config::default());
        let mut session =
            Session::new(config, dataset(), MemoryLocation::new("lang=en&system=false")).resume_from("lang=en");

        let update = session.render();
        assert!(update.diff.added_entities.is_empty());
        assert_eq!(update.diff.removed_entities, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(update.diff.removed_relationships.len(), 1);
    }

    #[test]
    fn test_resume_from_without_dataset() {
        let config = Arc::new(Config::default());
        let mut session = Session::failed(config, MemoryLocation::new("")).resume_from("lang=en");
        let update = session.render();
        assert!(update.load_failed);
        assert!(update.diff.is_empty());
    }

    #[test]
    fn test_settings_reload() {
        let config = Arc::new(Config::default());
        let mut session = Session::new(config.clone(), dataset(), MemoryLocation::new(""));
        let mut settings = Settings::from_view(&session.view(), &config);
        settings.groups.insert(Group::System, false);
        let query = session.save_settings(&settings);
        assert_eq!(query, "system=false");
        assert_eq!(session.store().location().reloads(), 1);
        let update = session.render();
        assert!(update.paints.nodes.is_empty());
    }

    #[test]
    fn test_failed_session_shows_localized_error() {
        let config = Arc::new(Config::default());
        let mut session = Session::failed(config, MemoryLocation::new("lang=fr"));
        let update = session.render();
        assert!(update.load_failed);
        assert!(update.title.starts_with("La carte des systèmes"));
        assert!(update.paints.nodes.is_empty());
    }

    #[test]
    fn test_missing_title_uses_default() {
        let config = Arc::new(Config::default());
        let mut session = Session::new(config, Arc::new(Dataset::new()), MemoryLocation::new("lang=it"));
        assert_eq!(session.render().title, "Mappa dei sistemi");
    }

    #[tokio::test]
    async fn test_debouncer_runs_only_last() {
        let runs = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(AtomicUsize::new(0));
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(30));

        for i in 1..=3 {
            let runs = runs.clone();
            let last = last.clone();
            debouncer.schedule(async move {
                runs.fetch_add(1, Ordering::SeqCst);
                last.store(i, Ordering::SeqCst);
            });
        }
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(last.load(Ordering::SeqCst), 3);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test]
    async fn test_debouncer_cancel() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(20));
        let counter = runs.clone();
        debouncer.schedule(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }
}
