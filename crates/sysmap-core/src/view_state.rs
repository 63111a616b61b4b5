//! View state encoded in the address bar.
//!
//! The query component of the page address is the single source of truth for
//! what is visible and highlighted. Filter changes are written durably (the
//! page reloads and data is refetched); focus and search are written
//! transiently (the address changes in place).
//!
//! Boolean-ish group parameters default to visible: absent or `"true"` keeps
//! a group, only an explicit `"false"` hides it.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use url::form_urlencoded;

use crate::config::{Config, MAX_HIDE_PERCENT};
use crate::model::{Group, RelationshipKey};

pub const PARAM_LANG: &str = "lang";
pub const PARAM_SEARCH: &str = "search";
pub const PARAM_FOCUS: &str = "focus";
pub const PARAM_EDGE: &str = "edge";
pub const PARAM_PREDICATES: &str = "predicates";
pub const PARAM_HIDE_PERCENT: &str = "hidePercent";
pub const PARAM_SUBGRAPH: &str = "subgraph";

// ============================================================================
// Query Parameters
// ============================================================================

/// Decoded query parameters, in address-bar order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse a query component, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First non-blank value for `key`.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    /// Replace the value of `key` in place, or append it.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let mut seen = false;
        self.pairs.retain_mut(|(k, v)| {
            if k != key {
                return true;
            }
            if seen {
                return false;
            }
            seen = true;
            *v = value.clone();
            true
        });
        if !seen {
            self.pairs.push((key.to_string(), value));
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// Merge a patch; reset entries drop the key.
    pub fn apply(&mut self, patch: &ParamPatch) {
        for (key, value) in &patch.entries {
            match value {
                ParamValue::Set(v) => self.set(key, v.clone()),
                ParamValue::Reset => self.remove(key),
            }
        }
    }

    /// Encode as a query component (without `?`).
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

/// New value of one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Set(String),
    /// Remove the key, restoring its default.
    Reset,
}

/// A set of parameter changes applied together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamPatch {
    entries: Vec<(String, ParamValue)>,
}

impl ParamPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: impl Into<String>) -> Self {
        self.entries.push((key.to_string(), ParamValue::Set(value.into())));
        self
    }

    pub fn reset(mut self, key: &str) -> Self {
        self.entries.push((key.to_string(), ParamValue::Reset));
        self
    }

    /// `None` resets the key.
    pub fn optional(self, key: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.set(key, v),
            None => self.reset(key),
        }
    }

    /// Default-on flag: `true` resets the key, `false` writes `"false"`.
    pub fn flag(self, key: &str, enabled: bool) -> Self {
        if enabled {
            self.reset(key)
        } else {
            self.set(key, "false")
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// View State
// ============================================================================

/// The pinned or hovered element driving highlighting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    None,
    Entity(String),
    Relationship(RelationshipKey),
}

impl Focus {
    pub fn is_none(&self) -> bool {
        matches!(self, Focus::None)
    }
}

/// Everything that determines what is currently visible and highlighted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub language: String,
    pub focus: Focus,
    pub search: String,
    pub hide_percent: u8,
    pub subgraph: Option<String>,
    hidden_groups: BTreeSet<Group>,
    /// Enabled relationship-type IRIs.
    enabled_predicates: BTreeSet<String>,
}

impl ViewState {
    /// Default view: every group and relationship type visible, nothing focused.
    pub fn new(config: &Config) -> Self {
        Self {
            language: config.display.default_language.clone(),
            focus: Focus::None,
            search: String::new(),
            hide_percent: 0,
            subgraph: None,
            hidden_groups: BTreeSet::new(),
            enabled_predicates: config.predicate_iris().into_iter().collect(),
        }
    }

    pub fn from_query(query: &str, config: &Config) -> Self {
        Self::from_params(&QueryParams::parse(query), config)
    }

    /// Interpret address-bar parameters. Unknown group names, unknown
    /// relationship-type keys and malformed values are ignored.
    pub fn from_params(params: &QueryParams, config: &Config) -> Self {
        let mut state = Self::new(config);

        if let Some(lang) = params.get_non_empty(PARAM_LANG) {
            state.language = lang.trim().to_ascii_lowercase();
        }

        state.search = params.get(PARAM_SEARCH).unwrap_or_default().to_string();

        state.focus = match (params.get_non_empty(PARAM_FOCUS), params.get_non_empty(PARAM_EDGE)) {
            (Some(id), edge) => {
                if edge.is_some() {
                    tracing::debug!("both entity and relationship focus set; keeping entity");
                }
                Focus::Entity(id.trim().to_string())
            }
            (None, Some(edge)) => match RelationshipKey::parse(edge) {
                Some(key) => Focus::Relationship(key),
                None => {
                    tracing::debug!(edge, "ignoring malformed relationship focus");
                    Focus::None
                }
            },
            (None, None) => Focus::None,
        };

        for group in Group::ALL {
            if let Some(value) = params.get(group.param_key()) {
                if value.trim().eq_ignore_ascii_case("false") {
                    state.hidden_groups.insert(group);
                }
            }
        }

        if let Some(raw) = params.get_non_empty(PARAM_PREDICATES) {
            let selected: BTreeSet<String> = split_keys(raw)
                .filter_map(|key| {
                    let iri = config.predicate_iri(key);
                    if iri.is_none() {
                        tracing::debug!(key, "ignoring unknown relationship-type key");
                    }
                    iri
                })
                .collect();
            if !selected.is_empty() {
                state.enabled_predicates = selected;
            }
        }

        if let Some(raw) = params.get_non_empty(PARAM_HIDE_PERCENT) {
            state.hide_percent = parse_hide_percent(raw);
        }

        state.subgraph = params
            .get_non_empty(PARAM_SUBGRAPH)
            .map(|s| s.trim().to_string());

        state
    }

    pub fn is_group_visible(&self, group: Group) -> bool {
        !self.hidden_groups.contains(&group)
    }

    pub fn is_predicate_enabled(&self, iri: &str) -> bool {
        self.enabled_predicates.contains(iri)
    }

    /// Enabled relationship types in configuration order.
    pub fn enabled_predicates(&self, config: &Config) -> Vec<String> {
        config
            .predicate_iris()
            .into_iter()
            .filter(|iri| self.enabled_predicates.contains(iri))
            .collect()
    }

    /// Trimmed search term, if any.
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }
}

/// Split a `predicates` value on `;`, `,`, `+` or whitespace.
fn split_keys(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| matches!(c, ';' | ',' | '+') || c.is_whitespace())
        .filter(|s| !s.is_empty())
}

fn parse_hide_percent(raw: &str) -> u8 {
    match raw.trim().parse::<i64>() {
        Ok(n) => n.clamp(0, i64::from(MAX_HIDE_PERCENT)) as u8,
        Err(_) => {
            tracing::debug!(raw, "ignoring malformed hide percentage");
            0
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Values edited in the settings panel. Saving them reloads the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub language: String,
    pub groups: BTreeMap<Group, bool>,
    /// Enabled relationship-type keys.
    pub predicates: Vec<String>,
    pub hide_percent: u8,
}

impl Settings {
    /// Settings reflecting the current view.
    pub fn from_view(state: &ViewState, config: &Config) -> Self {
        Self {
            language: state.language.clone(),
            groups: Group::ALL
                .into_iter()
                .map(|g| (g, state.is_group_visible(g)))
                .collect(),
            predicates: state
                .enabled_predicates(config)
                .iter()
                .filter_map(|iri| config.predicate_key(iri).map(str::to_string))
                .collect(),
            hide_percent: state.hide_percent,
        }
    }

    /// Parameter changes; defaults are written as resets.
    pub fn to_patch(&self, config: &Config) -> ParamPatch {
        let mut patch = ParamPatch::new();

        patch = if self.language == config.display.default_language {
            patch.reset(PARAM_LANG)
        } else {
            patch.set(PARAM_LANG, self.language.clone())
        };

        for group in Group::ALL {
            let visible = self.groups.get(&group).copied().unwrap_or(true);
            patch = patch.flag(group.param_key(), visible);
        }

        let all_enabled = config
            .vocabulary
            .predicates
            .iter()
            .all(|p| self.predicates.contains(&p.key));
        patch = if all_enabled || self.predicates.is_empty() {
            patch.reset(PARAM_PREDICATES)
        } else {
            patch.set(PARAM_PREDICATES, self.predicates.join(","))
        };

        let percent = self.hide_percent.min(MAX_HIDE_PERCENT);
        if percent == 0 {
            patch.reset(PARAM_HIDE_PERCENT)
        } else {
            patch.set(PARAM_HIDE_PERCENT, percent.to_string())
        }
    }
}

// ============================================================================
// Store
// ============================================================================

/// The page address, as seen by the view-state store.
pub trait Location {
    /// Current query component.
    fn query(&self) -> String;

    /// Navigate to a new query; the page reloads.
    fn navigate(&mut self, query: &str);

    /// Update the displayed query without reloading.
    fn replace(&mut self, query: &str);
}

/// In-process location that records how it was updated.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocation {
    query: String,
    reloads: usize,
    replacements: usize,
}

impl MemoryLocation {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Number of durable navigations so far.
    pub fn reloads(&self) -> usize {
        self.reloads
    }

    /// Number of in-place updates so far.
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl Location for MemoryLocation {
    fn query(&self) -> String {
        self.query.clone()
    }

    fn navigate(&mut self, query: &str) {
        self.query = query.to_string();
        self.reloads += 1;
    }

    fn replace(&mut self, query: &str) {
        self.query = query.to_string();
        self.replacements += 1;
    }
}

/// Reads and writes the view state through a [`Location`].
pub struct ViewStateStore<L: Location> {
    location: L,
    config: Arc<Config>,
}

impl<L: Location> ViewStateStore<L> {
    pub fn new(location: L, config: Arc<Config>) -> Self {
        Self { location, config }
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn params(&self) -> QueryParams {
        QueryParams::parse(&self.location.query())
    }

    /// Current view state.
    pub fn state(&self) -> ViewState {
        ViewState::from_params(&self.params(), &self.config)
    }

    /// Merge `patch` and reload. Returns the new query.
    pub fn write_durable(&mut self, patch: &ParamPatch) -> String {
        let query = self.merged(patch);
        tracing::debug!(%query, "durable view-state write");
        self.location.navigate(&query);
        query
    }

    /// Merge `patch` without reloading. Returns the new query.
    pub fn write_transient(&mut self, patch: &ParamPatch) -> String {
        let query = self.merged(patch);
        tracing::trace!(%query, "transient view-state write");
        self.location.replace(&query);
        query
    }

    fn merged(&self, patch: &ParamPatch) -> String {
        let mut params = self.params();
        params.apply(patch);
        params.encode()
    }

    /// Pin, hover or release an element. Focusing one kind clears the other.
    pub fn on_focus_changed(&mut self, focus: &Focus) -> String {
        let patch = match focus {
            Focus::None => ParamPatch::new().reset(PARAM_FOCUS).reset(PARAM_EDGE),
            Focus::Entity(id) => ParamPatch::new().set(PARAM_FOCUS, id.clone()).reset(PARAM_EDGE),
            Focus::Relationship(key) => ParamPatch::new()
                .reset(PARAM_FOCUS)
                .set(PARAM_EDGE, key.to_string()),
        };
        self.write_transient(&patch)
    }

    /// New search text; blank text clears the search.
    pub fn on_search_changed(&mut self, text: &str) -> String {
        let value = (!text.trim().is_empty()).then(|| text.to_string());
        self.write_transient(&ParamPatch::new().optional(PARAM_SEARCH, value))
    }

    /// Apply the settings panel; the view reloads.
    pub fn on_settings_saved(&mut self, settings: &Settings) -> String {
        let patch = settings.to_patch(&self.config);
        self.write_durable(&patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::default()
    }

    #[test]
    fn test_defaults() {
        let state = ViewState::from_query("", &config());
        assert_eq!(state.language, "de");
        assert!(state.focus.is_none());
        assert_eq!(state.hide_percent, 0);
        assert!(Group::ALL.iter().all(|g| state.is_group_visible(*g)));
        assert_eq!(state.enabled_predicates(&config()).len(), 12);
    }

    #[test]
    fn test_group_flags_default_on() {
        let state = ViewState::from_query("?system=false&service=true&organization=&bogus=false", &config());
        assert!(!state.is_group_visible(Group::System));
        assert!(state.is_group_visible(Group::Service));
        assert!(state.is_group_visible(Group::Organization));
    }

    #[test]
    fn test_predicates_delimiters() {
        let cfg = config();
        for query in [
            "predicates=owns;isPartOf",
            "predicates=owns,isPartOf",
            "predicates=owns%2BisPartOf",
            "predicates=owns+isPartOf",
            "predicates=owns%20%20isPartOf",
        ] {
            let state = ViewState::from_query(query, &cfg);
            assert_eq!(state.enabled_predicates(&cfg).len(), 2, "{query}");
            assert!(state.is_predicate_enabled("http://purl.org/dc/terms/isPartOf"));
        }
    }

    #[test]
    fn test_unknown_predicate_keys_ignored() {
        let cfg = config();
        let state = ViewState::from_query("predicates=owns,frobnicates", &cfg);
        assert_eq!(state.enabled_predicates(&cfg).len(), 1);

        let state = ViewState::from_query("predicates=frobnicates", &cfg);
        assert_eq!(state.enabled_predicates(&cfg).len(), 12);
    }

    #[test]
    fn test_hide_percent_clamped() {
        let cfg = config();
        assert_eq!(ViewState::from_query("hidePercent=25", &cfg).hide_percent, 25);
        assert_eq!(ViewState::from_query("hidePercent=150", &cfg).hide_percent, 90);
        assert_eq!(ViewState::from_query("hidePercent=-5", &cfg).hide_percent, 0);
        assert_eq!(ViewState::from_query("hidePercent=abc", &cfg).hide_percent, 0);
    }

    #[test]
    fn test_focus_exclusive() {
        let cfg = config();
        let state = ViewState::from_query("focus=http://a/1&edge=a+p+b", &cfg);
        assert_eq!(state.focus, Focus::Entity("http://a/1".into()));

        let state = ViewState::from_query("edge=a+p+b", &cfg);
        assert_eq!(state.focus, Focus::Relationship(RelationshipKey::new("a", "p", "b")));
    }

    #[test]
    fn test_patch_preserves_unrelated_params() {
        let mut params = QueryParams::parse("?subgraph=blw&lang=fr&x=1");
        params.apply(&ParamPatch::new().set(PARAM_LANG, "it").reset("x").set(PARAM_SEARCH, "tvd"));
        assert_eq!(params.encode(), "subgraph=blw&lang=it&search=tvd");
    }

    #[test]
    fn test_flag_true_resets() {
        let mut params = QueryParams::parse("system=false");
        params.apply(&ParamPatch::new().flag("system", true).flag("service", false));
        assert_eq!(params.encode(), "service=false");
    }

    #[test]
    fn test_store_transient_vs_durable() {
        let cfg = Arc::new(config());
        let mut store = ViewStateStore::new(MemoryLocation::new("lang=fr"), cfg.clone());

        store.on_search_changed("Agate");
        store.on_focus_changed(&Focus::Entity("http://a/1".into()));
        assert_eq!(store.location().reloads(), 0);
        assert_eq!(store.location().replacements(), 2);
        assert_eq!(store.state().search, "Agate");

        let mut settings = Settings::from_view(&store.state(), &cfg);
        settings.groups.insert(Group::Information, false);
        settings.hide_percent = 30;
        store.on_settings_saved(&settings);
        assert_eq!(store.location().reloads(), 1);

        let state = store.state();
        assert_eq!(state.language, "fr");
        assert_eq!(state.search, "Agate");
        assert!(!state.is_group_visible(Group::Information));
        assert_eq!(state.hide_percent, 30);
        assert_eq!(state.focus, Focus::Entity("http://a/1".into()));
    }

    #[test]
    fn test_focus_switch_clears_other_kind() {
        let cfg = Arc::new(config());
        let mut store = ViewStateStore::new(MemoryLocation::new("focus=x"), cfg);
        store.on_focus_changed(&Focus::Relationship(RelationshipKey::new("a", "p", "b")));
        let params = store.params();
        assert_eq!(params.get(PARAM_FOCUS), None);
        assert_eq!(params.get(PARAM_EDGE), Some("a p b"));

        store.on_focus_changed(&Focus::None);
        assert_eq!(store.location().query(), "");
    }
}
