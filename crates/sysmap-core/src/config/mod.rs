//! Configuration management for sysmap.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `sysmap.toml` file
//! 3. User config `~/.config/sysmap/config.toml`
//! 4. Built-in defaults (lowest priority)
//!
//! The loaded [`Config`] is an immutable value handed to every component at
//! startup; nothing reads configuration from global state.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::color::Rgb;
use crate::iri::PrefixTable;
use crate::model::Group;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote endpoint configuration.
    pub sparql: SparqlConfig,

    /// Prefixes, relationship types and class groups.
    pub vocabulary: VocabularyConfig,

    /// Language and highlighting behavior.
    pub display: DisplayConfig,

    /// Colors for groups, dimming and search highlight.
    pub palette: PaletteConfig,

    /// Optional precomputed layout file.
    pub layout: LayoutConfig,

    /// Local viewer settings.
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./sysmap.toml` (project local)
    /// 2. `~/.config/sysmap/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_file(DEFAULT_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("sysmap").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        tracing::debug!(path = %path.as_ref().display(), "loaded configuration");
        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("SYSMAP_ENDPOINT") {
            self.sparql.endpoint = endpoint;
        }
        if let Ok(graph) = std::env::var("SYSMAP_GRAPH") {
            self.sparql.graph = graph;
        }
        if let Ok(secs) = std::env::var("SYSMAP_TIMEOUT_SECS") {
            if let Ok(n) = secs.parse() {
                self.sparql.timeout_secs = n;
            }
        }
        if let Ok(lang) = std::env::var("SYSMAP_LANGUAGE") {
            self.display.default_language = lang;
        }
        if let Ok(path) = std::env::var("SYSMAP_LAYOUT") {
            self.layout.path = Some(path);
        }
        if let Ok(port) = std::env::var("SYSMAP_PORT") {
            if let Ok(n) = port.parse() {
                self.server.port = n;
            }
        }
    }

    /// Check values that would make the engine misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.display.dim_ratio) {
            return Err(ConfigError::Invalid(format!(
                "display.dim_ratio must be within 0..=1, got {}",
                self.display.dim_ratio
            )));
        }
        if self.display.max_hops == 0 {
            return Err(ConfigError::Invalid("display.max_hops must be at least 1".into()));
        }

        let prefixes = self.prefix_table();
        for entry in &self.vocabulary.predicates {
            if prefixes.expand(&entry.iri).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "predicate '{}' uses an unknown prefix: {}",
                    entry.key, entry.iri
                )));
            }
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }

    /// Ordered prefix table built from the vocabulary.
    pub fn prefix_table(&self) -> PrefixTable {
        PrefixTable::new(
            self.vocabulary
                .prefixes
                .iter()
                .map(|p| (p.base.clone(), p.short.clone())),
        )
    }

    /// Full IRI of the relationship type registered under `key`.
    pub fn predicate_iri(&self, key: &str) -> Option<String> {
        let entry = self.vocabulary.predicates.iter().find(|p| p.key == key)?;
        self.prefix_table().expand(&entry.iri)
    }

    /// Full IRIs of every configured relationship type, in config order.
    pub fn predicate_iris(&self) -> Vec<String> {
        let prefixes = self.prefix_table();
        self.vocabulary
            .predicates
            .iter()
            .filter_map(|p| prefixes.expand(&p.iri))
            .collect()
    }

    /// Parameter key of a relationship type, if it is configured.
    pub fn predicate_key(&self, iri: &str) -> Option<&str> {
        let prefixes = self.prefix_table();
        self.vocabulary
            .predicates
            .iter()
            .find(|p| prefixes.expand(&p.iri).as_deref() == Some(iri))
            .map(|p| p.key.as_str())
    }

    /// Group of an entity class; unknown classes fall into [`Group::Other`].
    pub fn group_for_class(&self, class_iri: &str) -> Group {
        self.vocabulary
            .groups
            .iter()
            .find(|g| g.class == class_iri)
            .map(|g| g.group)
            .unwrap_or(Group::Other)
    }

    /// Class IRIs mapped onto `group`.
    pub fn classes_for_group(&self, group: Group) -> impl Iterator<Item = &str> {
        self.vocabulary
            .groups
            .iter()
            .filter(move |g| g.group == group)
            .map(|g| g.class.as_str())
    }

    /// Whether relationships of this type are drawn dashed.
    pub fn is_dashed(&self, predicate_iri: &str) -> bool {
        self.vocabulary
            .dashed_predicates
            .iter()
            .any(|p| p == predicate_iri)
    }
}

/// SPARQL endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SparqlConfig {
    /// Query endpoint URL.
    pub endpoint: String,

    /// Named graph the queries are scoped to.
    pub graph: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SparqlConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            graph: DEFAULT_GRAPH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// A namespace that is displayed in its short form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixEntry {
    pub base: String,
    pub short: String,
}

/// A relationship type selectable through the `predicates` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateEntry {
    /// Key used in the address bar.
    pub key: String,
    /// Full IRI or CURIE.
    pub iri: String,
}

/// Maps an RDF class onto a display group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupEntry {
    pub class: String,
    pub group: Group,
}

/// Vocabulary configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Checked in order; the first matching base wins.
    pub prefixes: Vec<PrefixEntry>,

    /// Relationship types, in display order.
    pub predicates: Vec<PredicateEntry>,

    /// Relationship types rendered as dashed lines (full IRIs).
    pub dashed_predicates: Vec<String>,

    /// Class to group mapping.
    pub groups: Vec<GroupEntry>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_PREFIXES
                .iter()
                .map(|(base, short)| PrefixEntry {
                    base: base.to_string(),
                    short: short.to_string(),
                })
                .collect(),
            predicates: DEFAULT_PREDICATES
                .iter()
                .map(|(key, iri)| PredicateEntry {
                    key: key.to_string(),
                    iri: iri.to_string(),
                })
                .collect(),
            dashed_predicates: DEFAULT_DASHED_PREDICATES.iter().map(|s| s.to_string()).collect(),
            groups: DEFAULT_GROUPS
                .iter()
                .filter_map(|(class, group)| {
                    Group::from_name(group).map(|group| GroupEntry {
                        class: class.to_string(),
                        group,
                    })
                })
                .collect(),
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Language used when the address bar has none.
    pub default_language: String,

    /// Languages tried after the preferred one.
    pub fallback_languages: Vec<String>,

    /// Neighborhood radius for focus highlighting.
    pub max_hops: usize,

    /// Blend ratio toward the dim colors at the outer hop.
    pub dim_ratio: f64,

    /// Label length above which the abbreviation is shown instead.
    pub label_max_chars: usize,

    /// Search input debounce in milliseconds.
    pub search_debounce_ms: u64,

    /// Relationship line width.
    pub edge_width: f64,

    /// Line width of the focused relationship.
    pub focused_edge_width: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            fallback_languages: DEFAULT_FALLBACK_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            max_hops: DEFAULT_MAX_HOPS,
            dim_ratio: DEFAULT_DIM_RATIO,
            label_max_chars: DEFAULT_LABEL_MAX_CHARS,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            edge_width: DEFAULT_EDGE_WIDTH,
            focused_edge_width: DEFAULT_FOCUSED_EDGE_WIDTH,
        }
    }
}

/// Fill, border and text color of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeColors {
    pub fill: Rgb,
    pub border: Rgb,
    pub text: Rgb,
}

impl NodeColors {
    fn from_defaults((fill, border, text): (&str, &str, &str)) -> Self {
        Self {
            fill: Rgb::parse(fill).unwrap_or(Rgb::BLACK),
            border: Rgb::parse(border).unwrap_or(Rgb::BLACK),
            text: Rgb::parse(text).unwrap_or(Rgb::BLACK),
        }
    }
}

/// Line and label color of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeColors {
    pub line: Rgb,
    pub text: Rgb,
}

/// Base colors per group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupPalette {
    pub organization: NodeColors,
    pub system: NodeColors,
    pub service: NodeColors,
    pub information: NodeColors,
    pub other: NodeColors,
}

impl GroupPalette {
    /// Base colors of `group`.
    pub fn get(&self, group: Group) -> NodeColors {
        match group {
            Group::Organization => self.organization,
            Group::System => self.system,
            Group::Service => self.service,
            Group::Information => self.information,
            Group::Other => self.other,
        }
    }
}

impl Default for GroupPalette {
    fn default() -> Self {
        Self {
            organization: NodeColors::from_defaults(ORGANIZATION_COLORS),
            system: NodeColors::from_defaults(SYSTEM_COLORS),
            service: NodeColors::from_defaults(SERVICE_COLORS),
            information: NodeColors::from_defaults(INFORMATION_COLORS),
            other: NodeColors::from_defaults(OTHER_COLORS),
        }
    }
}

/// Palette configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub groups: GroupPalette,

    /// Target colors of dimmed entities.
    pub dim: NodeColors,

    /// Colors of search matches.
    pub highlight: NodeColors,

    pub edge: EdgeColors,

    /// Target colors of dimmed relationships.
    pub dim_edge: EdgeColors,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            groups: GroupPalette::default(),
            dim: NodeColors::from_defaults(DIM_COLORS),
            highlight: NodeColors::from_defaults(HIGHLIGHT_COLORS),
            edge: EdgeColors {
                line: Rgb::parse(EDGE_LINE_COLOR).unwrap_or(Rgb::BLACK),
                text: Rgb::parse(EDGE_TEXT_COLOR).unwrap_or(Rgb::BLACK),
            },
            dim_edge: EdgeColors {
                line: Rgb::parse(DIM_EDGE_LINE_COLOR).unwrap_or(Rgb::BLACK),
                text: Rgb::parse(DIM_EDGE_TEXT_COLOR).unwrap_or(Rgb::BLACK),
            },
        }
    }
}

/// Layout file configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// JSON file mapping entity ids to coordinates and rank.
    pub path: Option<String>,
}

/// Local viewer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,

    /// Whether to open the browser automatically.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            open_browser: true,
        }
    }
}
