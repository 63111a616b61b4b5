//! Default values for sysmap configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// SPARQL Defaults
// ============================================================================

/// Default SPARQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://lindas.admin.ch/query";

/// Named graph holding the system map triples.
pub const DEFAULT_GRAPH: &str = "https://lindas.admin.ch/foag/system-map";

/// Request timeout for a single query (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Media type requested from the endpoint.
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

// ============================================================================
// Vocabulary Defaults
// ============================================================================

/// Prefixes used to shorten IRIs into CURIEs, checked in order.
pub const DEFAULT_PREFIXES: &[(&str, &str)] = &[
    ("http://www.w3.org/2000/01/rdf-schema#", "rdfs"),
    ("http://www.w3.org/2002/07/owl#", "owl"),
    ("https://agriculture.ld.admin.ch/system-map/", "systemmap"),
    ("http://schema.org/", "schema"),
    ("http://www.w3.org/ns/dcat#", "dcat"),
    ("http://www.w3.org/ns/prov#", "prov"),
    ("http://purl.org/ontology/service#", "service"),
    ("http://purl.org/dc/terms/", "dcterms"),
    ("https://register.ld.admin.ch/zefix/company/", "zefix"),
];

/// Relationship-type keys accepted in the `predicates` parameter.
pub const DEFAULT_PREDICATES: &[(&str, &str)] = &[
    ("isPartOf", "dcterms:isPartOf"),
    ("wasDerivedFrom", "prov:wasDerivedFrom"),
    ("parentOrg", "schema:parentOrganization"),
    ("operates", "systemmap:operates"),
    ("owns", "systemmap:owns"),
    ("contains", "systemmap:contains"),
    ("usesMasterData", "systemmap:usesMasterData"),
    ("memberOf", "schema:memberOf"),
    ("provides", "service:provides"),
    ("consumes", "service:consumes"),
    ("access", "systemmap:access"),
    ("references", "systemmap:references"),
];

/// Predicates drawn as dashed lines.
pub const DEFAULT_DASHED_PREDICATES: &[&str] = &[
    "http://www.w3.org/ns/prov#wasDerivedFrom",
    "http://purl.org/ontology/service#consumes",
    "https://agriculture.ld.admin.ch/system-map/owns",
    "https://agriculture.ld.admin.ch/system-map/usesMasterData",
    "https://agriculture.ld.admin.ch/system-map/access",
    "https://agriculture.ld.admin.ch/system-map/references",
];

/// Class IRI to group name.
pub const DEFAULT_GROUPS: &[(&str, &str)] = &[
    ("http://schema.org/Organization", "Organization"),
    ("http://schema.org/SoftwareApplication", "System"),
    ("http://www.w3.org/ns/dcat#Dataset", "Information"),
    ("http://purl.org/ontology/service#Service", "Service"),
];

// ============================================================================
// Display Defaults
// ============================================================================

/// Language used when the address bar does not name one.
pub const DEFAULT_LANGUAGE: &str = "de";

/// Languages tried, in order, after the preferred one.
pub const DEFAULT_FALLBACK_LANGUAGES: &[&str] = &["en", "de", "fr", "it"];

/// Hop radius of the neighborhood highlight.
pub const DEFAULT_MAX_HOPS: usize = 2;

/// Blend ratio applied to entities at the outer hop.
pub const DEFAULT_DIM_RATIO: f64 = 0.5;

/// Upper bound of the rank-hide percentage.
pub const MAX_HIDE_PERCENT: u8 = 90;

/// Label length above which the abbreviation is preferred.
pub const DEFAULT_LABEL_MAX_CHARS: usize = 40;

/// Delay before a search keystroke triggers recomputation (ms).
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Line width of a regular relationship.
pub const DEFAULT_EDGE_WIDTH: f64 = 1.0;

/// Line width of the focused relationship.
pub const DEFAULT_FOCUSED_EDGE_WIDTH: f64 = 3.0;

// ============================================================================
// Palette Defaults (fill, border, text)
// ============================================================================

pub const ORGANIZATION_COLORS: (&str, &str, &str) = ("#383743", "#000000", "#FFFFFF");
pub const SYSTEM_COLORS: (&str, &str, &str) = ("#FF7F51", "#000000", "#000000");
pub const SERVICE_COLORS: (&str, &str, &str) = ("#8FC0A9", "#000000", "#000000");
pub const INFORMATION_COLORS: (&str, &str, &str) = ("#ADB6C4", "#000000", "#000000");
pub const OTHER_COLORS: (&str, &str, &str) = ("#383743", "#000000", "#FFFFFF");

/// Colors entities fade toward when dimmed.
pub const DIM_COLORS: (&str, &str, &str) = ("#F8F8F8", "#EEEEEE", "#EEEEEE");

/// Colors of entities matching the search term.
pub const HIGHLIGHT_COLORS: (&str, &str, &str) = ("#FFD500", "#000000", "#000000");

/// Relationship line and label colors.
pub const EDGE_LINE_COLOR: &str = "#000000";
pub const EDGE_TEXT_COLOR: &str = "#000000";
pub const DIM_EDGE_LINE_COLOR: &str = "#CCCCCC";
pub const DIM_EDGE_TEXT_COLOR: &str = "#CCCCCC";

// ============================================================================
// Server Defaults
// ============================================================================

/// Default port of the local viewer.
pub const DEFAULT_PORT: u16 = 3333;

/// Project-local config file name.
pub const DEFAULT_CONFIG_FILE: &str = "sysmap.toml";
