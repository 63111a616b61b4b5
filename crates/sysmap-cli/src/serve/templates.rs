//! HTML template rendering for the viewer page.
//!
//! Templates are stored as separate files for maintainability:
//! - `templates/index.html` - HTML structure
//! - `templates/styles.css` - CSS styles
//! - `templates/app.js` - JavaScript application code
//!
//! Files are embedded at compile time using `include_str!`.

use serde_json::json;

use sysmap_core::{messages, Config};

const HTML_TEMPLATE: &str = include_str!("templates/index.html");
const STYLES: &str = include_str!("templates/styles.css");
const SCRIPT: &str = include_str!("templates/app.js");

/// Render the viewer page.
///
/// Placeholders:
/// - `{{TITLE}}` - title shown until the first view arrives
/// - `{{SETTINGS}}` - JSON object with client-side settings
/// - `{{STYLES}}` - CSS styles
/// - `{{SCRIPT}}` - JavaScript code
pub fn render_page(config: &Config) -> String {
    let title = messages::default_title(
        &config.display.default_language,
        &config.display.fallback_languages,
    );
    let settings = json!({
        "defaultLanguage": config.display.default_language,
        "searchDebounceMs": config.display.search_debounce_ms,
        "maxHidePercent": sysmap_core::config::MAX_HIDE_PERCENT,
    });

    HTML_TEMPLATE
        .replace("{{TITLE}}", &html_escape(&title))
        .replace("{{SETTINGS}}", &settings.to_string())
        .replace("{{STYLES}}", STYLES)
        .replace("{{SCRIPT}}", SCRIPT)
}

/// Escape HTML special characters to prevent XSS.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
