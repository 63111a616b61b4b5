//! Multilingual text and language fallback resolution.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Language tag of text that carries none.
pub const UNTAGGED: &str = "";

/// Text in several languages, kept in insertion order.
///
/// Order matters: when neither the preferred language, the fallback chain nor
/// the untagged entry is present, the first inserted entry is used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LangText {
    entries: Vec<(String, String)>,
}

impl LangText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(lang, text);
        self
    }

    /// Add text for `lang`. The first text seen for a language is kept.
    pub fn insert(&mut self, lang: impl Into<String>, text: impl Into<String>) -> bool {
        let lang = lang.into().to_ascii_lowercase();
        if self.entries.iter().any(|(l, _)| *l == lang) {
            return false;
        }
        self.entries.push((lang, text.into()));
        true
    }

    pub fn get(&self, lang: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l.eq_ignore_ascii_case(lang))
            .map(|(_, t)| t.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `(language, text)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, t)| (l.as_str(), t.as_str()))
    }

    /// Case-insensitive substring match against every language.
    pub fn contains_ci(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.entries
            .iter()
            .any(|(_, t)| t.to_lowercase().contains(&needle))
    }

    /// Best text for `preferred`; see [`resolve`].
    pub fn resolve<S: AsRef<str>>(&self, preferred: &str, fallbacks: &[S]) -> Resolved {
        resolve(Some(self), preferred, fallbacks)
    }

    /// Shorthand for `resolve(..).text`.
    pub fn text<S: AsRef<str>>(&self, preferred: &str, fallbacks: &[S]) -> String {
        self.resolve(preferred, fallbacks).text
    }
}

impl Serialize for LangText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (lang, text) in &self.entries {
            map.serialize_entry(lang, text)?;
        }
        map.end()
    }
}

/// Outcome of a language resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub text: String,
    /// Language actually used; empty when untagged or nothing was found.
    pub language: String,
    /// True whenever `language` differs from the preferred language.
    pub is_fallback: bool,
}

/// Pick the best available text.
///
/// Order: `preferred`, then each of `fallbacks`, then the untagged entry, then
/// the first entry in insertion order. Missing or empty input resolves to an
/// empty string flagged as a fallback.
pub fn resolve<S: AsRef<str>>(texts: Option<&LangText>, preferred: &str, fallbacks: &[S]) -> Resolved {
    let Some(texts) = texts.filter(|t| !t.is_empty()) else {
        return Resolved {
            text: String::new(),
            language: String::new(),
            is_fallback: true,
        };
    };

    let candidates = std::iter::once(preferred)
        .chain(fallbacks.iter().map(AsRef::as_ref))
        .chain(std::iter::once(UNTAGGED));

    let (language, text) = candidates
        .filter_map(|lang| texts.get(lang).map(|t| (lang.to_ascii_lowercase(), t)))
        .next()
        .or_else(|| texts.iter().next().map(|(l, t)| (l.to_string(), t)))
        .unwrap_or_default();

    Resolved {
        is_fallback: !language.eq_ignore_ascii_case(preferred),
        text: text.to_string(),
        language,
    }
}
