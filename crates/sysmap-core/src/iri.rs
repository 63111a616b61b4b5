//! Compact display forms (CURIEs) for IRIs.

/// Ordered `(base, short)` pairs; the first matching base wins.
///
/// Order is significant because a base may itself be a prefix of another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixTable {
    entries: Vec<(String, String)>,
}

impl PrefixTable {
    pub fn new<I, B, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (B, S)>,
        B: Into<String>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(b, s)| (b.into(), s.into()))
                .collect(),
        }
    }

    /// `short:remainder` for the first matching base; otherwise the input.
    pub fn shorten(&self, iri: &str) -> String {
        shorten(iri, self.entries.as_slice())
    }

    /// Reverse of [`shorten`](Self::shorten).
    ///
    /// Absolute IRIs are returned as-is. A CURIE with an unknown prefix
    /// yields `None`.
    pub fn expand(&self, curie: &str) -> Option<String> {
        if curie.contains("://") || curie.starts_with("urn:") {
            return Some(curie.to_string());
        }
        let (prefix, local) = curie.split_once(':')?;
        self.entries
            .iter()
            .find(|(_, short)| short == prefix)
            .map(|(base, _)| format!("{base}{local}"))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(b, s)| (b.as_str(), s.as_str()))
    }
}

/// Shorten `identifier` with the first `(base, short)` entry whose base is a
/// prefix of it. Identifiers matching no entry are returned unchanged.
pub fn shorten<B: AsRef<str>, S: AsRef<str>>(identifier: &str, table: &[(B, S)]) -> String {
    table
        .iter()
        .find_map(|(base, short)| {
            identifier
                .strip_prefix(base.as_ref())
                .map(|rest| format!("{}:{}", short.as_ref(), rest))
        })
        .unwrap_or_else(|| identifier.to_string())
}
