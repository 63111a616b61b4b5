use std::fmt;

use serde::{Serialize, Serializer};

/// Identity of a relationship: `(source, predicate, target)`.
///
/// Rendered as the three IRIs separated by single spaces, which cannot occur
/// inside an IRI.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelationshipKey {
    pub source: String,
    pub predicate: String,
    pub target: String,
}

impl RelationshipKey {
    pub fn new(
        source: impl Into<String>,
        predicate: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            predicate: predicate.into(),
            target: target.into(),
        }
    }

    /// Parse the form produced by `Display`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split_whitespace();
        let key = Self::new(parts.next()?, parts.next()?, parts.next()?);
        parts.next().is_none().then_some(key)
    }
}

impl fmt::Display for RelationshipKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.source, self.predicate, self.target)
    }
}

impl Serialize for RelationshipKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A directed, typed connection between two entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub key: RelationshipKey,
    /// Drawn with a dashed line.
    pub dashed: bool,
}

impl Relationship {
    pub fn new(key: RelationshipKey, dashed: bool) -> Self {
        Self { key, dashed }
    }

    pub fn source(&self) -> &str {
        &self.key.source
    }

    pub fn target(&self) -> &str {
        &self.key.target
    }

    pub fn predicate(&self) -> &str {
        &self.key.predicate
    }
}
