use serde::Serialize;

use super::Group;
use crate::locale::LangText;

/// Label, comment and declared domain/range of a relationship type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredicateMetadata {
    pub iri: String,
    pub label: LangText,
    pub comment: LangText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
}

impl PredicateMetadata {
    pub fn new(iri: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            label: LangText::new(),
            comment: LangText::new(),
            domain: None,
            range: None,
        }
    }

    pub fn merge(&mut self, other: PredicateMetadata) {
        for (lang, text) in other.label.iter() {
            self.label.insert(lang, text);
        }
        for (lang, text) in other.comment.iter() {
            self.comment.insert(lang, text);
        }
        if self.domain.is_none() {
            self.domain = other.domain;
        }
        if self.range.is_none() {
            self.range = other.range;
        }
    }
}

/// Legend entry for an entity class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetadata {
    pub iri: String,
    pub group: Group,
    pub label: LangText,
    pub comment: LangText,
}

impl ClassMetadata {
    pub fn merge(&mut self, other: ClassMetadata) {
        for (lang, text) in other.label.iter() {
            self.label.insert(lang, text);
        }
        for (lang, text) in other.comment.iter() {
            self.comment.insert(lang, text);
        }
    }
}
