use serde::Serialize;

use super::Group;
use crate::label::display_label;
use crate::locale::LangText;

/// A displayed organization, system, service or dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    /// Stable IRI.
    pub id: String,
    /// RDF class the entity was selected by.
    pub class: String,
    pub group: Group,
    pub name: LangText,
    pub abbreviation: LangText,
    pub comment: LangText,
}

impl Entity {
    pub fn new(id: impl Into<String>, class: impl Into<String>, group: Group) -> Self {
        Self {
            id: id.into(),
            class: class.into(),
            group,
            name: LangText::new(),
            abbreviation: LangText::new(),
            comment: LangText::new(),
        }
    }

    pub fn with_name(mut self, lang: &str, text: &str) -> Self {
        self.name.insert(lang, text);
        self
    }

    pub fn with_abbreviation(mut self, lang: &str, text: &str) -> Self {
        self.abbreviation.insert(lang, text);
        self
    }

    pub fn with_comment(mut self, lang: &str, text: &str) -> Self {
        self.comment.insert(lang, text);
        self
    }

    /// Fold another row describing the same entity into this one.
    pub fn merge(&mut self, other: Entity) {
        for (lang, text) in other.name.iter() {
            self.name.insert(lang, text);
        }
        for (lang, text) in other.abbreviation.iter() {
            self.abbreviation.insert(lang, text);
        }
        for (lang, text) in other.comment.iter() {
            self.comment.insert(lang, text);
        }
    }

    /// Case-insensitive match of name, abbreviation or comment in any language.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim();
        !term.is_empty()
            && (self.name.contains_ci(term)
                || self.abbreviation.contains_ci(term)
                || self.comment.contains_ci(term))
    }

    /// Node caption in `lang`.
    pub fn caption<S: AsRef<str>>(&self, lang: &str, fallbacks: &[S], max: usize) -> String {
        let name = self.name.text(lang, fallbacks);
        let abbreviation = self.abbreviation.text(lang, fallbacks);
        if name.is_empty() {
            return if abbreviation.is_empty() { self.id.clone() } else { abbreviation };
        }
        display_label(&name, &abbreviation, max)
    }
}
