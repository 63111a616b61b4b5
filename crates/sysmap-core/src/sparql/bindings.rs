//! SPARQL 1.1 query results in JSON.

use std::collections::HashMap;

use serde::Deserialize;

/// Top-level results document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResults {
    #[serde(default)]
    pub head: Head,
    pub results: ResultSet,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Head {
    #[serde(default)]
    pub vars: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub bindings: Vec<Row>,
}

/// One bound value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Term {
    pub value: String,
    #[serde(rename = "xml:lang", default)]
    pub lang: Option<String>,
}

/// Variable name to bound value; unbound optional variables are absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Row(HashMap<String, Term>);

impl Row {
    pub fn get(&self, var: &str) -> Option<&Term> {
        self.0.get(var)
    }

    /// Value of `var`, if bound and non-empty.
    pub fn value(&self, var: &str) -> Option<&str> {
        self.get(var)
            .map(|t| t.value.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Text of `var` with its language.
    ///
    /// The language comes from a companion `<var>Lang` binding when the query
    /// provides one, else from the literal's own tag; untagged text has an
    /// empty language.
    pub fn text(&self, var: &str) -> Option<(String, &str)> {
        let term = self.get(var)?;
        if term.value.is_empty() {
            return None;
        }
        let lang = self
            .value(&format!("{var}Lang"))
            .map(str::to_string)
            .or_else(|| term.lang.clone())
            .unwrap_or_default();
        Some((lang, term.value.as_str()))
    }
}

impl QueryResults {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn rows(&self) -> &[Row] {
        &self.results.bindings
    }
}
