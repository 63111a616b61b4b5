use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Precomputed position and importance of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<f64>,
}

/// Optional static layout file: `{ "<entity id>": { "x": .., "y": .., "rank": .. } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    entries: HashMap<String, LayoutEntry>,
}

impl Layout {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn insert(&mut self, id: impl Into<String>, entry: LayoutEntry) {
        self.entries.insert(id.into(), entry);
    }

    pub fn get(&self, id: &str) -> Option<&LayoutEntry> {
        self.entries.get(id)
    }

    /// Importance score of `id`; NaN counts as unranked.
    pub fn rank(&self, id: &str) -> Option<f64> {
        self.entries
            .get(id)
            .and_then(|e| e.rank)
            .filter(|r| !r.is_nan())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let layout = Layout::from_json(
            r#"{ "http://a/1": { "x": 1.5, "y": -2, "rank": 0.8 }, "http://a/2": { "x": 0, "y": 0 } }"#,
        )
        .unwrap();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.rank("http://a/1"), Some(0.8));
        assert_eq!(layout.rank("http://a/2"), None);
        assert_eq!(layout.rank("http://a/3"), None);
    }
}
