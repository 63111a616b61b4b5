//! Turn result rows into model values.
//!
//! Multilingual fields arrive as one row per language; the caller merges rows
//! that share an id. Rows missing a required variable are skipped.

use super::bindings::{QueryResults, Row};
use crate::config::Config;
use crate::locale::LangText;
use crate::model::{ClassMetadata, Entity, PredicateMetadata, Relationship, RelationshipKey};

fn insert_text(target: &mut LangText, row: &Row, var: &str) {
    if let Some((lang, text)) = row.text(var) {
        target.insert(lang, text);
    }
}

fn required<'r>(row: &'r Row, var: &str, query: &str) -> Option<&'r str> {
    let value = row.value(var);
    if value.is_none() {
        tracing::warn!(query, var, "skipping row without required value");
    }
    value
}

/// Title texts, one per language.
pub fn title(results: &QueryResults) -> LangText {
    let mut title = LangText::new();
    for row in results.rows() {
        insert_text(&mut title, row, "title");
    }
    title
}

pub fn entities(results: &QueryResults, config: &Config) -> Vec<Entity> {
    results
        .rows()
        .iter()
        .filter_map(|row| {
            let id = required(row, "id", "entities")?;
            let class = required(row, "class", "entities")?;
            let mut entity = Entity::new(id, class, config.group_for_class(class));
            insert_text(&mut entity.name, row, "name");
            insert_text(&mut entity.abbreviation, row, "abbreviation");
            insert_text(&mut entity.comment, row, "comment");
            Some(entity)
        })
        .collect()
}

pub fn relationships(results: &QueryResults, config: &Config) -> Vec<Relationship> {
    results
        .rows()
        .iter()
        .filter_map(|row| {
            let source = required(row, "from", "relationships")?;
            let predicate = required(row, "property", "relationships")?;
            let target = required(row, "to", "relationships")?;
            let dashed = config.is_dashed(predicate);
            Some(Relationship::new(RelationshipKey::new(source, predicate, target), dashed))
        })
        .collect()
}

pub fn predicates(results: &QueryResults) -> Vec<PredicateMetadata> {
    results
        .rows()
        .iter()
        .filter_map(|row| {
            let iri = required(row, "predicate", "predicates")?;
            let mut metadata = PredicateMetadata::new(iri);
            insert_text(&mut metadata.label, row, "label");
            insert_text(&mut metadata.comment, row, "comment");
            metadata.domain = row.value("domain").map(str::to_string);
            metadata.range = row.value("range").map(str::to_string);
            Some(metadata)
        })
        .collect()
}

pub fn classes(results: &QueryResults, config: &Config) -> Vec<ClassMetadata> {
    results
        .rows()
        .iter()
        .filter_map(|row| {
            let iri = required(row, "iri", "classes")?;
            let mut class = ClassMetadata {
                iri: iri.to_string(),
                group: config.group_for_class(iri),
                label: LangText::new(),
                comment: LangText::new(),
            };
            insert_text(&mut class.label, row, "label");
            insert_text(&mut class.comment, row, "comment");
            Some(class)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dataset, Group};

    fn results(json: &str) -> QueryResults {
        QueryResults::from_json(json).unwrap()
    }

    #[test]
    fn test_entity_rows_merge_by_id() {
        let config = Config::default();
        let rows = results(
            r#"{ "results": { "bindings": [
                { "id": { "type": "uri", "value": "http://x/blw" },
                  "class": { "type": "uri", "value": "http://schema.org/Organization" },
                  "name": { "type": "literal", "value": "Bundesamt für Landwirtschaft" },
                  "nameLang": { "type": "literal", "value": "de" },
                  "abbreviation": { "type": "literal", "value": "BLW" },
                  "abbreviationLang": { "type": "literal", "value": "de" } },
                { "id": { "type": "uri", "value": "http://x/blw" },
                  "class": { "type": "uri", "value": "http://schema.org/Organization" },
                  "name": { "type": "literal", "value": "Federal Office for Agriculture" },
                  "nameLang": { "type": "literal", "value": "en" } },
                { "class": { "type": "uri", "value": "http://schema.org/Organization" } }
            ] } }"#,
        );
        let mut ds = Dataset::new();
        for e in entities(&rows, &config) {
            ds.add_entity(e);
        }
        assert_eq!(ds.entity_count(), 1);
        let blw = ds.entity("http://x/blw").unwrap();
        assert_eq!(blw.group, Group::Organization);
        assert_eq!(blw.name.get("en"), Some("Federal Office for Agriculture"));
        assert_eq!(blw.abbreviation.get("de"), Some("BLW"));
        assert!(blw.comment.is_empty());
    }

    #[test]
    fn test_unknown_class_is_other() {
        let config = Config::default();
        let rows = results(
            r#"{ "results": { "bindings": [
                { "id": { "type": "uri", "value": "http://x/1" },
                  "class": { "type": "uri", "value": "http://x/Unmapped" } }
            ] } }"#,
        );
        assert_eq!(entities(&rows, &config)[0].group, Group::Other);
    }

    #[test]
    fn test_relationship_dashed_from_config() {
        let config = Config::default();
        let rows = results(
            r#"{ "results": { "bindings": [
                { "from": { "type": "uri", "value": "http://x/a" },
                  "property": { "type": "uri", "value": "https://agriculture.ld.admin.ch/system-map/owns" },
                  "to": { "type": "uri", "value": "http://x/b" } },
                { "from": { "type": "uri", "value": "http://x/a" },
                  "property": { "type": "uri", "value": "https://agriculture.ld.admin.ch/system-map/operates" },
                  "to": { "type": "uri", "value": "http://x/b" } }
            ] } }"#,
        );
        let rels = relationships(&rows, &config);
        assert_eq!(rels.len(), 2);
        assert!(rels[0].dashed);
        assert!(!rels[1].dashed);
    }

    #[test]
    fn test_predicate_metadata_optional_fields() {
        let rows = results(
            r#"{ "results": { "bindings": [
                { "predicate": { "type": "uri", "value": "http://schema.org/memberOf" },
                  "label": { "type": "literal", "xml:lang": "fr", "value": "membre de" },
                  "domain": { "type": "uri", "value": "http://schema.org/Organization" } }
            ] } }"#,
        );
        let meta = predicates(&rows);
        assert_eq!(meta[0].label.get("fr"), Some("membre de"));
        assert_eq!(meta[0].domain.as_deref(), Some("http://schema.org/Organization"));
        assert_eq!(meta[0].range, None);
    }

    #[test]
    fn test_title_languages() {
        let rows = results(
            r#"{ "results": { "bindings": [
                { "title": { "type": "literal", "value": "Systemlandkarte BLW" },
                  "titleLang": { "type": "literal", "value": "de" } },
                { "title": { "type": "literal", "value": "FOAG system map" },
                  "titleLang": { "type": "literal", "value": "en" } },
                { }
            ] } }"#,
        );
        let t = title(&rows);
        assert_eq!(t.len(), 2);
        assert_eq!(t.get("en"), Some("FOAG system map"));
    }
}
