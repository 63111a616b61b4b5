use proptest::prelude::*;

use sysmap_core::color::blend;
use sysmap_core::iri::PrefixTable;
use sysmap_core::locale::{resolve, LangText};
use sysmap_core::model::LayoutEntry;
use sysmap_core::neighborhood::{distances, AdjacencyList};
use sysmap_core::{compute_visible, Config, Dataset, Entity, Group, Relationship, RelationshipKey, Rgb, ViewState};

const OWNS: &str = "https://agriculture.ld.admin.ch/system-map/owns";

fn rgb() -> impl Strategy<Value = Rgb> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

fn edges() -> impl Strategy<Value = Vec<(u8, u8)>> {
    prop::collection::vec((0u8..20, 0u8..20), 0..40)
}

fn dataset(edges: &[(u8, u8)], ranks: &[Option<u8>]) -> Dataset {
    let mut ds = Dataset::new();
    for (i, rank) in ranks.iter().enumerate() {
        let id = format!("n{i}");
        ds.add_entity(Entity::new(&id, "c", Group::System));
        ds.layout.insert(&id, LayoutEntry { x: 0.0, y: 0.0, rank: rank.map(f64::from) });
    }
    for (a, b) in edges {
        let (a, b) = (usize::from(*a) % ranks.len(), usize::from(*b) % ranks.len());
        ds.add_relationship(Relationship::new(
            RelationshipKey::new(format!("n{a}"), OWNS, format!("n{b}")),
            true,
        ));
    }
    ds
}

proptest! {
    #[test]
    fn empty_text_resolves_to_fallback(lang in "[a-z]{2}") {
        let fallbacks = ["en", "de"];
        for texts in [None, Some(&LangText::new())] {
            let r = resolve(texts, &lang, &fallbacks);
            prop_assert_eq!(r.text, "");
            prop_assert!(r.is_fallback);
        }
    }

    #[test]
    fn shorten_strips_single_match(local in "[A-Za-z0-9_]{0,12}") {
        let table = PrefixTable::new([("http://schema.org/", "schema"), ("http://purl.org/dc/terms/", "dcterms")]);
        let iri = format!("http://schema.org/{local}");
        prop_assert_eq!(table.shorten(&iri), format!("schema:{local}"));
    }

    #[test]
    fn shorten_without_match_is_identity(id in "urn:[a-z0-9:]{0,20}") {
        let table = PrefixTable::new([("http://schema.org/", "schema")]);
        prop_assert_eq!(table.shorten(&id), id);
    }

    #[test]
    fn distances_are_bounded(edges in edges(), focus in 0u8..20, max_hops in 0usize..5) {
        let names: Vec<(String, String)> = edges.iter().map(|(a, b)| (a.to_string(), b.to_string())).collect();
        let graph = AdjacencyList::from_edges(names.iter().map(|(a, b)| (a.as_str(), b.as_str())));
        let focus = focus.to_string();
        let d = distances(&graph, &focus, max_hops);
        prop_assert_eq!(d.get(&focus), Some(&0));
        prop_assert!(d.values().all(|hops| *hops <= max_hops));
    }

    #[test]
    fn blend_of_equal_colors_is_identity(c in rgb(), ratio in 0.0f64..=1.0) {
        prop_assert_eq!(blend(c, c, ratio), c);
    }

    #[test]
    fn blend_endpoints_are_exact(a in rgb(), b in rgb()) {
        prop_assert_eq!(blend(a, b, 0.0), a);
        prop_assert_eq!(blend(a, b, 1.0), b);
    }

    #[test]
    fn filter_is_idempotent(
        edges in edges(),
        ranks in prop::collection::vec(prop::option::of(0u8..10), 1..20),
        percent in 0u8..=90,
    ) {
        let config = Config::default();
        let ds = dataset(&edges, &ranks);
        let view = ViewState::from_query(&format!("hidePercent={percent}"), &config);
        prop_assert_eq!(compute_visible(&ds, &view), compute_visible(&ds, &view));
    }

    #[test]
    fn raising_hide_percent_never_adds_entities(
        edges in edges(),
        ranks in prop::collection::vec(prop::option::of(0u8..10), 1..20),
        low in 0u8..=90,
        high in 0u8..=90,
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let config = Config::default();
        let ds = dataset(&edges, &ranks);
        let fewer = compute_visible(&ds, &ViewState::from_query(&format!("hidePercent={high}"), &config));
        let more = compute_visible(&ds, &ViewState::from_query(&format!("hidePercent={low}"), &config));
        prop_assert!(fewer.entity_count() <= more.entity_count());
    }
}
