//! Tests for CatalogService against an in-memory catalog source.

mod support;

use rstest::rstest;
use serde_json::json;

use pokedex::application::{ApplicationError, SourceFailure};
use pokedex::domain::{DomainError, LineageEntry, MaxResults};

use support::{
    catalog, catalog_with, detail_body, link, numbered_names, species_body, test_settings,
    MockCatalogSource, BASE, STARTERS,
};

fn names(entries: &[pokedex::domain::Entry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

// ============================================================
// fetch_page()
// ============================================================

#[tokio::test]
async fn given_offset_zero_when_fetch_page_then_ids_start_at_one() {
    let (catalog, _) = catalog(MockCatalogSource::with_listing(&STARTERS));

    let page = catalog.fetch_page(0, 12).await.unwrap();

    assert_eq!(page.len(), 12);
    assert_eq!(page.entries[0].id, 1);
    assert_eq!(page.entries[0].name, "bulbasaur");
    assert_eq!(page.entries[11].id, 12);
    assert!(!page.is_last());
}

#[tokio::test]
async fn given_offset_twelve_when_fetch_page_then_ids_are_offset_derived() {
    let (catalog, source) = catalog(MockCatalogSource::with_listing(&numbered_names(30)));

    let page = catalog.fetch_page(12, 12).await.unwrap();

    let ids: Vec<u32> = page.entries.iter().map(|e| e.id).collect();
    assert_eq!(ids, (13..=24).collect::<Vec<_>>());
    assert_eq!(
        source.requests(),
        vec![format!("{}/pokemon?limit=12&offset=12", BASE)]
    );
}

#[tokio::test]
async fn given_offset_past_end_when_fetch_page_then_empty_last_page() {
    let (catalog, _) = catalog(MockCatalogSource::with_listing(&numbered_names(5)));

    let page = catalog.fetch_page(20, 12).await.unwrap();

    assert!(page.is_empty());
    assert!(page.is_last());
}

#[tokio::test]
async fn given_zero_limit_when_fetch_page_then_invalid_limit_without_request() {
    let (catalog, source) = catalog(MockCatalogSource::with_listing(&STARTERS));

    let err = catalog.fetch_page(0, 0).await.unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidLimit)
    ));
    assert_eq!(source.request_count(), 0);
}

#[rstest]
#[case::missing_results(json!({ "count": 3 }))]
#[case::item_without_url(json!({ "results": [{ "name": "bulbasaur" }] }))]
#[case::not_an_object(json!("oops"))]
#[tokio::test]
async fn given_malformed_body_when_fetch_page_then_source_unavailable(
    #[case] body: serde_json::Value,
) {
    let url = format!("{}/pokemon?limit=12&offset=0", BASE);
    let (catalog, _) = catalog(MockCatalogSource::new().respond(url, body));

    let err = catalog.fetch_page(0, 12).await.unwrap_err();

    assert!(err.is_source_unavailable());
    assert!(err.is_malformed());
}

#[tokio::test]
async fn given_transport_failure_when_fetch_page_then_source_unavailable() {
    let url = format!("{}/pokemon?limit=12&offset=0", BASE);
    let (catalog, _) = catalog(
        MockCatalogSource::new().fail(url, SourceFailure::Transport("connection reset".into())),
    );

    let err = catalog.fetch_page(0, 12).await.unwrap_err();

    assert!(err.is_source_unavailable());
    assert!(!err.is_malformed());
    assert!(err.to_string().contains("fetch page"));
}

// ============================================================
// fetch_pages() / fetch_full_listing()
// ============================================================

#[tokio::test]
async fn given_three_pages_when_fetch_pages_then_returned_in_offset_order() {
    let (catalog, source) = catalog(MockCatalogSource::with_listing(&numbered_names(40)));

    let pages = catalog.fetch_pages(0, 12, 3).await.unwrap();

    let offsets: Vec<u32> = pages.iter().map(|p| p.offset).collect();
    assert_eq!(offsets, vec![0, 12, 24]);
    assert_eq!(pages[2].entries[0].id, 25);
    assert_eq!(source.request_count(), 3);
}

#[tokio::test]
async fn given_catalog_larger_than_one_page_when_fetch_full_listing_then_pages_until_short_page() {
    let settings = pokedex::config::Settings {
        search_page_size: 10,
        ..test_settings()
    };
    let (catalog, source) =
        catalog_with(MockCatalogSource::with_listing(&numbered_names(25)), settings);

    let listing = catalog.fetch_full_listing().await.unwrap();

    assert_eq!(listing.len(), 25);
    assert_eq!(listing[24].id, 25);
    assert_eq!(listing[24].name, "name-25");
    assert_eq!(source.request_count(), 3);
}

#[tokio::test]
async fn given_catalog_of_exact_page_multiple_when_fetch_full_listing_then_stops_on_empty_page() {
    let settings = pokedex::config::Settings {
        search_page_size: 10,
        ..test_settings()
    };
    let (catalog, source) =
        catalog_with(MockCatalogSource::with_listing(&numbered_names(20)), settings);

    let listing = catalog.fetch_full_listing().await.unwrap();

    assert_eq!(listing.len(), 20);
    assert_eq!(source.request_count(), 3);
}

#[tokio::test]
async fn given_range_past_u32_when_fetch_pages_then_overflow_without_request() {
    let (catalog, source) = catalog(MockCatalogSource::with_listing(&STARTERS));

    let err = catalog.fetch_pages(u32::MAX - 5, 12, 2).await.unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::OffsetOverflow { limit: 12, .. })
    ));
    assert_eq!(source.request_count(), 0);
}

#[tokio::test]
async fn given_page_ids_past_u32_when_fetch_page_then_overflow_error() {
    let (catalog, _) = catalog(MockCatalogSource::new().respond(
        format!("{}/pokemon?limit=12&offset={}", BASE, u32::MAX - 1),
        json!({ "results": [
            { "name": "a", "url": format!("{}/pokemon/1/", BASE) },
            { "name": "b", "url": format!("{}/pokemon/2/", BASE) }
        ]}),
    ));

    let err = catalog.fetch_page(u32::MAX - 1, 12).await.unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::OffsetOverflow { .. })
    ));
}

// ============================================================
// search() / suggest()
// ============================================================

fn forms_listing() -> MockCatalogSource {
    MockCatalogSource::new().respond(
        format!("{}/pokemon?limit=200&offset=0", BASE),
        json!({ "results": [
            { "name": "pecharunt", "url": format!("{}/pokemon/1025/", BASE) },
            { "name": "deoxys-attack", "url": format!("{}/pokemon/10001/", BASE) },
            { "name": "deoxys-defense", "url": format!("{}/pokemon/10002/", BASE) }
        ]}),
    )
}

#[tokio::test]
async fn given_form_entries_when_search_then_ids_come_from_urls() {
    let (catalog, _) = catalog(forms_listing());

    let hits = catalog.search("deoxys", MaxResults::Unbounded).await.unwrap();

    let ids: Vec<u32> = hits.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![10001, 10002]);
}

#[tokio::test]
async fn given_form_entries_when_suggest_over_full_listing_then_ids_come_from_urls() {
    let (catalog, _) = catalog(forms_listing());

    let listing = catalog.fetch_full_listing().await.unwrap();
    let hits = catalog.suggest(&listing, "pecha");

    assert_eq!(listing[1].id, 10001);
    assert_eq!(hits[0].id, 1025);
}

#[tokio::test]
async fn given_entry_url_without_id_when_search_then_malformed() {
    let (catalog, _) = catalog(MockCatalogSource::new().respond(
        format!("{}/pokemon?limit=200&offset=0", BASE),
        json!({ "results": [{ "name": "missingno", "url": format!("{}/pokemon/", BASE) }] }),
    ));

    let err = catalog.search("missing", MaxResults::Unbounded).await.unwrap_err();

    assert!(err.is_malformed());
}

#[tokio::test]
async fn given_query_when_search_then_matches_in_listing_order() {
    let (catalog, _) = catalog(MockCatalogSource::with_listing(&STARTERS));

    let hits = catalog.search("  CHAR ", MaxResults::Unbounded).await.unwrap();

    assert_eq!(names(&hits), vec!["charmander", "charmeleon", "charizard"]);
    assert_eq!(hits[0].id, 4);
}

#[tokio::test]
async fn given_limit_when_search_then_truncates() {
    let (catalog, _) = catalog(MockCatalogSource::with_listing(&STARTERS));

    let hits = catalog.search("saur", MaxResults::Limit(2)).await.unwrap();

    assert_eq!(names(&hits), vec!["bulbasaur", "ivysaur"]);
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test]
async fn given_blank_query_when_search_then_empty_without_request(#[case] query: &str) {
    let (catalog, source) = catalog(MockCatalogSource::with_listing(&STARTERS));

    let hits = catalog.search(query, MaxResults::Unbounded).await.unwrap();

    assert!(hits.is_empty());
    assert_eq!(source.request_count(), 0);
}

#[tokio::test]
async fn given_unavailable_source_when_search_then_error_not_empty_result() {
    let url = format!("{}/pokemon?limit=200&offset=0", BASE);
    let (catalog, _) = catalog(MockCatalogSource::new().fail(
        url.clone(),
        SourceFailure::Status { url, status: 503 },
    ));

    let err = catalog.search("char", MaxResults::Unbounded).await.unwrap_err();

    assert!(err.is_source_unavailable());
}

#[rstest]
#[case("c", vec![])]
#[case("ch", vec!["charmander", "charmeleon", "charizard"])]
#[case("a", vec![])]
#[case("sa", vec!["bulbasaur", "ivysaur", "venusaur"])]
#[case("e", vec![])]
#[case("er", vec!["charmander", "caterpie", "butterfree"])]
fn given_partial_query_when_suggest_then_respects_min_length(
    #[case] query: &str,
    #[case] expected: Vec<&str>,
) {
    let (catalog, _) = catalog(MockCatalogSource::new());
    let listing: Vec<_> = STARTERS
        .iter()
        .enumerate()
        .map(|(i, n)| pokedex::domain::Entry {
            id: i as u32 + 1,
            name: n.to_string(),
            source_url: String::new(),
        })
        .collect();

    let hits = catalog.suggest(&listing, query);

    assert_eq!(names(&hits), expected);
}

#[test]
fn given_many_matches_when_suggest_then_caps_at_suggestion_limit() {
    let (catalog, _) = catalog(MockCatalogSource::new());
    let listing: Vec<_> = numbered_names(50)
        .into_iter()
        .enumerate()
        .map(|(i, name)| pokedex::domain::Entry {
            id: i as u32 + 1,
            name,
            source_url: String::new(),
        })
        .collect();

    let hits = catalog.suggest(&listing, "name");

    assert_eq!(hits.len(), 5);
    assert_eq!(hits[4].name, "name-5");
}

// ============================================================
// fetch_detail()
// ============================================================

#[tokio::test]
async fn given_known_id_when_fetch_detail_then_maps_record() {
    let (catalog, _) = catalog(
        MockCatalogSource::new().respond(format!("{}/pokemon/1", BASE), detail_body(1, "bulbasaur")),
    );

    let detail = catalog.fetch_detail(1).await.unwrap();

    assert_eq!(detail.display_name(), "Bulbasaur");
    assert_eq!(detail.dex_number(), "#001");
    assert_eq!(detail.types, vec!["grass", "poison"]);
    assert!((detail.height_m() - 0.7).abs() < f64::EPSILON);
    assert!((detail.weight_kg() - 6.9).abs() < f64::EPSILON);
    assert_eq!(detail.ability_labels(), "overgrow, chlorophyll");
    assert_eq!(detail.stats[1].label(), "Special Attack");
    assert_eq!(detail.artwork_url.as_deref(), Some("https://img.test/1.png"));
}

#[tokio::test]
async fn given_unknown_id_when_fetch_detail_then_not_found() {
    let (catalog, _) = catalog(MockCatalogSource::new());

    let err = catalog.fetch_detail(9999).await.unwrap_err();

    assert!(matches!(err, ApplicationError::NotFound(ref id) if id == "9999"));
}

// ============================================================
// fetch_lineage()
// ============================================================

fn eevee_source() -> MockCatalogSource {
    MockCatalogSource::new()
        .respond(format!("{}/pokemon-species/133", BASE), species_body(67))
        .respond(
            format!("{}/evolution-chain/67/", BASE),
            json!({
                "id": 67,
                "chain": link(133, "eevee", vec![
                    link(134, "vaporeon", vec![]),
                    link(135, "jolteon", vec![]),
                    link(136, "flareon", vec![]),
                ]),
            }),
        )
}

#[tokio::test]
async fn given_branching_chain_when_fetch_lineage_then_builds_tree() {
    let (catalog, source) = catalog(eevee_source());

    let root = catalog.fetch_lineage(133).await.unwrap().unwrap();

    assert_eq!(root.species_id, 133);
    assert_eq!(root.children.len(), 3);
    assert_eq!(root.children[2].species_name, "flareon");
    assert_eq!(source.request_count(), 2);
}

#[tokio::test]
async fn given_branching_chain_when_fetch_flattened_lineage_then_pre_order() {
    let (catalog, _) = catalog(eevee_source());

    let flat = catalog.fetch_flattened_lineage(133).await.unwrap();

    let expected: Vec<LineageEntry> = [
        (133, "eevee"),
        (134, "vaporeon"),
        (135, "jolteon"),
        (136, "flareon"),
    ]
    .iter()
    .map(|(id, name)| LineageEntry {
        id: *id,
        name: name.to_string(),
    })
    .collect();
    assert_eq!(flat, expected);
}

#[tokio::test]
async fn given_species_without_chain_when_fetch_lineage_then_none() {
    let (catalog, source) = catalog(MockCatalogSource::new().respond(
        format!("{}/pokemon-species/132", BASE),
        json!({ "id": 132, "evolution_chain": null }),
    ));

    assert!(catalog.fetch_lineage(132).await.unwrap().is_none());
    assert!(catalog.fetch_flattened_lineage(132).await.unwrap().is_empty());
    assert_eq!(source.request_count(), 2);
}

#[tokio::test]
async fn given_chain_with_bad_species_url_when_fetch_lineage_then_malformed() {
    let (catalog, _) = catalog(
        MockCatalogSource::new()
            .respond(format!("{}/pokemon-species/1", BASE), species_body(1))
            .respond(
                format!("{}/evolution-chain/1/", BASE),
                json!({
                    "chain": {
                        "species": { "name": "bulbasaur", "url": "not-a-url" },
                        "evolves_to": []
                    }
                }),
            ),
    );

    let err = catalog.fetch_lineage(1).await.unwrap_err();

    assert!(err.is_malformed());
}

#[tokio::test]
async fn given_unknown_species_when_fetch_lineage_then_not_found() {
    let (catalog, _) = catalog(MockCatalogSource::new());

    let err = catalog.fetch_lineage(4242).await.unwrap_err();

    assert!(matches!(err, ApplicationError::NotFound(_)));
}
