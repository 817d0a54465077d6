//! Integration tests for SpeciesList and its cursor.

use rstest::{fixture, rstest};
use species_atlas::prelude::*;

fn mammal(common_name: &str, scientific_name: &str) -> Species {
    Species::new(
        "Mammal",
        "Chordata",
        "Mammalia",
        scientific_name,
        common_name,
        "Not Listed",
    )
    .unwrap()
}

fn common_names(list: &SpeciesList) -> Vec<String> {
    list.iter()
        .map(|entry| entry.borrow().common_name().to_owned())
        .collect()
}

#[fixture]
fn catalog() -> SpeciesList {
    let mut list = SpeciesList::new();
    list.insert_with_county(mammal("Red Fox", "Vulpes vulpes"), "Albany")
        .unwrap();
    list.insert_with_county(mammal("Bobcat", "Lynx rufus"), "Erie")
        .unwrap();
    list.insert_with_county(mammal("River Otter", "Lontra canadensis"), "Kings")
        .unwrap();
    list
}

// =============================================================================
// Insertion and merging
// =============================================================================

#[rstest]
fn test_insert_into_empty_list() {
    let mut list = SpeciesList::new();

    assert!(list.insert(mammal("Bobcat", "Lynx rufus")).unwrap());
    assert_eq!(list.len(), 1);
}

#[rstest]
fn test_insert_before_first_after_last_and_between(mut catalog: SpeciesList) {
    assert!(catalog.insert(mammal("Beaver", "Castor canadensis")).unwrap());
    assert!(catalog.insert(mammal("Woodchuck", "Marmota monax")).unwrap());
    assert!(catalog.insert(mammal("Mink", "Neogale vison")).unwrap());

    assert_eq!(
        common_names(&catalog),
        ["Beaver", "Bobcat", "Mink", "Red Fox", "River Otter", "Woodchuck"]
    );
}

#[rstest]
fn test_insert_duplicate_into_single_element_list_merges() {
    let mut list = SpeciesList::new();
    list.insert_with_county(mammal("Bobcat", "Lynx rufus"), "Albany")
        .unwrap();

    let mut again = mammal("Bobcat", "Lynx rufus");
    again.add_county("Queens").unwrap();
    assert!(!list.insert(again).unwrap());

    assert_eq!(list.len(), 1);
    assert_eq!(list.get(0).unwrap().borrow().counties(), ["Albany", "Queens"]);
}

#[rstest]
fn test_merge_scenario_first_writer_wins() {
    let mut list = SpeciesList::new();
    let first = Species::new(
        "Mammal",
        "Chordata",
        "Mammalia",
        "Lynx rufus",
        "Bobcat",
        "Not Listed",
    )
    .unwrap();
    let second = Species::new(
        "Mammal",
        "Chordata",
        "Mammalia",
        "Lynx Rufus",
        "BOBCAT",
        "Special Concern",
    )
    .unwrap();

    assert!(list.insert_with_county(first, "Erie").unwrap());
    assert!(!list.insert_with_county(second, "Suffolk").unwrap());

    assert_eq!(list.len(), 1);
    let stored = list.get(0).unwrap().borrow();
    assert_eq!(stored.listing_status(), "Not Listed");
    assert_eq!(stored.common_name(), "Bobcat");
    assert_eq!(stored.counties(), ["Erie", "Suffolk"]);
    assert!(stored.to_string().ends_with("Present in 2 / 62 counties"));
}

#[rstest]
fn test_insert_with_county_rejects_empty_county(mut catalog: SpeciesList) {
    let error = catalog
        .insert_with_county(mammal("Beaver", "Castor canadensis"), "")
        .unwrap_err();

    assert!(error.is_invalid_argument());
    assert_eq!(catalog.len(), 3);
}

#[rstest]
fn test_insert_without_county_stores_zero_counties() {
    let mut list = SpeciesList::new();
    list.insert(mammal("Bobcat", "Lynx rufus")).unwrap();

    assert_eq!(list.get(0).unwrap().borrow().county_count(), 0);
}

#[rstest]
fn test_reinserting_stored_handle_is_noop(catalog: SpeciesList) {
    let mut other = SpeciesList::new();
    let handle = catalog.get(0).unwrap().clone();

    assert!(other.insert(handle.clone()).unwrap());
    assert!(!other.insert(handle).unwrap());
    assert_eq!(other.len(), 1);
    assert_eq!(other.get(0).unwrap().borrow().county_count(), 1);
}

#[rstest]
fn test_merge_while_search_hit_is_borrowed_fails_cleanly(mut catalog: SpeciesList) {
    let hits = catalog.search_by_keyword("bob").unwrap().unwrap();
    let reading = hits.get(0).unwrap().borrow();

    let error = catalog
        .insert_with_county(mammal("Bobcat", "Lynx rufus"), "Suffolk")
        .unwrap_err();

    assert!(matches!(error, CatalogError::IllegalState(_)));
    assert_eq!(reading.counties(), ["Erie"]);
    drop(reading);
    assert_eq!(catalog.len(), 3);

    assert!(!catalog
        .insert_with_county(mammal("Bobcat", "Lynx rufus"), "Suffolk")
        .unwrap());
    assert_eq!(catalog.get(0).unwrap().borrow().counties(), ["Erie", "Suffolk"]);
}

#[rstest]
fn test_insert_merge_into_borrowed_entry_is_illegal_state(mut catalog: SpeciesList) {
    let stored = catalog.get(0).unwrap().clone();
    let reading = stored.borrow();
    let mut again = mammal("Bobcat", "Lynx rufus");
    again.add_county("Queens").unwrap();

    assert!(matches!(
        catalog.insert(again),
        Err(CatalogError::IllegalState(_))
    ));
    assert_eq!(reading.county_count(), 1);
}

#[rstest]
fn test_borrowed_new_handle_is_not_stored(catalog: SpeciesList) {
    let mut other = SpeciesList::new();
    let handle = catalog.get(1).unwrap().clone();
    let reading = handle.borrow();

    assert!(matches!(
        other.insert_with_county(handle.clone(), "Queens"),
        Err(CatalogError::IllegalState(_))
    ));
    assert!(other.is_empty());
    assert_eq!(reading.counties(), ["Albany"]);
}

// =============================================================================
// Removal, lookup and indexing
// =============================================================================

#[rstest]
fn test_remove_only_element_empties_list() {
    let mut list = SpeciesList::new();
    list.insert(mammal("Bobcat", "Lynx rufus")).unwrap();

    assert!(list.remove(&mammal("bobcat", "LYNX RUFUS")).is_some());
    assert!(list.is_empty());
    assert!(list.get(0).unwrap_err().is_out_of_range());
}

#[rstest]
#[case("Bobcat", "Lynx rufus", ["Red Fox", "River Otter"])]
#[case("Red Fox", "Vulpes vulpes", ["Bobcat", "River Otter"])]
#[case("River Otter", "Lontra canadensis", ["Bobcat", "Red Fox"])]
fn test_remove_head_middle_tail(
    mut catalog: SpeciesList,
    #[case] common_name: &str,
    #[case] scientific_name: &str,
    #[case] remaining: [&str; 2],
) {
    let removed = catalog.remove(&mammal(common_name, scientific_name)).unwrap();

    assert_eq!(removed.borrow().common_name(), common_name);
    assert_eq!(catalog.len(), 2);
    assert_eq!(common_names(&catalog), remaining);
}

#[rstest]
fn test_remove_missing_leaves_size(mut catalog: SpeciesList) {
    assert!(catalog.remove(&mammal("Moose", "Alces alces")).is_none());
    assert_eq!(catalog.len(), 3);
}

#[rstest]
fn test_contains_and_index_of(catalog: SpeciesList) {
    assert!(catalog.contains(&mammal("RED FOX", "vulpes vulpes")));
    assert_eq!(catalog.index_of(&mammal("River Otter", "Lontra canadensis")), Some(2));
    assert_eq!(catalog.index_of(&mammal("Moose", "Alces alces")), None);
}

#[rstest]
fn test_get_out_of_range(catalog: SpeciesList) {
    assert_eq!(
        catalog.get(3).unwrap_err(),
        CatalogError::IndexOutOfRange { index: 3, len: 3 }
    );
}

#[rstest]
fn test_clear_keeps_outside_handles_alive(mut catalog: SpeciesList) {
    let kept = catalog.first().unwrap().clone();
    catalog.clear();

    assert!(catalog.is_empty());
    assert_eq!(kept.borrow().common_name(), "Bobcat");
}

// =============================================================================
// Search
// =============================================================================

#[rstest]
#[case("fox", ["Red Fox"].as_slice())]
#[case("E", ["Red Fox", "River Otter"].as_slice())]
#[case("LYNX", ["Bobcat"].as_slice())]
#[case("canadensis", ["River Otter"].as_slice())]
fn test_search_matches_either_name(
    catalog: SpeciesList,
    #[case] keyword: &str,
    #[case] expected: &[&str],
) {
    let hits = catalog.search_by_keyword(keyword).unwrap().unwrap();

    assert_eq!(common_names(&hits), expected);
}

#[rstest]
fn test_search_without_matches_is_none(catalog: SpeciesList) {
    assert!(catalog.search_by_keyword("heron").unwrap().is_none());
}

#[rstest]
fn test_search_empty_keyword_is_invalid(catalog: SpeciesList) {
    assert!(catalog.search_by_keyword("").unwrap_err().is_invalid_argument());
}

#[rstest]
fn test_search_results_alias_catalog_entries(catalog: SpeciesList) {
    let hits = catalog.search_by_keyword("bobcat").unwrap().unwrap();
    hits.get(0).unwrap().add_county("Suffolk").unwrap();

    assert!(hits.get(0).unwrap().same_entity(catalog.get(0).unwrap()));
    assert!(catalog.get(0).unwrap().is_present_in("Suffolk").unwrap());
}

// =============================================================================
// Equality and rendering
// =============================================================================

#[rstest]
fn test_structural_eq_compares_every_entry(catalog: SpeciesList) {
    let same: SpeciesList = [
        mammal("Bobcat", "Lynx rufus"),
        mammal("Red Fox", "Vulpes vulpes"),
        mammal("River Otter", "Lontra canadensis"),
    ]
    .into_iter()
    .collect();
    let last_differs: SpeciesList = [
        mammal("Bobcat", "Lynx rufus"),
        mammal("Red Fox", "Vulpes vulpes"),
        mammal("Wolverine", "Gulo gulo"),
    ]
    .into_iter()
    .collect();

    assert!(catalog.structural_eq(&same));
    assert_eq!(catalog, same);
    assert!(!catalog.structural_eq(&last_differs));
    assert!(!catalog.structural_eq(&SpeciesList::new()));
}

#[rstest]
fn test_display(catalog: SpeciesList) {
    assert_eq!(
        catalog.to_string(),
        "[Bobcat (Lynx rufus), Red Fox (Vulpes vulpes), River Otter (Lontra canadensis)]"
    );
    assert_eq!(SpeciesList::new().to_string(), "[]");
}

// =============================================================================
// Iteration
// =============================================================================

#[rstest]
fn test_forward_iterator_is_exact_and_ordered(catalog: SpeciesList) {
    let mut iter = catalog.iter();

    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next().unwrap().borrow().common_name(), "Bobcat");
    assert_eq!(iter.len(), 2);
    assert_eq!((&catalog).into_iter().count(), 3);
}

#[rstest]
fn test_cursor_at_start(mut catalog: SpeciesList) {
    let cursor = catalog.list_cursor(0).unwrap();

    assert!(!cursor.has_previous());
    assert!(cursor.has_next());
}

#[rstest]
fn test_cursor_on_empty_list() {
    let mut list = SpeciesList::new();
    let mut cursor = list.cursor();

    assert!(!cursor.has_previous());
    assert!(!cursor.has_next());
    assert_eq!(
        cursor.next_species().unwrap_err(),
        CatalogError::NoSuchElement { direction: "next" }
    );
    assert_eq!(
        cursor.previous_species().unwrap_err(),
        CatalogError::NoSuchElement {
            direction: "previous"
        }
    );
}

#[rstest]
#[case(0)]
#[case(2)]
#[case(3)]
fn test_cursor_refuses_insert_and_remove_everywhere(
    mut catalog: SpeciesList,
    #[case] index: usize,
) {
    let mut cursor = catalog.list_cursor(index).unwrap();

    assert_eq!(
        cursor.insert(mammal("Moose", "Alces alces")).unwrap_err(),
        CatalogError::UnsupportedOperation { operation: "insert" }
    );
    assert_eq!(
        cursor.remove().unwrap_err(),
        CatalogError::UnsupportedOperation { operation: "remove" }
    );
}

#[rstest]
fn test_cursor_set_replaces_payload(mut catalog: SpeciesList) {
    let mut cursor = catalog.list_cursor(1).unwrap();
    cursor.next_species().unwrap();

    let replacement = Species::new(
        "Mammal",
        "Chordata",
        "Mammalia",
        "Vulpes vulpes",
        "Red Fox",
        "Game with open season",
    )
    .unwrap();
    cursor.set(replacement).unwrap();

    let stored = catalog.get(1).unwrap().borrow();
    assert_eq!(stored.listing_status(), "Game with open season");
    assert_eq!(stored.county_count(), 0);
}
