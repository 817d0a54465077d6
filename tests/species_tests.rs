//! Integration tests for Species.

use rstest::rstest;
use species_atlas::prelude::*;
use std::cmp::Ordering;

fn bobcat(listing_status: &str) -> Species {
    Species::new(
        "Mammal",
        "Chordata",
        "Mammalia",
        "Lynx rufus",
        "Bobcat",
        listing_status,
    )
    .unwrap()
}

#[rstest]
fn test_empty_scientific_name_is_invalid_argument() {
    let result = Species::new("Mammal", "Chordata", "Mammalia", "", "Bobcat", "Not Listed");

    assert!(matches!(
        result,
        Err(CatalogError::InvalidArgument {
            parameter: "scientific_name",
            ..
        })
    ));
}

#[rstest]
fn test_add_county_reports_duplicates_without_growing() {
    let mut species = bobcat("Not Listed");

    assert!(species.add_county("Albany").unwrap());
    assert!(!species.add_county("Albany").unwrap());
    assert_eq!(species.county_count(), 1);
}

#[rstest]
fn test_equality_key_ignores_listing_status() {
    assert_eq!(bobcat("Not Listed"), bobcat("Special Concern"));
    assert!(bobcat("Not Listed").equals_key(&bobcat("Threatened")));
}

#[rstest]
fn test_sort_key_breaks_ties_on_scientific_name() {
    let first = Species::new("Plant", "Ferns", "Misc", "Aaa", "Fern", "Not Listed").unwrap();
    let second = Species::new("Plant", "Ferns", "Misc", "bbb", "FERN", "Not Listed").unwrap();

    assert_eq!(first.compare_order(&second), Ordering::Less);
    assert_eq!(second.compare_order(&first), Ordering::Greater);
    assert_ne!(first, second);
}

#[rstest]
fn test_render_format() {
    let mut species = bobcat("Not Listed");
    species.add_county("Erie").unwrap();

    assert_eq!(
        species.to_string(),
        format!(
            "Bobcat (Lynx rufus)\nChordata, Mammalia\nNot Listed\nPresent in 1 / {NEW_YORK_COUNTY_COUNT} counties"
        )
    );
}
