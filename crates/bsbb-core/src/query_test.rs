use chrono::NaiveDate;

use super::*;
use crate::business::{Review, NO_PHONE};

fn record(id: &str, name: &str, category: Category, address: &str) -> BusinessRecord {
    BusinessRecord {
        id: id.to_owned(),
        name: name.to_owned(),
        category,
        address: address.to_owned(),
        phone: NO_PHONE.to_owned(),
        description: String::new(),
        rating: None,
        review_count: None,
        reviews: vec![],
        deals: vec![],
        latitude: None,
        longitude: None,
        website: None,
        opening_hours: None,
        created_at: None,
    }
}

fn review(rating: u8) -> Review {
    Review::new("Ava", rating, "", NaiveDate::from_ymd_opt(2024, 1, 12).unwrap()).unwrap()
}

fn rated(id: &str, rating: Option<f64>) -> BusinessRecord {
    let mut r = record(id, id, Category::Food, "Main St");
    r.rating = rating;
    r
}

fn ids(list: &[&BusinessRecord]) -> Vec<String> {
    list.iter().map(|r| r.id.clone()).collect()
}

fn directory() -> Vec<BusinessRecord> {
    vec![
        record("coffee", "Joe's Coffee House", Category::Food, "123 Main St, Downtown"),
        record("garden", "Green Thumb Garden Center", Category::Retail, "456 Oak Ave"),
        record("auto", "Quick Fix Auto Repair", Category::Services, "789 Industrial Blvd"),
        record("books", "The Book Nook", Category::Retail, "654 Pine St, Arts Quarter"),
    ]
}

// -----------------------------------------------------------------------
// apply
// -----------------------------------------------------------------------

#[test]
fn sort_by_name_is_ascending() {
    let records = vec![
        record("z", "Zebra Co", Category::Retail, "1 St"),
        record("a", "Alpha Inc", Category::Retail, "2 St"),
    ];
    let out = apply(&records, &FilterState::default());
    let names: Vec<&str> = out.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Alpha Inc", "Zebra Co"]);
}

#[test]
fn sort_by_name_ignores_case() {
    let records = vec![
        record("b", "banana Stand", Category::Food, "1 St"),
        record("a", "Apple Cart", Category::Food, "2 St"),
        record("c", "cherry Pit", Category::Food, "3 St"),
    ];
    let out = apply(&records, &FilterState::default());
    assert_eq!(ids(&out), ["a", "b", "c"]);
}

#[test]
fn sort_by_rating_is_descending() {
    let records = vec![
        rated("three", Some(3.0)),
        rated("five", Some(5.0)),
        rated("zero", None),
    ];
    let filters = FilterState {
        sort: SortOrder::Rating,
        ..FilterState::default()
    };
    let out = apply(&records, &filters);
    let averages: Vec<f64> = out.iter().map(|r| r.average_rating()).collect();
    assert_eq!(averages, [5.0, 3.0, 0.0]);
}

#[test]
fn sort_by_reviews_uses_provider_plus_local_count() {
    let mut provider = record("provider", "Provider", Category::Food, "1 St");
    provider.review_count = Some(2);
    let mut local = record("local", "Local", Category::Food, "2 St");
    local.reviews = vec![review(4), review(5), review(3)];
    let mut mixed = record("mixed", "Mixed", Category::Food, "3 St");
    mixed.review_count = Some(3);
    mixed.reviews = vec![review(5)];

    let records = vec![provider, local, mixed];
    let filters = FilterState {
        sort: SortOrder::Reviews,
        ..FilterState::default()
    };
    assert_eq!(ids(&apply(&records, &filters)), ["mixed", "local", "provider"]);
}

#[test]
fn sort_keeps_input_order_for_ties() {
    let records = vec![rated("first", Some(4.0)), rated("second", Some(4.0))];
    let filters = FilterState {
        sort: SortOrder::Rating,
        ..FilterState::default()
    };
    assert_eq!(ids(&apply(&records, &filters)), ["first", "second"]);
}

#[test]
fn empty_filters_return_every_record() {
    let records = directory();
    let out = apply(&records, &FilterState::default());
    assert_eq!(out.len(), records.len());
}

#[test]
fn category_filter_is_exact() {
    let records = directory();
    let filters = FilterState {
        category: "retail".to_owned(),
        ..FilterState::default()
    };
    assert_eq!(ids(&apply(&records, &filters)), ["garden", "books"]);

    let unknown = FilterState {
        category: "retai".to_owned(),
        ..FilterState::default()
    };
    assert!(apply(&records, &unknown).is_empty());
}

#[test]
fn search_matches_name_address_or_category() {
    let records = directory();
    let by_name = FilterState {
        search: "COFFEE".to_owned(),
        ..FilterState::default()
    };
    assert_eq!(ids(&apply(&records, &by_name)), ["coffee"]);

    let by_address = FilterState {
        search: "pine st".to_owned(),
        ..FilterState::default()
    };
    assert_eq!(ids(&apply(&records, &by_address)), ["books"]);

    let by_category = FilterState {
        search: "servic".to_owned(),
        ..FilterState::default()
    };
    assert_eq!(ids(&apply(&records, &by_category)), ["auto"]);
}

#[test]
fn category_and_search_are_anded() {
    let records = directory();
    let filters = FilterState {
        search: "st".to_owned(),
        category: "retail".to_owned(),
        sort: SortOrder::Name,
    };
    // "Green Thumb" is retail but its address has no "st"; the Book Nook
    // matches both.
    let out = apply(&records, &filters);
    assert!(out.iter().all(|r| r.category == Category::Retail));
    assert!(out.iter().any(|r| r.id == "books"));
}

#[test]
fn apply_is_pure_and_repeatable() {
    let records = directory();
    let snapshot = records.clone();
    let filters = FilterState {
        search: "a".to_owned(),
        category: String::new(),
        sort: SortOrder::Rating,
    };
    let first = ids(&apply(&records, &filters));
    let second = ids(&apply(&records, &filters));
    assert_eq!(first, second);
    assert_eq!(records, snapshot);
}

#[test]
fn sort_order_parse_falls_back_to_name() {
    assert_eq!(SortOrder::parse("rating"), SortOrder::Rating);
    assert_eq!(SortOrder::parse("Reviews"), SortOrder::Reviews);
    assert_eq!(SortOrder::parse("popularity"), SortOrder::Name);
}

// -----------------------------------------------------------------------
// top lists
// -----------------------------------------------------------------------

#[test]
fn top_rated_skips_unreviewed_records() {
    let mut reviewed = record("reviewed", "Reviewed", Category::Food, "1 St");
    reviewed.reviews = vec![review(3)];
    let mut provider = rated("provider", Some(4.8));
    provider.review_count = Some(10);
    // A provider rating without any review count is not "reviewed".
    let unreviewed = rated("unreviewed", Some(5.0));

    let records = vec![reviewed, provider, unreviewed];
    assert_eq!(ids(&top_rated(&records, 10)), ["provider", "reviewed"]);
}

#[test]
fn top_lists_respect_limit() {
    let records: Vec<BusinessRecord> = (0..5u32)
        .map(|i| {
            let mut r = record(&format!("r{i}"), "R", Category::Food, "St");
            r.review_count = Some(i);
            r
        })
        .collect();
    assert_eq!(ids(&most_reviewed(&records, 2)), ["r4", "r3"]);
}

// -----------------------------------------------------------------------
// stats / categories / provider_query
// -----------------------------------------------------------------------

#[test]
fn stats_of_empty_directory() {
    let s = stats(&[]);
    assert_eq!(s.businesses, 0);
    assert_eq!(s.reviews, 0);
    assert!(s.average_rating.abs() < f64::EPSILON);
}

#[test]
fn stats_average_only_counts_reviewed_records() {
    let mut a = record("a", "A", Category::Food, "St");
    a.reviews = vec![review(4)];
    let mut b = rated("b", Some(2.0));
    b.review_count = Some(5);
    let c = record("c", "C", Category::Food, "St");

    let s = stats(&[a, b, c]);
    assert_eq!(s.businesses, 3);
    assert_eq!(s.reviews, 6);
    assert!((s.average_rating - 3.0).abs() < f64::EPSILON);
}

#[test]
fn categories_are_sorted_and_distinct() {
    assert_eq!(
        categories(&directory()),
        [Category::Food, Category::Retail, Category::Services]
    );
}

#[test]
fn provider_query_follows_selected_category() {
    let filters = FilterState {
        category: "food".to_owned(),
        ..FilterState::default()
    };
    assert_eq!(
        provider_query(filters.selected_category()),
        "restaurant cafe food"
    );
    assert_eq!(provider_query(None), "local business small business");
}
