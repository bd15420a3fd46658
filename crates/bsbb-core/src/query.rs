//! Query pipeline: filtering, sorting, and aggregation over the directory.
//!
//! Every function here is pure. Inputs are borrowed and never mutated; the
//! output is a fresh list of references in display order.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::business::{BusinessRecord, Category};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Name,
    Rating,
    Reviews,
}

impl SortOrder {
    /// Parses a sort name. Unknown values fall back to [`SortOrder::Name`].
    #[must_use]
    pub fn parse(value: &str) -> SortOrder {
        match value.trim().to_lowercase().as_str() {
            "rating" => SortOrder::Rating,
            "reviews" => SortOrder::Reviews,
            _ => SortOrder::Name,
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Name => write!(f, "name"),
            SortOrder::Rating => write!(f, "rating"),
            SortOrder::Reviews => write!(f, "reviews"),
        }
    }
}

/// Current search / category / sort selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    /// Category name to match exactly; empty means all categories.
    pub category: String,
    pub sort: SortOrder,
}

impl FilterState {
    /// The selected category, if the filter names one of the known ones.
    #[must_use]
    pub fn selected_category(&self) -> Option<Category> {
        Category::parse(&self.category)
    }
}

/// Applies the category filter, then the search filter, then the sort.
#[must_use]
pub fn apply<'a>(records: &'a [BusinessRecord], filters: &FilterState) -> Vec<&'a BusinessRecord> {
    let term = filters.search.trim().to_lowercase();

    let mut list: Vec<&BusinessRecord> = records
        .iter()
        .filter(|r| filters.category.is_empty() || r.category.as_str() == filters.category)
        .filter(|r| term.is_empty() || matches_search(r, &term))
        .collect();

    sort(&mut list, filters.sort);
    list
}

fn matches_search(record: &BusinessRecord, term: &str) -> bool {
    record.name.to_lowercase().contains(term)
        || record.address.to_lowercase().contains(term)
        || record.category.as_str().contains(term)
}

/// Stable sort in the given order.
///
/// `Name` compares case-insensitively first and falls back to a
/// case-sensitive comparison, so `"alpha"` and `"Alpha"` sit together.
pub fn sort(list: &mut [&BusinessRecord], order: SortOrder) {
    match order {
        SortOrder::Name => list.sort_by_cached_key(|r| (r.name.to_lowercase(), r.name.clone())),
        SortOrder::Rating => {
            list.sort_by(|a, b| b.average_rating().total_cmp(&a.average_rating()));
        }
        SortOrder::Reviews => list.sort_by_key(|r| Reverse(r.total_reviews())),
    }
}

/// Records with at least one review, best average first, capped at `limit`.
#[must_use]
pub fn top_rated(records: &[BusinessRecord], limit: usize) -> Vec<&BusinessRecord> {
    let mut list: Vec<&BusinessRecord> = records.iter().filter(|r| r.total_reviews() > 0).collect();
    sort(&mut list, SortOrder::Rating);
    list.truncate(limit);
    list
}

/// Records ordered by total review count, capped at `limit`.
#[must_use]
pub fn most_reviewed(records: &[BusinessRecord], limit: usize) -> Vec<&BusinessRecord> {
    let mut list: Vec<&BusinessRecord> = records.iter().collect();
    sort(&mut list, SortOrder::Reviews);
    list.truncate(limit);
    list
}

/// Headline numbers for the directory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DirectoryStats {
    pub businesses: usize,
    pub reviews: u64,
    /// Mean of the average rating of every record that has at least one
    /// review; `0.0` when none do.
    pub average_rating: f64,
}

#[must_use]
pub fn stats(records: &[BusinessRecord]) -> DirectoryStats {
    let reviews = records.iter().map(|r| u64::from(r.total_reviews())).sum();

    let rated: Vec<f64> = records
        .iter()
        .filter(|r| r.total_reviews() > 0)
        .map(BusinessRecord::average_rating)
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let average_rating = if rated.is_empty() {
        0.0
    } else {
        rated.iter().sum::<f64>() / rated.len() as f64
    };

    DirectoryStats {
        businesses: records.len(),
        reviews,
        average_rating,
    }
}

/// Distinct categories present, in sorted order.
#[must_use]
pub fn categories(records: &[BusinessRecord]) -> Vec<Category> {
    records
        .iter()
        .map(|r| r.category)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Provider search text for the selected category.
#[must_use]
pub fn provider_query(category: Option<Category>) -> &'static str {
    match category {
        Some(Category::Food) => "restaurant cafe food",
        Some(Category::Retail) => "store shop retail",
        Some(Category::Services) => "service business",
        None => "local business small business",
    }
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
