//! Read-only views over the directory.

use bsbb_core::query::{self, SortOrder};
use bsbb_core::{BusinessRecord, FilterState};
use bsbb_store::{DirectoryStore, KeyValueSlot};

use crate::render;

/// Builds filters from raw flags. Category names are matched exactly, so
/// they are normalized to lower case here.
pub(crate) fn filter_state(
    search: Option<String>,
    category: Option<String>,
    sort: &str,
) -> FilterState {
    FilterState {
        search: search.unwrap_or_default().trim().to_string(),
        category: category
            .map(|c| c.trim().to_lowercase())
            .unwrap_or_default(),
        sort: SortOrder::parse(sort),
    }
}

fn print_records<S: KeyValueSlot>(store: &DirectoryStore<S>, records: &[&BusinessRecord]) {
    render::print_table(records.iter().copied(), |id| store.is_favorite(id));
}

pub(crate) fn run_list<S: KeyValueSlot>(store: &DirectoryStore<S>, filters: &FilterState) {
    let list = query::apply(store.records(), filters);
    if list.is_empty() {
        println!("No businesses match your filters.");
        return;
    }
    print_records(store, &list);
    if let Some(source) = store.source() {
        println!("\n{} of {} businesses ({source} data)", list.len(), store.records().len());
    }
}

pub(crate) fn run_top_rated<S: KeyValueSlot>(store: &DirectoryStore<S>, limit: usize) {
    let list = query::top_rated(store.records(), limit);
    if list.is_empty() {
        println!("No reviewed businesses yet.");
        return;
    }
    print_records(store, &list);
}

pub(crate) fn run_most_reviewed<S: KeyValueSlot>(store: &DirectoryStore<S>, limit: usize) {
    let list = query::most_reviewed(store.records(), limit);
    if list.is_empty() {
        println!("No businesses yet.");
        return;
    }
    print_records(store, &list);
}

pub(crate) fn run_favorites<S: KeyValueSlot>(store: &DirectoryStore<S>) {
    let mut list = store.favorite_records();
    if list.is_empty() {
        println!("No favorites yet. Run `bsbb favorite <id>` to add one.");
        return;
    }
    query::sort(&mut list, SortOrder::Name);
    print_records(store, &list);
}

/// # Errors
///
/// Returns an error if no business has the given id.
pub(crate) fn run_show<S: KeyValueSlot>(store: &DirectoryStore<S>, id: &str) -> anyhow::Result<()> {
    let record = store
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("no business with id '{id}'; run `bsbb list` to see ids"))?;
    print!("{}", render::details(record, store.is_favorite(id)));
    Ok(())
}

pub(crate) fn run_stats<S: KeyValueSlot>(store: &DirectoryStore<S>) {
    let stats = query::stats(store.records());
    println!("Businesses:      {}", stats.businesses);
    println!("Reviews:         {}", stats.reviews);
    println!("Average rating:  {:.1}", stats.average_rating);
    println!("Favorites:       {}", store.favorite_records().len());
}

pub(crate) fn run_categories<S: KeyValueSlot>(store: &DirectoryStore<S>) {
    for category in query::categories(store.records()) {
        let count = store
            .records()
            .iter()
            .filter(|r| r.category == category)
            .count();
        println!("{:<10}{count}", category.label());
    }
}
