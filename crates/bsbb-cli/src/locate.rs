//! `near` and `search`: refresh the directory from a provider.

use bsbb_core::query::{self, SortOrder};
use bsbb_core::{AppConfig, BusinessRecord, Category, DirectorySource};
use bsbb_providers::{DirectoryProvider, SearchLocation};
use bsbb_store::{DirectoryStore, KeyValueSlot};

use crate::render;

/// Key from the environment first, then the one saved with `api-key set`.
pub(crate) fn resolve_api_key<S: KeyValueSlot>(
    store: &DirectoryStore<S>,
    config: &AppConfig,
) -> anyhow::Result<Option<String>> {
    if let Some(key) = &config.google_api_key {
        return Ok(Some(key.clone()));
    }
    Ok(store.api_key()?)
}

/// Runs one provider search and prints the resulting list. Returns where
/// the printed list came from.
///
/// Live results replace and persist the directory. A sample fallback is
/// shown for this run only; saved businesses stay as they were.
pub(crate) async fn run_search<S: KeyValueSlot>(
    store: &mut DirectoryStore<S>,
    config: &AppConfig,
    location: SearchLocation,
    category: Option<&str>,
) -> anyhow::Result<DirectorySource> {
    let category = category.map(Category::from_user_input);
    let api_key = resolve_api_key(store, config)?;
    let provider = DirectoryProvider::from_config(config, api_key.as_deref())?;

    if api_key.is_none() {
        eprintln!("No Google Places API key set; searching OpenStreetMap instead.");
    }
    eprintln!("Searching businesses near {location}...");

    let ticket = store.begin_search();
    let outcome = provider.search_or_samples(&location, category).await;
    println!("{}", outcome.status);

    if outcome.is_live() {
        store.finish_search(ticket, outcome.records, outcome.source)?;
        print_by_name(store, store.records());
    } else {
        store.abandon_search(ticket);
        print_by_name(store, &outcome.records);
    }
    Ok(outcome.source)
}

fn print_by_name<S: KeyValueSlot>(store: &DirectoryStore<S>, records: &[BusinessRecord]) {
    let mut list: Vec<_> = records.iter().collect();
    query::sort(&mut list, SortOrder::Name);
    render::print_table(list, |id| store.is_favorite(id));
}

#[cfg(test)]
#[path = "locate_test.rs"]
mod tests;
