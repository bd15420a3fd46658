//! Provider selection and the search-with-fallback flow.
//!
//! Google Places is used whenever an API key is available; without one the
//! directory falls back to OpenStreetMap (Nominatim to resolve location
//! text, Overpass for the listings). Either way the result is normalized
//! before it leaves this module.

use bsbb_core::query::provider_query;
use bsbb_core::{sample_businesses, AppConfig, BusinessRecord, Category, DirectorySource};

use crate::error::ProviderError;
use crate::geocode::Geocoder;
use crate::normalize::normalize;
use crate::overpass::OverpassClient;
use crate::places::PlacesClient;
use crate::types::{Coordinates, ProviderElement};

/// Where to search: a known position, or text to be geocoded.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchLocation {
    Coordinates(Coordinates),
    Text(String),
}

impl std::fmt::Display for SearchLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchLocation::Coordinates(c) => write!(f, "{c}"),
            SearchLocation::Text(text) => f.write_str(text),
        }
    }
}

/// Result of [`DirectoryProvider::search_or_samples`]: always a usable list
/// plus the status line to show the user.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub records: Vec<BusinessRecord>,
    pub source: DirectorySource,
    pub status: String,
}

impl SearchOutcome {
    /// True when the list came from the provider rather than the samples.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.source == DirectorySource::Provider
    }
}

#[derive(Debug)]
pub enum DirectoryProvider {
    Places {
        client: PlacesClient,
        radius_m: u32,
        limit: usize,
    },
    OpenStreetMap {
        overpass: OverpassClient,
        geocoder: Geocoder,
        radius_m: u32,
        limit: usize,
    },
}

impl DirectoryProvider {
    /// Picks Places when `api_key` is non-blank, otherwise OpenStreetMap.
    /// Base URLs, timeouts, and limits come from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if a client cannot be constructed.
    pub fn from_config(config: &AppConfig, api_key: Option<&str>) -> Result<Self, ProviderError> {
        let timeout = config.request_timeout_secs;
        let agent = config.user_agent.as_str();

        match api_key.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => Ok(DirectoryProvider::Places {
                client: PlacesClient::with_base_url(key, timeout, agent, &config.places_base_url)?,
                radius_m: config.search_radius_m,
                limit: config.result_limit,
            }),
            None => Ok(DirectoryProvider::OpenStreetMap {
                overpass: OverpassClient::with_base_url(timeout, agent, &config.overpass_base_url)?,
                geocoder: Geocoder::with_base_url(timeout, agent, &config.geocoder_base_url)?,
                radius_m: config.search_radius_m,
                limit: config.result_limit,
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DirectoryProvider::Places { .. } => "google places",
            DirectoryProvider::OpenStreetMap { .. } => "openstreetmap",
        }
    }

    /// Searches the provider and returns normalized records, at most the
    /// configured result limit.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::LocationNotFound`] when location text cannot
    /// be geocoded, or any client error from the underlying provider.
    pub async fn search(
        &self,
        location: &SearchLocation,
        category: Option<Category>,
    ) -> Result<Vec<BusinessRecord>, ProviderError> {
        let topic = provider_query(category);

        let elements: Vec<ProviderElement> = match self {
            DirectoryProvider::Places {
                client,
                radius_m,
                limit,
            } => {
                let results = match location {
                    SearchLocation::Coordinates(coords) => {
                        client.text_search(topic, Some((*coords, *radius_m))).await?
                    }
                    SearchLocation::Text(text) => {
                        client.text_search(&format!("{topic} in {text}"), None).await?
                    }
                };
                results
                    .into_iter()
                    .take(*limit)
                    .map(ProviderElement::Places)
                    .collect()
            }
            DirectoryProvider::OpenStreetMap {
                overpass,
                geocoder,
                radius_m,
                limit,
            } => {
                let center = match location {
                    SearchLocation::Coordinates(coords) => *coords,
                    SearchLocation::Text(text) => geocoder
                        .lookup(text)
                        .await?
                        .ok_or_else(|| ProviderError::LocationNotFound(text.clone()))?,
                };
                overpass
                    .nearby(center, *radius_m, *limit, category)
                    .await?
                    .into_iter()
                    .take(*limit)
                    .map(ProviderElement::Overpass)
                    .collect()
            }
        };

        Ok(elements.into_iter().map(normalize).collect())
    }

    /// Like [`search`](Self::search), but never fails: provider errors and
    /// empty results fall back to the static samples.
    pub async fn search_or_samples(
        &self,
        location: &SearchLocation,
        category: Option<Category>,
    ) -> SearchOutcome {
        match self.search(location, category).await {
            Ok(records) if !records.is_empty() => {
                tracing::info!(
                    provider = self.name(),
                    %location,
                    count = records.len(),
                    "provider search succeeded"
                );
                SearchOutcome {
                    status: format!("Found {} businesses!", records.len()),
                    records,
                    source: DirectorySource::Provider,
                }
            }
            Ok(_) => {
                tracing::info!(provider = self.name(), %location, "provider returned no businesses");
                samples_outcome("No businesses found. Try a different location.".to_string())
            }
            Err(e) => {
                tracing::warn!(provider = self.name(), %location, error = %e, "provider search failed");
                samples_outcome(format!("Error: {e}. Using sample data."))
            }
        }
    }
}

fn samples_outcome(status: String) -> SearchOutcome {
    SearchOutcome {
        records: sample_businesses(),
        source: DirectorySource::Samples,
        status,
    }
}
