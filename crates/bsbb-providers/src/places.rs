//! Google Places text-search client.
//!
//! The Places envelope carries its own `status` next to the HTTP status:
//! `OK` and `ZERO_RESULTS` are successes, anything else is surfaced as
//! [`ProviderError::Api`] with the provider's `error_message`.

use reqwest::{Client, Url};

use crate::error::ProviderError;
use crate::http::{build_client, decode_json, endpoint, parse_base_url};
use crate::types::{Coordinates, PlaceResult, PlacesResponse};

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

const TEXT_SEARCH_PATH: &str = "maps/api/place/textsearch/json";
const PROVIDER: &str = "google places";

/// Client for the Places text-search endpoint.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for PlacesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesClient")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl PlacesClient {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be
    /// built.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (a wiremock server in tests).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ProviderError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            api_key: api_key.to_owned(),
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Runs a text search, optionally biased toward `bias` within
    /// `radius_m` metres.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Api`] if the envelope status is neither `OK` nor
    ///   `ZERO_RESULTS`.
    /// - [`ProviderError::Http`] on network failure or a non-2xx status.
    /// - [`ProviderError::Deserialize`] if the body is not the expected shape.
    pub async fn text_search(
        &self,
        query: &str,
        bias: Option<(Coordinates, u32)>,
    ) -> Result<Vec<PlaceResult>, ProviderError> {
        let url = self.build_url(query, bias)?;
        tracing::debug!(query, biased = bias.is_some(), "places text search");

        let response = self.client.get(url).send().await?;
        let envelope: PlacesResponse = decode_json(response).await?;
        Self::check_status(envelope)
    }

    fn build_url(&self, query: &str, bias: Option<(Coordinates, u32)>) -> Result<Url, ProviderError> {
        let mut url = endpoint(&self.base_url, TEXT_SEARCH_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query);
            if let Some((coords, radius_m)) = bias {
                pairs.append_pair(
                    "location",
                    &format!("{},{}", coords.latitude, coords.longitude),
                );
                pairs.append_pair("radius", &radius_m.to_string());
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    fn check_status(envelope: PlacesResponse) -> Result<Vec<PlaceResult>, ProviderError> {
        if envelope.status == "OK" {
            return Ok(envelope.results);
        }
        if envelope.status == "ZERO_RESULTS" {
            return Ok(Vec::new());
        }
        Err(ProviderError::Api {
            provider: PROVIDER,
            status: envelope.status,
            message: envelope
                .error_message
                .unwrap_or_else(|| "no error message".to_string()),
        })
    }
}
