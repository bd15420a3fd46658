//! Nominatim free-text geocoding.

use reqwest::{Client, Url};

use crate::error::ProviderError;
use crate::http::{build_client, decode_json, endpoint, parse_base_url};
use crate::types::{Coordinates, GeocodeHit};

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug)]
pub struct Geocoder {
    client: Client,
    base_url: Url,
}

impl Geocoder {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be
    /// built.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ProviderError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ProviderError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Resolves `text` to the best-matching coordinates. `Ok(None)` means
    /// the geocoder answered but found nothing usable.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Http`] on network failure or a non-2xx status.
    /// - [`ProviderError::Deserialize`] if the body is not a JSON array of hits.
    pub async fn lookup(&self, text: &str) -> Result<Option<Coordinates>, ProviderError> {
        let mut url = endpoint(&self.base_url, "search")?;
        url.query_pairs_mut()
            .append_pair("q", text)
            .append_pair("format", "json")
            .append_pair("limit", "1");

        let response = self.client.get(url).send().await?;
        let hits: Vec<GeocodeHit> = decode_json(response).await?;

        let coords = hits.first().and_then(parse_hit);
        match (&coords, hits.first()) {
            (Some(c), Some(hit)) => tracing::debug!(
                text,
                coords = %c,
                display_name = hit.display_name.as_deref().unwrap_or_default(),
                "geocoded location"
            ),
            _ => tracing::debug!(text, "geocoder found no match"),
        }
        Ok(coords)
    }
}

fn parse_hit(hit: &GeocodeHit) -> Option<Coordinates> {
    let lat = hit.lat.trim().parse::<f64>().ok()?;
    let lon = hit.lon.trim().parse::<f64>().ok()?;
    if lat.is_finite() && lon.is_finite() {
        Some(Coordinates::new(lat, lon))
    } else {
        None
    }
}
