//! OpenStreetMap Overpass client for keyless nearby searches.

use bsbb_core::Category;
use reqwest::{Client, Url};

use crate::error::ProviderError;
use crate::http::{build_client, decode_json, endpoint, parse_base_url};
use crate::types::{Coordinates, OverpassElement, OverpassResponse};

pub const DEFAULT_BASE_URL: &str = "https://overpass-api.de";

const INTERPRETER_PATH: &str = "api/interpreter";
const QUERY_TIMEOUT_SECS: u64 = 25;

const FOOD_AMENITIES: &str = "restaurant|cafe|fast_food|bar|pub|ice_cream|food_court|bakery";
const SERVICE_AMENITIES: &str =
    "bank|clinic|dentist|doctors|pharmacy|veterinary|car_wash|post_office";
/// `shop=*` values that are services rather than retail.
const SERVICE_SHOPS: &str = "hairdresser|beauty|laundry|dry_cleaning|car_repair|tailor";

#[derive(Debug)]
pub struct OverpassClient {
    client: Client,
    base_url: Url,
}

impl OverpassClient {
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

    /// Fetches named businesses within `radius_m` metres of `center`.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Http`] on network failure or a non-2xx status
    ///   (Overpass answers 429/504 when overloaded).
    /// - [`ProviderError::Deserialize`] if the body is not Overpass JSON.
    pub async fn nearby(
        &self,
        center: Coordinates,
        radius_m: u32,
        limit: usize,
        category: Option<Category>,
    ) -> Result<Vec<OverpassElement>, ProviderError> {
        let url = endpoint(&self.base_url, INTERPRETER_PATH)?;
        let query = build_query(center, radius_m, limit, category);
        tracing::debug!(%center, radius_m, limit, "overpass nearby query");

        let response = self
            .client
            .post(url)
            .form(&[("data", query.as_str())])
            .send()
            .await?;
        let envelope: OverpassResponse = decode_json(response).await?;
        Ok(envelope.elements)
    }
}

/// Builds an Overpass QL union of named shops, amenities, crafts, and
/// offices around `center`, narrowed to one category when given.
#[must_use]
pub fn build_query(
    center: Coordinates,
    radius_m: u32,
    limit: usize,
    category: Option<Category>,
) -> String {
    let around = format!(
        "(around:{radius_m},{},{})",
        center.latitude, center.longitude
    );

    let selectors: Vec<String> = match category {
        Some(Category::Food) => vec![format!("[\"amenity\"~\"^({FOOD_AMENITIES})$\"]")],
        Some(Category::Retail) => vec![format!("[\"shop\"][\"shop\"!~\"^({SERVICE_SHOPS})$\"]")],
        Some(Category::Services) => vec![
            format!("[\"amenity\"~\"^({SERVICE_AMENITIES})$\"]"),
            format!("[\"shop\"~\"^({SERVICE_SHOPS})$\"]"),
            "[\"craft\"]".to_string(),
            "[\"office\"]".to_string(),
        ],
        None => vec![
            "[\"shop\"]".to_string(),
            format!("[\"amenity\"~\"^({FOOD_AMENITIES}|{SERVICE_AMENITIES})$\"]"),
            "[\"craft\"]".to_string(),
            "[\"office\"]".to_string(),
        ],
    };

    // Unnamed features are not listable businesses.
    let statements: String = selectors
        .iter()
        .map(|selector| format!("  nwr[\"name\"]{selector}{around};\n"))
        .collect();
    format!("[out:json][timeout:{QUERY_TIMEOUT_SECS}];\n(\n{statements});\nout center {limit};")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center() -> Coordinates {
        Coordinates::new(40.7128, -74.006)
    }

    #[test]
    fn query_without_category_covers_all_selectors() {
        let query = build_query(center(), 1500, 50, None);
        assert!(query.starts_with("[out:json][timeout:25];"));
        assert!(query.contains("nwr[\"name\"][\"shop\"](around:1500,40.7128,-74.006);"));
        assert!(query.contains("[\"craft\"]"));
        assert!(query.contains("[\"office\"]"));
        assert!(query.contains("restaurant|cafe"));
        assert!(query.contains("bank|clinic"));
        assert!(query.ends_with("out center 50;"));
    }

    #[test]
    fn food_query_only_asks_for_food_amenities() {
        let query = build_query(center(), 800, 10, Some(Category::Food));
        assert!(query.contains("restaurant|cafe"));
        assert!(!query.contains("[\"shop\"]"));
        assert!(!query.contains("bank"));
        assert_eq!(query.matches("nwr[").count(), 1);
    }

    #[test]
    fn retail_query_asks_for_shops_except_service_shops() {
        let query = build_query(center(), 800, 10, Some(Category::Retail));
        assert!(query.contains("nwr[\"name\"][\"shop\"][\"shop\"!~\"^(hairdresser|"));
        assert_eq!(query.matches("nwr[").count(), 1);
    }

    #[test]
    fn services_query_includes_service_shops_craft_and_office() {
        let query = build_query(center(), 800, 10, Some(Category::Services));
        assert_eq!(query.matches("nwr[").count(), 4);
        assert!(query.contains("[\"shop\"~\"^(hairdresser|beauty|laundry|dry_cleaning|car_repair|tailor)$\"]"));
        assert!(query.contains("[\"office\"]"));
        assert!(!query.contains("|hairdresser|laundry|post_office"));
    }
}
