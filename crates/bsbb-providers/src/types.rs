//! Raw provider payload shapes. These never leave this crate un-normalized.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// One provider element, tagged by source.
#[derive(Debug, Clone)]
pub enum ProviderElement {
    Places(PlaceResult),
    Overpass(OverpassElement),
}

// -----------------------------------------------------------------------
// Google Places text search
// -----------------------------------------------------------------------

/// Envelope of `place/textsearch/json`.
#[derive(Debug, Deserialize)]
pub struct PlacesResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceResult {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    /// Short address returned by nearby-style results.
    pub vicinity: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub international_phone_number: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub types: Vec<String>,
    pub geometry: Option<PlaceGeometry>,
    pub opening_hours: Option<PlaceOpeningHours>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceGeometry {
    pub location: PlaceLatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PlaceLatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceOpeningHours {
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

// -----------------------------------------------------------------------
// Overpass
// -----------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// A node, way, or relation. Ways and relations carry a `center` when the
/// query asks for `out center`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type", default)]
    pub element_type: String,
    #[serde(default)]
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<OverpassCenter>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OverpassCenter {
    pub lat: f64,
    pub lon: f64,
}

impl OverpassElement {
    /// Node coordinates, or the center of a way or relation.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lon, self.center) {
            (Some(lat), Some(lon), _) => Some(Coordinates::new(lat, lon)),
            (_, _, Some(c)) => Some(Coordinates::new(c.lat, c.lon)),
            _ => None,
        }
    }

    /// First non-blank value among `keys`.
    #[must_use]
    pub fn tag(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|k| self.tags.get(*k))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
    }
}

// -----------------------------------------------------------------------
// Nominatim
// -----------------------------------------------------------------------

/// One hit from Nominatim `search`; coordinates arrive as strings.
#[derive(Debug, Deserialize)]
pub struct GeocodeHit {
    pub lat: String,
    pub lon: String,
    pub display_name: Option<String>,
}
