//! Normalization from raw provider payloads to [`bsbb_core::BusinessRecord`].
//!
//! Every field defaults permissively: a malformed element still produces a
//! record, with placeholder strings where the provider gave nothing.

use bsbb_core::business::{
    non_blank_or, slug, NO_ADDRESS, NO_DESCRIPTION, NO_NAME, NO_PHONE,
};
use bsbb_core::{BusinessRecord, Category};

use crate::types::{Coordinates, OverpassElement, PlaceResult, ProviderElement};

/// Overpass tag keys that describe what a business is.
const CLASSIFICATION_KEYS: &[&str] = &[
    "amenity",
    "shop",
    "craft",
    "office",
    "cuisine",
    "healthcare",
    "leisure",
    "tourism",
];

/// How many Places `types` feed the description.
const PLACES_DESCRIPTION_TYPES: usize = 3;

/// Normalizes one provider element into the canonical record shape.
#[must_use]
pub fn normalize(element: ProviderElement) -> BusinessRecord {
    match element {
        ProviderElement::Places(place) => normalize_place(place),
        ProviderElement::Overpass(element) => normalize_overpass(&element),
    }
}

/// `"Near 40.7128, -74.0060"`.
#[must_use]
pub fn format_near(coords: Coordinates) -> String {
    format!("Near {coords}")
}

fn address_or_near(structured: Option<&str>, coords: Option<Coordinates>) -> String {
    match (structured.map(str::trim).filter(|s| !s.is_empty()), coords) {
        (Some(address), _) => address.to_string(),
        (None, Some(c)) => format_near(c),
        (None, None) => NO_ADDRESS.to_string(),
    }
}

fn humanize(tag: &str) -> String {
    tag.replace('_', " ")
}

// -----------------------------------------------------------------------
// Google Places
// -----------------------------------------------------------------------

fn normalize_place(place: PlaceResult) -> BusinessRecord {
    let name = non_blank_or(place.name.as_deref().unwrap_or_default(), NO_NAME);

    let id = match place.place_id.as_deref().map(str::trim) {
        Some(pid) if !pid.is_empty() => format!("places_{pid}"),
        _ => format!("places_{}", slug(&name)),
    };

    let coords = place
        .geometry
        .as_ref()
        .map(|g| Coordinates::new(g.location.lat, g.location.lng));

    let address = address_or_near(
        place
            .formatted_address
            .as_deref()
            .or(place.vicinity.as_deref()),
        coords,
    );

    let phone = non_blank_or(
        place
            .formatted_phone_number
            .as_deref()
            .or(place.international_phone_number.as_deref())
            .unwrap_or_default(),
        NO_PHONE,
    );

    let description = non_blank_or(
        &place
            .types
            .iter()
            .take(PLACES_DESCRIPTION_TYPES)
            .map(|t| humanize(t))
            .collect::<Vec<_>>()
            .join(", "),
        NO_DESCRIPTION,
    );

    let opening_hours = place
        .opening_hours
        .map(|h| h.weekday_text.join("; "))
        .filter(|h| !h.is_empty());

    BusinessRecord {
        id,
        name,
        category: Category::infer(&place.types),
        address,
        phone,
        description,
        rating: place.rating,
        review_count: place.user_ratings_total,
        reviews: Vec::new(),
        deals: Vec::new(),
        latitude: coords.map(|c| c.latitude),
        longitude: coords.map(|c| c.longitude),
        website: place.website.filter(|w| !w.trim().is_empty()),
        opening_hours,
        created_at: None,
    }
}

// -----------------------------------------------------------------------
// OpenStreetMap / Overpass
// -----------------------------------------------------------------------

fn normalize_overpass(element: &OverpassElement) -> BusinessRecord {
    let element_type = if element.element_type.is_empty() {
        "node"
    } else {
        element.element_type.as_str()
    };
    let coords = element.coordinates();

    let classification: Vec<(&str, &str)> = CLASSIFICATION_KEYS
        .iter()
        .filter_map(|&k| element.tag(&[k]).map(|v| (k, v)))
        .collect();

    // Tag values say what a business is; the key only decides when no value
    // matches (`shop=electronics` is retail, `craft=carpenter` a service).
    let category = Category::matching(classification.iter().map(|(_, v)| v))
        .or_else(|| Category::matching(classification.iter().map(|(k, _)| k)))
        .unwrap_or(Category::Services);

    let description = element.tag(&["description"]).map_or_else(
        || {
            non_blank_or(
                &classification
                    .iter()
                    .map(|(_, v)| humanize(v))
                    .collect::<Vec<_>>()
                    .join(", "),
                NO_DESCRIPTION,
            )
        },
        str::to_string,
    );

    BusinessRecord {
        id: format!("osm_{element_type}_{}", element.id),
        name: non_blank_or(element.tag(&["name"]).unwrap_or_default(), NO_NAME),
        category,
        address: address_or_near(overpass_address(element).as_deref(), coords),
        phone: non_blank_or(
            element.tag(&["phone", "contact:phone"]).unwrap_or_default(),
            NO_PHONE,
        ),
        description,
        rating: None,
        review_count: None,
        reviews: Vec::new(),
        deals: Vec::new(),
        latitude: coords.map(|c| c.latitude),
        longitude: coords.map(|c| c.longitude),
        website: element
            .tag(&["website", "contact:website"])
            .map(str::to_string),
        opening_hours: element.tag(&["opening_hours"]).map(str::to_string),
        created_at: None,
    }
}

/// Builds `"12 Main St, Springfield 12345"` from `addr:*` tags.
fn overpass_address(element: &OverpassElement) -> Option<String> {
    if let Some(full) = element.tag(&["addr:full"]) {
        return Some(full.to_string());
    }

    let street_line = match (
        element.tag(&["addr:housenumber"]),
        element.tag(&["addr:street"]),
    ) {
        (Some(number), Some(street)) => Some(format!("{number} {street}")),
        (None, Some(street)) => Some(street.to_string()),
        _ => None,
    };

    let locality = [element.tag(&["addr:city"]), element.tag(&["addr:postcode"])]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

    let parts: Vec<String> = [street_line, Some(locality).filter(|l| !l.is_empty())]
        .into_iter()
        .flatten()
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
