//! Canonical business record shared by every provider, the store, and the CLI.
//!
//! Provider payloads are mapped into [`BusinessRecord`] at the provider
//! boundary; nothing downstream ever sees a provider-specific shape.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

pub const NO_NAME: &str = "Unnamed business";
pub const NO_ADDRESS: &str = "Address not available";
pub const NO_PHONE: &str = "No phone listed";
pub const NO_DESCRIPTION: &str = "No description available";

const DEFAULT_REVIEWER: &str = "Anonymous";
const DEFAULT_COMMENT: &str = "Great place!";

const FOOD_KEYWORDS: &[&str] = &[
    "restaurant",
    "food",
    "cafe",
    "meal",
    "bakery",
    "bar",
    "pub",
    "coffee",
    "ice_cream",
    "deli",
    "butcher",
    "greengrocer",
    "confectionery",
];

const RETAIL_KEYWORDS: &[&str] = &[
    "store",
    "shop",
    "retail",
    "market",
    "shopping",
    "mall",
    "boutique",
    "florist",
    "clothes",
    "books",
];

const SERVICES_KEYWORDS: &[&str] = &[
    "service",
    "repair",
    "salon",
    "hairdresser",
    "laundry",
    "dry_cleaning",
    "tailor",
    "beauty",
    "dentist",
    "doctor",
    "clinic",
    "bank",
    "office",
    "craft",
    "veterinary",
    "car_wash",
];

const KEYWORD_SETS: [(Category, &[&str]); 3] = [
    (Category::Food, FOOD_KEYWORDS),
    (Category::Retail, RETAIL_KEYWORDS),
    (Category::Services, SERVICES_KEYWORDS),
];

/// Directory category. Every record belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Category {
    Food,
    Retail,
    Services,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Food, Category::Retail, Category::Services];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Retail => "retail",
            Category::Services => "services",
        }
    }

    /// Capitalized label for headings and pills, e.g. `"Food"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Retail => "Retail",
            Category::Services => "Services",
        }
    }

    /// Classifies a business from provider type or tag strings.
    ///
    /// The strings are joined, lower-cased, and tested for substring
    /// membership against the food, retail, and services keyword sets in
    /// that order. The first matching set wins; no match yields
    /// [`Category::Services`].
    pub fn infer<I, S>(tags: I) -> Category
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Category::matching(tags).unwrap_or(Category::Services)
    }

    /// Like [`infer`](Self::infer), but `None` when no keyword matches.
    pub fn matching<I, S>(tags: I) -> Option<Category>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = tags
            .into_iter()
            .map(|t| t.as_ref().to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        KEYWORD_SETS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| joined.contains(k)))
            .map(|(category, _)| *category)
    }

    /// Exact, case-insensitive match on the category name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Category> {
        match value.trim().to_lowercase().as_str() {
            "food" => Some(Category::Food),
            "retail" => Some(Category::Retail),
            "services" => Some(Category::Services),
            _ => None,
        }
    }

    /// Interprets free-form user input: an exact category name if given,
    /// otherwise keyword inference over the text.
    #[must_use]
    pub fn from_user_input(value: &str) -> Category {
        Category::parse(value).unwrap_or_else(|| Category::infer([value]))
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from_user_input(&value)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A locally written review. Reviews are append-only; their order is
/// chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
    /// Set when the reviewer passed the human-verification challenge.
    #[serde(default)]
    pub verified: bool,
}

impl Review {
    /// Builds a review, substituting defaults for a blank name or comment.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRating`] if `rating` is outside 1–5.
    pub fn new(
        user_name: &str,
        rating: u8,
        comment: &str,
        date: NaiveDate,
    ) -> Result<Self, CoreError> {
        if !valid_rating(rating) {
            return Err(CoreError::InvalidRating(rating));
        }

        Ok(Self {
            user_name: non_blank_or(user_name, DEFAULT_REVIEWER),
            rating,
            comment: non_blank_or(comment, DEFAULT_COMMENT),
            date,
            verified: false,
        })
    }

    /// False for a rating outside 1–5, which only a hand-edited snapshot
    /// can hold.
    #[must_use]
    pub fn has_valid_rating(&self) -> bool {
        valid_rating(self.rating)
    }

    #[must_use]
    pub fn verified(mut self) -> Self {
        self.verified = true;
        self
    }
}

fn valid_rating(rating: u8) -> bool {
    (1..=5).contains(&rating)
}

/// A user-entered deal or coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free-form expiry, usually `YYYY-MM-DD`. Empty when not given.
    #[serde(default)]
    pub expires: String,
}

impl Deal {
    /// # Errors
    ///
    /// Returns [`CoreError::MissingField`] if `title` is blank.
    pub fn new(title: &str, description: &str, expires: &str) -> Result<Self, CoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CoreError::MissingField { field: "deal title" });
        }
        Ok(Self {
            title: title.to_string(),
            description: description.trim().to_string(),
            expires: expires.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub address: String,
    #[serde(default = "no_phone")]
    pub phone: String,
    #[serde(default)]
    pub description: String,
    /// Provider rating; overrides the local review average when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Provider review count; added to the local review count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub deals: Vec<Deal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn no_phone() -> String {
    NO_PHONE.to_string()
}

impl BusinessRecord {
    /// Provider rating if present, else the mean of local review ratings,
    /// else `0.0`.
    #[must_use]
    pub fn average_rating(&self) -> f64 {
        if let Some(rating) = self.rating {
            return rating;
        }
        if self.reviews.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        f64::from(sum) / f64::from(self.local_review_count())
    }

    #[must_use]
    pub fn local_review_count(&self) -> u32 {
        u32::try_from(self.reviews.len()).unwrap_or(u32::MAX)
    }

    /// Provider review count plus local review count.
    #[must_use]
    pub fn total_reviews(&self) -> u32 {
        self.review_count
            .unwrap_or(0)
            .saturating_add(self.local_review_count())
    }

    /// Google Maps search link for records that carry coordinates.
    #[must_use]
    pub fn maps_url(&self) -> Option<String> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(format!(
                "https://www.google.com/maps/search/?api=1&query={lat},{lon}"
            )),
            _ => None,
        }
    }
}

/// Input for a business entered by hand.
#[derive(Debug, Clone, Default)]
pub struct NewBusiness {
    pub name: String,
    pub category: String,
    pub address: String,
    pub phone: String,
    pub description: String,
    pub deal: Option<Deal>,
}

impl NewBusiness {
    /// Converts the input into a record with a timestamp-derived id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingField`] if the name or address is blank.
    pub fn into_record(self, now: DateTime<Utc>) -> Result<BusinessRecord, CoreError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::MissingField { field: "name" });
        }
        let address = self.address.trim();
        if address.is_empty() {
            return Err(CoreError::MissingField { field: "address" });
        }

        Ok(BusinessRecord {
            id: format!("biz_{}", now.timestamp_millis()),
            name: name.to_string(),
            category: Category::from_user_input(&self.category),
            address: address.to_string(),
            phone: non_blank_or(&self.phone, NO_PHONE),
            description: self.description.trim().to_string(),
            rating: None,
            review_count: None,
            reviews: Vec::new(),
            deals: self.deal.into_iter().collect(),
            latitude: None,
            longitude: None,
            website: None,
            opening_hours: None,
            created_at: Some(now),
        })
    }
}

/// Where the directory's current record list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectorySource {
    Samples,
    Provider,
    Persisted,
}

impl std::fmt::Display for DirectorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectorySource::Samples => write!(f, "samples"),
            DirectorySource::Provider => write!(f, "provider"),
            DirectorySource::Persisted => write!(f, "persisted"),
        }
    }
}

/// URL-safe slug, e.g. `"Joe's Coffee House"` becomes `"joes-coffee-house"`.
#[must_use]
pub fn slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else if c == ' ' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Returns the trimmed value, or `placeholder` when it is blank.
#[must_use]
pub fn non_blank_or(value: &str, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
#[path = "business_test.rs"]
mod tests;
