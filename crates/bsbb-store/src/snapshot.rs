use bsbb_core::{BusinessRecord, Review};
use serde::{Deserialize, Serialize};

/// Persisted document: `{"businesses": [...], "favorites": [...]}`.
///
/// Both fields default to empty so a partial document still loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub businesses: Vec<BusinessRecord>,
    #[serde(default)]
    pub favorites: Vec<String>,
}

impl Snapshot {
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if the records cannot be encoded.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses a snapshot, dropping reviews whose rating is outside 1–5.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if `json` is not a snapshot document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut snapshot: Snapshot = serde_json::from_str(json)?;
        for record in &mut snapshot.businesses {
            let before = record.reviews.len();
            record.reviews.retain(Review::has_valid_rating);
            if record.reviews.len() < before {
                tracing::warn!(
                    id = %record.id,
                    dropped = before - record.reviews.len(),
                    "reviews with out-of-range ratings dropped"
                );
            }
        }
        Ok(snapshot)
    }
}
