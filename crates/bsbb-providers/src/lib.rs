pub mod error;
pub mod geocode;
mod http;
pub mod normalize;
pub mod overpass;
pub mod places;
pub mod search;
pub mod types;

pub use error::ProviderError;
pub use geocode::Geocoder;
pub use normalize::normalize;
pub use overpass::OverpassClient;
pub use places::PlacesClient;
pub use search::{DirectoryProvider, SearchLocation, SearchOutcome};
pub use types::{Coordinates, OverpassElement, PlaceResult, ProviderElement};
