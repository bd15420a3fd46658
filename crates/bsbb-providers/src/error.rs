use thiserror::Error;

/// Errors returned by the places, Overpass, and geocoding clients.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or TLS failure, or a non-2xx status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered but reported a failure in its envelope.
    #[error("{provider} returned {status}: {message}")]
    Api {
        provider: &'static str,
        status: String,
        message: String,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("location not found: {0}")]
    LocationNotFound(String),
}
