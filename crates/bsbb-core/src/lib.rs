pub mod app_config;
pub mod business;
pub mod config;
pub mod query;
pub mod samples;
pub mod verification;

use thiserror::Error;

pub use app_config::AppConfig;
pub use business::{BusinessRecord, Category, Deal, DirectorySource, NewBusiness, Review};
pub use config::{load_app_config, load_app_config_from_env};
pub use query::{DirectoryStats, FilterState, SortOrder};
pub use samples::sample_businesses;
pub use verification::Challenge;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("{field} is required")]
    MissingField { field: &'static str },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
