mod api_key;
mod browse;
mod contribute;
mod locate;
mod render;

use anyhow::Context as _;
use bsbb_store::{DirectoryStore, FileSlot};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::api_key::ApiKeyCommands;

const DEFAULT_TOP_LIMIT: &str = "10";

#[derive(Debug, Parser)]
#[command(name = "bsbb")]
#[command(about = "Find, review, and bookmark local small businesses")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List businesses, optionally filtered and sorted
    List {
        /// Case-insensitive text matched against name, address, and category
        #[arg(long, short)]
        search: Option<String>,
        /// Only show one category (food, retail, services)
        #[arg(long, short)]
        category: Option<String>,
        /// Sort order: name, rating, or reviews
        #[arg(long, default_value = "name")]
        sort: String,
    },
    /// Best-rated businesses that have at least one review
    TopRated {
        #[arg(long, default_value = DEFAULT_TOP_LIMIT)]
        limit: usize,
    },
    /// Businesses with the most reviews
    MostReviewed {
        #[arg(long, default_value = DEFAULT_TOP_LIMIT)]
        limit: usize,
    },
    /// List favorited businesses
    Favorites,
    /// Add or remove a business from favorites
    Favorite { id: String },
    /// Add a business (prompts for anything not given as a flag)
    Add {
        #[arg(long)]
        name: Option<String>,
        /// food, retail, services, or a description to classify
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Write a review for a business
    Review {
        id: String,
        /// Star rating from 1 to 5
        #[arg(long)]
        rating: Option<u8>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Attach a deal or coupon to a business
    Deal {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Expiry date, e.g. 2025-12-31
        #[arg(long)]
        expires: Option<String>,
    },
    /// Search for businesses around a coordinate
    Near {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Narrow the provider search to one category
        #[arg(long, short)]
        category: Option<String>,
    },
    /// Search for businesses in a named place, e.g. "Austin, TX"
    Search {
        #[arg(required = true, num_args = 1..)]
        location: Vec<String>,
        /// Narrow the provider search to one category
        #[arg(long, short)]
        category: Option<String>,
    },
    /// Show full details for one business
    Show { id: String },
    /// Directory totals
    Stats,
    /// Categories present in the directory
    Categories,
    /// Manage the saved Google Places API key
    ApiKey {
        #[command(subcommand)]
        command: ApiKeyCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bsbb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let slot = FileSlot::new(&config.data_dir);
    let mut store = DirectoryStore::open(slot).with_context(|| {
        format!(
            "failed to open directory data in {}",
            config.data_dir.display()
        )
    })?;

    let Some(command) = cli.command else {
        browse::run_list(&store, &bsbb_core::FilterState::default());
        return Ok(());
    };

    match command {
        Commands::List {
            search,
            category,
            sort,
        } => {
            let filters = browse::filter_state(search, category, &sort);
            browse::run_list(&store, &filters);
        }
        Commands::TopRated { limit } => browse::run_top_rated(&store, limit),
        Commands::MostReviewed { limit } => browse::run_most_reviewed(&store, limit),
        Commands::Favorites => browse::run_favorites(&store),
        Commands::Favorite { id } => contribute::run_toggle_favorite(&mut store, &id)?,
        Commands::Add {
            name,
            category,
            address,
            phone,
            description,
        } => {
            let draft = contribute::BusinessDraft {
                name,
                category,
                address,
                phone,
                description,
            };
            contribute::run_add(&mut store, draft)?;
        }
        Commands::Review {
            id,
            rating,
            name,
            comment,
        } => {
            let flags = contribute::ReviewFlags {
                rating,
                name,
                comment,
            };
            contribute::run_review(&mut store, &id, flags)?;
        }
        Commands::Deal {
            id,
            title,
            description,
            expires,
        } => {
            let flags = contribute::DealFlags {
                title,
                description,
                expires,
            };
            contribute::run_deal(&mut store, &id, flags)?;
        }
        Commands::Near { lat, lon, category } => {
            let location = bsbb_providers::SearchLocation::Coordinates(
                bsbb_providers::Coordinates::new(lat, lon),
            );
            locate::run_search(&mut store, &config, location, category.as_deref()).await?;
        }
        Commands::Search { location, category } => {
            let location = bsbb_providers::SearchLocation::Text(location.join(" "));
            locate::run_search(&mut store, &config, location, category.as_deref()).await?;
        }
        Commands::Show { id } => browse::run_show(&store, &id)?,
        Commands::Stats => browse::run_stats(&store),
        Commands::Categories => browse::run_categories(&store),
        Commands::ApiKey { command } => api_key::run(&mut store, &config, command)?,
    }

    Ok(())
}
