use bsbb_core::AppConfig;
use bsbb_store::{DirectoryStore, KeyValueSlot};
use clap::Subcommand;

/// Sub-commands available under `api-key`.
#[derive(Debug, Subcommand)]
pub enum ApiKeyCommands {
    /// Save a Google Places API key for future searches
    Set { key: String },
    /// Forget the saved key
    Clear,
    /// Show which key, if any, searches will use
    Show,
}

/// `AIza...3xYz`: enough to recognize a key without revealing it.
pub(crate) fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

pub(crate) fn run<S: KeyValueSlot>(
    store: &mut DirectoryStore<S>,
    config: &AppConfig,
    command: ApiKeyCommands,
) -> anyhow::Result<()> {
    match command {
        ApiKeyCommands::Set { key } => {
            if key.trim().is_empty() {
                anyhow::bail!("the API key must not be blank");
            }
            store.set_api_key(&key)?;
            println!("API key saved.");
        }
        ApiKeyCommands::Clear => {
            store.clear_api_key()?;
            println!("API key cleared.");
        }
        ApiKeyCommands::Show => {
            if let Some(key) = &config.google_api_key {
                println!("{} (from BSBB_GOOGLE_API_KEY)", mask_key(key));
            } else if let Some(key) = store.api_key()? {
                println!("{} (saved)", mask_key(&key));
            } else {
                println!("No API key set; searches use OpenStreetMap.");
            }
        }
    }
    Ok(())
}
