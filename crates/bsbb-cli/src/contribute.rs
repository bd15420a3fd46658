//! Commands that write user contributions: businesses, reviews, deals, and
//! favorites. Every contribution except a favorite toggle must pass the
//! arithmetic verification challenge before anything is stored.

use anyhow::{bail, Context as _};
use bsbb_core::{Challenge, Deal, NewBusiness, Review};
use bsbb_store::{DirectoryStore, KeyValueSlot};
use chrono::Utc;

/// Source of interactive answers. The terminal in production, a script in
/// tests.
pub(crate) trait Prompt {
    /// Asks for one line of text. An empty answer yields `default` when
    /// given, otherwise the empty string.
    fn text(&mut self, prompt: &str, default: Option<&str>) -> anyhow::Result<String>;
}

pub(crate) struct Terminal;

impl Prompt for Terminal {
    fn text(&mut self, prompt: &str, default: Option<&str>) -> anyhow::Result<String> {
        let mut input = dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }
}

/// Flags given to `add`; anything missing is prompted for.
#[derive(Debug, Default)]
pub(crate) struct BusinessDraft {
    pub name: Option<String>,
    pub category: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

fn given_or_prompt(
    prompt: &mut impl Prompt,
    given: Option<String>,
    question: &str,
    default: Option<&str>,
) -> anyhow::Result<String> {
    match given {
        Some(value) => Ok(value),
        None => prompt.text(question, default),
    }
}

fn verify(prompt: &mut impl Prompt, challenge: Challenge) -> anyhow::Result<()> {
    let answer = prompt.text(&format!("Verification: {}", challenge.question()), None)?;
    if !challenge.check(&answer) {
        tracing::info!("verification failed; nothing was saved");
        bail!("Verification failed.");
    }
    Ok(())
}

pub(crate) fn run_add<S: KeyValueSlot>(
    store: &mut DirectoryStore<S>,
    draft: BusinessDraft,
) -> anyhow::Result<()> {
    add_business(store, draft, &mut Terminal, Challenge::random())
}

pub(crate) fn add_business<S: KeyValueSlot>(
    store: &mut DirectoryStore<S>,
    draft: BusinessDraft,
    prompt: &mut impl Prompt,
    challenge: Challenge,
) -> anyhow::Result<()> {
    let name = given_or_prompt(prompt, draft.name, "Business name", None)?;
    if name.trim().is_empty() {
        bail!("a business name is required");
    }
    let category = given_or_prompt(
        prompt,
        draft.category,
        "Category (food/retail/services)",
        Some("food"),
    )?;
    let address = given_or_prompt(prompt, draft.address, "Address", None)?;
    let phone = given_or_prompt(prompt, draft.phone, "Phone (optional)", None)?;
    let description = given_or_prompt(prompt, draft.description, "Description (optional)", None)?;

    let deal_title = prompt.text("Add a deal title? (optional)", None)?;
    let deal = if deal_title.trim().is_empty() {
        None
    } else {
        let description = prompt.text("Deal description", None)?;
        let expires = prompt.text("Deal expires (YYYY-MM-DD)", None)?;
        Some(Deal::new(&deal_title, &description, &expires)?)
    };

    verify(prompt, challenge)?;

    let record = NewBusiness {
        name,
        category,
        address,
        phone,
        description,
        deal,
    }
    .into_record(Utc::now())?;

    let summary = format!("Added {} ({}).", record.name, record.id);
    store
        .add_record(record)
        .context("failed to save the new business")?;
    println!("{summary}");
    Ok(())
}

pub(crate) fn run_review<S: KeyValueSlot>(
    store: &mut DirectoryStore<S>,
    id: &str,
    flags: ReviewFlags,
) -> anyhow::Result<()> {
    write_review(store, id, flags, &mut Terminal, Challenge::random())
}

#[derive(Debug, Default)]
pub(crate) struct ReviewFlags {
    pub rating: Option<u8>,
    pub name: Option<String>,
    pub comment: Option<String>,
}

pub(crate) fn write_review<S: KeyValueSlot>(
    store: &mut DirectoryStore<S>,
    id: &str,
    flags: ReviewFlags,
    prompt: &mut impl Prompt,
    challenge: Challenge,
) -> anyhow::Result<()> {
    let business = require_business(store, id)?;

    let rating = match flags.rating {
        Some(rating) => rating,
        None => {
            let raw = prompt.text("Rating (1-5)", Some("5"))?;
            raw.trim()
                .parse::<u8>()
                .with_context(|| format!("'{}' is not a rating from 1 to 5", raw.trim()))?
        }
    };
    let name = given_or_prompt(prompt, flags.name, "Your name", None)?;
    let comment = given_or_prompt(prompt, flags.comment, "Comment", None)?;

    let review = Review::new(&name, rating, &comment, Utc::now().date_naive())?;
    verify(prompt, challenge)?;

    store.append_review(id, review.verified())?;
    println!("Thanks! Your review of {business} was saved.");
    Ok(())
}

pub(crate) fn run_deal<S: KeyValueSlot>(
    store: &mut DirectoryStore<S>,
    id: &str,
    flags: DealFlags,
) -> anyhow::Result<()> {
    add_deal(store, id, flags, &mut Terminal, Challenge::random())
}

#[derive(Debug, Default)]
pub(crate) struct DealFlags {
    pub title: Option<String>,
    pub description: Option<String>,
    pub expires: Option<String>,
}

pub(crate) fn add_deal<S: KeyValueSlot>(
    store: &mut DirectoryStore<S>,
    id: &str,
    flags: DealFlags,
    prompt: &mut impl Prompt,
    challenge: Challenge,
) -> anyhow::Result<()> {
    let business = require_business(store, id)?;

    let title = given_or_prompt(prompt, flags.title, "Deal title", None)?;
    let description = given_or_prompt(prompt, flags.description, "Deal description", None)?;
    let expires = given_or_prompt(prompt, flags.expires, "Deal expires (YYYY-MM-DD)", None)?;
    let deal = Deal::new(&title, &description, &expires)?;

    verify(prompt, challenge)?;

    store.append_deal(id, deal)?;
    println!("Deal added to {business}.");
    Ok(())
}

pub(crate) fn run_toggle_favorite<S: KeyValueSlot>(
    store: &mut DirectoryStore<S>,
    id: &str,
) -> anyhow::Result<()> {
    let business = require_business(store, id)?;
    if store.toggle_favorite(id)? {
        println!("Added {business} to favorites.");
    } else {
        println!("Removed {business} from favorites.");
    }
    Ok(())
}

fn require_business<S: KeyValueSlot>(store: &DirectoryStore<S>, id: &str) -> anyhow::Result<String> {
    store
        .get(id)
        .map(|r| r.name.clone())
        .ok_or_else(|| anyhow::anyhow!("no business with id '{id}'; run `bsbb list` to see ids"))
}

#[cfg(test)]
#[path = "contribute_test.rs"]
mod tests;
