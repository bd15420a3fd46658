//! Plain-text rendering of records for the terminal.

use bsbb_core::BusinessRecord;

const NAME_WIDTH: usize = 28;
const ADDRESS_WIDTH: usize = 40;

/// Truncates to `max` characters, marking the cut with `...`.
pub(crate) fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        let kept: String = value.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        value.to_string()
    }
}

/// `"4.5"`, or `"-"` for a business nobody has rated.
pub(crate) fn fmt_rating(record: &BusinessRecord) -> String {
    if record.total_reviews() == 0 && record.rating.is_none() {
        "-".to_string()
    } else {
        format!("{:.1}", record.average_rating())
    }
}

pub(crate) fn header() -> String {
    format!(
        "  {:<24}{:<NAME_WIDTH$}{:<10}{:<8}{:<9}ADDRESS",
        "ID", "NAME", "CATEGORY", "RATING", "REVIEWS"
    )
}

/// One table row; favorites are marked with `*` in the first column.
pub(crate) fn row(record: &BusinessRecord, favorite: bool) -> String {
    let marker = if favorite { '*' } else { ' ' };
    let deals = if record.deals.is_empty() {
        String::new()
    } else {
        format!("  [{} deal{}]", record.deals.len(), plural(record.deals.len() == 1))
    };
    format!(
        "{marker} {:<24}{:<NAME_WIDTH$}{:<10}{:<8}{:<9}{}{deals}",
        truncate(&record.id, 23),
        truncate(&record.name, NAME_WIDTH - 1),
        record.category.as_str(),
        fmt_rating(record),
        record.total_reviews(),
        truncate(&record.address, ADDRESS_WIDTH),
    )
}

pub(crate) fn print_table<'a, I, F>(records: I, is_favorite: F)
where
    I: IntoIterator<Item = &'a BusinessRecord>,
    F: Fn(&str) -> bool,
{
    println!("{}", header());
    for record in records {
        println!("{}", row(record, is_favorite(&record.id)));
    }
}

/// Multi-line detail view: contact info, deals, and every review.
pub(crate) fn details(record: &BusinessRecord, favorite: bool) -> String {
    let heart = if favorite { " (favorite)" } else { "" };
    let mut lines = vec![
        format!("{}{heart}", record.name),
        format!("Category:    {}", record.category.label()),
        format!("Address:     {}", record.address),
        format!("Phone:       {}", record.phone),
    ];
    if !record.description.is_empty() {
        lines.push(format!("About:       {}", record.description));
    }
    if let Some(website) = &record.website {
        lines.push(format!("Website:     {website}"));
    }
    if let Some(hours) = &record.opening_hours {
        lines.push(format!("Hours:       {hours}"));
    }
    if let Some(url) = record.maps_url() {
        lines.push(format!("Map:         {url}"));
    }
    lines.push(format!(
        "Rating:      {} ({} review{})",
        fmt_rating(record),
        record.total_reviews(),
        plural(record.total_reviews() == 1)
    ));

    if !record.deals.is_empty() {
        lines.push("\nDeals".to_string());
        lines.extend(record.deals.iter().map(|deal| {
            let expires = if deal.expires.is_empty() {
                String::new()
            } else {
                format!(" (expires {})", deal.expires)
            };
            format!("  - {}: {}{expires}", deal.title, deal.description)
        }));
    }

    lines.push("\nReviews".to_string());
    if record.reviews.is_empty() {
        lines.push("  No reviews yet. Be the first!".to_string());
    }
    lines.extend(record.reviews.iter().map(|review| {
        let verified = if review.verified { " [verified]" } else { "" };
        format!(
            "  {} {}/5 on {}{verified}: {}",
            review.user_name,
            review.rating,
            review.date.format("%Y-%m-%d"),
            review.comment
        )
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn plural(singular: bool) -> &'static str {
    if singular {
        ""
    } else {
        "s"
    }
}
