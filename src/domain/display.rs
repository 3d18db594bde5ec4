use chrono::{DateTime, TimeZone};

use crate::domain::{
    card::Card,
    options::{DateFormat, ViewOptions},
};

/// Renders a date the way the board shows it
pub fn format_date<Tz>(date: &DateTime<Tz>, format: DateFormat) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match format {
        DateFormat::Readable => date.format("%b %-d, %Y").to_string(),
        DateFormat::Calendar => date.format("%Y-%m-%d").to_string(),
    }
}

/// Card title, prefixed with its id when card ids are shown
pub fn card_heading(card: &Card, options: &ViewOptions) -> String {
    if options.show_card_ids {
        format!("#{} {}", card.id, card.title)
    } else {
        card.title.clone()
    }
}
