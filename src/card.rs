//! Card records.
//!
//! A card is one entry of the listing: a title, an excerpt, a single
//! category and a publication date used only for ordering.
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Date-time layouts tried, in order, after RFC 3339.
const DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Date-only layouts tried after the date-time ones.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y"];

/// Stable identity of a card, its position in the loaded catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub usize);

/// One listed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card
{
    /// Identity within the session
    pub id: CardId,
    /// Headline text
    pub title: String,
    /// Short summary shown under the title
    pub excerpt: String,
    /// Single category, compared case-insensitively
    pub category: String,
    /// Publication date, `None` when the source date could not be parsed
    pub date: Option<NaiveDateTime>,
}

impl Card
{
    /// Creates a card, parsing `date` with [`parse_date`].
    ///
    /// # Arguments
    ///
    /// * `id` - The card identity
    /// * `title` - The headline
    /// * `excerpt` - The summary text
    /// * `category` - The card's category
    /// * `date` - The raw date text
    #[must_use]
    pub fn new(
        id: CardId,
        title: impl Into<String>,
        excerpt: impl Into<String>,
        category: impl Into<String>,
        date: &str,
    ) -> Self
    {
        Self {
            id,
            title: title.into(),
            excerpt: excerpt.into(),
            category: category.into(),
            date: parse_date(date),
        }
    }

    /// Whether the title, excerpt or category contains `needle`.
    ///
    /// `needle` must already be case-folded.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool
    {
        [&self.title, &self.excerpt, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }

    /// Whether the card belongs to `category`, ignoring case.
    #[must_use]
    pub fn is_in_category(&self, category: &str) -> bool
    {
        self.category.to_lowercase() == category.to_lowercase()
    }

    /// Human readable date, e.g. `Mar 01, 2024`.
    #[must_use]
    pub fn date_label(&self) -> String
    {
        self.date.map_or_else(
            || String::from("undated"),
            |date| date.format("%b %d, %Y").to_string(),
        )
    }
}

/// Parses a card date.
///
/// Accepts RFC 3339 timestamps, ISO dates with or without a time part and
/// long-form dates such as `March 1, 2024`. Returns `None` for anything
/// else; such cards are ordered after every dated card.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDateTime>
{
    let raw = raw.trim();

    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw)
    {
        return Some(stamp.naive_utc());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn midnight(year: i32, month: u32, day: u32) -> Option<NaiveDateTime>
    {
        NaiveDate::from_ymd_opt(year, month, day).map(|date| date.and_time(NaiveTime::MIN))
    }

    #[test]
    fn parses_plain_iso_dates()
    {
        assert_eq!(parse_date("2024-03-01"), midnight(2024, 3, 1));
        assert_eq!(parse_date("  2024-03-01 "), midnight(2024, 3, 1));
    }

    #[test]
    fn parses_long_form_dates()
    {
        assert_eq!(parse_date("March 1, 2024"), midnight(2024, 3, 1));
        assert_eq!(parse_date("Mar 1, 2024"), midnight(2024, 3, 1));
    }

    #[test]
    fn rfc3339_is_normalised_to_utc()
    {
        let parsed = parse_date("2024-03-01T02:00:00+02:00");
        assert_eq!(parsed, midnight(2024, 3, 1));
    }

    #[test]
    fn garbage_is_undated()
    {
        assert_eq!(parse_date("soon"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-13-45"), None);
    }

    #[test]
    fn mentions_checks_every_text_field()
    {
        let card = Card::new(CardId(0), "Hooks in React", "State tips", "Frontend", "2024-01-01");

        assert!(card.mentions("react"));
        assert!(card.mentions("tips"));
        assert!(card.mentions("frontend"));
        assert!(!card.mentions("rust"));
    }

    #[test]
    fn category_match_ignores_case()
    {
        let card = Card::new(CardId(0), "t", "e", "Tech", "2024-01-01");

        assert!(card.is_in_category("tech"));
        assert!(card.is_in_category("TECH"));
        assert!(!card.is_in_category("tech news"));
    }

    #[test]
    fn undated_cards_have_a_label()
    {
        let card = Card::new(CardId(0), "t", "e", "c", "???");
        assert_eq!(card.date_label(), "undated");

        let card = Card::new(CardId(0), "t", "e", "c", "2024-03-01");
        assert_eq!(card.date_label(), "Mar 01, 2024");
    }
}
