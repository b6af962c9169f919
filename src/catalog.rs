//! Catalog loading.
//!
//! A catalog is the card collection plus the controls the page offers. It
//! is read either from a TOML file or from an exported listing page (HTML),
//! depending on the file extension.
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Deserialize;

use crate::card::{Card, CardId};
use crate::surface::Controls;

/// A loaded listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog
{
    /// Name shown in the header
    pub title: String,
    /// Cards in page order
    pub cards: Vec<Card>,
    /// Filter-button values, `all` first when present
    pub filters: Vec<String>,
    /// Category cards offered by the navigation menu
    pub categories: Vec<String>,
    /// Controls the page carries
    pub controls: Controls,
}

impl Catalog
{
    /// Loads a catalog file.
    ///
    /// Files ending in `.html` or `.htm` are parsed as listing pages;
    /// anything else as TOML.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the catalog file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self>
    {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;

        let is_html = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));

        let catalog = if is_html
        {
            html::parse_page(&content)
        }
        else
        {
            Self::from_toml(&content)
                .with_context(|| format!("Failed to parse catalog {}", path.display()))?
        };

        debug!(
            "Catalog \"{}\": {} cards, {} filters, {} categories",
            catalog.title,
            catalog.cards.len(),
            catalog.filters.len(),
            catalog.categories.len()
        );

        Ok(catalog)
    }

    /// Parses a TOML catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid catalog document.
    pub fn from_toml(content: &str) -> Result<Self>
    {
        let raw: RawCatalog = toml::from_str(content).context("Invalid catalog TOML")?;

        let cards: Vec<Card> = raw
            .cards
            .into_iter()
            .enumerate()
            .map(|(index, card)| {
                Card::new(
                    CardId(index),
                    card.title,
                    card.excerpt,
                    card.category,
                    &card.date,
                )
            })
            .collect();

        let controls = match raw.controls
        {
            Some(names) => parse_controls(&names),
            None => Controls::all(),
        };

        let categories = raw
            .categories
            .unwrap_or_else(|| distinct_categories(&cards));

        let filters = raw.filters.unwrap_or_else(|| {
            std::iter::once(String::from("all"))
                .chain(distinct_categories(&cards))
                .collect()
        });

        Ok(Self {
            title: raw.title,
            cards,
            filters,
            categories,
            controls,
        })
    }
}

/// On-disk shape of a TOML catalog.
#[derive(Debug, Deserialize)]
struct RawCatalog
{
    /// Catalog name
    #[serde(default = "default_title")]
    title: String,
    /// Control names; every control when absent
    controls: Option<Vec<String>>,
    /// Filter-button values
    filters: Option<Vec<String>>,
    /// Category-card names
    categories: Option<Vec<String>>,
    /// The cards
    #[serde(default)]
    cards: Vec<RawCard>,
}

/// On-disk shape of one card.
#[derive(Debug, Deserialize)]
struct RawCard
{
    /// Headline
    title: String,
    /// Summary
    #[serde(default)]
    excerpt: String,
    /// Category name
    #[serde(default)]
    category: String,
    /// Raw date text
    #[serde(default)]
    date: String,
}

/// Title used when the catalog names none.
fn default_title() -> String
{
    String::from("Listing")
}

/// Unions the named controls, skipping unknown names.
fn parse_controls(names: &[String]) -> Controls
{
    names
        .iter()
        .fold(Controls::empty(), |controls, name| {
            if let Some(control) = Controls::parse_name(name)
            {
                controls | control
            }
            else
            {
                warn!("Ignoring unknown control \"{name}\"");
                controls
            }
        })
}

/// Distinct non-empty categories in first-seen order, deduplicated without
/// regard to case.
fn distinct_categories(cards: &[Card]) -> Vec<String>
{
    let mut seen = HashSet::new();

    cards
        .iter()
        .filter(|card| !card.category.is_empty())
        .filter(|card| seen.insert(card.category.to_lowercase()))
        .map(|card| card.category.clone())
        .collect()
}

/// Extraction of cards and controls from an exported listing page.
pub mod html
{
    use std::sync::LazyLock;

    use regex::Regex;

    use super::{Card, CardId, Catalog, Controls, distinct_categories};

    // Opening tags only; a card's body runs until the next card's tag.
    static TAG_REGEX: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<[a-zA-Z][^>]*>").expect("Invalid tag regex"));

    static ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("Invalid attribute regex")
    });

    static INNER_TAG_REGEX: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid inner tag regex"));

    static TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("Invalid title regex")
    });

    static WHITESPACE_REGEX: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

    /// Id or class markers that reveal each control.
    const CONTROL_MARKERS: [(&str, Controls); 9] = [
        ("themeToggle", Controls::THEME_TOGGLE),
        ("menuToggle", Controls::NAV_MENU),
        ("searchInput", Controls::SEARCH),
        ("category-card", Controls::CATEGORIES),
        ("filter-btn", Controls::FILTERS),
        ("pageNumbers", Controls::PAGINATION),
        ("newsletter-form", Controls::NEWSLETTER),
        ("contact-form", Controls::CONTACT),
        ("backToTop", Controls::BACK_TO_TOP),
    ];

    /// An opening tag and where it sits in the page.
    struct Tag<'page>
    {
        /// Raw tag text, including the angle brackets
        text: &'page str,
        /// Byte offset just past the tag
        end: usize,
    }

    impl Tag<'_>
    {
        /// Value of attribute `name`, if present.
        fn attr(&self, name: &str) -> Option<String>
        {
            ATTR_REGEX
                .captures_iter(self.text)
                .find(|caps| caps[1].eq_ignore_ascii_case(name))
                .and_then(|caps| caps.get(2).or_else(|| caps.get(3)))
                .map(|value| decode_entities(value.as_str()))
        }

        /// Whether the `class` attribute lists `class`.
        fn has_class(&self, class: &str) -> bool
        {
            self.attr("class")
                .is_some_and(|classes| classes.split_whitespace().any(|name| name == class))
        }

        /// Whether the `id` attribute equals `id`.
        fn has_id(&self, id: &str) -> bool
        {
            self.attr("id").is_some_and(|value| value == id)
        }
    }

    /// Parses a listing page into a catalog.
    ///
    /// Pages without cards yield an empty catalog rather than an error.
    #[must_use]
    pub fn parse_page(page: &str) -> Catalog
    {
        let tags: Vec<Tag<'_>> = TAG_REGEX
            .find_iter(page)
            .map(|found| Tag {
                text: found.as_str(),
                end: found.end(),
            })
            .collect();

        let cards = extract_cards(page, &tags);

        let mut filters = Vec::new();
        let mut categories = Vec::new();
        let mut controls = Controls::empty();

        for tag in &tags
        {
            if tag.has_class("filter-btn")
            {
                if let Some(value) = tag.attr("data-filter")
                {
                    filters.push(value);
                }
            }

            if tag.has_class("category-card")
            {
                if let Some(value) = tag.attr("data-category")
                {
                    categories.push(value);
                }
            }

            for (marker, control) in CONTROL_MARKERS
            {
                if tag.has_id(marker) || tag.has_class(marker)
                {
                    controls |= control;
                }
            }
        }

        if categories.is_empty() && controls.contains(Controls::NAV_MENU)
        {
            categories = distinct_categories(&cards);
        }

        let title = TITLE_REGEX
            .captures(page)
            .map(|caps| clean_text(&caps[1]))
            .filter(|title| !title.is_empty())
            .unwrap_or_else(super::default_title);

        Catalog {
            title,
            cards,
            filters,
            categories,
            controls,
        }
    }

    /// Builds a card from every `blog-card` element.
    fn extract_cards(page: &str, tags: &[Tag<'_>]) -> Vec<Card>
    {
        let starts: Vec<usize> = tags
            .iter()
            .enumerate()
            .filter(|(_, tag)| tag.has_class("blog-card"))
            .map(|(index, _)| index)
            .collect();

        starts
            .iter()
            .enumerate()
            .map(|(position, &tag_index)| {
                let tag = &tags[tag_index];
                let body_end = starts
                    .get(position + 1)
                    .map_or(page.len(), |&next| tags[next].end - tags[next].text.len());
                let body_tags: Vec<&Tag<'_>> = tags
                    .iter()
                    .skip(tag_index + 1)
                    .take_while(|inner| inner.end <= body_end)
                    .collect();

                let title = text_of_class(page, &body_tags, "blog-title");
                let excerpt = text_of_class(page, &body_tags, "blog-excerpt");
                let category = tag
                    .attr("data-category")
                    .unwrap_or_default();
                let date = tag.attr("data-date").unwrap_or_default();

                Card::new(CardId(position), title, excerpt, category, &date)
            })
            .collect()
    }

    /// Text content of the first element carrying `class`, up to the next
    /// closing tag of the same element name.
    fn text_of_class(page: &str, tags: &[&Tag<'_>], class: &str) -> String
    {
        let Some(tag) = tags.iter().find(|tag| tag.has_class(class))
        else
        {
            return String::new();
        };

        let name: String = tag
            .text
            .trim_start_matches('<')
            .chars()
            .take_while(char::is_ascii_alphanumeric)
            .collect();
        let rest = &page[tag.end..];
        let closing = format!("</{}", name.to_ascii_lowercase());
        // ASCII folding keeps byte offsets aligned with `rest`
        let end = rest
            .to_ascii_lowercase()
            .find(&closing)
            .unwrap_or(rest.len());

        clean_text(&rest[..end])
    }

    /// Strips inner tags, decodes entities and collapses whitespace.
    fn clean_text(raw: &str) -> String
    {
        let stripped = INNER_TAG_REGEX.replace_all(raw, "");
        let decoded = decode_entities(&stripped);

        WHITESPACE_REGEX
            .replace_all(decoded.trim(), " ")
            .into_owned()
    }

    /// Decodes the handful of entities listing pages use.
    fn decode_entities(raw: &str) -> String
    {
        raw.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&#x27;", "'")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
    }

}
