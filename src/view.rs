//! Pure view derivation.
//!
//! Everything here is a function of its inputs: which cards pass the
//! active filter or search term, the newest-first ordering, the page slice
//! and the page-number window. The [`controller`](crate::controller) runs
//! these and applies the results.
use crate::card::Card;

/// Number of cards shown per page.
pub const PAGE_SIZE: usize = 6;

/// Maximum number of consecutive page numbers in the pager window.
pub const WINDOW_SPAN: usize = 5;

/// Category filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter
{
    /// Every card
    #[default]
    All,
    /// Cards of one category, compared case-insensitively
    Category(String),
}

impl Filter
{
    /// Builds a filter from a filter-button value; `all` (any case) is
    /// [`Filter::All`].
    #[must_use]
    pub fn from_value(value: &str) -> Self
    {
        let value = value.trim();

        if value.eq_ignore_ascii_case("all")
        {
            Self::All
        }
        else
        {
            Self::Category(value.to_string())
        }
    }

    /// Whether `card` passes the filter.
    #[must_use]
    pub fn admits(&self, card: &Card) -> bool
    {
        match self
        {
            Self::All => true,
            Self::Category(category) => card.is_in_category(category),
        }
    }

    /// Text of the filter-button value this filter corresponds to.
    #[must_use]
    pub fn value(&self) -> &str
    {
        match self
        {
            Self::All => "all",
            Self::Category(category) => category,
        }
    }
}

/// Session view state.
///
/// Created once per controller and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState
{
    /// Category filter applied in paged mode
    pub active_filter: Filter,
    /// One-based page number
    pub current_page: usize,
    /// Case-folded search term; empty outside search mode
    pub search_term: String,
}

impl Default for ViewState
{
    fn default() -> Self
    {
        Self {
            active_filter: Filter::All,
            current_page: 1,
            search_term: String::new(),
        }
    }
}

impl ViewState
{
    /// Whether a search term currently replaces pagination.
    #[must_use]
    pub fn is_searching(&self) -> bool
    {
        !self.search_term.is_empty()
    }
}

/// Trims and case-folds a raw search term.
#[must_use]
pub fn normalize_term(raw: &str) -> String
{
    raw.trim().to_lowercase()
}

/// Sorts cards newest first.
///
/// The sort is stable: cards with equal dates keep their relative order,
/// and undated cards go last in their input order.
pub fn sort_newest_first(cards: &mut [Card])
{
    cards.sort_by(|left, right| right.date.cmp(&left.date));
}

/// Cards admitted by `filter`, newest first.
#[must_use]
pub fn filtered(cards: &[Card], filter: &Filter) -> Vec<Card>
{
    let mut admitted: Vec<Card> = cards
        .iter()
        .filter(|card| filter.admits(card))
        .cloned()
        .collect();

    sort_newest_first(&mut admitted);
    admitted
}

/// Cards mentioning the case-folded `term`, newest first.
#[must_use]
pub fn matching(cards: &[Card], term: &str) -> Vec<Card>
{
    let mut matches: Vec<Card> = cards
        .iter()
        .filter(|card| card.mentions(term))
        .cloned()
        .collect();

    sort_newest_first(&mut matches);
    matches
}

/// Number of pages needed for `count` cards.
#[must_use]
pub const fn total_pages(count: usize) -> usize
{
    count.div_ceil(PAGE_SIZE)
}

/// Clamps `page` into `[1, total]`, or to 1 when there are no pages.
#[must_use]
pub fn clamp_page(page: usize, total: usize) -> usize
{
    page.clamp(1, total.max(1))
}

/// The cards on `page`.
///
/// `page` must already be clamped; an out-of-range page yields an empty
/// slice.
#[must_use]
pub fn page_slice(cards: &[Card], page: usize) -> &[Card]
{
    let start = page
        .saturating_sub(1)
        .saturating_mul(PAGE_SIZE)
        .min(cards.len());
    let end = start
        .saturating_add(PAGE_SIZE)
        .min(cards.len());

    &cards[start..end]
}

/// One element of the page-number control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem
{
    /// A clickable page number
    Page
    {
        /// One-based page number
        number: usize,
        /// Whether this is the current page
        active: bool,
    },
    /// A gap between the window and the first or last page
    Ellipsis,
}

/// Builds the page-number control for `current` out of `total` pages.
///
/// At most [`WINDOW_SPAN`] consecutive numbers are shown around `current`;
/// the first and last pages are always reachable, with an ellipsis when they
/// are not adjacent to the window. A single page yields just `1`; no pages
/// yield nothing.
#[must_use]
pub fn page_window(current: usize, total: usize) -> Vec<PageItem>
{
    let page = |number: usize| PageItem::Page {
        number,
        active: number == current,
    };

    if total == 0
    {
        return Vec::new();
    }

    let reach = WINDOW_SPAN - 1;
    let mut first = current.saturating_sub(reach / 2).max(1);
    let last = first.saturating_add(reach).min(total);

    if last - first < reach
    {
        first = last.saturating_sub(reach).max(1);
    }

    let mut items = Vec::with_capacity(WINDOW_SPAN + 4);

    if first > 1
    {
        items.push(page(1));

        if first > 2
        {
            items.push(PageItem::Ellipsis);
        }
    }

    items.extend((first..=last).map(page));

    if last < total
    {
        if last + 1 < total
        {
            items.push(PageItem::Ellipsis);
        }

        items.push(page(total));
    }

    items
}

/// Derived state of the pagination controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager
{
    /// Page being displayed
    pub current_page: usize,
    /// Number of pages of the visible set
    pub total_pages: usize,
    /// Page-number control contents
    pub items: Vec<PageItem>,
}

impl Pager
{
    /// Derives the pager for a clamped `current` page.
    #[must_use]
    pub fn new(current: usize, total: usize) -> Self
    {
        Self {
            current_page: current,
            total_pages: total,
            items: page_window(current, total),
        }
    }

    /// Whether the whole control is hidden (no pages at all).
    #[must_use]
    pub const fn is_hidden(&self) -> bool
    {
        self.total_pages == 0
    }

    /// Whether the previous-page control is enabled.
    #[must_use]
    pub const fn has_prev(&self) -> bool
    {
        self.total_pages > 0 && self.current_page > 1
    }

    /// Whether the next-page control is enabled.
    #[must_use]
    pub const fn has_next(&self) -> bool
    {
        self.total_pages > 0 && self.current_page < self.total_pages
    }

    /// The number marked active, if any.
    #[must_use]
    pub fn active_page(&self) -> Option<usize>
    {
        self.items
            .iter()
            .find_map(|item| match item
            {
                PageItem::Page {
                    number,
                    active: true,
                } => Some(*number),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::card::CardId;

    fn card(id: usize, category: &str, date: &str) -> Card
    {
        Card::new(CardId(id), format!("title {id}"), "", category, date)
    }

    fn numbers(items: &[PageItem]) -> String
    {
        items
            .iter()
            .map(|item| match item
            {
                PageItem::Page {
                    number,
                    active: true,
                } => format!("[{number}]"),
                PageItem::Page { number, .. } => number.to_string(),
                PageItem::Ellipsis => String::from("…"),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn filter_values_round_into_variants()
    {
        assert_eq!(Filter::from_value("all"), Filter::All);
        assert_eq!(Filter::from_value(" ALL "), Filter::All);
        assert_eq!(
            Filter::from_value("tech"),
            Filter::Category(String::from("tech"))
        );
        assert_eq!(Filter::from_value("tech").value(), "tech");
        assert_eq!(Filter::All.value(), "all");
    }

    #[test]
    fn sort_is_newest_first_and_stable()
    {
        let mut cards = vec![
            card(0, "a", "2024-01-01"),
            card(1, "a", "2024-03-01"),
            card(2, "a", "2024-01-01"),
            card(3, "a", "not a date"),
            card(4, "a", "2024-02-01"),
            card(5, "a", "also not"),
        ];

        sort_newest_first(&mut cards);

        let order: Vec<usize> = cards.iter().map(|card| card.id.0).collect();
        assert_eq!(order, vec![1, 4, 0, 2, 3, 5]);
    }

    #[test]
    fn filtered_matches_category_case_insensitively()
    {
        let cards = vec![
            card(0, "Tech", "2024-01-01"),
            card(1, "design", "2024-01-02"),
            card(2, "tech", "2024-01-03"),
        ];

        let tech = filtered(&cards, &Filter::from_value("TECH"));
        let order: Vec<usize> = tech.iter().map(|card| card.id.0).collect();

        assert_eq!(order, vec![2, 0]);
        assert_eq!(filtered(&cards, &Filter::All).len(), 3);
    }

    #[test]
    fn page_counts_round_up()
    {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(6), 1);
        assert_eq!(total_pages(7), 2);
        assert_eq!(total_pages(14), 3);
    }

    #[test]
    fn clamping_keeps_pages_in_range()
    {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(9, 3), 3);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(4, 0), 1);
    }

    #[test]
    fn page_slices_never_exceed_page_size()
    {
        let cards: Vec<Card> = (0..14)
            .map(|id| card(id, "a", "2024-01-01"))
            .collect();

        assert_eq!(page_slice(&cards, 1).len(), 6);
        assert_eq!(page_slice(&cards, 2).len(), 6);
        assert_eq!(page_slice(&cards, 3).len(), 2);
        assert_eq!(page_slice(&cards, 3)[0].id, CardId(12));
        assert!(page_slice(&cards, 4).is_empty());
        assert!(page_slice(&[], 1).is_empty());
    }

    #[test]
    fn window_for_few_pages_lists_them_all()
    {
        assert_eq!(numbers(&page_window(1, 3)), "[1] 2 3");
        assert_eq!(numbers(&page_window(1, 1)), "[1]");
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn window_centres_on_current_page()
    {
        assert_eq!(numbers(&page_window(10, 20)), "1 … 8 9 [10] 11 12 … 20");
        assert_eq!(numbers(&page_window(4, 20)), "1 2 3 [4] 5 6 … 20");
        assert_eq!(numbers(&page_window(5, 20)), "1 … 3 4 [5] 6 7 … 20");
    }

    #[test]
    fn window_clamps_at_both_ends()
    {
        assert_eq!(numbers(&page_window(1, 20)), "[1] 2 3 4 5 … 20");
        assert_eq!(numbers(&page_window(20, 20)), "1 … 16 17 18 19 [20]");
        assert_eq!(numbers(&page_window(19, 20)), "1 … 16 17 18 [19] 20");
        assert_eq!(numbers(&page_window(3, 6)), "1 2 [3] 4 5 6");
        assert_eq!(numbers(&page_window(6, 7)), "1 … 3 4 5 [6] 7");
    }

    #[test]
    fn window_has_exactly_one_active_page()
    {
        for total in 1..=12
        {
            for current in 1..=total
            {
                let items = page_window(current, total);
                let active = items
                    .iter()
                    .filter(|item| matches!(item, PageItem::Page { active: true, .. }))
                    .count();

                assert_eq!(active, 1, "current {current} of {total}");
            }
        }
    }

    #[test]
    fn pager_disables_arrows_on_boundaries()
    {
        let single = Pager::new(1, 1);
        assert!(!single.has_prev());
        assert!(!single.has_next());
        assert!(!single.is_hidden());
        assert_eq!(single.active_page(), Some(1));

        let middle = Pager::new(2, 3);
        assert!(middle.has_prev());
        assert!(middle.has_next());

        let empty = Pager::new(1, 0);
        assert!(empty.is_hidden());
        assert!(!empty.has_prev());
        assert!(!empty.has_next());
        assert_eq!(empty.active_page(), None);
    }
}
