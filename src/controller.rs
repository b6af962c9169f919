//! View controller.
//!
//! Owns the [`ViewState`] and is the only path through which card
//! visibility and display order change. Every operation ends in one of two
//! recomputations: the filtered, paged one, or the search one while a term
//! is set. Both start from a fresh read of the card source, and
//! [`ViewController::recompute`] picks whichever the state calls for.
use log::{debug, info};

use crate::card::{Card, CardId};
use crate::effects::Effects;
use crate::source::CardSource;
use crate::view::{self, Filter, Pager, ViewState};

/// How the listing is currently produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingMode
{
    /// Filtered and paged, with the pager state
    Paged(Pager),
    /// Every match of a search term, unpaged
    Search
    {
        /// The case-folded term
        term: String,
    },
}

/// What the listing area shows after a recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing
{
    /// Displayed cards in display order
    pub cards: Vec<Card>,
    /// Paged or search mode
    pub mode: ListingMode,
    /// Term of the "no results" placeholder, when one is shown
    pub no_results: Option<String>,
}

impl Listing
{
    /// The pager, unless search mode hides it.
    #[must_use]
    pub const fn pager(&self) -> Option<&Pager>
    {
        match &self.mode
        {
            ListingMode::Paged(pager) => Some(pager),
            ListingMode::Search { .. } => None,
        }
    }

    /// Ids of the displayed cards in order.
    #[must_use]
    pub fn ids(&self) -> Vec<CardId>
    {
        self.cards.iter().map(|card| card.id).collect()
    }
}

/// The row of filter buttons and which one is highlighted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBar
{
    /// Button values in display order
    values: Vec<String>,
    /// Highlighted button
    active: Option<usize>,
}

impl FilterBar
{
    /// Creates a bar from button values, highlighting the `all` button if
    /// there is one.
    #[must_use]
    pub fn new(values: Vec<String>) -> Self
    {
        let active = values
            .iter()
            .position(|value| Filter::from_value(value) == Filter::All);

        Self { values, active }
    }

    /// Button values in display order.
    #[must_use]
    pub fn values(&self) -> &[String]
    {
        &self.values
    }

    /// Index of the highlighted button.
    #[must_use]
    pub const fn active(&self) -> Option<usize>
    {
        self.active
    }

    /// Highlights the button whose value matches `filter`, or none.
    fn highlight(&mut self, filter: &Filter)
    {
        let wanted = filter.value().to_lowercase();

        self.active = self.values.iter().position(|value| {
            Filter::from_value(value)
                .value()
                .to_lowercase() ==
                wanted
        });
    }
}

/// Controller over a card source.
///
/// Construction performs the initial load: the source is sorted into
/// newest-first structural order and the first page is computed, so no
/// operation can observe an unsorted collection.
pub struct ViewController<S, E>
{
    /// Where the cards come from and where effects go
    source: S,
    /// Scroll and animation sink
    effects: E,
    /// Filter, page and search term
    state: ViewState,
    /// Filter button highlight
    filters: FilterBar,
    /// Result of the latest recomputation
    listing: Listing,
}

impl<S: CardSource, E: Effects> ViewController<S, E>
{
    /// Creates a controller and performs the initial load.
    ///
    /// # Arguments
    ///
    /// * `source` - The card collection
    /// * `filters` - The filter buttons offered by the page
    /// * `effects` - The presentation sink
    pub fn new(source: S, filters: FilterBar, effects: E) -> Self
    {
        let mut controller = Self {
            source,
            effects,
            state: ViewState::default(),
            filters,
            listing: Listing {
                cards: Vec::new(),
                mode: ListingMode::Paged(Pager::new(1, 0)),
                no_results: None,
            },
        };

        controller.sort_source();
        controller.update_pagination();

        controller
    }

    /// Current view state.
    #[must_use]
    pub const fn state(&self) -> &ViewState
    {
        &self.state
    }

    /// Result of the latest recomputation.
    #[must_use]
    pub const fn listing(&self) -> &Listing
    {
        &self.listing
    }

    /// Filter buttons and their highlight.
    #[must_use]
    pub const fn filters(&self) -> &FilterBar
    {
        &self.filters
    }

    /// The card source.
    #[must_use]
    pub const fn source(&self) -> &S
    {
        &self.source
    }

    /// Mutable access to the card source, for collaborators that add or
    /// remove cards between recomputations.
    pub const fn source_mut(&mut self) -> &mut S
    {
        &mut self.source
    }

    /// The presentation sink.
    #[must_use]
    pub const fn effects(&self) -> &E
    {
        &self.effects
    }

    /// Mutable access to the presentation sink.
    pub const fn effects_mut(&mut self) -> &mut E
    {
        &mut self.effects
    }

    /// Searches titles, excerpts and categories.
    ///
    /// An empty (or blank) term leaves search mode: the filter goes back to
    /// `all`, the page to 1 and pagination is recomputed. Otherwise every
    /// match is shown newest first with pagination hidden, and a single
    /// "no results" placeholder is shown when nothing matches.
    pub fn search(&mut self, raw_term: &str)
    {
        let term = view::normalize_term(raw_term);

        if term.is_empty()
        {
            debug!("Search cleared");
            self.leave_search();
            self.state.active_filter = Filter::All;
            self.filters.highlight(&Filter::All);
            self.state.current_page = 1;
            self.update_pagination();
            return;
        }

        self.state.search_term = term;
        self.state.current_page = 1;
        self.update_search();
    }

    /// Applies a category filter and returns to page 1.
    ///
    /// Leaves search mode if it was active. Applying the same filter twice
    /// yields the same listing.
    pub fn set_filter(&mut self, filter: Filter)
    {
        debug!("Filter set to {}", filter.value());

        self.leave_search();
        self.state.active_filter = filter;
        self.state.current_page = 1;
        self.update_pagination();
    }

    /// Activates the filter button at `index`, highlighting it.
    ///
    /// Out-of-range indices are ignored.
    pub fn press_filter(&mut self, index: usize)
    {
        let Some(value) = self.filters.values.get(index).cloned()
        else
        {
            return;
        };

        self.filters.active = Some(index);
        self.set_filter(Filter::from_value(&value));
    }

    /// Selects a category card: filters to it, highlights the matching
    /// filter button (if any) and scrolls the listing into view.
    pub fn select_category(&mut self, category: &str)
    {
        let filter = Filter::from_value(category);

        self.filters.highlight(&filter);
        self.set_filter(filter);
        self.effects.scroll_to_listing();
    }

    /// Jumps to page `number`, clamped into the available pages.
    ///
    /// Ignored while a search is active, since pagination is hidden.
    pub fn go_to_page(&mut self, number: usize)
    {
        if self.state.is_searching()
        {
            return;
        }

        self.state.current_page = number;
        self.update_pagination();
        self.effects.scroll_to_listing();
    }

    /// Moves to the next page; a no-op on the last page.
    pub fn next_page(&mut self)
    {
        if self.state.is_searching()
        {
            return;
        }

        let visible = view::filtered(&self.source.cards(), &self.state.active_filter);
        let total = view::total_pages(visible.len());

        if self.state.current_page < total
        {
            self.state.current_page += 1;
            self.update_pagination();
            self.effects.scroll_to_listing();
        }
    }

    /// Moves to the previous page; a no-op on page 1.
    pub fn prev_page(&mut self)
    {
        if self.state.is_searching()
        {
            return;
        }

        if self.state.current_page > 1
        {
            self.state.current_page -= 1;
            self.update_pagination();
            self.effects.scroll_to_listing();
        }
    }

    /// Re-reads the source and rebuilds the listing for the current mode.
    ///
    /// For collaborators that add or remove cards between interactions. A
    /// set search term keeps pagination hidden.
    pub fn recompute(&mut self)
    {
        if self.state.is_searching()
        {
            self.update_search();
        }
        else
        {
            self.update_pagination();
        }
    }

    /// Recomputes the filtered, paged listing from a fresh read of the
    /// source and applies visibility and display order.
    fn update_pagination(&mut self)
    {
        let cards = self.source.cards();
        let visible = view::filtered(&cards, &self.state.active_filter);
        let total = view::total_pages(visible.len());

        self.state.current_page = view::clamp_page(self.state.current_page, total);

        let shown = view::page_slice(&visible, self.state.current_page).to_vec();

        self.apply(&cards, &shown);

        let ids: Vec<CardId> = shown.iter().map(|card| card.id).collect();
        self.effects.animate_entrance(&ids);

        debug!(
            "Page {}/{} showing {} of {} cards",
            self.state.current_page,
            total,
            shown.len(),
            visible.len()
        );

        self.listing = Listing {
            cards: shown,
            mode: ListingMode::Paged(Pager::new(self.state.current_page, total)),
            no_results: None,
        };
    }

    /// Recomputes search mode for the stored term.
    fn update_search(&mut self)
    {
        let cards = self.source.cards();
        let term = self.state.search_term.clone();
        let matches = view::matching(&cards, &term);

        self.apply(&cards, &matches);

        let no_results = if matches.is_empty()
        {
            if self.listing.no_results.is_none()
            {
                info!("No results found for \"{term}\"");
            }
            Some(term.clone())
        }
        else
        {
            None
        };

        debug!("Search \"{term}\" matched {} cards", matches.len());

        self.listing = Listing {
            cards: matches,
            mode: ListingMode::Search { term },
            no_results,
        };
    }

    /// Exits search mode, dropping the term and any placeholder.
    fn leave_search(&mut self)
    {
        self.state.search_term.clear();
        self.listing.no_results = None;
    }

    /// Shows exactly `shown`, in that order, and hides every other card.
    fn apply(&mut self, cards: &[Card], shown: &[Card])
    {
        for card in cards
        {
            let is_shown = shown.iter().any(|other| other.id == card.id);
            self.source.set_visible(card.id, is_shown);
        }

        for (position, card) in shown.iter().enumerate()
        {
            self.source.set_order(card.id, position);
        }
    }

    /// Sorts the source's structural order newest first.
    fn sort_source(&mut self)
    {
        let mut cards = self.source.cards();
        view::sort_newest_first(&mut cards);

        let order: Vec<CardId> = cards.iter().map(|card| card.id).collect();
        self.source.rearrange(&order);

        info!("Loaded {} cards", order.len());
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::effects::{EffectLog, NoEffects};
    use crate::source::CardDeck;

    fn deck(dates: &[&str]) -> CardDeck
    {
        CardDeck::new(
            dates
                .iter()
                .enumerate()
                .map(|(id, date)| Card::new(CardId(id), format!("post {id}"), "", "misc", date))
                .collect(),
        )
    }

    fn bar() -> FilterBar
    {
        FilterBar::new(vec![
            String::from("all"),
            String::from("misc"),
            String::from("Tech"),
        ])
    }

    #[test]
    fn construction_sorts_the_source_newest_first()
    {
        let controller = ViewController::new(
            deck(&["2024-01-01", "2024-03-01", "2024-02-01"]),
            bar(),
            NoEffects,
        );

        let order: Vec<usize> = controller
            .source()
            .cards()
            .iter()
            .map(|card| card.id.0)
            .collect();

        assert_eq!(order, vec![1, 2, 0]);
        assert_eq!(controller.state(), &ViewState::default());
    }

    #[test]
    fn filter_bar_starts_on_all()
    {
        assert_eq!(bar().active(), Some(0));
        assert_eq!(FilterBar::new(vec![String::from("tech")]).active(), None);
    }

    #[test]
    fn pressing_a_filter_button_highlights_it()
    {
        let mut controller = ViewController::new(deck(&["2024-01-01"]), bar(), NoEffects);

        controller.press_filter(1);
        assert_eq!(controller.filters().active(), Some(1));
        assert_eq!(
            controller.state().active_filter,
            Filter::Category(String::from("misc"))
        );

        controller.press_filter(7);
        assert_eq!(controller.filters().active(), Some(1));
    }

    #[test]
    fn selecting_a_category_highlights_matching_button_and_scrolls()
    {
        let mut controller = ViewController::new(deck(&["2024-01-01"]), bar(), EffectLog::default());

        controller.select_category("tech");
        assert_eq!(controller.filters().active(), Some(2));
        assert_eq!(controller.effects().scrolls, 1);

        controller.select_category("poetry");
        assert_eq!(controller.filters().active(), None);
        assert!(controller.listing().cards.is_empty());
    }

    #[test]
    fn page_navigation_animates_and_scrolls()
    {
        let dates = vec!["2024-01-01"; 8];
        let mut controller = ViewController::new(deck(&dates), bar(), EffectLog::default());

        controller.next_page();

        let effects = controller.effects();
        assert_eq!(effects.scrolls, 1);
        assert_eq!(effects.entrances.len(), 2);
        assert_eq!(effects.entrances[1].len(), 2);
    }

    #[test]
    fn boundary_navigation_requests_nothing()
    {
        let mut controller = ViewController::new(deck(&["2024-01-01"]), bar(), EffectLog::default());

        controller.prev_page();
        controller.next_page();

        assert_eq!(controller.effects().scrolls, 0);
        assert_eq!(controller.effects().entrances.len(), 1);
    }

    #[test]
    fn go_to_page_is_ignored_while_searching()
    {
        let dates = vec!["2024-01-01"; 8];
        let mut controller = ViewController::new(deck(&dates), bar(), NoEffects);

        controller.search("post");
        controller.go_to_page(2);

        assert_eq!(controller.state().current_page, 1);
        assert_eq!(controller.listing().cards.len(), 8);
    }

    #[test]
    fn filtering_leaves_search_mode()
    {
        let mut controller = ViewController::new(deck(&["2024-01-01"]), bar(), NoEffects);

        controller.search("nothing like this");
        assert!(controller.listing().no_results.is_some());

        controller.press_filter(1);
        assert!(!controller.state().is_searching());
        assert!(controller.listing().no_results.is_none());
        assert!(controller.listing().pager().is_some());
    }

    #[test]
    fn clearing_search_highlights_all()
    {
        let mut controller = ViewController::new(deck(&["2024-01-01"]), bar(), NoEffects);

        controller.press_filter(2);
        controller.search("post");
        controller.search("   ");

        assert_eq!(controller.filters().active(), Some(0));
        assert_eq!(controller.state().active_filter, Filter::All);
    }
}
