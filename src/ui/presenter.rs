//! Terminal presenter for the controller's effects.
use std::collections::HashMap;

use crate::card::CardId;
use crate::effects::Effects;

/// Ticks during which a freshly shown card is drawn faded.
const FADE_TICKS: u8 = 2;

/// Turns controller effects into terminal presentation state.
#[derive(Debug, Default)]
pub struct Presenter
{
    /// Set when the listing should be scrolled back into view
    scroll_requested: bool,
    /// Cards still fading in, with their remaining ticks
    entering: HashMap<CardId, u8>,
}

impl Presenter
{
    /// Returns and resets the pending scroll request.
    pub const fn take_scroll_request(&mut self) -> bool
    {
        let requested = self.scroll_requested;
        self.scroll_requested = false;
        requested
    }

    /// Whether `id` is still fading in.
    #[must_use]
    pub fn is_entering(&self, id: CardId) -> bool
    {
        self.entering.contains_key(&id)
    }

    /// Advances the fade-in animation by one tick.
    pub fn tick(&mut self)
    {
        self.entering.retain(|_, remaining| {
            *remaining = remaining.saturating_sub(1);
            *remaining > 0
        });
    }
}

impl Effects for Presenter
{
    fn scroll_to_listing(&mut self)
    {
        self.scroll_requested = true;
    }

    fn animate_entrance(&mut self, cards: &[CardId])
    {
        self.entering = cards
            .iter()
            .map(|id| (*id, FADE_TICKS))
            .collect();
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn scroll_request_is_taken_once()
    {
        let mut presenter = Presenter::default();

        presenter.scroll_to_listing();
        assert!(presenter.take_scroll_request());
        assert!(!presenter.take_scroll_request());
    }

    #[test]
    fn entering_cards_fade_out_after_ticks()
    {
        let mut presenter = Presenter::default();

        presenter.animate_entrance(&[CardId(4)]);
        assert!(presenter.is_entering(CardId(4)));

        presenter.tick();
        assert!(presenter.is_entering(CardId(4)));

        presenter.tick();
        assert!(!presenter.is_entering(CardId(4)));
    }
}
