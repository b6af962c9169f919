//! Presentation effects.
//!
//! Side-effect sinks the controller calls into, plus the scroll tracking
//! that drives the header and the back-to-top hint. None of this feeds back
//! into the view state.
use crate::card::CardId;

/// Scroll offset past which the back-to-top control appears.
pub const BACK_TO_TOP_THRESHOLD: usize = 300;

/// Visual side effects requested by the controller.
///
/// Every method defaults to doing nothing, so a presenter only implements
/// what it can show.
pub trait Effects
{
    /// Brings the card listing into view.
    fn scroll_to_listing(&mut self) {}

    /// Plays the entrance animation for freshly rendered cards.
    fn animate_entrance(&mut self, _cards: &[CardId]) {}
}

/// Presenter that shows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEffects;

impl Effects for NoEffects {}

/// Records every requested effect. Useful for asserting on the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectLog
{
    /// Number of scroll-to-listing requests
    pub scrolls: usize,
    /// Card batches passed to the entrance animation
    pub entrances: Vec<Vec<CardId>>,
}

impl Effects for EffectLog
{
    fn scroll_to_listing(&mut self)
    {
        self.scrolls += 1;
    }

    fn animate_entrance(&mut self, cards: &[CardId])
    {
        self.entrances.push(cards.to_vec());
    }
}

/// Header appearance derived from the scroll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderState
{
    /// At the very top: shown with its normal shadow
    #[default]
    Resting,
    /// Scrolling down: slid out of view
    Hidden,
    /// Scrolling up: shown with a raised shadow
    Raised,
}

impl HeaderState
{
    /// Whether the header occupies screen space.
    #[must_use]
    pub const fn is_shown(self) -> bool
    {
        !matches!(self, Self::Hidden)
    }
}

/// Tracks scroll offsets to hide the header on the way down and to decide
/// when to offer a jump back to the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTracker
{
    /// Offset seen by the previous update
    last_offset: usize,
    /// Header state after the previous update
    header: HeaderState,
    /// Offset past which back-to-top is offered
    threshold: usize,
}

impl Default for ScrollTracker
{
    fn default() -> Self
    {
        Self::with_threshold(BACK_TO_TOP_THRESHOLD)
    }
}

impl ScrollTracker
{
    /// Creates a tracker with a custom back-to-top threshold.
    #[must_use]
    pub const fn with_threshold(threshold: usize) -> Self
    {
        Self {
            last_offset: 0,
            header: HeaderState::Resting,
            threshold,
        }
    }

    /// Records a new scroll offset and returns the resulting header state.
    pub fn update(&mut self, offset: usize) -> HeaderState
    {
        self.header = if offset == 0
        {
            HeaderState::Resting
        }
        else if offset > self.last_offset
        {
            HeaderState::Hidden
        }
        else if offset < self.last_offset
        {
            HeaderState::Raised
        }
        else
        {
            self.header
        };

        self.last_offset = offset;
        self.header
    }

    /// Current header state.
    #[must_use]
    pub const fn header(&self) -> HeaderState
    {
        self.header
    }

    /// Whether the back-to-top control should be shown.
    #[must_use]
    pub const fn back_to_top_visible(&self) -> bool
    {
        self.last_offset > self.threshold
    }

}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn header_hides_going_down_and_returns_going_up()
    {
        let mut tracker = ScrollTracker::default();

        assert_eq!(tracker.update(40), HeaderState::Hidden);
        assert_eq!(tracker.update(80), HeaderState::Hidden);
        assert_eq!(tracker.update(60), HeaderState::Raised);
        assert_eq!(tracker.update(60), HeaderState::Raised);
        assert_eq!(tracker.update(0), HeaderState::Resting);
        assert!(tracker.header().is_shown());
    }

    #[test]
    fn back_to_top_appears_past_threshold()
    {
        let mut tracker = ScrollTracker::default();

        tracker.update(300);
        assert!(!tracker.back_to_top_visible());

        tracker.update(301);
        assert!(tracker.back_to_top_visible());

        tracker.update(10);
        assert!(!tracker.back_to_top_visible());
    }

    #[test]
    fn custom_threshold_is_honoured()
    {
        let mut tracker = ScrollTracker::with_threshold(3);

        tracker.update(4);
        assert!(tracker.back_to_top_visible());
    }

    #[test]
    fn effect_log_records_requests()
    {
        let mut log = EffectLog::default();

        log.scroll_to_listing();
        log.animate_entrance(&[CardId(1), CardId(2)]);

        assert_eq!(log.scrolls, 1);
        assert_eq!(log.entrances, vec![vec![CardId(1), CardId(2)]]);
    }
}
