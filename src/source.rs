//! Card sources.
//!
//! The controller never caches cards; it asks its [`CardSource`] for a fresh
//! snapshot at the start of every recomputation and pushes visibility and
//! display-order effects back into it.
use std::collections::{HashMap, HashSet};

use crate::card::{Card, CardId};

/// Collection of cards the listing is built from.
pub trait CardSource
{
    /// Returns every card in structural order.
    fn cards(&self) -> Vec<Card>;

    /// Moves the cards named in `order` to the front of the structural order,
    /// in that sequence. Unknown ids are ignored.
    fn rearrange(&mut self, order: &[CardId]);

    /// Shows or hides a card.
    fn set_visible(&mut self, id: CardId, visible: bool);

    /// Sets the position at which a visible card is displayed.
    fn set_order(&mut self, id: CardId, position: usize);
}

/// In-memory card source.
///
/// Keeps the structural order of the cards and, separately, the
/// visibility flag and display position the controller last assigned.
#[derive(Debug, Clone, Default)]
pub struct CardDeck
{
    /// Cards in structural order
    cards: Vec<Card>,
    /// Cards currently shown
    visible: HashSet<CardId>,
    /// Display position of each card that was ever ordered
    positions: HashMap<CardId, usize>,
}

impl CardDeck
{
    /// Creates a deck from cards in their loaded order.
    ///
    /// Every card starts visible, as in a freshly rendered page.
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self
    {
        let visible = cards.iter().map(|card| card.id).collect();

        Self {
            cards,
            visible,
            positions: HashMap::new(),
        }
    }

    /// Whether the card is currently shown.
    #[must_use]
    pub fn is_visible(&self, id: CardId) -> bool
    {
        self.visible.contains(&id)
    }

    /// Visible cards, sorted by display position.
    ///
    /// Cards without an assigned position follow the positioned ones in
    /// structural order.
    #[must_use]
    pub fn displayed(&self) -> Vec<&Card>
    {
        let mut shown: Vec<&Card> = self
            .cards
            .iter()
            .filter(|card| self.visible.contains(&card.id))
            .collect();

        shown.sort_by_key(|card| {
            self.positions
                .get(&card.id)
                .copied()
                .unwrap_or(usize::MAX)
        });

        shown
    }

    /// Appends a card. Used by tests standing in for a page that grows
    /// between recomputations.
    pub fn push(&mut self, card: Card)
    {
        self.visible.insert(card.id);
        self.cards.push(card);
    }

    /// Removes a card, returning it if it was present.
    pub fn remove(&mut self, id: CardId) -> Option<Card>
    {
        let index = self
            .cards
            .iter()
            .position(|card| card.id == id)?;

        self.visible.remove(&id);
        self.positions.remove(&id);

        Some(self.cards.remove(index))
    }
}

impl CardSource for CardDeck
{
    fn cards(&self) -> Vec<Card>
    {
        self.cards.clone()
    }

    fn rearrange(&mut self, order: &[CardId])
    {
        let mut front = Vec::with_capacity(self.cards.len());

        for id in order
        {
            if let Some(index) = self
                .cards
                .iter()
                .position(|card| card.id == *id)
            {
                front.push(self.cards.remove(index));
            }
        }

        front.append(&mut self.cards);
        self.cards = front;
    }

    fn set_visible(&mut self, id: CardId, visible: bool)
    {
        if visible
        {
            self.visible.insert(id);
        }
        else
        {
            self.visible.remove(&id);
        }
    }

    fn set_order(&mut self, id: CardId, position: usize)
    {
        self.positions.insert(id, position);
    }
}
