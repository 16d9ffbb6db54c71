//! Game zones (Playfield and Stack)

use crate::core::{Card, CardId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two places a card can live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Face-up cards waiting to be matched (order not significant)
    Playfield,
    /// Ordered pile; the last card is the top, the rest are reserve
    Stack,
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Playfield => write!(f, "playfield"),
            Zone::Stack => write!(f, "stack"),
        }
    }
}

/// A zone containing cards
///
/// Cards are kept in insertion order for both zones. For the Stack that
/// order is the game order (index 0 = bottom, last = top); for the
/// Playfield it only keeps iteration deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardZone {
    pub zone_type: Zone,
    cards: Vec<Card>,
}

impl CardZone {
    pub fn new(zone_type: Zone) -> Self {
        CardZone {
            zone_type,
            cards: Vec::new(),
        }
    }

    /// Append a card; for the Stack this makes it the new top
    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Insert at `index`, appending instead when the index is past the end
    pub fn insert_at(&mut self, index: usize, card: Card) -> usize {
        if index <= self.cards.len() {
            self.cards.insert(index, card);
            index
        } else {
            self.cards.push(card);
            self.cards.len() - 1
        }
    }

    /// Remove every card carrying `card_id` and return the first one
    ///
    /// Absent ids are not an error.
    pub fn remove(&mut self, card_id: CardId) -> Option<Card> {
        let pos = self.position(card_id)?;
        // Use remove() (not swap_remove) so the Stack keeps its order
        let card = self.cards.remove(pos);
        self.cards.retain(|c| c.id != card_id);
        Some(card)
    }

    /// Move a card to the end of the zone, keeping everyone else's
    /// relative order. Returns the card's previous index.
    pub fn move_to_top(&mut self, card_id: CardId) -> Option<usize> {
        let pos = self.position(card_id)?;
        let card = self.cards.remove(pos);
        self.cards.push(card);
        Some(pos)
    }

    pub fn position(&self, card_id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == card_id)
    }

    pub fn find(&self, card_id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    pub fn find_mut(&mut self, card_id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == card_id)
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.cards.iter().any(|c| c.id == card_id)
    }

    /// Look at top card without removing it
    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.id).collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}
