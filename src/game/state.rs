//! Main game state structure

use crate::core::{Card, CardId, IdAllocator, Position, Rank, Suit};
use crate::zones::{CardZone, Zone};
use crate::{CardMatchError, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Complete board state
///
/// Owns every live card, split between the Playfield and the Stack, and the
/// allocator that issues card identities. Mutation is single-threaded and
/// synchronous; rules live in `game::actions`, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub playfield: CardZone,

    /// Ordered; last element is the top card
    pub stack: CardZone,

    ids: IdAllocator,
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            playfield: CardZone::new(Zone::Playfield),
            stack: CardZone::new(Zone::Stack),
            ids: IdAllocator::new(),
        }
    }

    /// Get next card ID (strictly increasing from 0, never reused)
    pub fn next_id(&mut self) -> CardId {
        self.ids.next_id()
    }

    pub fn add_to_playfield(&mut self, card: Card) {
        self.playfield.add(card);
    }

    /// Append to the Stack; the card becomes the new top
    pub fn add_to_stack(&mut self, card: Card) {
        self.stack.add(card);
    }

    /// Allocate a fresh id, build the card and place it in `zone`
    pub fn spawn_card(&mut self, rank: Rank, suit: Suit, zone: Zone, position: Position) -> CardId {
        let id = self.next_id();
        let card = Card::new(id, rank, suit).at(position);
        match zone {
            Zone::Playfield => self.add_to_playfield(card),
            Zone::Stack => self.add_to_stack(card),
        }
        id
    }

    pub fn remove_from_playfield(&mut self, card_id: CardId) -> Option<Card> {
        self.playfield.remove(card_id)
    }

    pub fn remove_from_stack(&mut self, card_id: CardId) -> Option<Card> {
        self.stack.remove(card_id)
    }

    /// Look a card up in either zone
    pub fn find_by_id(&self, card_id: CardId) -> Option<&Card> {
        self.playfield
            .find(card_id)
            .or_else(|| self.stack.find(card_id))
    }

    /// Which zone currently holds `card_id`
    pub fn zone_of(&self, card_id: CardId) -> Option<Zone> {
        if self.playfield.contains(card_id) {
            Some(Zone::Playfield)
        } else if self.stack.contains(card_id) {
            Some(Zone::Stack)
        } else {
            None
        }
    }

    pub fn top_of_stack(&self) -> Option<&Card> {
        self.stack.peek_top()
    }

    pub fn get_zone(&self, zone: Zone) -> &CardZone {
        match zone {
            Zone::Playfield => &self.playfield,
            Zone::Stack => &self.stack,
        }
    }

    pub fn get_zone_mut(&mut self, zone: Zone) -> &mut CardZone {
        match zone {
            Zone::Playfield => &mut self.playfield,
            Zone::Stack => &mut self.stack,
        }
    }

    /// Empty both zones and restart identities at 0
    ///
    /// Only meant for session (re)start.
    pub fn clear(&mut self) {
        self.playfield.clear();
        self.stack.clear();
        self.ids.reset();
    }

    /// Number of live cards across both zones
    pub fn card_count(&self) -> usize {
        self.playfield.len() + self.stack.len()
    }

    /// Verify identity uniqueness and zone exclusivity
    pub fn check_invariants(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for card in self.playfield.iter().chain(self.stack.iter()) {
            if !seen.insert(card.id) {
                return Err(CardMatchError::InvariantViolation(format!(
                    "card {} appears more than once across zones",
                    card.id
                )));
            }
            if !self.ids.has_issued(card.id) {
                return Err(CardMatchError::InvariantViolation(format!(
                    "card {} was never issued by the allocator (next id {})",
                    card.id,
                    self.ids.peek()
                )));
            }
        }
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
