//! Initial layouts
//!
//! A layout is an ordered list of `(rank, suit, zone, position)` entries.
//! Cards receive identities in list order, and stack entries are stacked in
//! list order, so the last stack entry starts as the top card.

use crate::core::{Position, Rank, Suit};
use crate::zones::Zone;
use crate::{CardMatchError, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where a card that becomes the top of the stack is placed
pub const STACK_TOP_POSITION: Position = Position::new(800.0, 290.0);

/// Where reserve cards sit in the layouts built here
pub const RESERVE_POSITION: Position = Position::new(200.0, 290.0);

fn default_face_up() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub rank: Rank,
    pub suit: Suit,
    pub zone: Zone,
    #[serde(default)]
    pub position: Position,
    #[serde(default = "default_face_up")]
    pub face_up: bool,
}

impl LayoutEntry {
    pub fn new(rank: Rank, suit: Suit, zone: Zone, position: Position) -> Self {
        LayoutEntry {
            rank,
            suit,
            zone,
            position,
            face_up: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InitialLayout {
    entries: Vec<LayoutEntry>,
}

impl InitialLayout {
    pub fn new(entries: Vec<LayoutEntry>) -> Self {
        InitialLayout { entries }
    }

    pub fn push(&mut self, entry: LayoutEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(CardMatchError::InvalidLayout(
                "layout has no cards".to_string(),
            ));
        }
        Ok(())
    }

    /// The fixed demo deal: six playfield cards and a three-card stack
    pub fn fixture() -> Self {
        let entry = |rank: u8, suit, zone, x, y| LayoutEntry {
            rank: Rank(rank),
            suit,
            zone,
            position: Position::new(x, y),
            face_up: true,
        };
        InitialLayout::new(vec![
            entry(12, Suit::Clubs, Zone::Playfield, 250.0, 1000.0),
            entry(2, Suit::Clubs, Zone::Playfield, 300.0, 800.0),
            entry(2, Suit::Diamonds, Zone::Playfield, 350.0, 600.0),
            entry(2, Suit::Clubs, Zone::Playfield, 850.0, 1000.0),
            entry(2, Suit::Clubs, Zone::Playfield, 800.0, 800.0),
            entry(1, Suit::Spades, Zone::Playfield, 750.0, 600.0),
            entry(3, Suit::Clubs, Zone::Stack, 200.0, 290.0),
            entry(1, Suit::Hearts, Zone::Stack, 200.0, 290.0),
            entry(4, Suit::Clubs, Zone::Stack, 800.0, 290.0),
        ])
    }

    /// Deal from a seeded shuffle of a standard 52-card deck
    ///
    /// The same seed always produces the same layout.
    pub fn deal(seed: u64, playfield_count: usize, stack_count: usize) -> Result<Self> {
        if playfield_count + stack_count > 52 {
            return Err(CardMatchError::InvalidLayout(format!(
                "cannot deal {} cards from a 52-card deck",
                playfield_count + stack_count
            )));
        }

        let mut deck: Vec<(Rank, Suit)> = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::all().map(move |rank| (rank, suit)))
            .collect();
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        deck.shuffle(&mut rng);

        let mut layout = InitialLayout::default();
        let mut cards = deck.into_iter();
        for (i, (rank, suit)) in cards.by_ref().take(playfield_count).enumerate() {
            let column = (i % 6) as f32;
            let row = (i / 6) as f32;
            let position = Position::new(250.0 + 120.0 * column, 1000.0 - 200.0 * row);
            layout.push(LayoutEntry::new(rank, suit, Zone::Playfield, position));
        }
        for (i, (rank, suit)) in cards.take(stack_count).enumerate() {
            let position = if i + 1 == stack_count {
                STACK_TOP_POSITION
            } else {
                RESERVE_POSITION
            };
            layout.push(LayoutEntry::new(rank, suit, Zone::Stack, position));
        }
        layout.validate()?;
        Ok(layout)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let layout: InitialLayout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Load a layout from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shape() {
        let layout = InitialLayout::fixture();
        assert_eq!(layout.len(), 9);
        let stack: Vec<_> = layout
            .entries()
            .iter()
            .filter(|e| e.zone == Zone::Stack)
            .collect();
        assert_eq!(stack.len(), 3);
        assert_eq!(stack[2].rank.value(), 4);
    }

    #[test]
    fn test_deal_is_deterministic() {
        let a = InitialLayout::deal(7, 6, 3).unwrap();
        let b = InitialLayout::deal(7, 6, 3).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 9);
        assert_eq!(a.entries()[8].position, STACK_TOP_POSITION);

        let c = InitialLayout::deal(8, 6, 3).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_deal_rejects_oversized() {
        assert!(InitialLayout::deal(1, 40, 13).is_err());
        assert!(InitialLayout::deal(1, 0, 0).is_err());
    }

    #[test]
    fn test_json_parsing() {
        let json = r#"[
            { "rank": 12, "suit": "clubs", "zone": "playfield", "position": [250.0, 1000.0] },
            { "rank": 4, "suit": "h", "zone": "stack" }
        ]"#;
        let layout = InitialLayout::from_json_str(json).unwrap();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.entries()[1].suit, Suit::Hearts);
        assert_eq!(layout.entries()[1].position, Position::default());
        assert!(layout.entries()[1].face_up);
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            InitialLayout::from_json_str("[]"),
            Err(CardMatchError::InvalidLayout(_))
        ));
        assert!(matches!(
            InitialLayout::from_json_str(r#"[{ "rank": 0, "suit": "clubs", "zone": "stack" }]"#),
            Err(CardMatchError::SerializationError(_))
        ));
    }
}
