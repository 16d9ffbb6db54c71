//! Card types and definitions

use crate::core::CardId;
use crate::{CardMatchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Card rank, 1 (Ace) through 13 (King)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(pub(crate) u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const JACK: Rank = Rank(11);
    pub const QUEEN: Rank = Rank(12);
    pub const KING: Rank = Rank(13);

    pub fn new(value: u8) -> Result<Self> {
        if (1..=13).contains(&value) {
            Ok(Rank(value))
        } else {
            Err(CardMatchError::InvalidRank(value))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// All thirteen ranks, Ace first
    pub fn all() -> impl Iterator<Item = Rank> {
        (1..=13).map(Rank)
    }
}

impl TryFrom<u8> for Rank {
    type Error = CardMatchError;

    fn try_from(value: u8) -> Result<Self> {
        Rank::new(value)
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1 => write!(f, "A"),
            11 => write!(f, "J"),
            12 => write!(f, "Q"),
            13 => write!(f, "K"),
            n => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    #[serde(alias = "c")]
    Clubs,
    #[serde(alias = "d")]
    Diamonds,
    #[serde(alias = "h")]
    Hearts,
    #[serde(alias = "s")]
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn symbol(&self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }
}

impl FromStr for Suit {
    type Err = CardMatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "clubs" | "club" | "c" => Ok(Suit::Clubs),
            "diamonds" | "diamond" | "d" => Ok(Suit::Diamonds),
            "hearts" | "heart" | "h" => Ok(Suit::Hearts),
            "spades" | "spade" | "s" => Ok(Suit::Spades),
            _ => Err(CardMatchError::InvalidSuit(s.to_string())),
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Where the presentation layer last placed a card
///
/// The engine never interprets this; it only carries it so undo can put a
/// card back exactly where it was.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "(f32, f32)", into = "(f32, f32)")]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Position { x, y }
    }
}

impl From<(f32, f32)> for Position {
    fn from((x, y): (f32, f32)) -> Self {
        Position { x, y }
    }
}

impl From<Position> for (f32, f32) {
    fn from(pos: Position) -> Self {
        (pos.x, pos.y)
    }
}

/// A single card during gameplay
///
/// `id`, `rank` and `suit` are fixed for the card's lifetime; `face_up` and
/// `position` may change as the card moves between zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub rank: Rank,
    pub suit: Suit,
    /// Always true under the current rules
    pub face_up: bool,
    pub position: Position,
}

impl Card {
    pub fn new(id: CardId, rank: Rank, suit: Suit) -> Self {
        Card {
            id,
            rank,
            suit,
            face_up: true,
            position: Position::default(),
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
