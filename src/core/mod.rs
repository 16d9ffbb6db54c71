//! Core card types and identities

pub mod card;
pub mod entity;

pub use card::{Card, Position, Rank, Suit};
pub use entity::{CardId, IdAllocator};
