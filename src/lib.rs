//! Card Match - two-zone card-matching solitaire engine
//!
//! Cards live on a face-up playfield or in an ordered stack whose last card
//! is the active top. Playfield cards one rank away from the top replace
//! it; reserve cards can be promoted when the top has no match. Every
//! action can be undone, in reverse order, all the way back to the deal.

pub mod core;
pub mod error;
pub mod game;
pub mod undo;
pub mod zones;

pub use error::{CardMatchError, Result};
