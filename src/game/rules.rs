//! Matching rule
//!
//! Two cards match when their ranks are exactly one apart. Suit never
//! matters and there is no wrap-around between King and Ace.

use crate::core::{Card, Rank};
use crate::zones::CardZone;

pub fn can_match(a: Rank, b: Rank) -> bool {
    a.value().abs_diff(b.value()) == 1
}

/// Does any card in `playfield` match `top`?
pub fn top_is_matchable(top: &Card, playfield: &CardZone) -> bool {
    playfield.iter().any(|card| can_match(card.rank, top.rank))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardId, Suit};
    use crate::zones::Zone;

    fn rank(n: u8) -> Rank {
        Rank::new(n).unwrap()
    }

    #[test]
    fn test_adjacent_ranks_match() {
        assert!(can_match(rank(1), rank(2)));
        assert!(can_match(rank(13), rank(12)));
        assert!(!can_match(rank(4), rank(12)));
        assert!(!can_match(rank(5), rank(5)));
    }

    #[test]
    fn test_no_wraparound() {
        assert!(!can_match(Rank::KING, Rank::ACE));
        assert!(!can_match(Rank::ACE, Rank::KING));
    }

    #[test]
    fn test_symmetry_over_all_ranks() {
        for a in Rank::all() {
            for b in Rank::all() {
                assert_eq!(can_match(a, b), can_match(b, a), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_top_is_matchable() {
        let top = Card::new(CardId::new(9), rank(4), Suit::Clubs);
        let mut playfield = CardZone::new(Zone::Playfield);
        playfield.add(Card::new(CardId::new(0), rank(12), Suit::Clubs));
        assert!(!top_is_matchable(&top, &playfield));

        playfield.add(Card::new(CardId::new(1), rank(3), Suit::Hearts));
        assert!(top_is_matchable(&top, &playfield));
    }
}
