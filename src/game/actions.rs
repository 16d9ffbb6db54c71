//! Player actions: Match and Promote
//!
//! Each action validates fully before touching the board, so a rejected
//! action leaves the state exactly as it was. An applied action hands back
//! the `UndoRecord` that reverses it.

use crate::core::{Card, CardId};
use crate::game::layout::STACK_TOP_POSITION;
use crate::game::rules::{can_match, top_is_matchable};
use crate::game::GameState;
use crate::undo::UndoRecord;
use crate::zones::Zone;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a selection did nothing
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    #[error("card {0} is not on the board")]
    UnknownCard(CardId),

    #[error("card {0} is not on the playfield")]
    NotOnPlayfield(CardId),

    #[error("card {0} is not in the stack")]
    NotInStack(CardId),

    #[error("the stack is empty")]
    EmptyStack,

    #[error("card {card} does not match the top card {top}")]
    RankMismatch { card: CardId, top: CardId },

    #[error("card {0} is already the top card")]
    SelectedTopCard(CardId),

    #[error("top card {0} can still be matched from the playfield")]
    TopStillMatchable(CardId),
}

/// Coarse classification of an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Match,
    Promote,
    Rejected,
}

/// Result of selecting a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// `card` moved from the playfield onto the stack; `discarded` is gone
    Matched { card: CardId, discarded: CardId },

    /// `card` moved from stack index `from_index` to the top
    Promoted { card: CardId, from_index: usize },

    Rejected(RejectReason),
}

impl ActionOutcome {
    pub fn applied(&self) -> bool {
        !matches!(self, ActionOutcome::Rejected(_))
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            ActionOutcome::Matched { .. } => ActionKind::Match,
            ActionOutcome::Promoted { .. } => ActionKind::Promote,
            ActionOutcome::Rejected(_) => ActionKind::Rejected,
        }
    }

    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            ActionOutcome::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl GameState {
    /// Match a playfield card against the top of the stack
    ///
    /// On success the playfield card becomes the new top and the old top is
    /// discarded outright. Discarded cards do not go to a waste pile; they
    /// only come back through undo.
    pub fn apply_match(&mut self, card_id: CardId) -> Result<UndoRecord, RejectReason> {
        let from_index = self
            .playfield
            .position(card_id)
            .ok_or(RejectReason::NotOnPlayfield(card_id))?;
        let card = &self.playfield.cards()[from_index];
        let top = self.top_of_stack().ok_or(RejectReason::EmptyStack)?;

        if !can_match(card.rank, top.rank) {
            return Err(RejectReason::RankMismatch {
                card: card_id,
                top: top.id,
            });
        }

        let record = UndoRecord::Match {
            card_id,
            rank: card.rank,
            suit: card.suit,
            from_zone: Zone::Playfield,
            from_index,
            from_position: card.position,
            target: top.id,
            discarded_rank: top.rank,
            discarded_suit: top.suit,
            discarded_position: top.position,
            discarded_face_up: top.face_up,
        };
        let discarded = top.id;

        // Validation is done; nothing below can fail
        let Some(mut moved) = self.remove_from_playfield(card_id) else {
            return Err(RejectReason::NotOnPlayfield(card_id));
        };
        self.remove_from_stack(discarded);
        moved.position = STACK_TOP_POSITION;
        self.add_to_stack(moved);

        Ok(record)
    }

    /// Move a reserve card to the top of the stack
    ///
    /// Only allowed while the current top has no match on the playfield.
    pub fn apply_promote(&mut self, card_id: CardId) -> Result<UndoRecord, RejectReason> {
        let top = self.top_of_stack().ok_or(RejectReason::EmptyStack)?;
        let from_index = self
            .stack
            .position(card_id)
            .ok_or(RejectReason::NotInStack(card_id))?;

        if top.id == card_id {
            return Err(RejectReason::SelectedTopCard(card_id));
        }
        if top_is_matchable(top, &self.playfield) {
            return Err(RejectReason::TopStillMatchable(top.id));
        }

        let record = UndoRecord::Promote {
            card_id,
            from_zone: Zone::Stack,
            from_index,
            from_position: self.stack.cards()[from_index].position,
            target: top.id,
        };

        self.stack.move_to_top(card_id);
        if let Some(card) = self.stack.find_mut(card_id) {
            card.position = STACK_TOP_POSITION;
        }

        Ok(record)
    }

    /// Reverse a previously applied action
    ///
    /// Records must be reverted in the reverse order they were produced.
    pub fn revert(&mut self, record: &UndoRecord) {
        match *record {
            UndoRecord::Promote {
                card_id,
                from_index,
                from_position,
                ..
            } => {
                if let Some(mut card) = self.remove_from_stack(card_id) {
                    card.position = from_position;
                    // Indices past the end re-anchor to the top
                    self.stack.insert_at(from_index, card);
                }
            }
            UndoRecord::Match {
                card_id,
                rank,
                suit,
                from_index,
                from_position,
                target,
                discarded_rank,
                discarded_suit,
                discarded_position,
                discarded_face_up,
                ..
            } => {
                let mut card = self
                    .remove_from_stack(card_id)
                    .unwrap_or_else(|| Card::new(card_id, rank, suit));
                card.position = from_position;

                let mut discarded =
                    Card::new(target, discarded_rank, discarded_suit).at(discarded_position);
                discarded.face_up = discarded_face_up;
                self.add_to_stack(discarded);
                self.playfield.insert_at(from_index, card);
            }
        }
    }

    /// Route a selection to Match or Promote by looking up the card's zone
    pub fn select_card(&mut self, card_id: CardId) -> Result<UndoRecord, RejectReason> {
        match self.zone_of(card_id) {
            Some(Zone::Playfield) => self.apply_match(card_id),
            Some(Zone::Stack) => self.apply_promote(card_id),
            None => Err(RejectReason::UnknownCard(card_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Position, Rank, Suit};

    fn rank(n: u8) -> Rank {
        Rank::new(n).unwrap()
    }

    /// Playfield [Q], stack [3, A, 4] with 4 on top
    fn reserve_board() -> GameState {
        let mut game = GameState::new();
        game.spawn_card(rank(12), Suit::Clubs, Zone::Playfield, Position::new(250.0, 1000.0));
        game.spawn_card(rank(3), Suit::Clubs, Zone::Stack, Position::new(200.0, 290.0));
        game.spawn_card(rank(1), Suit::Hearts, Zone::Stack, Position::new(200.0, 290.0));
        game.spawn_card(rank(4), Suit::Clubs, Zone::Stack, STACK_TOP_POSITION);
        game
    }

    #[test]
    fn test_match_rejects_rank_mismatch() {
        let mut game = reserve_board();
        let before = game.clone();

        let err = game.apply_match(CardId::new(0)).unwrap_err();
        assert_eq!(
            err,
            RejectReason::RankMismatch {
                card: CardId::new(0),
                top: CardId::new(3)
            }
        );
        assert_eq!(game.playfield.cards(), before.playfield.cards());
        assert_eq!(game.stack.cards(), before.stack.cards());
    }

    #[test]
    fn test_match_discards_old_top() {
        let mut game = GameState::new();
        let two = game.spawn_card(rank(2), Suit::Clubs, Zone::Playfield, Position::new(300.0, 800.0));
        let ace = game.spawn_card(rank(1), Suit::Hearts, Zone::Stack, STACK_TOP_POSITION);

        let record = game.apply_match(two).unwrap();
        assert_eq!(record.target(), ace);
        assert!(game.playfield.is_empty());
        assert_eq!(game.stack.ids(), vec![two]);
        assert!(game.find_by_id(ace).is_none());
        assert_eq!(game.top_of_stack().map(|c| c.position), Some(STACK_TOP_POSITION));

        game.revert(&record);
        assert_eq!(game.stack.ids(), vec![ace]);
        assert_eq!(game.playfield.ids(), vec![two]);
        assert_eq!(
            game.find_by_id(two).map(|c| c.position),
            Some(Position::new(300.0, 800.0))
        );
        assert_eq!(game.find_by_id(ace).map(|c| c.suit), Some(Suit::Hearts));
    }

    #[test]
    fn test_revert_match_keeps_discarded_face() {
        let mut game = GameState::new();
        let two = game.spawn_card(rank(2), Suit::Clubs, Zone::Playfield, Position::default());
        let ace = game.spawn_card(rank(1), Suit::Hearts, Zone::Stack, STACK_TOP_POSITION);
        if let Some(card) = game.stack.find_mut(ace) {
            card.face_up = false;
        }

        let record = game.apply_match(two).unwrap();
        game.revert(&record);
        assert_eq!(game.find_by_id(ace).map(|c| c.face_up), Some(false));
        assert_eq!(game.find_by_id(two).map(|c| c.face_up), Some(true));
    }

    #[test]
    fn test_match_with_empty_stack() {
        let mut game = GameState::new();
        let two = game.spawn_card(rank(2), Suit::Clubs, Zone::Playfield, Position::default());
        assert_eq!(game.apply_match(two), Err(RejectReason::EmptyStack));
        assert_eq!(game.playfield.len(), 1);
    }

    #[test]
    fn test_promote_and_revert() {
        let mut game = reserve_board();

        let record = game.apply_promote(CardId::new(2)).unwrap();
        assert_eq!(
            game.stack.ids(),
            vec![CardId::new(1), CardId::new(3), CardId::new(2)]
        );
        assert_eq!(record.target(), CardId::new(3));

        game.revert(&record);
        assert_eq!(
            game.stack.ids(),
            vec![CardId::new(1), CardId::new(2), CardId::new(3)]
        );
        assert_eq!(
            game.find_by_id(CardId::new(2)).map(|c| c.position),
            Some(Position::new(200.0, 290.0))
        );
    }

    #[test]
    fn test_promote_rejections() {
        let mut game = reserve_board();

        assert_eq!(
            game.apply_promote(CardId::new(3)),
            Err(RejectReason::SelectedTopCard(CardId::new(3)))
        );
        assert_eq!(
            game.apply_promote(CardId::new(0)),
            Err(RejectReason::NotInStack(CardId::new(0)))
        );

        // A 5 on the playfield makes the top (4) matchable
        game.spawn_card(rank(5), Suit::Spades, Zone::Playfield, Position::default());
        assert_eq!(
            game.apply_promote(CardId::new(2)),
            Err(RejectReason::TopStillMatchable(CardId::new(3)))
        );
    }

    #[test]
    fn test_select_routes_by_zone() {
        let mut game = reserve_board();
        assert_eq!(
            game.select_card(CardId::new(42)),
            Err(RejectReason::UnknownCard(CardId::new(42)))
        );
        assert!(matches!(
            game.select_card(CardId::new(0)),
            Err(RejectReason::RankMismatch { .. })
        ));
        assert!(game.select_card(CardId::new(1)).is_ok());
    }

    #[test]
    fn test_outcome_classification() {
        let matched = ActionOutcome::Matched {
            card: CardId::new(1),
            discarded: CardId::new(2),
        };
        assert!(matched.applied());
        assert_eq!(matched.kind(), ActionKind::Match);

        let rejected = ActionOutcome::Rejected(RejectReason::EmptyStack);
        assert!(!rejected.applied());
        assert_eq!(rejected.kind(), ActionKind::Rejected);
        assert_eq!(rejected.reject_reason(), Some(RejectReason::EmptyStack));
    }
}
