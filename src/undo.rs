//! Undo history
//!
//! Every applied action pushes exactly one inverse record; every undo pops
//! exactly one. N applied actions can therefore be undone N times, in
//! strict reverse order.

use crate::core::{CardId, Position, Rank, Suit};
use crate::zones::Zone;
use serde::{Deserialize, Serialize};

/// Which action a record reverses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveType {
    Match,
    Promote,
}

/// Everything needed to reverse one applied action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UndoRecord {
    /// A playfield card was matched onto the top, discarding the old top
    Match {
        card_id: CardId,
        rank: Rank,
        suit: Suit,
        from_zone: Zone,
        /// Index within the playfield before the move
        from_index: usize,
        from_position: Position,
        /// The discarded old top. It no longer exists anywhere, so its
        /// rank, suit and face are kept here to rebuild it.
        target: CardId,
        discarded_rank: Rank,
        discarded_suit: Suit,
        discarded_position: Position,
        discarded_face_up: bool,
    },

    /// A reserve card was moved to the top of the stack
    Promote {
        card_id: CardId,
        from_zone: Zone,
        /// Index within the stack before the move (0 = bottom)
        from_index: usize,
        from_position: Position,
        /// The top before promotion (informational)
        target: CardId,
    },
}

impl UndoRecord {
    pub fn move_type(&self) -> MoveType {
        match self {
            UndoRecord::Match { .. } => MoveType::Match,
            UndoRecord::Promote { .. } => MoveType::Promote,
        }
    }

    /// The card the player acted on
    pub fn card_id(&self) -> CardId {
        match self {
            UndoRecord::Match { card_id, .. } | UndoRecord::Promote { card_id, .. } => *card_id,
        }
    }

    /// The other card involved (discarded top for Match, previous top for Promote)
    pub fn target(&self) -> CardId {
        match self {
            UndoRecord::Match { target, .. } | UndoRecord::Promote { target, .. } => *target,
        }
    }

    pub fn from_zone(&self) -> Zone {
        match self {
            UndoRecord::Match { from_zone, .. } | UndoRecord::Promote { from_zone, .. } => {
                *from_zone
            }
        }
    }
}

/// LIFO stack of inverse records (most recent at end)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    records: Vec<UndoRecord>,
}

impl History {
    pub fn new() -> Self {
        History {
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: UndoRecord) {
        self.records.push(record);
    }

    pub fn can_undo(&self) -> bool {
        !self.records.is_empty()
    }

    /// Pop the most recent record, or None when there is nothing to undo
    pub fn undo(&mut self) -> Option<UndoRecord> {
        self.records.pop()
    }

    /// Get the most recent record without removing it
    pub fn peek(&self) -> Option<&UndoRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// All records, oldest first (for display/debugging)
    pub fn records(&self) -> &[UndoRecord] {
        &self.records
    }
}
