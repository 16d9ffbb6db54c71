//! Game session: the command and query surface for a presentation layer
//!
//! A `Session` exclusively owns the board and its undo history. Callers
//! hand it card ids (from clicks or a script) and re-read the board after
//! every command. Every command runs to completion before returning; the
//! board is consistent the moment a call returns.

/// Log through the session logger, compiled out without `verbose-logging`
macro_rules! log_event {
    ($logger:expr, $level:ident, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $logger.$level(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$logger;
        }
    };
}

use crate::core::{Card, CardId};
use crate::game::actions::ActionOutcome;
use crate::game::layout::InitialLayout;
use crate::game::logger::GameLogger;
use crate::game::rules::{can_match, top_is_matchable};
use crate::game::GameState;
use crate::undo::{History, UndoRecord};
use crate::zones::Zone;
use crate::Result;
use serde::Serialize;
use std::fmt::Write as FmtWrite;

/// Read-only snapshot of the board for presentation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub playfield: Vec<Card>,
    /// Index 0 = bottom reserve, last = top
    pub stack: Vec<Card>,
    pub can_undo: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    state: GameState,
    history: History,
    pub logger: GameLogger,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn with_logger(logger: GameLogger) -> Self {
        Session {
            logger,
            ..Session::default()
        }
    }

    /// Session that starts on `layout`
    pub fn from_layout(layout: &InitialLayout) -> Self {
        let mut session = Session::new();
        session.start_new_game(layout);
        session
    }

    /// Discard the current game and deal `layout`
    ///
    /// Identities restart at 0 and are handed out in layout order.
    pub fn start_new_game(&mut self, layout: &InitialLayout) {
        self.state.clear();
        self.history.clear();

        for entry in layout.entries() {
            let id = self
                .state
                .spawn_card(entry.rank, entry.suit, entry.zone, entry.position);
            if !entry.face_up {
                if let Some(card) = self.state.get_zone_mut(entry.zone).find_mut(id) {
                    card.face_up = false;
                }
            }
        }

        log_event!(
            self.logger,
            minimal,
            "New game: {} playfield cards, {} stack cards",
            self.state.playfield.len(),
            self.state.stack.len()
        );
    }

    /// A card was selected; Match or Promote depending on where it lives
    pub fn on_card_selected(&mut self, card_id: CardId) -> ActionOutcome {
        self.on_card_selected_in(card_id, None)
    }

    /// Like `on_card_selected`, with the zone the caller believes the card
    /// is in. The board lookup always wins over the hint.
    pub fn on_card_selected_in(&mut self, card_id: CardId, zone_hint: Option<Zone>) -> ActionOutcome {
        let actual = self.state.zone_of(card_id);
        if let (Some(hint), Some(zone)) = (zone_hint, actual) {
            if hint != zone {
                log_event!(
                    self.logger,
                    verbose,
                    "Card {} hinted as {} but found in {}",
                    card_id,
                    hint,
                    zone
                );
            }
        }

        match self.state.select_card(card_id) {
            Ok(record) => {
                let outcome = match record {
                    UndoRecord::Match { target, .. } => ActionOutcome::Matched {
                        card: card_id,
                        discarded: target,
                    },
                    UndoRecord::Promote { from_index, .. } => ActionOutcome::Promoted {
                        card: card_id,
                        from_index,
                    },
                };
                self.log_applied(&record);
                self.history.push(record);
                outcome
            }
            Err(reason) => {
                log_event!(self.logger, verbose, "Rejected card {}: {}", card_id, reason);
                ActionOutcome::Rejected(reason)
            }
        }
    }

    /// Undo the most recent action
    ///
    /// Returns false when there is nothing to undo.
    pub fn on_undo_requested(&mut self) -> bool {
        let Some(record) = self.history.undo() else {
            log_event!(self.logger, verbose, "Nothing to undo");
            return false;
        };

        self.state.revert(&record);

        match record {
            UndoRecord::Match {
                card_id, target, ..
            } => {
                log_event!(
                    self.logger,
                    normal,
                    "Undo match: card {} back to playfield, card {} restored as top",
                    card_id,
                    target
                );
            }
            UndoRecord::Promote {
                card_id,
                from_index,
                ..
            } => {
                log_event!(
                    self.logger,
                    normal,
                    "Undo promote: card {} back to stack index {}",
                    card_id,
                    from_index
                );
            }
        }
        true
    }

    fn log_applied(&self, record: &UndoRecord) {
        match *record {
            UndoRecord::Match {
                card_id,
                rank,
                suit,
                target,
                discarded_rank,
                discarded_suit,
                ..
            } => {
                log_event!(
                    self.logger,
                    normal,
                    "Matched card {} ({}{}) onto {} ({}{})",
                    card_id,
                    rank,
                    suit,
                    target,
                    discarded_rank,
                    discarded_suit
                );
            }
            UndoRecord::Promote {
                card_id,
                from_index,
                target,
                ..
            } => {
                log_event!(
                    self.logger,
                    normal,
                    "Promoted card {} from stack index {} over {}",
                    card_id,
                    from_index,
                    target
                );
            }
        }
    }

    pub fn playfield_cards(&self) -> &[Card] {
        self.state.playfield.cards()
    }

    /// Stack cards, bottom reserve first and the top card last
    pub fn stack_cards_ordered(&self) -> &[Card] {
        self.state.stack.cards()
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.state.top_of_stack()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Playfield cards that would be accepted by a Match right now
    pub fn matchable_playfield_ids(&self) -> Vec<CardId> {
        let Some(top) = self.state.top_of_stack() else {
            return Vec::new();
        };
        self.state
            .playfield
            .iter()
            .filter(|card| can_match(card.rank, top.rank))
            .map(|card| card.id)
            .collect()
    }

    /// Would selecting some reserve card be accepted as a Promote?
    pub fn can_promote(&self) -> bool {
        match self.state.top_of_stack() {
            Some(top) => self.state.stack.len() > 1 && !top_is_matchable(top, &self.state.playfield),
            None => false,
        }
    }

    pub fn check_invariants(&self) -> Result<()> {
        self.state.check_invariants()
    }

    pub fn board_view(&self) -> BoardView {
        BoardView {
            playfield: self.playfield_cards().to_vec(),
            stack: self.stack_cards_ordered().to_vec(),
            can_undo: self.can_undo(),
        }
    }

    /// Compact text rendering of the board
    ///
    /// The top card is wrapped in `>...<`.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let matchable = self.matchable_playfield_ids();

        out.push_str("Playfield:");
        for card in self.playfield_cards() {
            let mark = if matchable.contains(&card.id) { "*" } else { "" };
            let _ = write!(out, "  [{}] {}{}", card.id, card, mark);
        }
        out.push('\n');

        out.push_str("Stack:    ");
        let top_id = self.top_card().map(|c| c.id);
        for card in self.stack_cards_ordered() {
            if Some(card.id) == top_id {
                let _ = write!(out, "  >[{}] {}<", card.id, card);
            } else {
                let _ = write!(out, "  [{}] {}", card.id, card);
            }
        }
        out.push('\n');

        let _ = writeln!(
            out,
            "Undo: {} ({} recorded){}",
            if self.can_undo() { "available" } else { "none" },
            self.undo_depth(),
            if self.can_promote() { ", promote open" } else { "" }
        );
        out
    }
}
