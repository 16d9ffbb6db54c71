//! Game state, rules, actions and the session that drives them

pub mod actions;
pub mod layout;
pub mod logger;
pub mod rules;
pub mod session;
pub mod state;

pub use actions::{ActionKind, ActionOutcome, RejectReason};
pub use layout::{InitialLayout, LayoutEntry, STACK_TOP_POSITION};
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode, VerbosityLevel};
pub use rules::can_match;
pub use session::{BoardView, Session};
pub use state::GameState;
