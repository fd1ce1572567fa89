//! Core logic for turning typed poker session notes into records.
//!
//! This crate contains:
//! - Line classification: session entries, year markers, everything else
//! - Session parsing: date, place, amount with giveaway, hours, game variant
//! - Annual statistics: per-year, per-game hours and net totals
//! - The log walker tying the three together

pub mod game;
mod line;
pub mod session;
mod stats;
pub mod walker;

pub use game::{GameVariant, UnknownGameVariant};
pub use line::{LineKind, classify, year_of};
pub use session::{
    Amount, DEFAULT_HOURS, EntryError, MAX_AMOUNT, Session, parse_session, parse_session_with,
};
pub use stats::{AnnualStats, Totals};
pub use walker::{
    Anomaly, LogWalker, MalformedPolicy, PokerLog, SkippedEntry, WalkError, WalkOptions, walk,
    walk_str,
};
