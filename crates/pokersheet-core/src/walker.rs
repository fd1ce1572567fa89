//! Log walking: drives classification, parsing and aggregation over a log.
//!
//! Lines are processed strictly in order. A year marker selects the year
//! that following sessions belong to; a session seen before any year marker
//! aborts the whole walk.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::line::{LineKind, classify, year_of};
use crate::session::{DEFAULT_HOURS, EntryError, Session, parse_session_with};
use crate::stats::AnnualStats;

/// What to do with a session entry that fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Stop the walk with the entry's error.
    #[default]
    Abort,
    /// Log a warning, remember the line and keep going.
    Skip,
}

/// Options for a walk.
#[derive(Debug, Clone, Copy)]
pub struct WalkOptions {
    pub on_malformed: MalformedPolicy,
    /// Hours assumed for 3-field entries.
    pub default_hours: u32,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            on_malformed: MalformedPolicy::Abort,
            default_hours: DEFAULT_HOURS,
        }
    }
}

/// Errors that end a walk.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("line {line_number}: session entry before any year marker: {line:?}")]
    SessionBeforeYear { line_number: usize, line: String },

    #[error("line {line_number}: {source}: {line:?}")]
    Entry {
        line_number: usize,
        line: String,
        #[source]
        source: EntryError,
    },
}

/// A non-blank line that is neither a session nor a year marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anomaly {
    /// 1-based line number.
    pub line_number: usize,
    pub text: String,
}

/// A session entry dropped under [`MalformedPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub line_number: usize,
    pub text: String,
    pub reason: EntryError,
}

/// Everything a walk produces.
#[derive(Debug, Clone, Default)]
pub struct PokerLog {
    /// Sessions in input order.
    pub sessions: Vec<Session>,
    /// Per-year totals in the order years were first seen.
    pub years: Vec<AnnualStats>,
    pub anomalies: Vec<Anomaly>,
    pub skipped: Vec<SkippedEntry>,
}

impl PokerLog {
    pub fn year(&self, year: i32) -> Option<&AnnualStats> {
        self.years.iter().find(|stats| stats.year == year)
    }

    /// Sessions of one year, in input order.
    pub fn sessions_in(&self, year: i32) -> impl Iterator<Item = &Session> + '_ {
        self.sessions.iter().filter(move |s| s.year == year)
    }
}

#[derive(Debug, Clone, Copy)]
enum WalkState {
    NoYearEstablished,
    YearEstablished { year: i32, index: usize },
}

/// Line-by-line state machine behind [`walk`].
#[derive(Debug)]
pub struct LogWalker {
    options: WalkOptions,
    state: WalkState,
    log: PokerLog,
    /// Sessions seen since the last year marker.
    entries_in_block: usize,
}

impl LogWalker {
    pub fn new(options: WalkOptions) -> Self {
        Self {
            options,
            state: WalkState::NoYearEstablished,
            log: PokerLog::default(),
            entries_in_block: 0,
        }
    }

    /// Feeds one line. `line_number` is 1-based and only used for reporting.
    pub fn feed(&mut self, line_number: usize, line: &str) -> Result<(), WalkError> {
        match classify(line) {
            LineKind::YearMarker => {
                if let Some(year) = year_of(line) {
                    self.select_year(year);
                } else {
                    self.note_anomaly(line_number, line);
                }
                Ok(())
            }
            LineKind::SessionEntry => self.record_entry(line_number, line),
            LineKind::Other => {
                if !line.trim().is_empty() {
                    self.note_anomaly(line_number, line);
                }
                Ok(())
            }
        }
    }

    /// Ends the walk and hands back everything collected.
    pub fn finish(self) -> PokerLog {
        if let WalkState::YearEstablished { year, .. } = self.state {
            tracing::debug!(year, entries = self.entries_in_block, "closed year block");
        }
        self.log
    }

    fn select_year(&mut self, year: i32) {
        if let WalkState::YearEstablished { year: previous, .. } = self.state {
            tracing::debug!(year = previous, entries = self.entries_in_block, "closed year block");
        }

        let index = if let Some(index) = self.log.years.iter().position(|s| s.year == year) {
            tracing::debug!(year, "revisiting year");
            index
        } else {
            tracing::debug!(year, "new year");
            self.log.years.push(AnnualStats::new(year));
            self.log.years.len() - 1
        };

        self.state = WalkState::YearEstablished { year, index };
        self.entries_in_block = 0;
    }

    fn record_entry(&mut self, line_number: usize, line: &str) -> Result<(), WalkError> {
        let WalkState::YearEstablished { year, index } = self.state else {
            return Err(WalkError::SessionBeforeYear {
                line_number,
                line: line.trim_end().to_string(),
            });
        };

        let session = match parse_session_with(line, year, self.options.default_hours) {
            Ok(session) => session,
            Err(source) => return self.reject_entry(line_number, line, source),
        };

        tracing::debug!(
            line_number,
            year,
            date = %session.date,
            place = %session.place,
            game = %session.game,
            net_result = session.net_result,
            given_away = session.given_away,
            hours = session.hours,
            "parsed session"
        );

        self.log.years[index].record_session(&session);
        self.log.sessions.push(session);
        self.entries_in_block += 1;
        Ok(())
    }

    fn reject_entry(
        &mut self,
        line_number: usize,
        line: &str,
        reason: EntryError,
    ) -> Result<(), WalkError> {
        let text = line.trim_end().to_string();
        match self.options.on_malformed {
            MalformedPolicy::Abort => Err(WalkError::Entry {
                line_number,
                line: text,
                source: reason,
            }),
            MalformedPolicy::Skip => {
                tracing::warn!(line_number, %reason, line = %text, "skipping malformed entry");
                self.log.skipped.push(SkippedEntry {
                    line_number,
                    text,
                    reason,
                });
                Ok(())
            }
        }
    }

    fn note_anomaly(&mut self, line_number: usize, line: &str) {
        let text = line.trim_end().to_string();
        tracing::warn!(line_number, line = %text, "unrecognized line");
        self.log.anomalies.push(Anomaly { line_number, text });
    }
}

/// Walks an ordered sequence of lines.
///
/// On error nothing collected so far is returned.
pub fn walk<'a, I>(lines: I, options: WalkOptions) -> Result<PokerLog, WalkError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut walker = LogWalker::new(options);
    for (index, line) in lines.into_iter().enumerate() {
        walker.feed(index + 1, line)?;
    }
    Ok(walker.finish())
}

/// Walks a whole log held in memory.
pub fn walk_str(text: &str, options: WalkOptions) -> Result<PokerLog, WalkError> {
    walk(text.lines(), options)
}
