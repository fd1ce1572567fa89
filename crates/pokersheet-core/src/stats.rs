//! Per-year running totals keyed by game variant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game::GameVariant;
use crate::session::Session;

/// Accumulated hours and net result for one game in one year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub hours_total: u64,
    pub net_total: i64,
    /// Number of sessions folded into this bucket.
    pub sessions: u32,
}

impl Totals {
    /// Net result per hour, rounded to cents. `None` when no hours were played.
    #[expect(
        clippy::cast_precision_loss,
        reason = "session money and hours are far below f64's exact integer range"
    )]
    pub fn hourly_rate(&self) -> Option<f64> {
        if self.hours_total == 0 {
            return None;
        }
        let rate = self.net_total as f64 / self.hours_total as f64;
        Some((rate * 100.0).round() / 100.0)
    }

    fn add(&mut self, other: &Self) {
        self.hours_total += other.hours_total;
        self.net_total += other.net_total;
        self.sessions += other.sessions;
    }
}

/// Running totals for one calendar year.
///
/// Every [`GameVariant`] has a bucket from construction on, so lookups never
/// create keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualStats {
    pub year: i32,
    games: BTreeMap<GameVariant, Totals>,
}

impl AnnualStats {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            games: GameVariant::ALL
                .into_iter()
                .map(|game| (game, Totals::default()))
                .collect(),
        }
    }

    /// Folds one session into the bucket for its game.
    ///
    /// Calling this twice for the same session counts it twice.
    pub fn record_session(&mut self, session: &Session) {
        let totals = self.games.entry(session.game).or_default();
        totals.hours_total += u64::from(session.hours);
        totals.net_total += session.net_result;
        totals.sessions += 1;
        tracing::trace!(
            year = self.year,
            game = %session.game,
            hours_total = totals.hours_total,
            net_total = totals.net_total,
            "recorded session"
        );
    }

    /// Totals for one game.
    pub fn totals(&self, game: GameVariant) -> Totals {
        self.games.get(&game).copied().unwrap_or_default()
    }

    /// Per-game totals in report order.
    pub fn games(&self) -> impl Iterator<Item = (GameVariant, Totals)> + '_ {
        self.games.iter().map(|(game, totals)| (*game, *totals))
    }

    /// Totals across all games.
    pub fn overall(&self) -> Totals {
        let mut sum = Totals::default();
        for totals in self.games.values() {
            sum.add(totals);
        }
        sum
    }
}
