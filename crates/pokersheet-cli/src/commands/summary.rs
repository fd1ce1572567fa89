//! Summary command for printing per-year, per-game totals.
//!
//! This module implements `pokersheet summary` with human-readable and JSON
//! output.

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use pokersheet_core::{AnnualStats, Anomaly, GameVariant, PokerLog, Session, Totals, WalkOptions};
use serde::Serialize;

use super::util::load_log;

// ========== Text Output ==========

/// Formats one totals line: tag, hours, signed net and hourly rate.
fn format_totals_line(tag: &str, totals: Totals) -> String {
    let rate = totals
        .hourly_rate()
        .map(|r| format!("{r:>10.2}/h"))
        .unwrap_or_default();
    format!(
        "  {tag:<6}{:>5}h{:>+10}{rate}",
        totals.hours_total, totals.net_total
    )
}

fn given_away_in(log: &PokerLog, year: i32) -> i64 {
    log.sessions_in(year).map(|s| s.given_away).sum()
}

/// Formats the human-readable summary.
pub fn format_summary(log: &PokerLog) -> String {
    let mut output = String::new();

    if log.years.is_empty() {
        writeln!(output, "No years recorded.").unwrap();
        return output;
    }

    for (i, stats) in log.years.iter().enumerate() {
        if i > 0 {
            writeln!(output).unwrap();
        }
        let overall = stats.overall();
        writeln!(output, "{} ({} sessions)", stats.year, overall.sessions).unwrap();
        writeln!(output, "──────────────────").unwrap();
        for (game, totals) in stats.games() {
            writeln!(output, "{}", format_totals_line(game.as_str(), totals)).unwrap();
        }
        writeln!(output, "{}", format_totals_line("Total", overall)).unwrap();
        writeln!(output, "  Given away: {}", given_away_in(log, stats.year)).unwrap();
    }

    if !log.anomalies.is_empty() || !log.skipped.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "IGNORED").unwrap();
        writeln!(output, "───────").unwrap();
        for anomaly in &log.anomalies {
            writeln!(output, "  line {}: {}", anomaly.line_number, anomaly.text).unwrap();
        }
        for skipped in &log.skipped {
            writeln!(
                output,
                "  line {}: {} ({})",
                skipped.line_number, skipped.text, skipped.reason
            )
            .unwrap();
        }
    }

    output
}

// ========== JSON Output ==========

/// JSON summary structure.
#[derive(Debug, Serialize)]
pub struct JsonSummary {
    pub years: Vec<JsonYear>,
    pub anomalies: Vec<Anomaly>,
    pub skipped: Vec<JsonSkipped>,
}

#[derive(Debug, Serialize)]
pub struct JsonYear {
    pub year: i32,
    /// First and last session dates that form real calendar dates.
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub given_away: i64,
    pub games: Vec<JsonTotals>,
    pub total: JsonTotals,
}

#[derive(Debug, Serialize)]
pub struct JsonTotals {
    pub game: Option<GameVariant>,
    pub sessions: u32,
    pub hours: u64,
    pub net: i64,
    pub hourly_rate: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct JsonSkipped {
    pub line_number: usize,
    pub text: String,
    pub reason: String,
}

impl JsonTotals {
    fn new(game: Option<GameVariant>, totals: Totals) -> Self {
        Self {
            game,
            sessions: totals.sessions,
            hours: totals.hours_total,
            net: totals.net_total,
            hourly_rate: totals.hourly_rate(),
        }
    }
}

fn json_year(log: &PokerLog, stats: &AnnualStats) -> JsonYear {
    let dates: Vec<_> = log
        .sessions_in(stats.year)
        .filter_map(Session::calendar_date)
        .collect();

    JsonYear {
        year: stats.year,
        first_date: dates.iter().min().map(ToString::to_string),
        last_date: dates.iter().max().map(ToString::to_string),
        given_away: given_away_in(log, stats.year),
        games: stats
            .games()
            .map(|(game, totals)| JsonTotals::new(Some(game), totals))
            .collect(),
        total: JsonTotals::new(None, stats.overall()),
    }
}

/// Formats the summary as JSON.
pub fn format_summary_json(log: &PokerLog) -> Result<String> {
    let summary = JsonSummary {
        years: log.years.iter().map(|stats| json_year(log, stats)).collect(),
        anomalies: log.anomalies.clone(),
        skipped: log
            .skipped
            .iter()
            .map(|s| JsonSkipped {
                line_number: s.line_number,
                text: s.text.clone(),
                reason: s.reason.to_string(),
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&summary)?)
}

// ========== Public Interface ==========

/// Runs the summary command.
pub fn run(input: &Path, options: WalkOptions, json: bool) -> Result<()> {
    let log = load_log(input, options)?;

    if json {
        let output = format_summary_json(&log)?;
        println!("{output}");
    } else {
        let output = format_summary(&log);
        print!("{output}");
    }

    Ok(())
}
