//! Sheet command: writes the per-year CSV workbook.
//!
//! Each year gets its own section, in the order years first appear in the
//! log:
//!
//! ```text
//! 2009
//! Date,Place,Game,Net Result,Given Away,Hours
//! 6/5,Kennell's,NLHE,205,60,4
//! ,Total,,205,60,4
//! ,,NLHE,205,,4
//! ,,PLO,0,,0
//! ,,MITT,0,,0
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use pokersheet_core::{PokerLog, WalkOptions};

use super::util::load_log;

/// Column headers of every year section.
pub const HEADER: [&str; 6] = ["Date", "Place", "Game", "Net Result", "Given Away", "Hours"];

/// Sums written on each section's `Total` row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct SectionTotals {
    net_result: i64,
    given_away: i64,
    hours: u64,
}

/// Writes all year sections of `log` as CSV.
pub fn write_sheet<W: Write>(log: &PokerLog, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    for stats in &log.years {
        wtr.write_record([stats.year.to_string()])?;
        wtr.write_record(HEADER)?;

        let mut totals = SectionTotals::default();
        for session in log.sessions_in(stats.year) {
            wtr.write_record([
                session.date.clone(),
                session.place.clone(),
                session.game.to_string(),
                session.net_result.to_string(),
                session.given_away.to_string(),
                session.hours.to_string(),
            ])?;
            totals.net_result += session.net_result;
            totals.given_away += session.given_away;
            totals.hours += u64::from(session.hours);
        }

        wtr.write_record([
            String::new(),
            "Total".to_string(),
            String::new(),
            totals.net_result.to_string(),
            totals.given_away.to_string(),
            totals.hours.to_string(),
        ])?;

        for (game, game_totals) in stats.games() {
            wtr.write_record([
                String::new(),
                String::new(),
                game.to_string(),
                game_totals.net_total.to_string(),
                String::new(),
                game_totals.hours_total.to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Runs the sheet command.
pub fn run(input: &Path, output: &Path, options: WalkOptions) -> Result<()> {
    let log = load_log(input, options)?;

    let file = File::create(output)
        .with_context(|| format!("failed to create sheet {}", output.display()))?;
    write_sheet(&log, BufWriter::new(file))
        .with_context(|| format!("failed to write sheet {}", output.display()))?;

    println!(
        "Wrote {} sessions across {} years to {}",
        log.sessions.len(),
        log.years.len(),
        output.display()
    );
    if !log.anomalies.is_empty() || !log.skipped.is_empty() {
        println!(
            "Ignored {} unrecognized lines and skipped {} malformed entries",
            log.anomalies.len(),
            log.skipped.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokersheet_core::walk_str;

    fn render(text: &str) -> String {
        let log = walk_str(text, WalkOptions::default()).unwrap();
        let mut buf = Vec::new();
        write_sheet(&log, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_single_year_sheet() {
        let output = render("2009\n6/5 - Kennell's - +205(60)\n6/12 - Commerce PLO - -40 - 6\n");
        insta::assert_snapshot!(output, @r"
        2009
        Date,Place,Game,Net Result,Given Away,Hours
        6/5,Kennell's,NLHE,205,60,4
        6/12,Commerce PLO,PLO,-40,0,6
        ,Total,,165,60,10
        ,,NLHE,205,,4
        ,,PLO,-40,,6
        ,,MITT,0,,0
        ");
    }

    #[test]
    fn test_revisited_year_rows_stay_in_one_section() {
        let output = render(
            "2009\n6/5 - Bike - 10\n2010\n1/2 - Bike MITT - -50 - 8\n2009\n12/30 - Bike - 20\n",
        );
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "2009");
        assert_eq!(lines[2], "6/5,Bike,NLHE,10,0,4");
        assert_eq!(lines[3], "12/30,Bike,NLHE,20,0,4");
        assert_eq!(lines[4], ",Total,,30,0,8");
        assert_eq!(lines[8], "2010");
        assert_eq!(lines[10], "1/2,Bike MITT,MITT,-50,0,8");
    }

    #[test]
    fn test_places_with_commas_are_quoted() {
        let output = render("2011\n3/4 - Bay 101, San Jose - 75\n");
        assert!(output.contains("3/4,\"Bay 101, San Jose\",NLHE,75,0,4"));
    }

    #[test]
    fn test_empty_log_writes_nothing() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_run_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("pokerdata");
        let output = dir.path().join("sheet.csv");
        std::fs::write(&input, "2009\n6/5 - Bike - 10\n").unwrap();

        run(&input, &output, WalkOptions::default()).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("2009\n"));
    }

    #[test]
    fn test_run_leaves_no_file_on_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("pokerdata");
        let output = dir.path().join("sheet.csv");
        std::fs::write(&input, "6/5 - Bike - 10\n").unwrap();

        assert!(run(&input, &output, WalkOptions::default()).is_err());
        assert!(!output.exists());
    }
}
