//! Session entries: one played outing per log line.
//!
//! An entry is `date - place - amount` or `date - place - amount - hours`,
//! joined by a literal `" - "`. The amount is a signed integer optionally
//! followed by a parenthesised giveaway, e.g. `+205(60)`.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::GameVariant;

/// Field separator inside a session entry.
pub const FIELD_SEPARATOR: &str = " - ";

/// Hours assumed when an entry omits them.
pub const DEFAULT_HOURS: u32 = 4;

/// Largest net result or giveaway accepted for one session.
pub const MAX_AMOUNT: i64 = 1_000_000_000;

/// Why a single session entry could not be turned into a [`Session`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("expected 3 or 4 \" - \"-delimited fields, found {found}")]
    MalformedEntry { found: usize },

    #[error("invalid amount: {token:?}")]
    MalformedAmount { token: String },

    #[error("amount {value} is outside ±{max}", max = MAX_AMOUNT)]
    AmountOutOfRange { value: i64 },

    #[error("invalid hours: {token:?}")]
    MalformedHours { token: String },

    #[error("hours must be positive, got {hours}")]
    NonPositiveHours { hours: u32 },

    #[error("gave away {given_away} but the session only won {net_result}")]
    GiveawayExceedsWinnings { net_result: i64, given_away: i64 },
}

/// The money part of an entry: what was won or lost, and what was handed off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount {
    pub net_result: i64,
    pub given_away: i64,
}

impl Amount {
    /// Parses an amount token such as `+205(60)`, `-40` or `120`.
    ///
    /// The grammar is `[+|-]digits [ "(" digits ")" ]` with optional
    /// whitespace around each part. Nothing may follow the closing paren.
    pub fn parse(token: &str) -> Result<Self, EntryError> {
        let malformed = || EntryError::MalformedAmount {
            token: token.to_string(),
        };
        let trimmed = token.trim();

        let (net_part, given_part) = match trimmed.find('(') {
            Some(open) => {
                let inner = trimmed[open + 1..]
                    .trim_end()
                    .strip_suffix(')')
                    .ok_or_else(malformed)?;
                (&trimmed[..open], Some(inner))
            }
            None => (trimmed, None),
        };

        let net_part = net_part.trim();
        let (negative, digits) = match net_part.as_bytes().first() {
            Some(b'+') => (false, &net_part[1..]),
            Some(b'-') => (true, &net_part[1..]),
            _ => (false, net_part),
        };
        let magnitude = parse_digits(digits).ok_or_else(malformed)?;
        let net_result = if negative { -magnitude } else { magnitude };

        let given_away = match given_part {
            Some(inner) => parse_digits(inner.trim()).ok_or_else(malformed)?,
            None => 0,
        };

        for value in [net_result, given_away] {
            if value.abs() > MAX_AMOUNT {
                return Err(EntryError::AmountOutOfRange { value });
            }
        }

        Ok(Self {
            net_result,
            given_away,
        })
    }

    /// Rejects giveaways that are larger than what the session won.
    pub const fn validate(self) -> Result<Self, EntryError> {
        if self.given_away > 0 && self.given_away > self.net_result {
            return Err(EntryError::GiveawayExceedsWinnings {
                net_result: self.net_result,
                given_away: self.given_away,
            });
        }
        Ok(self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.net_result)?;
        if self.given_away > 0 {
            write!(f, "({})", self.given_away)?;
        }
        Ok(())
    }
}

/// One recorded poker session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub year: i32,
    /// Raw date token as typed, e.g. `6/5`.
    pub date: String,
    /// Raw place token; may carry a game tag suffix.
    pub place: String,
    pub net_result: i64,
    pub given_away: i64,
    pub hours: u32,
    pub game: GameVariant,
}

impl Session {
    /// Interprets the `month/day` token as a date in the session's year.
    ///
    /// Returns `None` for anything that is not a real calendar date.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let (month, day) = self.date.split_once('/')?;
        NaiveDate::from_ymd_opt(self.year, month.trim().parse().ok()?, day.trim().parse().ok()?)
    }

    pub const fn amount(&self) -> Amount {
        Amount {
            net_result: self.net_result,
            given_away: self.given_away,
        }
    }

    /// Renders the session back into the 4-field log format.
    pub fn to_line(&self) -> String {
        [
            self.date.clone(),
            self.place.clone(),
            self.amount().to_string(),
            self.hours.to_string(),
        ]
        .join(FIELD_SEPARATOR)
    }
}

/// Parses a session entry line, defaulting missing hours to [`DEFAULT_HOURS`].
pub fn parse_session(line: &str, year: i32) -> Result<Session, EntryError> {
    parse_session_with(line, year, DEFAULT_HOURS)
}

/// Parses a session entry line with a caller-chosen default for missing hours.
pub fn parse_session_with(
    line: &str,
    year: i32,
    default_hours: u32,
) -> Result<Session, EntryError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();

    let (date, place, amount_token, hours) = match fields.as_slice() {
        [date, place, amount] => (*date, *place, *amount, default_hours),
        [date, place, amount, hours] => (*date, *place, *amount, parse_hours(hours)?),
        _ => {
            return Err(EntryError::MalformedEntry {
                found: fields.len(),
            });
        }
    };

    if hours == 0 {
        return Err(EntryError::NonPositiveHours { hours });
    }

    let amount = Amount::parse(amount_token)?.validate()?;
    let place = place.trim();

    Ok(Session {
        year,
        date: date.trim().to_string(),
        place: place.to_string(),
        net_result: amount.net_result,
        given_away: amount.given_away,
        hours,
        game: GameVariant::from_place(place),
    })
}

/// Reads a run of ASCII digits. Signs, spaces and empty input are rejected.
fn parse_digits(digits: &str) -> Option<i64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn parse_hours(token: &str) -> Result<u32, EntryError> {
    token
        .trim()
        .parse()
        .map_err(|_| EntryError::MalformedHours {
            token: token.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(token: &str) -> (i64, i64) {
        let a = Amount::parse(token).expect("should parse");
        (a.net_result, a.given_away)
    }

    #[test]
    fn amount_with_giveaway() {
        assert_eq!(amount("+205(60)"), (205, 60));
    }

    #[test]
    fn amount_loss() {
        assert_eq!(amount("-40"), (-40, 0));
    }

    #[test]
    fn amount_implicit_positive() {
        assert_eq!(amount("120"), (120, 0));
        assert_eq!(amount("+120"), (120, 0));
    }

    #[test]
    fn amount_tolerates_spaces_and_newline() {
        assert_eq!(amount(" +205 (60) \n"), (205, 60));
        assert_eq!(amount("-40\n"), (-40, 0));
    }

    #[test]
    fn amount_rejects_garbage() {
        for token in [
            "", "abc", "+", "5.5", "+-5", "++5", "--5", "- 5", "(60)", "+205(60", "+205(x)",
            "+205(60)x", "+205(-5)", "+205(+5)",
        ] {
            let err = Amount::parse(token).unwrap_err();
            assert!(
                matches!(err, EntryError::MalformedAmount { .. }),
                "{token:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn amount_out_of_range() {
        assert_eq!(
            Amount::parse("9223372036854775807").unwrap_err(),
            EntryError::AmountOutOfRange {
                value: i64::MAX
            }
        );
        assert_eq!(
            Amount::parse("-1000000001").unwrap_err(),
            EntryError::AmountOutOfRange {
                value: -1_000_000_001
            }
        );
        assert!(Amount::parse("+1000000000(1000000000)").is_ok());
        // Too many digits for i64 at all is just malformed.
        assert!(matches!(
            Amount::parse("99999999999999999999").unwrap_err(),
            EntryError::MalformedAmount { .. }
        ));
    }

    #[test]
    fn giveaway_cannot_exceed_winnings() {
        let err = parse_session("6/5 - Bike - +50(60)", 2009).unwrap_err();
        assert_eq!(
            err,
            EntryError::GiveawayExceedsWinnings {
                net_result: 50,
                given_away: 60
            }
        );
        // A losing session has nothing to give away.
        assert!(parse_session("6/5 - Bike - -10(5)", 2009).is_err());
        // Giving away the whole win is fine.
        assert!(parse_session("6/5 - Bike - +60(60)", 2009).is_ok());
        assert!(parse_session("6/5 - Bike - -10(0)", 2009).is_ok());
    }

    #[test]
    fn three_fields_default_to_four_hours() {
        let session = parse_session("6/5 - Kennell's - +205(60)\n", 2009).unwrap();
        assert_eq!(
            session,
            Session {
                year: 2009,
                date: "6/5".to_string(),
                place: "Kennell's".to_string(),
                net_result: 205,
                given_away: 60,
                hours: 4,
                game: GameVariant::NoLimitHoldem,
            }
        );
    }

    #[test]
    fn custom_default_hours() {
        let session = parse_session_with("6/5 - Bike - 10", 2010, 6).unwrap();
        assert_eq!(session.hours, 6);
    }

    #[test]
    fn four_fields_read_hours() {
        let session = parse_session("6/12 - Commerce PLO - -40 - 6\n", 2009).unwrap();
        assert_eq!(session.net_result, -40);
        assert_eq!(session.given_away, 0);
        assert_eq!(session.hours, 6);
        assert_eq!(session.game, GameVariant::PotLimitOmaha);
        assert_eq!(session.place, "Commerce PLO");
    }

    #[test]
    fn wrong_field_count() {
        assert_eq!(
            parse_session("6/5 - Bike", 2009).unwrap_err(),
            EntryError::MalformedEntry { found: 2 }
        );
        assert_eq!(
            parse_session("6/5 - Bike - 10 - 4 - extra", 2009).unwrap_err(),
            EntryError::MalformedEntry { found: 5 }
        );
        // A bare hyphen without spaces is not a separator.
        assert_eq!(
            parse_session("6/5-Bike-10", 2009).unwrap_err(),
            EntryError::MalformedEntry { found: 1 }
        );
    }

    #[test]
    fn bad_hours() {
        assert!(matches!(
            parse_session("6/5 - Bike - 10 - four", 2009).unwrap_err(),
            EntryError::MalformedHours { .. }
        ));
        assert!(matches!(
            parse_session("6/5 - Bike - 10 - -3", 2009).unwrap_err(),
            EntryError::MalformedHours { .. }
        ));
        assert_eq!(
            parse_session("6/5 - Bike - 10 - 0", 2009).unwrap_err(),
            EntryError::NonPositiveHours { hours: 0 }
        );
    }

    #[test]
    fn reconstructed_line_parses_back() {
        let lines = [
            "6/5 - Kennell's - +205(60)",
            "6/12 - Commerce PLO - -40 - 6",
            "7/1 - Bike MITT - 0 - 11",
            "12/31 - Hustler - 120 - 2",
        ];
        for line in lines {
            let session = parse_session(line, 2009).unwrap();
            let again = parse_session(&session.to_line(), 2009).unwrap();
            assert_eq!(again, session, "roundtrip failed for {line:?}");
        }
    }

    #[test]
    fn calendar_date_uses_session_year() {
        let session = parse_session("6/5 - Bike - 10", 2009).unwrap();
        assert_eq!(session.calendar_date(), NaiveDate::from_ymd_opt(2009, 6, 5));

        let leap = parse_session("2/29 - Bike - 10", 2009).unwrap();
        assert_eq!(leap.calendar_date(), None);
    }
}
