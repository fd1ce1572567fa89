//! Game variant enum, inferred from the tag at the end of a place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Poker game formats tracked in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GameVariant {
    NoLimitHoldem,
    PotLimitOmaha,
    /// Multi-table tournament.
    Tournament,
}

impl GameVariant {
    /// Every variant, in report order.
    pub const ALL: [Self; 3] = [Self::NoLimitHoldem, Self::PotLimitOmaha, Self::Tournament];

    /// Infers the variant from the place field.
    ///
    /// Only a trailing `PLO` or `MITT` tag counts, and the match is
    /// case-sensitive: `Commerce plo` is still hold'em.
    #[must_use]
    pub fn from_place(place: &str) -> Self {
        let place = place.trim_end();
        if place.ends_with("PLO") {
            Self::PotLimitOmaha
        } else if place.ends_with("MITT") {
            Self::Tournament
        } else {
            Self::NoLimitHoldem
        }
    }

    /// Short tag used in sheets and JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoLimitHoldem => "NLHE",
            Self::PotLimitOmaha => "PLO",
            Self::Tournament => "MITT",
        }
    }
}

impl fmt::Display for GameVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameVariant {
    type Err = UnknownGameVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NLHE" => Ok(Self::NoLimitHoldem),
            "PLO" => Ok(Self::PotLimitOmaha),
            "MITT" => Ok(Self::Tournament),
            _ => Err(UnknownGameVariant(s.to_string())),
        }
    }
}

impl Serialize for GameVariant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GameVariant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown game tags.
#[derive(Debug, Clone)]
pub struct UnknownGameVariant(String);

impl fmt::Display for UnknownGameVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown game variant: {}", self.0)
    }
}

impl std::error::Error for UnknownGameVariant {}
