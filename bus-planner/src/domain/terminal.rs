//! Terminal name and terminal types.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Error returned when parsing an invalid terminal name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid terminal name: {reason}")]
pub struct InvalidTerminalName {
    reason: &'static str,
}

/// Error returned when parsing an invalid district.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid district: {reason}")]
pub struct InvalidDistrict {
    reason: &'static str,
}

/// The unique name of a bus terminal.
///
/// Terminal names are single command tokens, so they must be non-empty and
/// contain no whitespace.
///
/// # Examples
///
/// ```
/// use bus_planner::domain::TerminalName;
///
/// let name = TerminalName::parse("Downtown").unwrap();
/// assert_eq!(name.as_str(), "Downtown");
///
/// assert!(TerminalName::parse("").is_err());
/// assert!(TerminalName::parse("Down town").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TerminalName(String);

impl TerminalName {
    /// Parse a terminal name from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidTerminalName> {
        if s.is_empty() {
            return Err(InvalidTerminalName {
                reason: "name cannot be empty",
            });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(InvalidTerminalName {
                reason: "name cannot contain whitespace",
            });
        }
        Ok(TerminalName(s.to_string()))
    }

    /// Returns the terminal name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TerminalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TerminalName({})", self.0)
    }
}

impl fmt::Display for TerminalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TerminalName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TerminalName::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A bus terminal and the district it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Terminal {
    pub name: TerminalName,
    pub district: String,
}

impl Terminal {
    /// Create a terminal, validating the district.
    pub fn new(name: TerminalName, district: &str) -> Result<Self, InvalidDistrict> {
        if district.is_empty() {
            return Err(InvalidDistrict {
                reason: "district cannot be empty",
            });
        }
        if district.chars().any(char::is_whitespace) {
            return Err(InvalidDistrict {
                reason: "district cannot contain whitespace",
            });
        }
        Ok(Self {
            name,
            district: district.to_string(),
        })
    }
}

impl<'de> Deserialize<'de> for Terminal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            name: TerminalName,
            district: String,
        }

        let raw = Raw::deserialize(deserializer)?;
        Terminal::new(raw.name, &raw.district).map_err(serde::de::Error::custom)
    }
}
