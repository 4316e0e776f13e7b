//! Clock time handling for the daily bus schedule.
//!
//! The schedule repeats every day, so times carry no date. Input times are
//! 4-digit "HHMM" strings; output times render as "H:MM".

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// First admissible departure of the service day, in minutes since midnight.
pub const SERVICE_START_MINS: u32 = 5 * 60;

/// Last admissible departure of the service day, in minutes since midnight.
pub const SERVICE_END_MINS: u32 = 23 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day at minute resolution.
///
/// # Examples
///
/// ```
/// use bus_planner::domain::ClockTime;
///
/// let time = ClockTime::parse_hhmm("0805").unwrap();
/// assert_eq!(time.minutes(), 485);
/// assert_eq!(time.to_string(), "8:05");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Parse a time from "HHMM" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_planner::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmm("0000").is_ok());
    /// assert!(ClockTime::parse_hhmm("2359").is_ok());
    ///
    /// assert!(ClockTime::parse_hhmm("08:00").is_err());
    /// assert!(ClockTime::parse_hhmm("800").is_err());
    /// assert!(ClockTime::parse_hhmm("2400").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();
        if bytes.len() != 4 {
            return Err(TimeError::new("expected 4-digit HHMM format"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = parse_two_digits(&bytes[2..4])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;

        if hour > 23 {
            return Err(TimeError::new("hour must be 00-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 00-59"));
        }

        Self::from_hm(hour, minute)
    }

    /// Parse a time from "HHMM" format and require it to fall within the
    /// service day (05:00 to 23:00 inclusive).
    ///
    /// ```
    /// use bus_planner::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_service_time("0500").is_ok());
    /// assert!(ClockTime::parse_service_time("2300").is_ok());
    /// assert!(ClockTime::parse_service_time("0459").is_err());
    /// assert!(ClockTime::parse_service_time("2301").is_err());
    /// ```
    pub fn parse_service_time(s: &str) -> Result<Self, TimeError> {
        Self::parse_hhmm(s)?.within_service_day()
    }

    /// Returns this time if it falls within the service day.
    pub fn within_service_day(self) -> Result<Self, TimeError> {
        if self.minutes() < SERVICE_START_MINS {
            return Err(TimeError::new("service starts at 05:00"));
        }
        if self.minutes() > SERVICE_END_MINS {
            return Err(TimeError::new("service ends at 23:00"));
        }
        Ok(self)
    }

    /// Create a time from hour and minute components.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TimeError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| TimeError::new("time out of range"))
    }

    /// Create a time from minutes since midnight.
    pub fn from_minutes(minutes: u32) -> Result<Self, TimeError> {
        Self::from_hm(minutes / 60, minutes % 60)
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Returns the underlying chrono time.
    pub fn time(&self) -> NaiveTime {
        self.0
    }

    /// Absolute distance between two times of the same day.
    pub fn distance(&self, other: ClockTime) -> Duration {
        (self.0 - other.0).abs()
    }

    /// Renders the time back in "HHMM" input format.
    pub fn to_hhmm(&self) -> String {
        format!("{:02}{:02}", self.hour(), self.minute())
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hhmm())
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ClockTime::parse_hhmm(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_hhmm()(hour in 0u32..24, minute in 0u32..60) -> String {
            format!("{:02}{:02}", hour, minute)
        }
    }

    proptest! {
        /// Any well-formed HHMM string parses
        #[test]
        fn valid_hhmm_parses(s in valid_hhmm()) {
            prop_assert!(ClockTime::parse_hhmm(&s).is_ok());
        }

        /// Parse then render in input format returns the original
        #[test]
        fn hhmm_roundtrip(s in valid_hhmm()) {
            let t = ClockTime::parse_hhmm(&s).unwrap();
            prop_assert_eq!(t.to_hhmm(), s);
        }

        /// minutes() agrees with the digits
        #[test]
        fn minutes_match_digits(hour in 0u32..24, minute in 0u32..60) {
            let t = ClockTime::parse_hhmm(&format!("{:02}{:02}", hour, minute)).unwrap();
            prop_assert_eq!(t.minutes(), hour * 60 + minute);
        }

        /// Ordering matches ordering of minutes since midnight
        #[test]
        fn ordering_matches_minutes(a in valid_hhmm(), b in valid_hhmm()) {
            let ta = ClockTime::parse_hhmm(&a).unwrap();
            let tb = ClockTime::parse_hhmm(&b).unwrap();
            prop_assert_eq!(ta.cmp(&tb), ta.minutes().cmp(&tb.minutes()));
        }

        /// Service time accepts exactly 05:00..=23:00
        #[test]
        fn service_window(s in valid_hhmm()) {
            let t = ClockTime::parse_hhmm(&s).unwrap();
            let in_service = (SERVICE_START_MINS..=SERVICE_END_MINS).contains(&t.minutes());
            prop_assert_eq!(ClockTime::parse_service_time(&s).is_ok(), in_service);
        }

        #[test]
        fn invalid_hour_rejected(hour in 24u32..100, minute in 0u32..60) {
            let s = format!("{:02}{:02}", hour, minute);
            prop_assert!(ClockTime::parse_hhmm(&s).is_err());
        }

        #[test]
        fn invalid_minute_rejected(hour in 0u32..24, minute in 60u32..100) {
            let s = format!("{:02}{:02}", hour, minute);
            prop_assert!(ClockTime::parse_hhmm(&s).is_err());
        }
    }
}
