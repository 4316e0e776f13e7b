//! Route types: route numbers, fares, travel times.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use super::TerminalName;

/// Largest fare a route may carry, in cents.
const MAX_FARE_CENTS: u32 = 99_999;

/// Error returned when parsing an invalid route number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route number: {reason}")]
pub struct InvalidRouteNum {
    reason: &'static str,
}

/// Error returned when parsing an invalid fare.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fare: {reason}")]
pub struct InvalidFare {
    reason: &'static str,
}

/// Error returned when parsing an invalid travel time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid travel time: {reason}")]
pub struct InvalidTravelTime {
    reason: &'static str,
}

/// A positive route number.
///
/// # Examples
///
/// ```
/// use bus_planner::domain::RouteNum;
///
/// assert_eq!(RouteNum::parse("12").unwrap().get(), 12);
/// assert!(RouteNum::parse("0").is_err());
/// assert!(RouteNum::parse("-3").is_err());
/// assert!(RouteNum::parse("abc").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RouteNum(u32);

impl RouteNum {
    /// Create a route number, rejecting zero.
    pub fn new(n: u32) -> Result<Self, InvalidRouteNum> {
        if n == 0 {
            return Err(InvalidRouteNum {
                reason: "must be positive",
            });
        }
        Ok(Self(n))
    }

    /// Parse a route number from a decimal string.
    pub fn parse(s: &str) -> Result<Self, InvalidRouteNum> {
        let n: i64 = s.parse().map_err(|_| InvalidRouteNum {
            reason: "must be an integer",
        })?;
        if n <= 0 {
            return Err(InvalidRouteNum {
                reason: "must be positive",
            });
        }
        let n = u32::try_from(n).map_err(|_| InvalidRouteNum {
            reason: "too large",
        })?;
        Ok(Self(n))
    }

    /// Returns the numeric value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for RouteNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteNum({})", self.0)
    }
}

impl fmt::Display for RouteNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for RouteNum {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let n = u32::deserialize(deserializer)?;
        RouteNum::new(n).map_err(serde::de::Error::custom)
    }
}

/// A currency amount in whole cents.
///
/// Parsed fares must be positive, have at most two decimal places and be at
/// most 999.99. Sums of fares (itinerary totals) may exceed that bound.
///
/// # Examples
///
/// ```
/// use bus_planner::domain::Fare;
///
/// let fare = Fare::parse("2.5").unwrap();
/// assert_eq!(fare.cents(), 250);
/// assert_eq!(fare.to_string(), "2.50");
///
/// assert!(Fare::parse("0").is_err());
/// assert!(Fare::parse("1.234").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fare(u32);

impl Fare {
    /// Create a fare from a number of cents.
    pub fn from_cents(cents: u32) -> Result<Self, InvalidFare> {
        if cents == 0 {
            return Err(InvalidFare {
                reason: "must be greater than zero",
            });
        }
        if cents > MAX_FARE_CENTS {
            return Err(InvalidFare {
                reason: "must be at most 999.99",
            });
        }
        Ok(Self(cents))
    }

    /// Parse a fare from a decimal string such as "3", "2.5" or "2.50".
    pub fn parse(s: &str) -> Result<Self, InvalidFare> {
        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(InvalidFare {
                reason: "must be a decimal number",
            });
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(InvalidFare {
                reason: "must be a decimal number",
            });
        }
        if frac.len() > 2 {
            return Err(InvalidFare {
                reason: "at most two decimal places",
            });
        }
        if whole.len() > 3 && whole.trim_start_matches('0').len() > 3 {
            return Err(InvalidFare {
                reason: "must be at most 999.99",
            });
        }

        let whole: u32 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| InvalidFare {
                reason: "must be a decimal number",
            })?
        };
        let frac: u32 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u32>().unwrap_or(0) * 10,
            _ => frac.parse().unwrap_or(0),
        };

        Self::from_cents(whole * 100 + frac)
    }

    /// Returns the fare in cents.
    pub fn cents(&self) -> u32 {
        self.0
    }
}

impl Add for Fare {
    type Output = Fare;

    fn add(self, rhs: Fare) -> Fare {
        Fare(self.0 + rhs.0)
    }
}

impl Sum for Fare {
    fn sum<I: Iterator<Item = Fare>>(iter: I) -> Fare {
        iter.fold(Fare::default(), Add::add)
    }
}

impl fmt::Debug for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fare({self})")
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Fare {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Fare {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Fare::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Travel time of a route in whole minutes, always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TravelTime(u32);

impl TravelTime {
    /// Create a travel time, rejecting zero.
    pub fn new(minutes: u32) -> Result<Self, InvalidTravelTime> {
        if minutes == 0 {
            return Err(InvalidTravelTime {
                reason: "must be greater than zero",
            });
        }
        Ok(Self(minutes))
    }

    /// Parse a travel time from a decimal string of minutes.
    pub fn parse(s: &str) -> Result<Self, InvalidTravelTime> {
        let n: i64 = s.parse().map_err(|_| InvalidTravelTime {
            reason: "must be an integer number of minutes",
        })?;
        if n <= 0 {
            return Err(InvalidTravelTime {
                reason: "must be greater than zero",
            });
        }
        let n = u32::try_from(n).map_err(|_| InvalidTravelTime { reason: "too large" })?;
        Ok(Self(n))
    }

    /// Returns the travel time in minutes.
    pub fn minutes(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TravelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for TravelTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let n = u32::deserialize(deserializer)?;
        TravelTime::new(n).map_err(serde::de::Error::custom)
    }
}

/// A bus route between two terminals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub num: RouteNum,
    pub source: TerminalName,
    pub destination: TerminalName,
    pub travel_time: TravelTime,
    pub fare: Fare,
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Display then parse returns the same fare
        #[test]
        fn fare_display_roundtrip(cents in 1u32..=MAX_FARE_CENTS) {
            let fare = Fare::from_cents(cents).unwrap();
            prop_assert_eq!(Fare::parse(&fare.to_string()).unwrap(), fare);
        }

        /// Positive integers always parse as route numbers
        #[test]
        fn route_num_positive(n in 1u32..) {
            prop_assert_eq!(RouteNum::parse(&n.to_string()).unwrap().get(), n);
        }

        /// Fares always render exactly two decimals
        #[test]
        fn fare_two_decimals(cents in 1u32..=MAX_FARE_CENTS) {
            let s = Fare::from_cents(cents).unwrap().to_string();
            let (_, frac) = s.split_once('.').unwrap();
            prop_assert_eq!(frac.len(), 2);
        }
    }
}
