//! Scheduled departures.

use serde::{Deserialize, Serialize};

use super::{ClockTime, RouteNum};

/// One scheduled departure of a route, repeating daily.
///
/// A `(route, leaves)` pair is unique within a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Departure {
    pub route: RouteNum,
    pub leaves: ClockTime,
}

impl Departure {
    /// Create a new departure.
    pub fn new(route: RouteNum, leaves: ClockTime) -> Self {
        Self { route, leaves }
    }
}
