//! Itinerary types.
//!
//! An `Itinerary` is a chain of one to three legs from an origin terminal to
//! a destination terminal, annotated with its total fare and a duration.

use std::fmt;
use std::sync::Arc;

use super::{ClockTime, DomainError, Fare, Route, RouteNum, TerminalName};

/// Maximum number of legs in an itinerary (two transfers).
pub const MAX_LEGS: usize = 3;

/// One scheduled ride on one route.
///
/// Uses `Arc<Route>` so candidate itineraries can share routes cheaply
/// during enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    route: Arc<Route>,
    leaves: ClockTime,
}

impl Leg {
    /// Create a leg boarding `route` at `leaves`.
    pub fn new(route: Arc<Route>, leaves: ClockTime) -> Self {
        Self { route, leaves }
    }

    /// Returns the route ridden on this leg.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Returns the route number.
    pub fn route_num(&self) -> RouteNum {
        self.route.num
    }

    /// Returns the boarding terminal.
    pub fn source(&self) -> &TerminalName {
        &self.route.source
    }

    /// Returns the alighting terminal.
    pub fn destination(&self) -> &TerminalName {
        &self.route.destination
    }

    /// Returns the departure time.
    pub fn leaves(&self) -> ClockTime {
        self.leaves
    }

    /// Departure in minutes since midnight.
    pub fn leave_minutes(&self) -> i64 {
        i64::from(self.leaves.minutes())
    }

    /// Arrival in minutes since midnight. May run past midnight for late legs.
    pub fn arrival_minutes(&self) -> i64 {
        self.leave_minutes() + i64::from(self.route.travel_time.minutes())
    }
}

/// A complete itinerary between two terminals.
///
/// # Invariants
///
/// - Between one and three legs
/// - Consecutive legs connect (destination of one = source of the next)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    legs: Vec<Leg>,
    duration_mins: i64,
}

impl Itinerary {
    /// Constructs an itinerary from legs and its computed duration.
    ///
    /// The duration is supplied by the caller because the planner uses a
    /// different formula per itinerary shape.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there are no legs, more than three legs, or
    /// consecutive legs don't share a terminal.
    pub fn new(legs: Vec<Leg>, duration_mins: i64) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }
        if legs.len() > MAX_LEGS {
            return Err(DomainError::TooManyLegs(legs.len()));
        }

        for window in legs.windows(2) {
            let prev_dest = window[0].destination();
            let next_source = window[1].source();
            if prev_dest != next_source {
                return Err(DomainError::TerminalsNotConnected(
                    prev_dest.clone(),
                    next_source.clone(),
                ));
            }
        }

        Ok(Self {
            legs,
            duration_mins,
        })
    }

    /// Returns all legs in order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Returns the number of transfers (legs - 1).
    pub fn transfer_count(&self) -> usize {
        self.legs.len() - 1
    }

    /// Returns the route numbers in riding order.
    pub fn route_nums(&self) -> impl Iterator<Item = RouteNum> + '_ {
        self.legs.iter().map(Leg::route_num)
    }

    /// Returns the route of the leg nearest the destination.
    pub fn last_route(&self) -> RouteNum {
        // Non-empty by construction
        self.legs[self.legs.len() - 1].route_num()
    }

    /// Returns the sum of the fares of all legs.
    pub fn fare(&self) -> Fare {
        self.legs.iter().map(|leg| leg.route().fare).sum()
    }

    /// Returns the itinerary duration in minutes.
    pub fn duration_mins(&self) -> i64 {
        self.duration_mins
    }
}

/// Renders `<route>... <fare> <duration>`, e.g. `1 4 5.00 65`.
impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for route in self.route_nums() {
            write!(f, "{route} ")?;
        }
        write!(f, "{} {}", self.fare(), self.duration_mins)
    }
}
