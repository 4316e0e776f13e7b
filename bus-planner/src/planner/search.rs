//! Time-windowed itinerary search.
//!
//! Enumerates every chain of one to three legs from a source terminal to a
//! destination terminal whose first leg departs inside the search window,
//! then ranks them by duration.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    ClockTime, DomainError, InvalidTerminalName, Itinerary, Leg, Route, RouteNum, TerminalName,
    TimeError,
};

use super::config::PlannerConfig;
use super::direct::{self, RouteOptions};
use super::rank::{rank_itineraries, sort_by_departures};
use super::route_index::{IndexedRoute, RouteIndex};

/// Error from itinerary search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Start time was malformed or outside the service day
    #[error("invalid start time: {0}")]
    InvalidStartTime(#[from] TimeError),

    /// Source or destination was not a valid terminal name
    #[error("invalid terminal: {0}")]
    InvalidTerminal(#[from] InvalidTerminalName),

    /// The timetable could not be read
    #[error("failed to read timetable: {message}")]
    Timetable { message: String },

    /// A candidate itinerary was malformed
    #[error("malformed itinerary: {0}")]
    Itinerary(#[from] DomainError),
}

/// Read access to routes and their departures.
///
/// The planner only needs these two queries, so tests can supply a fixed
/// timetable instead of a full network.
pub trait Timetable {
    /// All routes in the network.
    fn routes(&self) -> Result<Vec<Arc<Route>>, SearchError>;

    /// Departure times of one route.
    fn departures(&self, route: RouteNum) -> Result<Vec<ClockTime>, SearchError>;
}

/// Request for an itinerary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    pub source: TerminalName,
    pub destination: TerminalName,
    /// Earliest departure of the first leg.
    pub start: ClockTime,
}

impl PlanRequest {
    /// Create a new plan request.
    pub fn new(source: TerminalName, destination: TerminalName, start: ClockTime) -> Self {
        Self {
            source,
            destination,
            start,
        }
    }

    /// Parse a request from raw text tokens.
    ///
    /// The start time must be a four-digit `HHMM` inside the service day.
    pub fn parse(source: &str, destination: &str, start: &str) -> Result<Self, SearchError> {
        Ok(Self {
            source: TerminalName::parse(source)?,
            destination: TerminalName::parse(destination)?,
            start: ClockTime::parse_service_time(start)?,
        })
    }
}

/// Result of an itinerary search.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// Found itineraries, ranked best-first.
    pub itineraries: Vec<Itinerary>,

    /// Number of legs considered during enumeration.
    pub legs_explored: usize,
}

impl SearchResult {
    /// Returns true if no itinerary was found.
    pub fn is_empty(&self) -> bool {
        self.itineraries.is_empty()
    }
}

/// Itinerary planner over a timetable.
pub struct Planner<'a, T: Timetable + ?Sized> {
    timetable: &'a T,
    config: &'a PlannerConfig,
}

impl<'a, T: Timetable + ?Sized> Planner<'a, T> {
    /// Create a new planner.
    pub fn new(timetable: &'a T, config: &'a PlannerConfig) -> Self {
        Self { timetable, config }
    }

    /// Direct and one-transfer route combinations, ignoring the schedule.
    pub fn find_routes(
        &self,
        source: &TerminalName,
        destination: &TerminalName,
    ) -> Result<RouteOptions, SearchError> {
        direct::find_routes(self.timetable, source, destination)
    }

    /// Search for itineraries with up to two transfers.
    pub fn plan(&self, request: &PlanRequest) -> Result<SearchResult, SearchError> {
        let index = RouteIndex::with_departures(self.timetable)?;
        let mut search = Enumeration {
            index: &index,
            config: self.config,
            destination: &request.destination,
            start: i64::from(request.start.minutes()),
            direct: Vec::new(),
            one_transfer: Vec::new(),
            two_transfer: Vec::new(),
            legs_explored: 0,
        };
        search.run(&request.source)?;

        let Enumeration {
            mut direct,
            mut one_transfer,
            mut two_transfer,
            legs_explored,
            ..
        } = search;

        debug!(
            source = %request.source,
            destination = %request.destination,
            start = %request.start,
            direct = direct.len(),
            one_transfer = one_transfer.len(),
            two_transfer = two_transfer.len(),
            legs_explored,
            "itinerary search complete"
        );

        sort_by_departures(&mut direct);
        sort_by_departures(&mut one_transfer);
        sort_by_departures(&mut two_transfer);

        let mut itineraries = direct;
        itineraries.append(&mut one_transfer);
        itineraries.append(&mut two_transfer);

        Ok(SearchResult {
            itineraries: rank_itineraries(itineraries),
            legs_explored,
        })
    }
}

/// Working state of one search.
struct Enumeration<'q> {
    index: &'q RouteIndex,
    config: &'q PlannerConfig,
    destination: &'q TerminalName,
    start: i64,
    direct: Vec<Itinerary>,
    one_transfer: Vec<Itinerary>,
    two_transfer: Vec<Itinerary>,
    legs_explored: usize,
}

impl Enumeration<'_> {
    fn run(&mut self, source: &TerminalName) -> Result<(), SearchError> {
        let index = self.index;
        let window_end = self.start + self.config.window_mins;

        for first in index.routes_from(source) {
            for &leaves in &first.departures {
                let minutes = i64::from(leaves.minutes());
                if minutes < self.start || minutes > window_end {
                    continue;
                }
                self.legs_explored += 1;
                let leg = Leg::new(first.route.clone(), leaves);

                if first.route.destination == *self.destination {
                    let duration = direct_duration(self.start, &leg);
                    self.direct.push(Itinerary::new(vec![leg.clone()], duration)?);
                }

                // Keep going past the destination: a longer chain may still
                // come back to it.
                self.explore_second(&leg)?;
            }
        }
        Ok(())
    }

    fn explore_second(&mut self, first: &Leg) -> Result<(), SearchError> {
        let index = self.index;
        for second in index.routes_from(first.destination()) {
            for leg in connecting_legs(second, first, self.config) {
                self.legs_explored += 1;

                if second.route.destination == *self.destination {
                    let duration = one_transfer_duration(first, &leg, self.config);
                    self.one_transfer
                        .push(Itinerary::new(vec![first.clone(), leg.clone()], duration)?);
                }

                self.explore_third(first, &leg)?;
            }
        }
        Ok(())
    }

    fn explore_third(&mut self, first: &Leg, second: &Leg) -> Result<(), SearchError> {
        let index = self.index;
        for third in index.routes_from(second.destination()) {
            if third.route.destination != *self.destination {
                continue;
            }
            for leg in connecting_legs(third, second, self.config) {
                self.legs_explored += 1;
                let duration = two_transfer_duration(self.start, second, &leg, self.config);
                self.two_transfer.push(Itinerary::new(
                    vec![first.clone(), second.clone(), leg],
                    duration,
                )?);
            }
        }
        Ok(())
    }
}

/// Legs on `next` that leave at least the minimum connection after `prev`
/// leaves.
fn connecting_legs<'r>(
    next: &'r IndexedRoute,
    prev: &Leg,
    config: &PlannerConfig,
) -> impl Iterator<Item = Leg> + use<'r> {
    let earliest = prev.leave_minutes() + config.min_connection_mins;
    next.departures
        .iter()
        .filter(move |t| i64::from(t.minutes()) >= earliest)
        .map(move |&t| Leg::new(next.route.clone(), t))
}

/// Arrival of the only leg, measured from the start time.
fn direct_duration(start: i64, leg: &Leg) -> i64 {
    leg.arrival_minutes() - start
}

/// Time from the first leg's arrival to the second leg's arrival, plus the
/// transfer padding.
fn one_transfer_duration(first: &Leg, second: &Leg, config: &PlannerConfig) -> i64 {
    second.leave_minutes() - first.arrival_minutes()
        + config.transfer_padding_mins
        + i64::from(second.route().travel_time.minutes())
}

/// Second leg's arrival measured from the start time, plus the transfer
/// padding and the third leg's travel time. The first leg does not
/// contribute.
fn two_transfer_duration(start: i64, second: &Leg, third: &Leg, config: &PlannerConfig) -> i64 {
    second.arrival_minutes() - start
        + config.transfer_padding_mins
        + i64::from(third.route().travel_time.minutes())
}
