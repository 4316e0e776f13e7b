//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Itinerary, Leg, Route, RouteNum};
use crate::planner::RouteOption;
use crate::store::{DistrictSummary, TerminalSummary};

/// Request to add a terminal.
#[derive(Debug, Deserialize)]
pub struct CreateTerminalRequest {
    pub name: String,
    pub district: String,
}

/// A terminal and the routes that use it.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TerminalResult {
    pub name: String,
    pub district: String,

    /// Routes leaving this terminal, ascending
    pub departing: Vec<u32>,

    /// Routes arriving at this terminal, ascending
    pub arriving: Vec<u32>,
}

/// Request to add a route.
#[derive(Debug, Deserialize)]
pub struct CreateRouteRequest {
    pub route: u32,
    pub source: String,
    pub destination: String,

    /// Travel time in minutes
    pub travel_time: u32,

    /// Fare as a decimal string, e.g. "2.50"
    pub fare: String,
}

/// A route and its departures.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RouteResult {
    pub route: u32,
    pub source: String,
    pub destination: String,
    pub travel_time: u32,
    pub fare: String,

    /// Leave times as H:MM, ascending
    pub departures: Vec<String>,
}

/// Request to add a departure to a route.
#[derive(Debug, Deserialize)]
pub struct CreateDepartureRequest {
    /// Leave time as a 4-digit HHMM string
    pub time: String,
}

/// An accepted departure.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DepartureResult {
    pub route: u32,
    pub leaves: String,
}

/// Route counts for one district.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DistrictResult {
    pub district: String,
    pub departing: usize,
    pub arriving: usize,
}

/// Response listing all districts.
#[derive(Debug, Serialize)]
pub struct DistrictsResponse {
    pub districts: Vec<DistrictResult>,
}

/// Query for direct and one-transfer routes.
#[derive(Debug, Deserialize)]
pub struct FindRoutesQuery {
    pub source: String,
    pub destination: String,
}

/// One direct or one-transfer option.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RouteOptionResult {
    /// Route numbers in riding order
    pub routes: Vec<u32>,

    /// Transfer terminal, for two-route options
    pub via: Option<String>,

    pub fare: String,
}

/// Response for a route combination search.
#[derive(Debug, Serialize)]
pub struct FindRoutesResponse {
    pub options: Vec<RouteOptionResult>,
}

/// Query for a time-windowed itinerary search.
#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    pub source: String,
    pub destination: String,

    /// Earliest departure as a 4-digit HHMM string
    pub time: String,
}

/// One leg of an itinerary.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct LegResult {
    pub route: u32,
    pub source: String,
    pub destination: String,

    /// Leave time as H:MM
    pub leaves: String,

    pub travel_time: u32,
}

/// An itinerary option.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ItineraryResult {
    pub legs: Vec<LegResult>,
    pub fare: String,
    pub duration_mins: i64,
    pub transfers: usize,
}

/// Response for itinerary planning.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    /// Itineraries, best first
    pub itineraries: Vec<ItineraryResult>,

    /// Number of legs considered
    pub legs_explored: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

fn route_nums(nums: &[RouteNum]) -> Vec<u32> {
    nums.iter().map(RouteNum::get).collect()
}

impl TerminalResult {
    /// Create from a store terminal summary.
    pub fn from_summary(summary: &TerminalSummary) -> Self {
        Self {
            name: summary.terminal.name.to_string(),
            district: summary.terminal.district.clone(),
            departing: route_nums(&summary.departing),
            arriving: route_nums(&summary.arriving),
        }
    }
}

impl RouteResult {
    /// Create from a route and its leave times.
    pub fn from_route(route: &Route, departures: impl IntoIterator<Item = String>) -> Self {
        Self {
            route: route.num.get(),
            source: route.source.to_string(),
            destination: route.destination.to_string(),
            travel_time: route.travel_time.minutes(),
            fare: route.fare.to_string(),
            departures: departures.into_iter().collect(),
        }
    }
}

impl DistrictResult {
    /// Create from a store district summary.
    pub fn from_summary(summary: &DistrictSummary) -> Self {
        Self {
            district: summary.district.clone(),
            departing: summary.departing,
            arriving: summary.arriving,
        }
    }
}

impl RouteOptionResult {
    /// Create from a planner route option.
    pub fn from_option(option: &RouteOption) -> Self {
        let via = match option {
            RouteOption::Direct { .. } => None,
            RouteOption::OneTransfer { via, .. } => Some(via.to_string()),
        };
        Self {
            routes: route_nums(&option.route_nums()),
            via,
            fare: option.fare().to_string(),
        }
    }
}

impl LegResult {
    /// Create from a domain Leg.
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            route: leg.route_num().get(),
            source: leg.source().to_string(),
            destination: leg.destination().to_string(),
            leaves: leg.leaves().to_string(),
            travel_time: leg.route().travel_time.minutes(),
        }
    }
}

impl ItineraryResult {
    /// Create from a domain Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            legs: itinerary.legs().iter().map(LegResult::from_leg).collect(),
            fare: itinerary.fare().to_string(),
            duration_mins: itinerary.duration_mins(),
            transfers: itinerary.transfer_count(),
        }
    }
}
