//! Departure registration.
//!
//! Validates a proposed departure given as raw command tokens and admits it
//! into the network only if it respects the headway and shared-slot rules.

mod config;
mod conflict;

pub use config::ScheduleConfig;
pub use conflict::{Conflict, check_admissible};

use tracing::debug;

use crate::domain::{ClockTime, Departure, InvalidRouteNum, RouteNum, TimeError};
use crate::store::Network;

/// Error from registering a departure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// Route number is not a positive integer
    #[error(transparent)]
    InvalidRoute(#[from] InvalidRouteNum),

    /// Time is malformed or outside the service day
    #[error(transparent)]
    InvalidTime(#[from] TimeError),

    /// No route with this number exists
    #[error("unknown route {0}")]
    UnknownRoute(RouteNum),

    /// The departure conflicts with the existing schedule
    #[error("schedule conflict: {0}")]
    Conflict(#[from] Conflict),
}

/// Parse raw route-number and time tokens into a departure.
///
/// The time must be a 4-digit "HHMM" string within the service day.
pub fn parse_departure(route_text: &str, time_text: &str) -> Result<Departure, ScheduleError> {
    let route = RouteNum::parse(route_text)?;
    let leaves = ClockTime::parse_service_time(time_text)?;
    Ok(Departure::new(route, leaves))
}

/// Validate and register a departure from raw tokens.
///
/// Any failure leaves the network unchanged.
pub fn register_departure(
    network: &mut Network,
    route_text: &str,
    time_text: &str,
    config: &ScheduleConfig,
) -> Result<Departure, ScheduleError> {
    let departure = parse_departure(route_text, time_text).inspect_err(|e| {
        debug!(route = route_text, time = time_text, error = %e, "rejected departure input");
    })?;
    network.register_departure(departure, config)?;
    Ok(departure)
}
