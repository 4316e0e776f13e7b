//! Domain types for the bus network planner.
//!
//! This module contains the core domain model types that represent
//! validated network data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod departure;
mod error;
mod itinerary;
mod route;
mod terminal;
mod time;

pub use departure::Departure;
pub use error::DomainError;
pub use itinerary::{Itinerary, Leg, MAX_LEGS};
pub use route::{Fare, InvalidFare, InvalidRouteNum, InvalidTravelTime, Route, RouteNum, TravelTime};
pub use terminal::{InvalidDistrict, InvalidTerminalName, Terminal, TerminalName};
pub use time::{ClockTime, SERVICE_END_MINS, SERVICE_START_MINS, TimeError};
