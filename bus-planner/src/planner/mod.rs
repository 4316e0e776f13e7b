//! Itinerary planning over the bus network.
//!
//! Two questions are answered here:
//!
//! - Which routes, or pairs of routes, connect two terminals? This looks
//!   only at the route map.
//! - Which scheduled rides, with up to two transfers, get from one terminal
//!   to another when the first bus leaves within a window after a given
//!   time? Results are ranked by duration.
//!
//! Both read the network through the [`Timetable`] trait and build a
//! terminal-to-outgoing-routes index once per query.

mod config;
mod direct;
mod rank;
mod route_index;
mod search;

#[cfg(test)]
mod search_tests;

pub use config::PlannerConfig;
pub use direct::{RouteOption, RouteOptions, find_routes};
pub use rank::{rank_itineraries, sort_by_departures};
pub use route_index::{IndexedRoute, RouteIndex};
pub use search::{PlanRequest, Planner, SearchError, SearchResult, Timetable};
