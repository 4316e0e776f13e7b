//! Bus network itinerary planner.
//!
//! Keeps a network of terminals, routes and daily departures, admits new
//! departures only when they respect the schedule rules, and answers two
//! questions: which routes connect two terminals, and which scheduled
//! rides (with up to two transfers) get from one to the other soon after a
//! given time.

pub mod cli;
pub mod domain;
pub mod planner;
pub mod schedule;
pub mod store;
pub mod web;
