//! Direct and one-transfer route combinations.
//!
//! Answers "which routes, or pairs of routes, connect these two terminals?"
//! without looking at the schedule: a route pair qualifies even if no
//! departures line up.

use std::fmt;

use tracing::debug;

use crate::domain::{Fare, RouteNum, TerminalName};

use super::route_index::RouteIndex;
use super::search::{SearchError, Timetable};

/// One way of getting between two terminals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOption {
    /// A single route
    Direct { route: RouteNum, fare: Fare },

    /// Two routes, changing at `via`
    OneTransfer {
        first: RouteNum,
        second: RouteNum,
        via: TerminalName,
        fare: Fare,
    },
}

impl RouteOption {
    /// Route numbers in riding order.
    pub fn route_nums(&self) -> Vec<RouteNum> {
        match self {
            RouteOption::Direct { route, .. } => vec![*route],
            RouteOption::OneTransfer { first, second, .. } => vec![*first, *second],
        }
    }

    /// Total fare.
    pub fn fare(&self) -> Fare {
        match self {
            RouteOption::Direct { fare, .. } | RouteOption::OneTransfer { fare, .. } => *fare,
        }
    }
}

/// Renders `<route> <fare>` or `<first> <second> <fare>`.
impl fmt::Display for RouteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteOption::Direct { route, fare } => write!(f, "{route} {fare}"),
            RouteOption::OneTransfer {
                first,
                second,
                fare,
                ..
            } => write!(f, "{first} {second} {fare}"),
        }
    }
}

/// All route options between two terminals: direct options first, then
/// one-transfer options, each ascending by route number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteOptions {
    options: Vec<RouteOption>,
}

impl RouteOptions {
    /// Returns true when no route connects the terminals.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Options in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteOption> {
        self.options.iter()
    }
}

/// Find direct and one-transfer route combinations from `source` to
/// `destination`.
///
/// Unknown terminals simply yield no options.
pub fn find_routes<T: Timetable + ?Sized>(
    timetable: &T,
    source: &TerminalName,
    destination: &TerminalName,
) -> Result<RouteOptions, SearchError> {
    let index = RouteIndex::routes_only(timetable)?;

    let direct = index
        .routes_from(source)
        .iter()
        .filter(|r| &r.route.destination == destination)
        .map(|r| RouteOption::Direct {
            route: r.route.num,
            fare: r.route.fare,
        });

    let mut transfers = Vec::new();
    for first in index.routes_from(source) {
        let via = &first.route.destination;
        for second in index.routes_from(via) {
            if &second.route.destination != destination {
                continue;
            }
            transfers.push(RouteOption::OneTransfer {
                first: first.route.num,
                second: second.route.num,
                via: via.clone(),
                fare: first.route.fare + second.route.fare,
            });
        }
    }

    let options: Vec<RouteOption> = direct.chain(transfers).collect();
    debug!(
        %source,
        %destination,
        options = options.len(),
        "found route combinations"
    );

    Ok(RouteOptions { options })
}
