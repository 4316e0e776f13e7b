//! In-memory entity store for the bus network.
//!
//! `Network` owns terminals, routes and departures. It is the only place
//! departures are inserted, and insertion runs the full conflict check
//! under `&mut self`, so check-then-insert cannot interleave with another
//! writer.

mod snapshot;

pub use snapshot::NetworkSnapshot;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{ClockTime, Departure, Route, RouteNum, Terminal, TerminalName};
use crate::planner::{SearchError, Timetable};
use crate::schedule::{ScheduleConfig, ScheduleError, check_admissible};

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A terminal with this name already exists
    #[error("terminal {0} already exists")]
    DuplicateTerminal(TerminalName),

    /// Referenced terminal does not exist
    #[error("unknown terminal {0}")]
    UnknownTerminal(TerminalName),

    /// A route with this number already exists
    #[error("route {0} already exists")]
    DuplicateRoute(RouteNum),

    /// A departure in a snapshot could not be admitted
    #[error("invalid departure in snapshot: {0}")]
    Departure(#[from] ScheduleError),

    /// Snapshot file could not be read or written
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file is not valid JSON for a network
    #[error("snapshot format error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A terminal together with the routes that use it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalSummary {
    pub terminal: Terminal,
    /// Routes leaving this terminal, ascending.
    pub departing: Vec<RouteNum>,
    /// Routes arriving at this terminal, ascending.
    pub arriving: Vec<RouteNum>,
}

/// Route counts for one district.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictSummary {
    pub district: String,
    /// Number of routes whose source terminal is in the district.
    pub departing: usize,
    /// Number of routes whose destination terminal is in the district.
    pub arriving: usize,
}

/// The bus network: terminals, routes and the daily schedule.
#[derive(Debug, Default, Clone)]
pub struct Network {
    terminals: BTreeMap<TerminalName, Terminal>,
    routes: BTreeMap<RouteNum, Arc<Route>>,
    departures: BTreeMap<RouteNum, BTreeSet<ClockTime>>,
    /// Which route occupies each departure minute.
    slots: BTreeMap<ClockTime, RouteNum>,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a terminal. Names must be unique.
    pub fn add_terminal(&mut self, terminal: Terminal) -> Result<(), StoreError> {
        if self.terminals.contains_key(&terminal.name) {
            return Err(StoreError::DuplicateTerminal(terminal.name));
        }
        info!(terminal = %terminal.name, district = %terminal.district, "added terminal");
        self.terminals.insert(terminal.name.clone(), terminal);
        Ok(())
    }

    /// Add a route. Route numbers must be unique and both terminals must exist.
    pub fn add_route(&mut self, route: Route) -> Result<(), StoreError> {
        if self.routes.contains_key(&route.num) {
            return Err(StoreError::DuplicateRoute(route.num));
        }
        for terminal in [&route.source, &route.destination] {
            if !self.terminals.contains_key(terminal) {
                return Err(StoreError::UnknownTerminal(terminal.clone()));
            }
        }
        info!(
            route = %route.num,
            source = %route.source,
            destination = %route.destination,
            "added route"
        );
        self.routes.insert(route.num, Arc::new(route));
        Ok(())
    }

    /// Admit a departure if it respects the schedule rules, then insert it.
    ///
    /// Fails without changing anything if the route is unknown, another
    /// departure of the route is within the headway, or any route already
    /// leaves at the same minute.
    pub fn register_departure(
        &mut self,
        departure: Departure,
        config: &ScheduleConfig,
    ) -> Result<(), ScheduleError> {
        let Departure { route, leaves } = departure;

        if !self.routes.contains_key(&route) {
            debug!(%route, "departure rejected: unknown route");
            return Err(ScheduleError::UnknownRoute(route));
        }

        let existing = self.departures(route);
        let slot_owner = self.slots.get(&leaves).copied();
        check_admissible(route, leaves, existing, slot_owner, config).inspect_err(|conflict| {
            debug!(%route, %leaves, %conflict, "departure rejected");
        })?;

        self.departures.entry(route).or_default().insert(leaves);
        self.slots.insert(leaves, route);
        info!(%route, %leaves, "registered departure");
        Ok(())
    }

    /// Remove every departure, route and terminal.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.departures.clear();
        self.routes.clear();
        self.terminals.clear();
        info!("cleared network");
    }

    /// Look up a terminal by name.
    pub fn terminal(&self, name: &TerminalName) -> Option<&Terminal> {
        self.terminals.get(name)
    }

    /// Look up a route by number.
    pub fn route(&self, num: RouteNum) -> Option<&Arc<Route>> {
        self.routes.get(&num)
    }

    /// All terminals, ascending by name.
    pub fn terminals(&self) -> impl Iterator<Item = &Terminal> {
        self.terminals.values()
    }

    /// All routes, ascending by number.
    pub fn routes(&self) -> impl Iterator<Item = &Arc<Route>> {
        self.routes.values()
    }

    /// Routes whose source is `terminal`, ascending by number.
    pub fn routes_from<'a>(
        &'a self,
        terminal: &'a TerminalName,
    ) -> impl Iterator<Item = &'a Arc<Route>> + 'a {
        self.routes.values().filter(move |r| &r.source == terminal)
    }

    /// Routes whose destination is `terminal`, ascending by number.
    pub fn routes_to<'a>(
        &'a self,
        terminal: &'a TerminalName,
    ) -> impl Iterator<Item = &'a Arc<Route>> + 'a {
        self.routes.values().filter(move |r| &r.destination == terminal)
    }

    /// Departure times of a route, ascending.
    pub fn departures(&self, route: RouteNum) -> impl Iterator<Item = ClockTime> + '_ {
        self.departures
            .get(&route)
            .into_iter()
            .flat_map(|times| times.iter().copied())
    }

    /// Every departure on every route, ordered by route then time.
    pub fn all_departures(&self) -> impl Iterator<Item = Departure> + '_ {
        self.departures
            .iter()
            .flat_map(|(route, times)| times.iter().map(|t| Departure::new(*route, *t)))
    }

    /// The route leaving at exactly `time`, if any.
    pub fn departure_at(&self, time: ClockTime) -> Option<RouteNum> {
        self.slots.get(&time).copied()
    }

    /// Total number of departures.
    pub fn departure_count(&self) -> usize {
        self.slots.len()
    }

    /// Describe a terminal and the routes that use it.
    pub fn terminal_summary(&self, name: &TerminalName) -> Option<TerminalSummary> {
        let terminal = self.terminals.get(name)?.clone();
        let departing = self.routes_from(name).map(|r| r.num).collect();
        let arriving = self.routes_to(name).map(|r| r.num).collect();
        Some(TerminalSummary {
            terminal,
            departing,
            arriving,
        })
    }

    /// Route counts for every district, ascending by district name.
    pub fn district_summaries(&self) -> Vec<DistrictSummary> {
        let mut by_district: BTreeMap<&str, DistrictSummary> = BTreeMap::new();

        for terminal in self.terminals.values() {
            by_district
                .entry(terminal.district.as_str())
                .or_insert_with(|| DistrictSummary {
                    district: terminal.district.clone(),
                    departing: 0,
                    arriving: 0,
                });
        }

        let district_of = |name: &TerminalName| self.terminals.get(name).map(|t| t.district.as_str());

        for route in self.routes.values() {
            if let Some(summary) = district_of(&route.source).and_then(|d| by_district.get_mut(d)) {
                summary.departing += 1;
            }
            if let Some(summary) =
                district_of(&route.destination).and_then(|d| by_district.get_mut(d))
            {
                summary.arriving += 1;
            }
        }

        by_district.into_values().collect()
    }
}

impl Timetable for Network {
    fn routes(&self) -> Result<Vec<Arc<Route>>, SearchError> {
        Ok(self.routes.values().cloned().collect())
    }

    fn departures(&self, route: RouteNum) -> Result<Vec<ClockTime>, SearchError> {
        Ok(Network::departures(self, route).collect())
    }
}
