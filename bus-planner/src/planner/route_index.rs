//! Per-query index of outgoing routes.
//!
//! Every search starts by asking the same question over and over: "which
//! routes leave this terminal, and when?" The index answers it with one map
//! lookup instead of a scan of the whole timetable.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{ClockTime, Route, TerminalName};

use super::search::{SearchError, Timetable};

/// A route together with its departures, ascending by time.
#[derive(Debug, Clone)]
pub struct IndexedRoute {
    pub route: Arc<Route>,
    pub departures: Vec<ClockTime>,
}

/// Map from terminal to the routes leaving it.
#[derive(Debug, Default)]
pub struct RouteIndex {
    outgoing: HashMap<TerminalName, Vec<IndexedRoute>>,
}

impl RouteIndex {
    /// Build an index of routes only; departure lists are left empty.
    pub fn routes_only<T: Timetable + ?Sized>(timetable: &T) -> Result<Self, SearchError> {
        Self::build(timetable, false)
    }

    /// Build an index of routes and their departures.
    pub fn with_departures<T: Timetable + ?Sized>(timetable: &T) -> Result<Self, SearchError> {
        Self::build(timetable, true)
    }

    fn build<T: Timetable + ?Sized>(
        timetable: &T,
        include_departures: bool,
    ) -> Result<Self, SearchError> {
        let mut routes = timetable.routes()?;
        routes.sort_by_key(|r| r.num);

        let mut outgoing: HashMap<TerminalName, Vec<IndexedRoute>> = HashMap::new();
        for route in routes {
            let departures = if include_departures {
                let mut times = timetable.departures(route.num)?;
                times.sort();
                times
            } else {
                Vec::new()
            };

            outgoing
                .entry(route.source.clone())
                .or_default()
                .push(IndexedRoute { route, departures });
        }

        Ok(Self { outgoing })
    }

    /// Routes leaving `terminal`, ascending by route number.
    pub fn routes_from(&self, terminal: &TerminalName) -> &[IndexedRoute] {
        self.outgoing
            .get(terminal)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Fare, RouteNum, TravelTime};

    struct FixedTimetable {
        routes: Vec<Arc<Route>>,
        departures: HashMap<RouteNum, Vec<ClockTime>>,
    }

    impl Timetable for FixedTimetable {
        fn routes(&self) -> Result<Vec<Arc<Route>>, SearchError> {
            Ok(self.routes.clone())
        }

        fn departures(&self, route: RouteNum) -> Result<Vec<ClockTime>, SearchError> {
            Ok(self.departures.get(&route).cloned().unwrap_or_default())
        }
    }

    fn name(s: &str) -> TerminalName {
        TerminalName::parse(s).unwrap()
    }

    fn route(num: u32, from: &str, to: &str) -> Arc<Route> {
        Arc::new(Route {
            num: RouteNum::new(num).unwrap(),
            source: name(from),
            destination: name(to),
            travel_time: TravelTime::new(10).unwrap(),
            fare: Fare::parse("1").unwrap(),
        })
    }

    fn time(s: &str) -> ClockTime {
        ClockTime::parse_hhmm(s).unwrap()
    }

    fn timetable() -> FixedTimetable {
        let mut departures = HashMap::new();
        departures.insert(RouteNum::new(1).unwrap(), vec![time("0900"), time("0800")]);
        FixedTimetable {
            // Deliberately out of order
            routes: vec![route(5, "A", "C"), route(1, "A", "B"), route(2, "B", "C")],
            departures,
        }
    }

    #[test]
    fn routes_grouped_by_source_in_number_order() {
        let index = RouteIndex::routes_only(&timetable()).unwrap();

        let from_a: Vec<u32> = index
            .routes_from(&name("A"))
            .iter()
            .map(|r| r.route.num.get())
            .collect();
        assert_eq!(from_a, vec![1, 5]);
        assert_eq!(index.routes_from(&name("B")).len(), 1);
        assert!(index.routes_from(&name("C")).is_empty());
    }

    #[test]
    fn routes_only_skips_departures() {
        let index = RouteIndex::routes_only(&timetable()).unwrap();
        assert!(index.routes_from(&name("A"))[0].departures.is_empty());
    }

    #[test]
    fn departures_sorted() {
        let index = RouteIndex::with_departures(&timetable()).unwrap();
        assert_eq!(
            index.routes_from(&name("A"))[0].departures,
            vec![time("0800"), time("0900")]
        );
    }
}
