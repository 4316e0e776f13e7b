//! Scenario tests for the itinerary planner.

use super::*;
use crate::domain::{ClockTime, Fare, Route, RouteNum, TerminalName, TravelTime};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn name(s: &str) -> TerminalName {
    TerminalName::parse(s).unwrap()
}

fn time(s: &str) -> ClockTime {
    ClockTime::parse_hhmm(s).unwrap()
}

/// Mock timetable for testing. Unlike a real network it performs no
/// conflict checks, so tests can place departures anywhere.
struct MockTimetable {
    routes: Vec<Arc<Route>>,
    departures: HashMap<RouteNum, Vec<ClockTime>>,
    fail: bool,
    route_reads: AtomicUsize,
}

impl MockTimetable {
    fn new() -> Self {
        Self {
            routes: Vec::new(),
            departures: HashMap::new(),
            fail: false,
            route_reads: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    fn route(
        mut self,
        num: u32,
        from: &str,
        to: &str,
        travel_mins: u32,
        fare: &str,
        leaves: &[&str],
    ) -> Self {
        let num = RouteNum::new(num).unwrap();
        self.routes.push(Arc::new(Route {
            num,
            source: name(from),
            destination: name(to),
            travel_time: TravelTime::new(travel_mins).unwrap(),
            fare: Fare::parse(fare).unwrap(),
        }));
        self.departures
            .insert(num, leaves.iter().map(|t| time(t)).collect());
        self
    }
}

impl Timetable for MockTimetable {
    fn routes(&self) -> Result<Vec<Arc<Route>>, SearchError> {
        self.route_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SearchError::Timetable {
                message: "store unavailable".to_string(),
            });
        }
        Ok(self.routes.clone())
    }

    fn departures(&self, route: RouteNum) -> Result<Vec<ClockTime>, SearchError> {
        Ok(self.departures.get(&route).cloned().unwrap_or_default())
    }
}

fn plan(timetable: &MockTimetable, from: &str, to: &str, start: &str) -> Vec<String> {
    let config = PlannerConfig::default();
    let planner = Planner::new(timetable, &config);
    let request = PlanRequest::parse(from, to, start).unwrap();
    planner
        .plan(&request)
        .unwrap()
        .itineraries
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn single_direct_route() {
    let timetable = MockTimetable::new().route(1, "A", "B", 30, "2.50", &["0800"]);
    assert_eq!(plan(&timetable, "A", "B", "0800"), vec!["1 2.50 30"]);
}

#[test]
fn direct_duration_measured_from_start() {
    // Leaves 20 minutes after the start time, rides 30
    let timetable = MockTimetable::new().route(1, "A", "B", 30, "2.50", &["0820"]);
    assert_eq!(plan(&timetable, "A", "B", "0800"), vec!["1 2.50 50"]);
}

#[test]
fn no_route_gives_empty_result() {
    let timetable = MockTimetable::new().route(1, "A", "B", 30, "2.50", &["0800"]);
    assert!(plan(&timetable, "X", "Y", "0800").is_empty());
}

#[test]
fn first_leg_window_inclusive_both_ends() {
    let timetable =
        MockTimetable::new().route(1, "A", "B", 10, "1", &["0759", "0800", "0900", "0901"]);
    assert_eq!(
        plan(&timetable, "A", "B", "0800"),
        vec!["1 1.00 10", "1 1.00 70"]
    );
}

#[test]
fn connection_measured_between_departures() {
    // Second leg at 0805 leaves before the first arrives (0810) but is
    // still five minutes after its departure.
    let timetable = MockTimetable::new()
        .route(1, "A", "C", 10, "1", &["0800"])
        .route(2, "C", "B", 10, "1", &["0804", "0805"]);

    // (485 - (480 + 10) + 20) + 10
    assert_eq!(plan(&timetable, "A", "B", "0800"), vec!["1 2 2.00 25"]);
}

#[test]
fn third_leg_connection_measured_from_second_departure() {
    // 0824 is four minutes after the second leg leaves; 0825 is five.
    let timetable = MockTimetable::new()
        .route(1, "A", "C", 10, "1", &["0800"])
        .route(2, "C", "D", 5, "1", &["0820"])
        .route(3, "D", "B", 10, "1", &["0824", "0825"]);

    // (500 + 5 - 480 + 20) + 10
    assert_eq!(plan(&timetable, "A", "B", "0800"), vec!["1 2 3 3.00 55"]);
}

#[test]
fn later_legs_not_bound_by_window() {
    let timetable = MockTimetable::new()
        .route(1, "A", "C", 10, "1", &["0800"])
        .route(2, "C", "B", 10, "1", &["1000"]);

    // (600 - 490 + 20) + 10
    assert_eq!(plan(&timetable, "A", "B", "0800"), vec!["1 2 2.00 140"]);
}

#[test]
fn two_transfer_duration_ignores_first_leg() {
    let build = |first_travel| {
        MockTimetable::new()
            .route(1, "A", "C", first_travel, "1", &["0800"])
            .route(2, "C", "D", 15, "1", &["0820"])
            .route(3, "D", "B", 20, "1", &["0840"])
    };

    // (500 + 15 - 480 + 20) + 20
    assert_eq!(plan(&build(10), "A", "B", "0800"), vec!["1 2 3 3.00 75"]);
    assert_eq!(plan(&build(50), "A", "B", "0800"), vec!["1 2 3 3.00 75"]);
}

#[test]
fn transfer_padding_configurable() {
    let timetable = MockTimetable::new()
        .route(1, "A", "C", 10, "1", &["0800"])
        .route(2, "C", "B", 10, "1", &["0815"]);
    let config = PlannerConfig::new(60, 5, 0);
    let planner = Planner::new(&timetable, &config);
    let request = PlanRequest::parse("A", "B", "0800").unwrap();

    let result = planner.plan(&request).unwrap();
    // (495 - 490 + 0) + 10
    assert_eq!(result.itineraries[0].duration_mins(), 15);
}

#[test]
fn equal_durations_ordered_by_last_route() {
    let timetable = MockTimetable::new()
        .route(5, "A", "B", 30, "3", &["0800"])
        .route(1, "A", "C", 10, "1", &["0810"])
        .route(2, "C", "B", 15, "1", &["0815"]);

    // (495 - 500 + 20) + 15 = 30, the same as the direct route; route 2 ends the transfer itinerary
    assert_eq!(
        plan(&timetable, "A", "B", "0800"),
        vec!["1 2 2.00 30", "5 3.00 30"]
    );
}

#[test]
fn all_shapes_merged_by_duration() {
    let timetable = MockTimetable::new()
        .route(1, "A", "B", 90, "5", &["0800"])
        .route(2, "A", "C", 10, "1", &["0805"])
        .route(3, "C", "B", 10, "1", &["0815"])
        .route(4, "C", "D", 10, "1", &["0820"])
        .route(6, "D", "B", 10, "1", &["0830"]);

    // direct: 480 + 90 - 480 = 90
    // 2,3:    (495 - 495 + 20) + 10 = 30
    // 2,4,6:  (500 + 10 - 480 + 20) + 10 = 60
    assert_eq!(
        plan(&timetable, "A", "B", "0800"),
        vec!["2 3 2.00 30", "2 4 6 3.00 60", "1 5.00 90"]
    );
}

#[test]
fn exploration_continues_past_destination() {
    let timetable = MockTimetable::new()
        .route(1, "A", "B", 10, "1", &["0800"])
        .route(2, "B", "C", 10, "1", &["0810"])
        .route(3, "C", "B", 10, "1", &["0820"]);

    // A -> B -> C -> B returns to the destination
    assert_eq!(
        plan(&timetable, "A", "B", "0800"),
        vec!["1 1.00 10", "1 2 3 3.00 50"]
    );
}

#[test]
fn more_than_two_transfers_not_found() {
    let timetable = MockTimetable::new()
        .route(1, "A", "C", 10, "1", &["0800"])
        .route(2, "C", "D", 10, "1", &["0810"])
        .route(3, "D", "E", 10, "1", &["0820"])
        .route(4, "E", "B", 10, "1", &["0830"]);
    assert!(plan(&timetable, "A", "B", "0800").is_empty());
}

#[test]
fn every_departure_combination_listed() {
    let timetable = MockTimetable::new()
        .route(1, "A", "C", 10, "1", &["0800", "0820"])
        .route(2, "C", "B", 10, "1", &["0830", "0850"]);

    // 0800 -> 0830: (510 - 490 + 20) + 10 = 50
    // 0800 -> 0850: (530 - 490 + 20) + 10 = 70
    // 0820 -> 0830: (510 - 510 + 20) + 10 = 30
    // 0820 -> 0850: (530 - 510 + 20) + 10 = 50
    let config = PlannerConfig::default();
    let planner = Planner::new(&timetable, &config);
    let result = planner
        .plan(&PlanRequest::parse("A", "B", "0800").unwrap())
        .unwrap();
    let found: Vec<(i64, String, String)> = result
        .itineraries
        .iter()
        .map(|it| {
            (
                it.duration_mins(),
                it.legs()[0].leaves().to_hhmm(),
                it.legs()[1].leaves().to_hhmm(),
            )
        })
        .collect();
    let expected = [
        (30, "0820", "0830"),
        (50, "0800", "0830"),
        (50, "0820", "0850"),
        (70, "0800", "0850"),
    ]
    .map(|(d, a, b)| (d, a.to_string(), b.to_string()));
    assert_eq!(found, expected);
}

#[test]
fn repeated_searches_identical() {
    let timetable = MockTimetable::new()
        .route(1, "A", "B", 30, "2.5", &["0800", "0830"])
        .route(2, "A", "C", 10, "1", &["0805"])
        .route(3, "C", "B", 10, "1", &["0815", "0845"]);

    let first = plan(&timetable, "A", "B", "0800");
    let second = plan(&timetable, "A", "B", "0800");
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn legs_explored_counted() {
    let timetable = MockTimetable::new()
        .route(1, "A", "C", 10, "1", &["0800"])
        .route(2, "C", "B", 10, "1", &["0810"]);
    let config = PlannerConfig::default();
    let planner = Planner::new(&timetable, &config);
    let result = planner
        .plan(&PlanRequest::parse("A", "B", "0800").unwrap())
        .unwrap();

    assert_eq!(result.legs_explored, 2);
    assert_eq!(result.itineraries.len(), 1);
}

#[test]
fn timetable_read_once_per_search() {
    let timetable = MockTimetable::new().route(1, "A", "B", 30, "2.5", &["0800"]);
    plan(&timetable, "A", "B", "0800");
    assert_eq!(timetable.route_reads.load(Ordering::SeqCst), 1);
}

#[test]
fn timetable_failure_reported() {
    let timetable = MockTimetable::failing();
    let config = PlannerConfig::default();
    let planner = Planner::new(&timetable, &config);
    let request = PlanRequest::parse("A", "B", "0800").unwrap();

    let err = planner.plan(&request).unwrap_err();
    assert!(matches!(err, SearchError::Timetable { .. }));
    assert_eq!(err.to_string(), "failed to read timetable: store unavailable");

    let err = planner.find_routes(&name("A"), &name("B")).unwrap_err();
    assert!(matches!(err, SearchError::Timetable { .. }));
}

#[test]
fn find_routes_through_planner() {
    let timetable = MockTimetable::new()
        .route(1, "A", "B", 30, "2.5", &[])
        .route(2, "A", "C", 10, "1", &[])
        .route(3, "C", "B", 10, "1.25", &[]);
    let config = PlannerConfig::default();
    let planner = Planner::new(&timetable, &config);

    let options = planner.find_routes(&name("A"), &name("B")).unwrap();
    let lines: Vec<String> = options.iter().map(ToString::to_string).collect();
    assert_eq!(lines, vec!["1 2.50", "2 3 2.25"]);
}

#[test]
fn request_start_time_validated() {
    assert!(PlanRequest::parse("A", "B", "0500").is_ok());
    assert!(PlanRequest::parse("A", "B", "2300").is_ok());

    for bad in ["0459", "2301", "2359", "800", "08:00", "abcd"] {
        let err = PlanRequest::parse("A", "B", bad).unwrap_err();
        assert!(
            matches!(err, SearchError::InvalidStartTime(_)),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn request_terminals_validated() {
    let err = PlanRequest::parse("", "B", "0800").unwrap_err();
    assert!(matches!(err, SearchError::InvalidTerminal(_)));
}
