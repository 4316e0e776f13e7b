//! Schedule conflict detection.
//!
//! A proposed departure conflicts with the schedule when another departure
//! of the same route leaves within the headway, or when any departure on
//! any route already leaves at exactly the same time.

use crate::domain::{ClockTime, RouteNum};

use super::config::ScheduleConfig;

/// Why a proposed departure cannot be admitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Conflict {
    /// Another departure of the same route is too close
    #[error("route {route} already leaves at {existing}, within {headway_mins} minutes of {proposed}")]
    Headway {
        route: RouteNum,
        existing: ClockTime,
        proposed: ClockTime,
        headway_mins: u32,
    },

    /// Some route already leaves at this exact time
    #[error("route {route} already leaves at {time}")]
    SlotTaken { route: RouteNum, time: ClockTime },
}

/// Decide whether `proposed` may be added to `route`.
///
/// `route_departures` are the existing departures of the same route and
/// `slot_owner` is the route (if any) already leaving at `proposed`.
/// The headway rule is checked before the shared-slot rule.
pub fn check_admissible(
    route: RouteNum,
    proposed: ClockTime,
    route_departures: impl IntoIterator<Item = ClockTime>,
    slot_owner: Option<RouteNum>,
    config: &ScheduleConfig,
) -> Result<(), Conflict> {
    let headway = config.headway();

    if let Some(existing) = route_departures
        .into_iter()
        .find(|existing| existing.distance(proposed) <= headway)
    {
        return Err(Conflict::Headway {
            route,
            existing,
            proposed,
            headway_mins: config.headway_mins,
        });
    }

    if let Some(owner) = slot_owner {
        return Err(Conflict::SlotTaken {
            route: owner,
            time: proposed,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> ClockTime {
        ClockTime::parse_hhmm(s).unwrap()
    }

    fn route(n: u32) -> RouteNum {
        RouteNum::new(n).unwrap()
    }

    #[test]
    fn empty_schedule_admits() {
        let config = ScheduleConfig::default();
        assert!(check_admissible(route(1), time("0800"), [], None, &config).is_ok());
    }

    #[test]
    fn within_headway_rejected() {
        let config = ScheduleConfig::default();
        let existing = [time("0800")];

        for proposed in ["0746", "0750", "0800", "0810", "0814"] {
            let result = check_admissible(route(1), time(proposed), existing, None, &config);
            assert!(
                matches!(result, Err(Conflict::Headway { .. })),
                "{proposed} should conflict"
            );
        }
    }

    #[test]
    fn outside_headway_admitted() {
        let config = ScheduleConfig::default();
        let existing = [time("0800")];

        for proposed in ["0745", "0815", "1200"] {
            assert!(
                check_admissible(route(1), time(proposed), existing, None, &config).is_ok(),
                "{proposed} should be admitted"
            );
        }
    }

    #[test]
    fn headway_reports_existing_time() {
        let config = ScheduleConfig::default();
        let existing = [time("0700"), time("0805")];
        let err = check_admissible(route(3), time("0810"), existing, None, &config).unwrap_err();

        assert_eq!(
            err,
            Conflict::Headway {
                route: route(3),
                existing: time("0805"),
                proposed: time("0810"),
                headway_mins: 14,
            }
        );
        assert_eq!(
            err.to_string(),
            "route 3 already leaves at 8:05, within 14 minutes of 8:10"
        );
    }

    #[test]
    fn shared_slot_rejected() {
        let config = ScheduleConfig::default();
        let err = check_admissible(route(2), time("0800"), [], Some(route(1)), &config).unwrap_err();

        assert_eq!(
            err,
            Conflict::SlotTaken {
                route: route(1),
                time: time("0800"),
            }
        );
        assert_eq!(err.to_string(), "route 1 already leaves at 8:00");
    }

    #[test]
    fn custom_headway() {
        let config = ScheduleConfig::new(5);
        let existing = [time("0800")];
        assert!(check_admissible(route(1), time("0806"), existing, None, &config).is_ok());
        assert!(check_admissible(route(1), time("0805"), existing, None, &config).is_err());
    }
}
