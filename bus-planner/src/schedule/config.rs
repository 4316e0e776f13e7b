//! Configuration for schedule admission.

use chrono::Duration;

/// Parameters governing which departures may be registered.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Minimum spacing between two departures of the same route (minutes).
    /// A proposed departure within this many minutes of an existing one,
    /// inclusive, is rejected.
    pub headway_mins: u32,
}

impl ScheduleConfig {
    /// Create a new configuration with the given headway.
    pub fn new(headway_mins: u32) -> Self {
        Self { headway_mins }
    }

    /// Returns the headway as a Duration.
    pub fn headway(&self) -> Duration {
        Duration::minutes(i64::from(self.headway_mins))
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self { headway_mins: 14 }
    }
}
