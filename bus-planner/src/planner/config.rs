//! Search configuration for the itinerary planner.

use chrono::Duration;

/// Configuration parameters for itinerary search.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// How long after the start time the first leg may depart (minutes).
    /// The window is inclusive at both ends.
    pub window_mins: i64,

    /// Minimum gap between the departures of consecutive legs (minutes).
    /// Measured departure to departure, not arrival to departure.
    pub min_connection_mins: i64,

    /// Fixed padding added to the duration of every itinerary with at
    /// least one transfer (minutes).
    pub transfer_padding_mins: i64,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(window_mins: i64, min_connection_mins: i64, transfer_padding_mins: i64) -> Self {
        Self {
            window_mins,
            min_connection_mins,
            transfer_padding_mins,
        }
    }

    /// Returns the departure window as a Duration.
    pub fn window(&self) -> Duration {
        Duration::minutes(self.window_mins)
    }

    /// Returns the minimum connection time as a Duration.
    pub fn min_connection(&self) -> Duration {
        Duration::minutes(self.min_connection_mins)
    }

    /// Returns the transfer padding as a Duration.
    pub fn transfer_padding(&self) -> Duration {
        Duration::minutes(self.transfer_padding_mins)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            window_mins: 60,
            min_connection_mins: 5,
            transfer_padding_mins: 20,
        }
    }
}
