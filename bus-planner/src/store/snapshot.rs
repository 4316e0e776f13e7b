//! JSON snapshots of a network.
//!
//! A snapshot is loaded by replaying every record through the validating
//! insert methods, so a loaded network satisfies the same invariants as
//! one built command by command.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Departure, Route, Terminal};
use crate::schedule::{ScheduleConfig, ScheduleError};

use super::{Network, StoreError};

/// Serializable form of a network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    #[serde(default)]
    pub terminals: Vec<Terminal>,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub departures: Vec<Departure>,
}

impl NetworkSnapshot {
    /// Capture the current contents of a network.
    pub fn capture(network: &Network) -> Self {
        Self {
            terminals: network.terminals().cloned().collect(),
            routes: network.routes().map(|r| r.as_ref().clone()).collect(),
            departures: network.all_departures().collect(),
        }
    }

    /// Rebuild a network from this snapshot.
    pub fn restore(self, config: &ScheduleConfig) -> Result<Network, StoreError> {
        let mut network = Network::new();
        for terminal in self.terminals {
            network.add_terminal(terminal)?;
        }
        for route in self.routes {
            network.add_route(route)?;
        }
        for departure in self.departures {
            departure
                .leaves
                .within_service_day()
                .map_err(ScheduleError::from)?;
            network.register_departure(departure, config)?;
        }
        Ok(network)
    }
}

impl Network {
    /// Load a network from a JSON snapshot file.
    pub fn load(path: impl AsRef<Path>, config: &ScheduleConfig) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let snapshot: NetworkSnapshot = serde_json::from_str(&json)?;
        let network = snapshot.restore(config)?;
        info!(
            path = %path.display(),
            terminals = network.terminals().count(),
            routes = network.routes().count(),
            departures = network.departure_count(),
            "loaded network snapshot"
        );
        Ok(network)
    }

    /// Write the network to a JSON snapshot file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&NetworkSnapshot::capture(self))?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), "saved network snapshot");
        Ok(())
    }
}
