//! Application state for the web layer.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::warn;

use crate::planner::PlannerConfig;
use crate::schedule::ScheduleConfig;
use crate::store::Network;

/// Shared application state.
///
/// Searches take the read lock; every mutation, including the whole
/// departure check-then-insert, runs under the write lock.
#[derive(Clone)]
pub struct AppState {
    /// The bus network
    pub network: Arc<RwLock<Network>>,

    /// Departure admission rules
    pub schedule: Arc<ScheduleConfig>,

    /// Itinerary search configuration
    pub planner: Arc<PlannerConfig>,

    /// Snapshot file rewritten after each mutation
    pub snapshot: Option<Arc<PathBuf>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: Network, schedule: ScheduleConfig, planner: PlannerConfig) -> Self {
        Self {
            network: Arc::new(RwLock::new(network)),
            schedule: Arc::new(schedule),
            planner: Arc::new(planner),
            snapshot: None,
        }
    }

    /// Persist the network to `path` after every mutation.
    pub fn with_snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot = Some(Arc::new(path.into()));
        self
    }

    /// Write the snapshot, if configured. Called with the write lock held so
    /// snapshots are written in mutation order.
    pub fn persist(&self, network: &Network) {
        if let Some(path) = &self.snapshot {
            if let Err(e) = network.save(path.as_path()) {
                warn!(path = %path.display(), error = %e, "failed to save snapshot");
            }
        }
    }
}
