//! Domain error types.
//!
//! These errors represent inconsistencies when assembling itineraries.
//! Parse failures for individual values have their own error types.

use super::TerminalName;

/// Domain-level errors for itinerary construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Itinerary has no legs
    #[error("itinerary must have at least one leg")]
    EmptyItinerary,

    /// Itinerary has more legs than the planner supports
    #[error("itinerary has {0} legs, at most {max} allowed", max = super::itinerary::MAX_LEGS)]
    TooManyLegs(usize),

    /// Consecutive legs don't meet at the same terminal
    #[error("leg ending at {0} does not connect to leg starting at {1}")]
    TerminalsNotConnected(TerminalName, TerminalName),
}
