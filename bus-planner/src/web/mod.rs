//! Web layer for the bus network planner.
//!
//! Exposes the shell's operations as a JSON API.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
