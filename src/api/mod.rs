//! HTTP API for the payroll engine.
//!
//! A thin axum adapter over the core: one `/calculate` endpoint that runs
//! the full pipeline against the server's loaded configuration. The core
//! itself has no network surface; this module exists for integration and
//! human review tooling.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
