//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::{CalculationInput, run_calculation};

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

/// Handler for the POST /calculate endpoint.
///
/// Accepts a calculation request, resolves reference data from the loaded
/// configuration, and returns the full calculation result: simulation
/// preview plus GL batch. Side-effect free; persisting the batch and
/// guarding against double-posting are caller responsibilities.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let message = match rejection {
                JsonRejection::JsonDataError(err) => err.body_text(),
                JsonRejection::JsonSyntaxError(err) => err.body_text(),
                other => other.body_text(),
            };
            warn!(correlation_id = %correlation_id, error = %message, "Rejected malformed request");
            return ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::malformed_json(message),
            }
            .into_response();
        }
    };

    let config = state.config();
    let input = CalculationInput {
        schemes: config.schemes_for_jurisdiction(&request.employee.jurisdiction),
        ledger: config.ledger().clone(),
        settings: config.settings().clone(),
        employee: request.employee,
        pay_period: request.pay_period,
        compensation_sources: request.compensation_sources,
        work_records: request.work_records,
        allowances: request.allowances,
        other_deductions: request.other_deductions,
        employer_contributions: request.employer_contributions,
        opening_balance: request.opening_balance,
        segment_defaults: request.segment_defaults,
    };

    match run_calculation(&input) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %result.simulation.employee.id,
                net_pay = %result.simulation.net_pay,
                entries = result.gl_batch.entries.len(),
                balanced = result.gl_batch.balanced,
                "Calculation complete"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Calculation failed");
            ApiErrorResponse::from(error).into_response()
        }
    }
}
