use axum::{http::StatusCode, Json};
use contracts::dashboards::d414_budget_simulator::{
    BudgetSimulatorResponse, ProjectRequest, ProjectionResponse, ScenariosResponse,
};

use super::report_error_status;
use crate::dashboards::d414_budget_simulator::service;
use crate::shared::data::report_store::get_dataset;

/// GET /api/d414/budget_simulator
pub async fn get_budget_simulator() -> Result<Json<BudgetSimulatorResponse>, StatusCode> {
    match service::get_budget_simulator(get_dataset()) {
        Ok(response) => {
            tracing::info!(
                "D414 Dashboard: Returning {} segments, {} scenarios",
                response.segments.len(),
                response.scenarios.len()
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!("D414 Dashboard: Failed to build simulator: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/d414/budget_simulator/project
///
/// Over-allocation still answers 200 with `over_allocation` set.
pub async fn project(
    Json(request): Json<ProjectRequest>,
) -> Result<Json<ProjectionResponse>, StatusCode> {
    tracing::info!(
        "D414 Dashboard: Projecting {} allocations",
        request.allocations.len()
    );

    match service::project_allocation(get_dataset(), &request) {
        Ok(response) => {
            tracing::info!(
                "D414 Dashboard: {:.1} projected conversions{}",
                response.total_projected_conversions,
                if response.over_allocation.is_some() {
                    " (over-allocated)"
                } else {
                    ""
                }
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::warn!("D414 Dashboard: Rejected projection: {}", e);
            Err(report_error_status(&e))
        }
    }
}

/// GET /api/d414/budget_simulator/scenarios
pub async fn get_scenarios() -> Result<Json<ScenariosResponse>, StatusCode> {
    match service::get_scenarios(get_dataset()) {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("D414 Dashboard: Failed to project scenarios: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
