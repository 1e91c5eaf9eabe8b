use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d415_test_roadmap::{RoadmapQuery, TestRoadmapResponse};

use super::report_error_status;
use crate::dashboards::d415_test_roadmap::service;
use crate::shared::data::report_store::get_dataset;

/// GET /api/d415/test_roadmap?phase=phase1
pub async fn get_test_roadmap(
    Query(query): Query<RoadmapQuery>,
) -> Result<Json<TestRoadmapResponse>, StatusCode> {
    match service::get_test_roadmap(get_dataset(), &query) {
        Ok(response) => {
            tracing::info!(
                "D415 Dashboard: Returning {} phases for '{}'",
                response.phases.len(),
                response.selected
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::warn!("D415 Dashboard: Rejected request: {}", e);
            Err(report_error_status(&e))
        }
    }
}
