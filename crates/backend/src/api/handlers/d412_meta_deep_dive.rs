use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d412_meta_deep_dive::{MetaDeepDiveQuery, MetaDeepDiveResponse};

use super::report_error_status;
use crate::dashboards::d412_meta_deep_dive::service;
use crate::shared::data::report_store::get_dataset;

/// GET /api/d412/meta_deep_dive?min_budget_share=0.5
pub async fn get_meta_deep_dive(
    Query(query): Query<MetaDeepDiveQuery>,
) -> Result<Json<MetaDeepDiveResponse>, StatusCode> {
    match service::get_meta_deep_dive(get_dataset(), &query) {
        Ok(response) => {
            tracing::info!(
                "D412 Dashboard: Returning {} ad sets ({} hidden below {}%)",
                response.ad_sets.len(),
                response.hidden_ad_sets,
                response.min_budget_share_percent
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::warn!("D412 Dashboard: Rejected request: {}", e);
            Err(report_error_status(&e))
        }
    }
}
