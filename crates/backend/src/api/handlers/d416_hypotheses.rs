use axum::{extract::Query, Json};
use contracts::dashboards::d416_hypotheses::{HypothesesQuery, HypothesesResponse};

use crate::dashboards::d416_hypotheses::service;
use crate::shared::data::report_store::get_dataset;

/// GET /api/d416/hypotheses?channel=google
pub async fn get_hypotheses(Query(query): Query<HypothesesQuery>) -> Json<HypothesesResponse> {
    let response = service::get_hypotheses(get_dataset(), &query);
    tracing::info!(
        "D416 Dashboard: Returning {} hypothesis groups",
        response.groups.len()
    );
    Json(response)
}
