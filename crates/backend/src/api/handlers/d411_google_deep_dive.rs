use axum::Json;
use contracts::dashboards::d411_google_deep_dive::GoogleDeepDiveResponse;

use crate::dashboards::d411_google_deep_dive::service;
use crate::shared::data::report_store::get_dataset;

/// GET /api/d411/google_deep_dive
pub async fn get_google_deep_dive() -> Json<GoogleDeepDiveResponse> {
    let response = service::get_google_deep_dive(get_dataset());
    tracing::info!(
        "D411 Dashboard: Returning {} intents, {} campaigns",
        response.intents.len(),
        response.campaigns.len()
    );
    Json(response)
}
