use axum::Json;
use contracts::dashboards::d413_cross_channel::CrossChannelResponse;

use crate::dashboards::d413_cross_channel::service;
use crate::shared::data::report_store::get_dataset;

/// GET /api/d413/cross_channel
pub async fn get_cross_channel() -> Json<CrossChannelResponse> {
    let response = service::get_cross_channel(get_dataset());
    tracing::info!("D413 Dashboard: Returning {} message types", response.messages.len());
    Json(response)
}
