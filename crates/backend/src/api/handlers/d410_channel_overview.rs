use axum::Json;
use contracts::dashboards::d410_channel_overview::ChannelOverviewResponse;

use crate::dashboards::d410_channel_overview::service;
use crate::shared::data::report_store::get_dataset;

/// GET /api/d410/channel_overview
pub async fn get_channel_overview() -> Json<ChannelOverviewResponse> {
    let response = service::get_channel_overview(get_dataset());
    tracing::info!(
        "D410 Dashboard: Returning {} channels, {} findings",
        response.channels.len(),
        response.findings.len()
    );
    Json(response)
}
