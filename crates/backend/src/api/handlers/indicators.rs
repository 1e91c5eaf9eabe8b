use axum::Json;
use contracts::shared::indicators::*;

use crate::shared::data::report_store::get_dataset;
use crate::shared::indicators::{metadata, registry::IndicatorRegistry};

/// POST /api/indicators/compute
///
/// Batch-computes a set of indicators, optionally scoped to one channel.
pub async fn compute_indicators(
    Json(req): Json<ComputeIndicatorsRequest>,
) -> Json<ComputeIndicatorsResponse> {
    tracing::info!(
        "Indicators: computing {} indicators for {}",
        req.indicator_ids.len(),
        req.context
            .channel
            .map(|c| c.code())
            .unwrap_or("all channels"),
    );

    let registry = IndicatorRegistry::new();
    let values = registry.compute(&req.indicator_ids, &req.context, get_dataset());

    tracing::info!("Indicators: returning {} values", values.len());
    Json(ComputeIndicatorsResponse { values })
}

/// GET /api/indicators/meta
///
/// Returns the full catalogue of available indicators and sets.
pub async fn get_indicator_catalog() -> Json<IndicatorCatalogResponse> {
    Json(metadata::build_catalog(&get_dataset().report.currency))
}
