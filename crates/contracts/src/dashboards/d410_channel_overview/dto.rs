use serde::{Deserialize, Serialize};

use crate::shared::indicators::{IndicatorStatus, IndicatorValue};
use crate::shared::metrics::PerformanceRow;

/// Response for the executive summary dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelOverviewResponse {
    /// KPI cards (total spend, conversions, blended and per-channel CPL)
    pub indicators: Vec<IndicatorValue>,
    /// One row per channel
    pub channels: Vec<PerformanceRow>,
    /// How much cheaper Meta leads are than Google leads, in percent.
    /// Negative when Meta is more expensive.
    pub meta_vs_google_cpl_gap_percent: Option<f64>,
    pub findings: Vec<Finding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// Largest spend on the least efficient segment
    BudgetDrain,
    /// Best converting segment with a small budget share
    UnderfundedOpportunity,
    /// Message type with the lowest CPL across channels
    WinningMessage,
}

/// A finding derived from the dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub title: String,
    /// Headline figure, preformatted ("₩2,626,506", "CVR 27.4%")
    pub headline: String,
    pub details: Vec<String>,
    pub status: IndicatorStatus,
}
