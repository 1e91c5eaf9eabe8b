use serde::{Deserialize, Serialize};

use super::indicators::IndicatorStatus;

/// Spend/conversion row shared by several report tables
/// (channels, campaigns, asset groups).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRow {
    pub id: String,
    pub label: String,
    /// Optional sub-type, e.g. "pmax" / "search" for campaigns
    pub kind: Option<String>,
    pub spend: f64,
    /// Platform-attributed conversions; fractional for data-driven attribution
    pub conversions: f64,
    /// Cost per lead, `None` when there were no conversions
    pub cpl: Option<f64>,
    /// Share of the table's total spend, in percent
    pub budget_share_percent: f64,
    pub status: IndicatorStatus,
}
