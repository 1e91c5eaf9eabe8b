use serde::{Deserialize, Serialize};

use crate::shared::indicators::IndicatorStatus;
use crate::shared::metrics::PerformanceRow;

/// How well a search intent matches the advertised service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceMatch {
    Perfect,
    Good,
    Fair,
    Mismatch,
}

/// Position of an intent on the CPL / CVR opportunity matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    /// Low CPL, high CVR
    SweetSpot,
    /// High CPL, high CVR
    ScaleCandidate,
    /// Low CPL, low CVR
    CheapLowIntent,
    /// High CPL, low CVR
    Drain,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadrantThresholds {
    pub cpl: f64,
    pub cvr_percent: f64,
}

/// Google search intent segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRow {
    pub id: String,
    pub label: String,
    pub spend: f64,
    pub conversions: f64,
    pub cpl: Option<f64>,
    pub ctr_percent: f64,
    pub cvr_percent: f64,
    pub budget_share_percent: f64,
    pub service_match: ServiceMatch,
    pub status: IndicatorStatus,
    pub quadrant: Option<Quadrant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetGroupRow {
    pub name: String,
    pub spend: f64,
    pub conversions: f64,
    pub cpl: Option<f64>,
    pub cvr_percent: f64,
    pub budget_share_percent: f64,
}

/// Response for the Google deep-dive dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleDeepDiveResponse {
    pub spend: f64,
    pub conversions: f64,
    pub cpl: Option<f64>,
    /// Intents sorted by CPL ascending (no-conversion rows last)
    pub intents: Vec<IntentRow>,
    pub quadrant_thresholds: QuadrantThresholds,
    pub campaigns: Vec<PerformanceRow>,
    pub pmax_asset_groups: Vec<AssetGroupRow>,
}
