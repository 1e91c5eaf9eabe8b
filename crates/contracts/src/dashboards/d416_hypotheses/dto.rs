use serde::{Deserialize, Serialize};

use crate::dashboards::d415_test_roadmap::HypothesisSeverity;
use crate::enums::AdChannel;
use crate::shared::indicators::IndicatorStatus;

/// Query for GET /api/d416/hypotheses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HypothesesQuery {
    /// Only this channel's tab; both channels when absent
    #[serde(default)]
    pub channel: Option<AdChannel>,
}

/// How an evidence figure is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceUnit {
    Money,
    Percent,
    Count,
    /// Multiple of another figure ("3.4x")
    Ratio,
}

/// A numeric observation backing a hypothesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceMetric {
    pub label: String,
    pub value: f64,
    pub unit: EvidenceUnit,
    /// e.g. "₩18,761", "35.7%", "3.4x"
    pub display: String,
}

/// CPL of one region targeted by regional keywords
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalCplRow {
    pub region: String,
    pub cpl: f64,
    pub conversions: f64,
    /// Against the channel CPL; `Warning` when too few conversions
    pub status: IndicatorStatus,
    pub display_cpl: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HypothesisDetail {
    pub id: String,
    pub severity: HypothesisSeverity,
    pub title: String,
    /// What was observed, when the hypothesis starts from a measurement
    pub observation: Option<String>,
    pub explanation: String,
    pub evidence: Vec<String>,
    pub metrics: Vec<EvidenceMetric>,
    pub regions: Vec<RegionalCplRow>,
    /// Roadmap action numbers that act on this hypothesis
    pub tested_by: Vec<u32>,
}

/// One tab of the page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HypothesisGroup {
    pub channel: AdChannel,
    /// "Google Ads hypotheses (H1-H5)"
    pub title: String,
    pub hypotheses: Vec<HypothesisDetail>,
}

/// Response for the hypotheses dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HypothesesResponse {
    pub groups: Vec<HypothesisGroup>,
}
