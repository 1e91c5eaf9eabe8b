use serde::{Deserialize, Serialize};

use crate::shared::indicators::IndicatorStatus;

/// Query for GET /api/d412/meta_deep_dive
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaDeepDiveQuery {
    /// Hide ad sets below this budget share (percent). Defaults to 0.5.
    #[serde(default)]
    pub min_budget_share: Option<f64>,
}

/// Meta ad set / creative row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdSetRow {
    pub id: String,
    pub label: String,
    pub audience: String,
    pub message_type: String,
    pub spend: f64,
    pub conversions: f64,
    pub cpl: Option<f64>,
    pub ctr_percent: f64,
    pub cvr_percent: f64,
    pub budget_share_percent: f64,
    /// CTR at or above the median while CVR is below it: clicks out of
    /// curiosity rather than intent
    pub high_ctr_low_cvr: bool,
    pub status: IndicatorStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformMonthRow {
    pub month: String,
    pub platform: String,
    pub spend: f64,
    pub conversions: f64,
    pub cpl: Option<f64>,
}

/// Channel-level CPL for one month (all platforms)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyCplPoint {
    pub month: String,
    pub spend: f64,
    pub conversions: f64,
    pub cpl: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Stable,
    Worsening,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreativeMonthPoint {
    pub month: String,
    pub cpl: f64,
    pub conversions: f64,
}

/// CPL evolution of one creative across the months it ran
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreativeTrend {
    pub creative: String,
    pub first_month: String,
    pub last_month: String,
    pub first_cpl: f64,
    pub last_cpl: f64,
    pub change_percent: Option<f64>,
    pub direction: TrendDirection,
    pub points: Vec<CreativeMonthPoint>,
}

/// Response for the Meta deep-dive dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaDeepDiveResponse {
    pub spend: f64,
    pub conversions: f64,
    pub cpl: Option<f64>,
    pub min_budget_share_percent: f64,
    /// Ad sets above the share threshold, sorted by CPL ascending
    pub ad_sets: Vec<AdSetRow>,
    /// Number of ad sets filtered out by the share threshold
    pub hidden_ad_sets: usize,
    pub platform_months: Vec<PlatformMonthRow>,
    pub monthly_cpl: Vec<MonthlyCplPoint>,
    /// CPL change from the first to the last month, in percent
    pub cpl_trend_percent: Option<f64>,
    pub creative_trends: Vec<CreativeTrend>,
}
