//! Report dataset schema
//!
//! Mirrors the TOML layout of `data/report.toml`. Every table is immutable
//! after loading; services read it through `&ReportDataset`.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use contracts::dashboards::d411_google_deep_dive::ServiceMatch;
use contracts::dashboards::d415_test_roadmap::HypothesisSeverity;
use contracts::dashboards::d416_hypotheses::EvidenceUnit;
use contracts::enums::AdChannel;
use serde::Deserialize;
use thiserror::Error;

/// Dataset consistency errors, reported at load time
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("report period ends ({end}) before it starts ({start})")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },

    #[error("{table}: negative or non-finite value in '{field}' of row '{row}'")]
    InvalidAmount {
        table: &'static str,
        row: String,
        field: &'static str,
    },

    #[error("{table}: duplicate id '{id}'")]
    DuplicateId { table: &'static str, id: String },

    #[error("simulator: {0}")]
    Simulator(String),

    #[error("roadmap action {action} references unknown hypothesis '{reference}'")]
    UnknownHypothesis { action: u32, reference: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportDataset {
    pub report: ReportMeta,
    pub channels: Vec<ChannelTotals>,
    #[serde(default)]
    pub google_intents: Vec<GoogleIntent>,
    #[serde(default)]
    pub google_campaigns: Vec<GoogleCampaign>,
    #[serde(default)]
    pub pmax_asset_groups: Vec<AssetGroup>,
    #[serde(default)]
    pub meta_ad_sets: Vec<MetaAdSet>,
    #[serde(default)]
    pub meta_platform_months: Vec<PlatformMonth>,
    #[serde(default)]
    pub meta_creative_months: Vec<CreativeMonth>,
    #[serde(default)]
    pub message_types: Vec<MessageType>,
    #[serde(default)]
    pub hypotheses: Vec<HypothesisRecord>,
    #[serde(default)]
    pub roadmap: Vec<RoadmapPhaseRecord>,
    pub simulator: SimulatorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportMeta {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub currency: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub author: String,
}

impl ReportMeta {
    /// Calendar months touched by the period (Nov..Jan = 3)
    pub fn period_months(&self) -> u32 {
        let start = self.period_start.year() * 12 + self.period_start.month0() as i32;
        let end = self.period_end.year() * 12 + self.period_end.month0() as i32;
        (end - start + 1).max(0) as u32
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelTotals {
    pub channel: AdChannel,
    pub spend: f64,
    pub conversions: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleIntent {
    pub id: String,
    pub label: String,
    pub spend: f64,
    pub conversions: f64,
    pub ctr_percent: f64,
    pub cvr_percent: f64,
    pub service_match: ServiceMatch,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleCampaign {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub spend: f64,
    pub conversions: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetGroup {
    pub name: String,
    pub spend: f64,
    pub conversions: f64,
    pub cvr_percent: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetaAdSet {
    pub id: String,
    pub label: String,
    pub audience: String,
    pub spend: f64,
    pub conversions: f64,
    pub ctr_percent: f64,
    pub cvr_percent: f64,
    pub message_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlatformMonth {
    /// "YYYY-MM"
    pub month: String,
    pub platform: String,
    pub spend: f64,
    pub conversions: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreativeMonth {
    pub month: String,
    pub creative: String,
    /// Reported CPL; spend is not broken down per creative and month
    pub cpl: f64,
    pub conversions: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageType {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub google_cpl: Option<f64>,
    #[serde(default)]
    pub meta_cpl: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HypothesisRecord {
    pub id: String,
    pub channel: AdChannel,
    pub severity: HypothesisSeverity,
    pub title: String,
    #[serde(default)]
    pub observation: Option<String>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub evidence: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<EvidenceMetricRecord>,
    /// Regional CPL breakdown (regional keyword hypotheses)
    #[serde(default)]
    pub regions: Vec<RegionRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvidenceMetricRecord {
    pub label: String,
    pub value: f64,
    pub unit: EvidenceUnit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionRecord {
    pub region: String,
    pub cpl: f64,
    pub conversions: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoadmapPhaseRecord {
    pub id: String,
    pub label: String,
    pub duration: String,
    pub goal: String,
    #[serde(default)]
    pub expected_impact: String,
    #[serde(default)]
    pub actions: Vec<RoadmapActionRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoadmapActionRecord {
    pub number: u32,
    pub title: String,
    pub detail: String,
    pub expected_effect: String,
    /// Hypothesis ids ("H1") or other plan references ("Alt A")
    #[serde(default)]
    pub refs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulatorConfig {
    pub total_budget: f64,
    pub baseline_conversions: f64,
    #[serde(default)]
    pub baseline_cost_per_conversion: Option<f64>,
    pub segments: Vec<SimulatorSegmentRecord>,
    #[serde(default)]
    pub scenarios: Vec<ScenarioRecord>,
}

impl SimulatorConfig {
    /// Segments that carry a slider (all but the remainder)
    pub fn allocatable_segments(&self) -> impl Iterator<Item = &SimulatorSegmentRecord> {
        self.segments.iter().filter(|s| !s.remainder)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulatorSegmentRecord {
    pub id: String,
    pub label: String,
    /// Missing or 0 means unknown
    #[serde(default)]
    pub unit_cost: Option<f64>,
    #[serde(default)]
    pub default_fraction: f64,
    #[serde(default = "default_max_fraction")]
    pub max_fraction: f64,
    #[serde(default)]
    pub remainder: bool,
}

fn default_max_fraction() -> f64 {
    1.0
}

/// Named preset: fractions for the allocatable segments, in order
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioRecord {
    pub id: String,
    pub label: String,
    pub fractions: Vec<f64>,
}

impl ReportDataset {
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let dataset: ReportDataset = toml::from_str(contents)?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn channel(&self, channel: AdChannel) -> Option<&ChannelTotals> {
        self.channels.iter().find(|c| c.channel == channel)
    }

    pub fn hypothesis(&self, id: &str) -> Option<&HypothesisRecord> {
        self.hypotheses.iter().find(|h| h.id == id)
    }

    /// Check cross-table consistency once, so services can rely on it
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.report.period_end < self.report.period_start {
            return Err(DatasetError::InvalidPeriod {
                start: self.report.period_start,
                end: self.report.period_end,
            });
        }

        for c in &self.channels {
            check_amount("channels", c.channel.code(), "spend", c.spend)?;
            check_amount("channels", c.channel.code(), "conversions", c.conversions)?;
        }
        check_unique("channels", self.channels.iter().map(|c| c.channel.code()))?;

        for i in &self.google_intents {
            check_amount("google_intents", &i.id, "spend", i.spend)?;
            check_amount("google_intents", &i.id, "conversions", i.conversions)?;
        }
        check_unique("google_intents", self.google_intents.iter().map(|i| i.id.as_str()))?;

        for c in &self.google_campaigns {
            check_amount("google_campaigns", &c.id, "spend", c.spend)?;
            check_amount("google_campaigns", &c.id, "conversions", c.conversions)?;
        }
        check_unique("google_campaigns", self.google_campaigns.iter().map(|c| c.id.as_str()))?;

        for g in &self.pmax_asset_groups {
            check_amount("pmax_asset_groups", &g.name, "spend", g.spend)?;
            check_amount("pmax_asset_groups", &g.name, "conversions", g.conversions)?;
        }

        for a in &self.meta_ad_sets {
            check_amount("meta_ad_sets", &a.id, "spend", a.spend)?;
            check_amount("meta_ad_sets", &a.id, "conversions", a.conversions)?;
        }
        check_unique("meta_ad_sets", self.meta_ad_sets.iter().map(|a| a.id.as_str()))?;

        for p in &self.meta_platform_months {
            check_amount("meta_platform_months", &p.month, "spend", p.spend)?;
            check_amount("meta_platform_months", &p.month, "conversions", p.conversions)?;
        }

        for c in &self.meta_creative_months {
            check_amount("meta_creative_months", &c.creative, "cpl", c.cpl)?;
            check_amount("meta_creative_months", &c.creative, "conversions", c.conversions)?;
        }

        for m in &self.message_types {
            if let Some(v) = m.google_cpl {
                check_amount("message_types", &m.id, "google_cpl", v)?;
            }
            if let Some(v) = m.meta_cpl {
                check_amount("message_types", &m.id, "meta_cpl", v)?;
            }
        }
        check_unique("message_types", self.message_types.iter().map(|m| m.id.as_str()))?;

        check_unique("hypotheses", self.hypotheses.iter().map(|h| h.id.as_str()))?;
        for h in &self.hypotheses {
            for m in &h.metrics {
                check_amount("hypotheses", &h.id, "metrics.value", m.value)?;
            }
            for r in &h.regions {
                check_amount("hypotheses", &h.id, "regions.cpl", r.cpl)?;
                check_amount("hypotheses", &h.id, "regions.conversions", r.conversions)?;
            }
        }
        check_unique("roadmap", self.roadmap.iter().map(|p| p.id.as_str()))?;

        for phase in &self.roadmap {
            for action in &phase.actions {
                for reference in &action.refs {
                    if is_hypothesis_ref(reference) && self.hypothesis(reference).is_none() {
                        return Err(DatasetError::UnknownHypothesis {
                            action: action.number,
                            reference: reference.clone(),
                        });
                    }
                }
            }
        }

        self.validate_simulator()
    }

    fn validate_simulator(&self) -> Result<(), DatasetError> {
        let sim = &self.simulator;

        if !(sim.total_budget.is_finite() && sim.total_budget > 0.0) {
            return Err(DatasetError::Simulator(format!(
                "total_budget must be positive, got {}",
                sim.total_budget
            )));
        }
        check_amount("simulator", "baseline", "baseline_conversions", sim.baseline_conversions)?;
        check_unique("simulator.segments", sim.segments.iter().map(|s| s.id.as_str()))?;

        let remainder_count = sim.segments.iter().filter(|s| s.remainder).count();
        match sim.segments.last() {
            Some(last) if last.remainder && remainder_count == 1 => {}
            _ => {
                return Err(DatasetError::Simulator(
                    "exactly one remainder segment is required and it must be last".into(),
                ))
            }
        }

        for s in &sim.segments {
            if let Some(cost) = s.unit_cost {
                check_amount("simulator.segments", &s.id, "unit_cost", cost)?;
            }
            if !(0.0..=1.0).contains(&s.max_fraction) {
                return Err(DatasetError::Simulator(format!(
                    "segment '{}': max_fraction {} outside [0, 1]",
                    s.id, s.max_fraction
                )));
            }
            if !s.remainder && !(0.0..=s.max_fraction).contains(&s.default_fraction) {
                return Err(DatasetError::Simulator(format!(
                    "segment '{}': default_fraction {} outside [0, {}]",
                    s.id, s.default_fraction, s.max_fraction
                )));
            }
        }

        let allocatable = sim.allocatable_segments().count();
        check_unique("simulator.scenarios", sim.scenarios.iter().map(|s| s.id.as_str()))?;
        for scenario in &sim.scenarios {
            if scenario.fractions.len() != allocatable {
                return Err(DatasetError::Simulator(format!(
                    "scenario '{}' has {} fractions, expected {}",
                    scenario.id,
                    scenario.fractions.len(),
                    allocatable
                )));
            }
        }

        Ok(())
    }
}

/// "H1", "H12"; anything else ("Alt A") is a plain reference
pub fn is_hypothesis_ref(reference: &str) -> bool {
    reference
        .strip_prefix('H')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}

fn check_amount(
    table: &'static str,
    row: &str,
    field: &'static str,
    value: f64,
) -> Result<(), DatasetError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DatasetError::InvalidAmount {
            table,
            row: row.to_string(),
            field,
        })
    }
}

fn check_unique<'a>(
    table: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), DatasetError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DatasetError::DuplicateId {
                table,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::report_store::DEFAULT_DATASET;

    #[test]
    fn test_default_dataset_loads() {
        let dataset = ReportDataset::from_toml(DEFAULT_DATASET).unwrap();
        assert_eq!(dataset.channels.len(), 2);
        assert_eq!(dataset.google_intents.len(), 8);
        assert_eq!(dataset.meta_ad_sets.len(), 8);
        assert_eq!(dataset.report.period_months(), 3);
        assert_eq!(dataset.simulator.segments.len(), 4);
        assert_eq!(dataset.simulator.allocatable_segments().count(), 3);
        assert_eq!(dataset.simulator.scenarios.len(), 3);
    }

    #[test]
    fn test_simulator_budget_matches_intent_spend() {
        let dataset = ReportDataset::from_toml(DEFAULT_DATASET).unwrap();
        let intent_spend: f64 = dataset.google_intents.iter().map(|i| i.spend).sum();
        assert_eq!(intent_spend, dataset.simulator.total_budget);
    }

    #[test]
    fn test_hypothesis_evidence_loads() {
        let dataset = ReportDataset::from_toml(DEFAULT_DATASET).unwrap();
        let h1 = dataset.hypothesis("H1").unwrap();
        assert_eq!(h1.metrics.len(), 5);
        assert_eq!(h1.metrics[1].value, 2_626_506.0);
        assert_eq!(h1.metrics[1].unit, EvidenceUnit::Money);
        assert!(h1.regions.is_empty());

        let h5 = dataset.hypothesis("H5").unwrap();
        let regions: Vec<(&str, f64, f64)> = h5
            .regions
            .iter()
            .map(|r| (r.region.as_str(), r.cpl, r.conversions))
            .collect();
        assert_eq!(
            regions,
            vec![
                ("Daegu", 7_062.0, 6.0),
                ("Seoul", 10_992.0, 6.0),
                ("Gyeongnam", 58_198.0, 1.0),
                ("Jeju", 18_047.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_negative_regional_cpl_rejected() {
        let mut dataset = ReportDataset::from_toml(DEFAULT_DATASET).unwrap();
        let h5 = dataset.hypotheses.iter_mut().find(|h| h.id == "H5").unwrap();
        h5.regions[0].cpl = -7_062.0;
        assert!(matches!(
            dataset.validate(),
            Err(DatasetError::InvalidAmount { table: "hypotheses", field: "regions.cpl", .. })
        ));
    }

    #[test]
    fn test_hypothesis_ref_detection() {
        assert!(is_hypothesis_ref("H1"));
        assert!(is_hypothesis_ref("H12"));
        assert!(!is_hypothesis_ref("H"));
        assert!(!is_hypothesis_ref("Alt A"));
        assert!(!is_hypothesis_ref("Hx"));
    }

    #[test]
    fn test_remainder_must_be_last() {
        let mut dataset = ReportDataset::from_toml(DEFAULT_DATASET).unwrap();
        dataset.simulator.segments.swap(0, 3);
        assert!(matches!(
            dataset.validate(),
            Err(DatasetError::Simulator(_))
        ));
    }

    #[test]
    fn test_scenario_fraction_count_checked() {
        let mut dataset = ReportDataset::from_toml(DEFAULT_DATASET).unwrap();
        dataset.simulator.scenarios[0].fractions.pop();
        assert!(matches!(
            dataset.validate(),
            Err(DatasetError::Simulator(_))
        ));
    }

    #[test]
    fn test_unknown_hypothesis_reference_rejected() {
        let mut dataset = ReportDataset::from_toml(DEFAULT_DATASET).unwrap();
        dataset.roadmap[0].actions[0].refs.push("H42".into());
        assert_eq!(
            dataset.validate(),
            Err(DatasetError::UnknownHypothesis {
                action: 1,
                reference: "H42".into()
            })
        );
    }

    #[test]
    fn test_negative_spend_rejected() {
        let mut dataset = ReportDataset::from_toml(DEFAULT_DATASET).unwrap();
        dataset.meta_ad_sets[2].spend = -1.0;
        assert!(matches!(
            dataset.validate(),
            Err(DatasetError::InvalidAmount { table: "meta_ad_sets", .. })
        ));
    }
}
