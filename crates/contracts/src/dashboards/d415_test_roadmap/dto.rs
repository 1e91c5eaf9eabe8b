use serde::{Deserialize, Serialize};

use crate::enums::AdChannel;

/// Query for GET /api/d415/test_roadmap
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoadmapQuery {
    /// "all" (default) or a phase id
    #[serde(default)]
    pub phase: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HypothesisSeverity {
    High,
    Medium,
}

/// A hypothesis explaining an inefficiency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hypothesis {
    pub id: String,
    pub channel: AdChannel,
    pub severity: HypothesisSeverity,
    pub title: String,
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapAction {
    pub number: u32,
    pub title: String,
    pub detail: String,
    pub expected_effect: String,
    /// Hypotheses this action tests or acts upon
    pub hypotheses: Vec<Hypothesis>,
    /// References that are not hypotheses (alternative plans, e.g. "Alt A")
    pub other_refs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapPhase {
    pub id: String,
    pub label: String,
    pub duration: String,
    pub goal: String,
    pub expected_impact: String,
    pub actions: Vec<RoadmapAction>,
}

/// Response for the test roadmap dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRoadmapResponse {
    /// "all" or the selected phase id
    pub selected: String,
    pub available_phases: Vec<String>,
    pub phases: Vec<RoadmapPhase>,
    /// Every hypothesis, high severity first
    pub hypotheses: Vec<Hypothesis>,
}
