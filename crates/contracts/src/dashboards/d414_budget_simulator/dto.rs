use serde::{Deserialize, Serialize};

/// Segment definition exposed to the client (slider bounds and defaults)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorSegment {
    pub id: String,
    pub label: String,
    /// Assumed cost per conversion; `None` when unknown
    pub unit_cost: Option<f64>,
    pub default_fraction: f64,
    pub max_fraction: f64,
    /// The remainder segment receives `1 - sum(others)` and has no slider
    pub is_remainder: bool,
}

/// One slider value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentAllocation {
    pub segment_id: String,
    /// Share of the total budget in [0, 1]
    pub fraction: f64,
}

/// Body of POST /api/d414/budget_simulator/project
///
/// Segments missing from `allocations` keep their default fraction.
/// An allocation for the remainder segment is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectRequest {
    #[serde(default)]
    pub allocations: Vec<SegmentAllocation>,
    /// Overrides the dataset's total budget
    #[serde(default)]
    pub total_budget: Option<f64>,
    /// Overrides the dataset's baseline conversions
    #[serde(default)]
    pub baseline_conversions: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentProjection {
    pub segment_id: String,
    pub label: String,
    pub allocation_fraction: f64,
    pub budget: f64,
    pub unit_cost: Option<f64>,
    pub projected_conversions: f64,
}

/// Returned alongside a clamped projection when sliders exceed 100 %
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverAllocationWarning {
    pub excess_fraction: f64,
    pub message: String,
}

/// Preformatted values for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionDisplay {
    pub total_conversions: String,
    pub blended_cost_per_conversion: String,
    pub delta_vs_baseline: String,
    pub cost_delta_vs_baseline: Option<String>,
    pub segments: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResponse {
    pub total_budget: f64,
    /// Sum of segment budgets; above `total_budget` when over-allocated
    pub allocated_budget: f64,
    pub segments: Vec<SegmentProjection>,
    pub total_projected_conversions: f64,
    /// `None` when no conversions are projected
    pub blended_cost_per_conversion: Option<f64>,
    pub baseline_conversions: f64,
    pub delta_vs_baseline: f64,
    pub delta_percent_vs_baseline: Option<f64>,
    pub baseline_cost_per_conversion: Option<f64>,
    pub cost_delta_vs_baseline: Option<f64>,
    pub over_allocation: Option<OverAllocationWarning>,
    pub display: ProjectionDisplay,
}

/// A named preset projected through the same operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub id: String,
    pub label: String,
    /// e.g. "Freight 20% / Small moves 15% / Price & quote 10%"
    pub allocation_summary: String,
    pub projection: ProjectionResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenariosResponse {
    pub scenarios: Vec<ScenarioProjection>,
    /// Scenario with the most projected conversions
    pub best_scenario_id: Option<String>,
}

/// Response for GET /api/d414/budget_simulator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetSimulatorResponse {
    pub total_budget: f64,
    pub baseline_conversions: f64,
    pub baseline_cost_per_conversion: Option<f64>,
    pub segments: Vec<SimulatorSegment>,
    pub default_projection: ProjectionResponse,
    pub scenarios: Vec<ScenarioProjection>,
}
