//! Budget reallocation projector
//!
//! Splits a fixed budget across segments, each with an assumed cost per
//! conversion, and projects the conversions that split would buy.
//!
//! Remainder convention: the **last** segment is the remainder. Its
//! allocation is always derived as `max(0, 1 - sum(others))`; whatever
//! fraction the caller put on it is ignored. The partition is therefore
//! complete by construction unless the explicit fractions alone exceed 100 %,
//! which is reported as [`ProjectionError::OverAllocation`] together with the
//! projection computed with the remainder clamped to zero.

use thiserror::Error;

/// Sums above `1.0 + ALLOCATION_TOLERANCE` count as over-allocated
pub const ALLOCATION_TOLERANCE: f64 = 1e-9;

/// Assumed cost of one conversion in a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitCost {
    Known(f64),
    /// No usable observation; the segment projects zero conversions
    Unknown,
}

impl UnitCost {
    /// Missing or zero observations are unknown
    pub fn observed(value: Option<f64>) -> Self {
        match value {
            Some(v) if v != 0.0 => UnitCost::Known(v),
            _ => UnitCost::Unknown,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            UnitCost::Known(v) => Some(*v),
            UnitCost::Unknown => None,
        }
    }
}

impl From<f64> for UnitCost {
    fn from(value: f64) -> Self {
        UnitCost::observed(Some(value))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSegment {
    pub name: String,
    pub assumed_unit_cost: UnitCost,
    /// Share of the total budget in [0, 1]; ignored for the last segment
    pub allocation_fraction: f64,
}

impl BudgetSegment {
    pub fn new(name: impl Into<String>, unit_cost: impl Into<UnitCost>, fraction: f64) -> Self {
        Self {
            name: name.into(),
            assumed_unit_cost: unit_cost.into(),
            allocation_fraction: fraction,
        }
    }

    /// Remainder segment; its fraction is derived by [`project`]
    pub fn remainder(name: impl Into<String>, unit_cost: impl Into<UnitCost>) -> Self {
        Self::new(name, unit_cost, 0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentOutcome {
    pub name: String,
    /// Effective fraction (derived for the remainder)
    pub allocation_fraction: f64,
    pub budget: f64,
    pub assumed_unit_cost: UnitCost,
    pub projected_conversions: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionResult {
    pub total_budget: f64,
    pub segments: Vec<SegmentOutcome>,
    pub total_projected_conversions: f64,
    /// `total_budget / total_projected_conversions`; `None` when nothing is
    /// projected
    pub blended_cost_per_conversion: Option<f64>,
    pub baseline_conversions: f64,
    pub delta_vs_baseline: f64,
}

impl ProjectionResult {
    /// Delta against the baseline in percent; `None` for a zero baseline
    pub fn delta_percent_vs_baseline(&self) -> Option<f64> {
        if self.baseline_conversions > 0.0 {
            Some(self.delta_vs_baseline / self.baseline_conversions * 100.0)
        } else {
            None
        }
    }

    /// Signed change of the blended cost against an observed one
    pub fn cost_delta_vs(&self, baseline_cost_per_conversion: f64) -> Option<f64> {
        self.blended_cost_per_conversion
            .map(|cost| cost - baseline_cost_per_conversion)
    }

    /// Sum of the per-segment budgets
    pub fn allocated_budget(&self) -> f64 {
        self.segments.iter().map(|s| s.budget).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// Explicit fractions sum above 1.0. `clamped` holds the projection with
    /// the remainder at zero so callers can warn and still show numbers.
    #[error("allocation fractions exceed 1.0 by {excess:.4}")]
    OverAllocation {
        excess: f64,
        clamped: Box<ProjectionResult>,
    },

    #[error("total budget must be positive and finite, got {0}")]
    InvalidBudget(f64),

    #[error("baseline conversions must be non-negative and finite, got {0}")]
    InvalidBaseline(f64),

    #[error("at least one segment is required")]
    NoSegments,

    #[error("segment '{name}': allocation {fraction} is outside [0, 1]")]
    InvalidFraction { name: String, fraction: f64 },

    #[error("segment '{name}': unit cost {cost} must be positive or unknown")]
    InvalidUnitCost { name: String, cost: f64 },
}

impl ProjectionError {
    /// Projection usable despite the error (over-allocation only)
    pub fn clamped_result(&self) -> Option<&ProjectionResult> {
        match self {
            ProjectionError::OverAllocation { clamped, .. } => Some(clamped),
            _ => None,
        }
    }
}

/// Project conversions for a budget split.
///
/// Pure and deterministic: identical inputs give bit-identical results.
pub fn project(
    total_budget: f64,
    segments: &[BudgetSegment],
    baseline_conversions: f64,
) -> Result<ProjectionResult, ProjectionError> {
    if !(total_budget.is_finite() && total_budget > 0.0) {
        return Err(ProjectionError::InvalidBudget(total_budget));
    }
    if !(baseline_conversions.is_finite() && baseline_conversions >= 0.0) {
        return Err(ProjectionError::InvalidBaseline(baseline_conversions));
    }
    let Some((_, explicit)) = segments.split_last() else {
        return Err(ProjectionError::NoSegments);
    };

    for segment in segments {
        if let UnitCost::Known(cost) = segment.assumed_unit_cost {
            if !(cost.is_finite() && cost > 0.0) {
                return Err(ProjectionError::InvalidUnitCost {
                    name: segment.name.clone(),
                    cost,
                });
            }
        }
    }
    for segment in explicit {
        if !(0.0..=1.0).contains(&segment.allocation_fraction) {
            return Err(ProjectionError::InvalidFraction {
                name: segment.name.clone(),
                fraction: segment.allocation_fraction,
            });
        }
    }

    let explicit_sum: f64 = explicit.iter().map(|s| s.allocation_fraction).sum();
    let remainder_fraction = (1.0 - explicit_sum).max(0.0);

    let outcomes: Vec<SegmentOutcome> = segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let fraction = if i == explicit.len() {
                remainder_fraction
            } else {
                segment.allocation_fraction
            };
            let budget = total_budget * fraction;
            let projected_conversions = match segment.assumed_unit_cost {
                UnitCost::Known(cost) => budget / cost,
                UnitCost::Unknown => 0.0,
            };
            SegmentOutcome {
                name: segment.name.clone(),
                allocation_fraction: fraction,
                budget,
                assumed_unit_cost: segment.assumed_unit_cost,
                projected_conversions,
            }
        })
        .collect();

    let total_projected_conversions: f64 =
        outcomes.iter().map(|o| o.projected_conversions).sum();
    let blended_cost_per_conversion = if total_projected_conversions > 0.0 {
        Some(total_budget / total_projected_conversions)
    } else {
        None
    };

    let result = ProjectionResult {
        total_budget,
        segments: outcomes,
        total_projected_conversions,
        blended_cost_per_conversion,
        baseline_conversions,
        delta_vs_baseline: total_projected_conversions - baseline_conversions,
    };

    let excess = explicit_sum - 1.0;
    if excess > ALLOCATION_TOLERANCE {
        tracing::debug!(excess, "budget over-allocated, remainder clamped to zero");
        return Err(ProjectionError::OverAllocation {
            excess,
            clamped: Box::new(result),
        });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SEARCH_BUDGET: f64 = 7_358_550.0;

    fn search_segments(freight: f64, small: f64, price: f64) -> Vec<BudgetSegment> {
        vec![
            BudgetSegment::new("freight", 18_761.0, freight),
            BudgetSegment::new("small_move", 6_411.0, small),
            BudgetSegment::new("price_quote", 7_900.0, price),
            BudgetSegment::remainder("remainder", 11_500.0),
        ]
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn test_reference_scenario() {
        let result = project(SEARCH_BUDGET, &search_segments(0.36, 0.03, 0.04), 569.0).unwrap();

        assert_close(result.segments[0].projected_conversions, 141.2, 0.5);
        assert_close(result.segments[1].projected_conversions, 34.5, 0.5);
        assert_close(result.segments[2].projected_conversions, 37.3, 0.5);
        assert_close(result.segments[3].projected_conversions, 364.9, 0.5);
        assert_close(result.segments[3].allocation_fraction, 0.57, 1e-9);
        assert_close(result.total_projected_conversions, 577.9, 0.5);
        assert_close(result.blended_cost_per_conversion.unwrap(), 12_733.0, 10.0);
        assert_close(result.delta_vs_baseline, result.total_projected_conversions - 569.0, 1e-9);
    }

    #[test]
    fn test_remainder_fraction_is_derived() {
        let mut segments = search_segments(0.20, 0.15, 0.10);
        segments[3].allocation_fraction = 0.9;
        let result = project(SEARCH_BUDGET, &segments, 569.0).unwrap();
        assert_close(result.segments[3].allocation_fraction, 0.55, 1e-9);
    }

    #[test]
    fn test_over_allocation_clamps_remainder() {
        let err = project(SEARCH_BUDGET, &search_segments(0.60, 0.40, 0.20), 569.0).unwrap_err();

        match &err {
            ProjectionError::OverAllocation { excess, clamped } => {
                assert_close(*excess, 0.2, 1e-9);
                let remainder = &clamped.segments[3];
                assert_eq!(remainder.allocation_fraction, 0.0);
                assert_eq!(remainder.budget, 0.0);
                assert_eq!(remainder.projected_conversions, 0.0);
            }
            other => panic!("expected over-allocation, got {other:?}"),
        }
        assert!(err.clamped_result().is_some());
    }

    #[test]
    fn test_exact_full_allocation_is_not_over_allocated() {
        let result = project(SEARCH_BUDGET, &search_segments(0.5, 0.3, 0.2), 569.0).unwrap();
        assert_eq!(result.segments[3].allocation_fraction, 0.0);
    }

    #[test]
    fn test_unknown_cost_contributes_nothing() {
        let segments = vec![
            BudgetSegment::new("untracked", 0.0, 0.7),
            BudgetSegment::remainder("rest", 10_000.0),
        ];
        let result = project(1_000_000.0, &segments, 0.0).unwrap();
        assert_eq!(result.segments[0].assumed_unit_cost, UnitCost::Unknown);
        assert_eq!(result.segments[0].projected_conversions, 0.0);
        assert_close(result.total_projected_conversions, 30.0, 1e-9);
    }

    #[test]
    fn test_zero_conversions_leave_blended_cost_undefined() {
        let segments = vec![
            BudgetSegment::new("a", UnitCost::Unknown, 0.4),
            BudgetSegment::remainder("b", UnitCost::Unknown),
        ];
        let result = project(500_000.0, &segments, 100.0).unwrap();
        assert_eq!(result.total_projected_conversions, 0.0);
        assert_eq!(result.blended_cost_per_conversion, None);
        assert_eq!(result.cost_delta_vs(12_900.0), None);
        assert_eq!(result.delta_vs_baseline, -100.0);
    }

    #[test]
    fn test_delta_percent_needs_baseline() {
        let result = project(SEARCH_BUDGET, &search_segments(0.36, 0.03, 0.04), 0.0).unwrap();
        assert_eq!(result.delta_percent_vs_baseline(), None);

        let result = project(SEARCH_BUDGET, &search_segments(0.20, 0.15, 0.10), 569.0).unwrap();
        let pct = result.delta_percent_vs_baseline().unwrap();
        assert!(pct > 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let segments = search_segments(0.36, 0.03, 0.04);
        assert_eq!(
            project(0.0, &segments, 569.0),
            Err(ProjectionError::InvalidBudget(0.0))
        );
        assert_eq!(
            project(SEARCH_BUDGET, &segments, -1.0),
            Err(ProjectionError::InvalidBaseline(-1.0))
        );
        assert_eq!(project(SEARCH_BUDGET, &[], 569.0), Err(ProjectionError::NoSegments));

        let negative = search_segments(-0.1, 0.03, 0.04);
        assert!(matches!(
            project(SEARCH_BUDGET, &negative, 569.0),
            Err(ProjectionError::InvalidFraction { .. })
        ));

        let mut bad_cost = search_segments(0.36, 0.03, 0.04);
        bad_cost[1].assumed_unit_cost = UnitCost::Known(-5.0);
        assert!(matches!(
            project(SEARCH_BUDGET, &bad_cost, 569.0),
            Err(ProjectionError::InvalidUnitCost { .. })
        ));
    }

    #[test]
    fn test_single_remainder_segment_takes_everything() {
        let segments = vec![BudgetSegment::remainder("all", 5_000.0)];
        let result = project(50_000.0, &segments, 0.0).unwrap();
        assert_eq!(result.segments[0].allocation_fraction, 1.0);
        assert_close(result.total_projected_conversions, 10.0, 1e-12);
        assert_close(result.blended_cost_per_conversion.unwrap(), 5_000.0, 1e-9);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_budget_is_conserved(
            budget in 1.0f64..1e9,
            a in 0.0f64..0.5,
            b in 0.0f64..0.5,
        ) {
            let segments = vec![
                BudgetSegment::new("a", 1_000.0, a),
                BudgetSegment::new("b", 2_000.0, b),
                BudgetSegment::remainder("rest", 3_000.0),
            ];
            let result = project(budget, &segments, 0.0).unwrap();
            prop_assert!((result.allocated_budget() - budget).abs() <= budget * 1e-9);
        }

        #[test]
        fn prop_shift_to_cheaper_segment_never_loses_conversions(
            budget in 1_000.0f64..1e8,
            cheap_cost in 100.0f64..10_000.0,
            extra_cost in 0.0f64..10_000.0,
            cheap in 0.0f64..0.4,
            expensive in 0.1f64..0.4,
            shift_ratio in 0.0f64..1.0,
        ) {
            let expensive_cost = cheap_cost + extra_cost;
            let shift = expensive * shift_ratio;
            let before = vec![
                BudgetSegment::new("cheap", cheap_cost, cheap),
                BudgetSegment::new("expensive", expensive_cost, expensive),
                BudgetSegment::remainder("rest", 5_000.0),
            ];
            let after = vec![
                BudgetSegment::new("cheap", cheap_cost, cheap + shift),
                BudgetSegment::new("expensive", expensive_cost, expensive - shift),
                BudgetSegment::remainder("rest", 5_000.0),
            ];
            let before = project(budget, &before, 0.0).unwrap();
            let after = project(budget, &after, 0.0).unwrap();
            let tolerance = before.total_projected_conversions.abs() * 1e-9 + 1e-9;
            prop_assert!(after.total_projected_conversions + tolerance >= before.total_projected_conversions);
        }

        #[test]
        fn prop_unknown_cost_segment_projects_zero(
            budget in 1.0f64..1e9,
            fraction in 0.0f64..=1.0,
        ) {
            let segments = vec![
                BudgetSegment::new("unknown", UnitCost::Unknown, fraction),
                BudgetSegment::remainder("rest", 4_000.0),
            ];
            let result = project(budget, &segments, 0.0).unwrap();
            prop_assert_eq!(result.segments[0].projected_conversions, 0.0);
        }

        #[test]
        fn prop_projection_is_deterministic(
            budget in 1.0f64..1e9,
            a in 0.0f64..0.6,
            b in 0.0f64..0.6,
            baseline in 0.0f64..10_000.0,
        ) {
            let segments = vec![
                BudgetSegment::new("a", 7_000.0, a),
                BudgetSegment::new("b", 9_000.0, b),
                BudgetSegment::remainder("rest", 11_000.0),
            ];
            let first = project(budget, &segments, baseline);
            let second = project(budget, &segments, baseline);
            prop_assert_eq!(first, second);
        }
    }
}
