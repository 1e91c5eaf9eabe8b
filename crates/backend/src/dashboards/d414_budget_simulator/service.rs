use std::collections::HashMap;

use contracts::dashboards::d414_budget_simulator::{
    BudgetSimulatorResponse, OverAllocationWarning, ProjectRequest, ProjectionDisplay,
    ProjectionResponse, ScenarioProjection, ScenariosResponse, SegmentProjection,
    SimulatorSegment,
};

use crate::dashboards::ReportError;
use crate::shared::data::dataset::{ReportDataset, SimulatorConfig};
use crate::shared::format::{
    format_money, format_money_delta, format_money_exact, format_percent, format_signed,
    format_signed_percent, NOT_COMPUTABLE,
};
use crate::shared::projection::{project, BudgetSegment, ProjectionResult, UnitCost};

/// Simulator page: slider bounds, default projection and presets
pub fn get_budget_simulator(dataset: &ReportDataset) -> Result<BudgetSimulatorResponse, ReportError> {
    let sim = &dataset.simulator;

    let segments = sim
        .segments
        .iter()
        .map(|s| SimulatorSegment {
            id: s.id.clone(),
            label: s.label.clone(),
            unit_cost: UnitCost::observed(s.unit_cost).value(),
            default_fraction: if s.remainder { 0.0 } else { s.default_fraction },
            max_fraction: s.max_fraction,
            is_remainder: s.remainder,
        })
        .collect();

    let default_projection = project_allocation(dataset, &ProjectRequest::default())?;
    let scenarios = get_scenarios(dataset)?.scenarios;

    Ok(BudgetSimulatorResponse {
        total_budget: sim.total_budget,
        baseline_conversions: sim.baseline_conversions,
        baseline_cost_per_conversion: sim.baseline_cost_per_conversion,
        segments,
        default_projection,
        scenarios,
    })
}

/// Project one allocation.
///
/// Segments missing from the request keep their default; an allocation
/// for the remainder is ignored. Over-allocation is not an error: the
/// clamped projection comes back with a warning.
pub fn project_allocation(
    dataset: &ReportDataset,
    request: &ProjectRequest,
) -> Result<ProjectionResponse, ReportError> {
    let sim = &dataset.simulator;

    let mut requested: HashMap<&str, f64> = HashMap::new();
    for allocation in &request.allocations {
        let segment = sim
            .segments
            .iter()
            .find(|s| s.id == allocation.segment_id)
            .ok_or_else(|| ReportError::UnknownSegment(allocation.segment_id.clone()))?;
        if segment.remainder {
            tracing::debug!("ignoring allocation for remainder segment '{}'", segment.id);
            continue;
        }
        if allocation.fraction > segment.max_fraction {
            return Err(ReportError::AboveMaxFraction {
                segment: segment.id.clone(),
                fraction: allocation.fraction,
                max: segment.max_fraction,
            });
        }
        requested.insert(segment.id.as_str(), allocation.fraction);
    }

    let segments = budget_segments(sim, |id, default| {
        requested.get(id).copied().unwrap_or(default)
    });

    run_projection(
        dataset,
        &segments,
        request.total_budget.unwrap_or(sim.total_budget),
        request.baseline_conversions.unwrap_or(sim.baseline_conversions),
    )
}

/// Every preset projected through the same operation
pub fn get_scenarios(dataset: &ReportDataset) -> Result<ScenariosResponse, ReportError> {
    let sim = &dataset.simulator;
    let mut scenarios = Vec::with_capacity(sim.scenarios.len());

    for scenario in &sim.scenarios {
        let mut fractions = scenario.fractions.iter().copied();
        let segments = budget_segments(sim, |_, default| fractions.next().unwrap_or(default));

        let allocation_summary = sim
            .allocatable_segments()
            .zip(&scenario.fractions)
            .map(|(s, f)| format!("{} {}", s.label, format_percent(f * 100.0, 0)))
            .collect::<Vec<_>>()
            .join(", ");

        scenarios.push(ScenarioProjection {
            id: scenario.id.clone(),
            label: scenario.label.clone(),
            allocation_summary,
            projection: run_projection(
                dataset,
                &segments,
                sim.total_budget,
                sim.baseline_conversions,
            )?,
        });
    }

    let best_scenario_id = scenarios
        .iter()
        .max_by(|a, b| {
            a.projection
                .total_projected_conversions
                .total_cmp(&b.projection.total_projected_conversions)
        })
        .map(|s| s.id.clone());

    Ok(ScenariosResponse {
        scenarios,
        best_scenario_id,
    })
}

/// Projector input in dataset order; `fraction_for(id, default)` picks the
/// fraction of each allocatable segment
fn budget_segments(
    sim: &SimulatorConfig,
    mut fraction_for: impl FnMut(&str, f64) -> f64,
) -> Vec<BudgetSegment> {
    sim.segments
        .iter()
        .map(|s| {
            let unit_cost = UnitCost::observed(s.unit_cost);
            if s.remainder {
                BudgetSegment::remainder(&s.id, unit_cost)
            } else {
                BudgetSegment::new(&s.id, unit_cost, fraction_for(&s.id, s.default_fraction))
            }
        })
        .collect()
}

fn run_projection(
    dataset: &ReportDataset,
    segments: &[BudgetSegment],
    total_budget: f64,
    baseline_conversions: f64,
) -> Result<ProjectionResponse, ReportError> {
    let err = match project(total_budget, segments, baseline_conversions) {
        Ok(result) => return Ok(to_response(dataset, &result, None)),
        Err(err) => err,
    };

    match err.clamped_result() {
        Some(clamped) => {
            // remainder is at zero, so the allocated share is the explicit sum
            let excess = clamped.allocated_budget() / clamped.total_budget - 1.0;
            tracing::warn!(
                "Budget simulator: allocations exceed 100% by {:.1} pp, remainder clamped",
                excess * 100.0
            );
            let remainder = dataset
                .simulator
                .segments
                .last()
                .map(|s| s.label.as_str())
                .unwrap_or("remainder");
            let warning = OverAllocationWarning {
                excess_fraction: excess,
                message: format!(
                    "Allocations exceed 100% by {:.1} percentage points; {} set to 0%",
                    excess * 100.0,
                    remainder
                ),
            };
            Ok(to_response(dataset, clamped, Some(warning)))
        }
        None => Err(err.into()),
    }
}

fn to_response(
    dataset: &ReportDataset,
    result: &ProjectionResult,
    over_allocation: Option<OverAllocationWarning>,
) -> ProjectionResponse {
    let currency = &dataset.report.currency;
    let baseline_cost = dataset.simulator.baseline_cost_per_conversion;

    let segments: Vec<SegmentProjection> = result
        .segments
        .iter()
        .zip(&dataset.simulator.segments)
        .map(|(outcome, record)| SegmentProjection {
            segment_id: outcome.name.clone(),
            label: record.label.clone(),
            allocation_fraction: outcome.allocation_fraction,
            budget: outcome.budget,
            unit_cost: outcome.assumed_unit_cost.value(),
            projected_conversions: outcome.projected_conversions,
        })
        .collect();

    let segment_lines = segments
        .iter()
        .map(|s| {
            let conversions = match s.unit_cost {
                Some(_) => format!("{:.1} conversions", s.projected_conversions),
                None => "cost per conversion unknown".to_string(),
            };
            format!(
                "{}: {} of budget, {}, {}",
                s.label,
                format_percent(s.allocation_fraction * 100.0, 0),
                format_money(currency, s.budget),
                conversions
            )
        })
        .collect();

    let delta_percent = result.delta_percent_vs_baseline();
    let cost_delta = baseline_cost.and_then(|b| result.cost_delta_vs(b));

    let display = ProjectionDisplay {
        total_conversions: format!("{:.0}", result.total_projected_conversions),
        blended_cost_per_conversion: result
            .blended_cost_per_conversion
            .map(|c| format_money_exact(currency, c))
            .unwrap_or_else(|| NOT_COMPUTABLE.to_string()),
        delta_vs_baseline: match delta_percent {
            Some(p) => format!(
                "{} ({})",
                format_signed(result.delta_vs_baseline),
                format_signed_percent(p, 1)
            ),
            None => format_signed(result.delta_vs_baseline),
        },
        cost_delta_vs_baseline: cost_delta.map(|d| format_money_delta(currency, d)),
        segments: segment_lines,
    };

    ProjectionResponse {
        total_budget: result.total_budget,
        allocated_budget: result.allocated_budget(),
        segments,
        total_projected_conversions: result.total_projected_conversions,
        blended_cost_per_conversion: result.blended_cost_per_conversion,
        baseline_conversions: result.baseline_conversions,
        delta_vs_baseline: result.delta_vs_baseline,
        delta_percent_vs_baseline: delta_percent,
        baseline_cost_per_conversion: baseline_cost,
        cost_delta_vs_baseline: cost_delta,
        over_allocation,
        display,
    }
}
