use contracts::dashboards::d415_test_roadmap::{
    Hypothesis, RoadmapAction, RoadmapPhase, RoadmapQuery, TestRoadmapResponse,
};

use crate::dashboards::ReportError;
use crate::shared::data::dataset::{is_hypothesis_ref, HypothesisRecord, ReportDataset};

pub const ALL_PHASES: &str = "all";

/// Roadmap for all phases or a single one, with hypotheses resolved
pub fn get_test_roadmap(
    dataset: &ReportDataset,
    query: &RoadmapQuery,
) -> Result<TestRoadmapResponse, ReportError> {
    let selected = query
        .phase
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(ALL_PHASES);

    if selected != ALL_PHASES && !dataset.roadmap.iter().any(|p| p.id == selected) {
        return Err(ReportError::UnknownPhase(selected.to_string()));
    }

    let phases = dataset
        .roadmap
        .iter()
        .filter(|p| selected == ALL_PHASES || p.id == selected)
        .map(|p| RoadmapPhase {
            id: p.id.clone(),
            label: p.label.clone(),
            duration: p.duration.clone(),
            goal: p.goal.clone(),
            expected_impact: p.expected_impact.clone(),
            actions: p
                .actions
                .iter()
                .map(|a| {
                    let (hypothesis_refs, other_refs): (Vec<&String>, Vec<&String>) =
                        a.refs.iter().partition(|r| is_hypothesis_ref(r));
                    RoadmapAction {
                        number: a.number,
                        title: a.title.clone(),
                        detail: a.detail.clone(),
                        expected_effect: a.expected_effect.clone(),
                        hypotheses: hypothesis_refs
                            .into_iter()
                            .filter_map(|r| dataset.hypothesis(r))
                            .map(to_hypothesis)
                            .collect(),
                        other_refs: other_refs.into_iter().cloned().collect(),
                    }
                })
                .collect(),
        })
        .collect();

    let mut hypotheses: Vec<Hypothesis> = dataset.hypotheses.iter().map(to_hypothesis).collect();
    hypotheses.sort_by_key(|h| h.severity);

    let mut available_phases = vec![ALL_PHASES.to_string()];
    available_phases.extend(dataset.roadmap.iter().map(|p| p.id.clone()));

    Ok(TestRoadmapResponse {
        selected: selected.to_string(),
        available_phases,
        phases,
        hypotheses,
    })
}

fn to_hypothesis(record: &HypothesisRecord) -> Hypothesis {
    Hypothesis {
        id: record.id.clone(),
        channel: record.channel,
        severity: record.severity,
        title: record.title.clone(),
        evidence: record.evidence.clone(),
    }
}
