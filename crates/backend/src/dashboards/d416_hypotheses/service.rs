use contracts::dashboards::d416_hypotheses::{
    EvidenceMetric, EvidenceUnit, HypothesesQuery, HypothesesResponse, HypothesisDetail,
    HypothesisGroup, RegionalCplRow,
};
use contracts::enums::AdChannel;

use crate::shared::data::dataset::{HypothesisRecord, ReportDataset};
use crate::shared::format::{format_amount, format_money_exact, format_percent};
use crate::shared::metrics::{cpl, efficiency_status};

/// Hypotheses grouped by channel, in dataset order
pub fn get_hypotheses(dataset: &ReportDataset, query: &HypothesesQuery) -> HypothesesResponse {
    let groups = AdChannel::all()
        .into_iter()
        .filter(|channel| query.channel.map_or(true, |c| c == *channel))
        .filter_map(|channel| {
            let hypotheses: Vec<HypothesisDetail> = dataset
                .hypotheses
                .iter()
                .filter(|h| h.channel == channel)
                .map(|h| to_detail(dataset, h))
                .collect();
            let (first, last) = (hypotheses.first()?, hypotheses.last()?);
            let title = format!(
                "{} hypotheses ({}-{})",
                channel.display_name(),
                first.id,
                last.id
            );
            Some(HypothesisGroup {
                channel,
                title,
                hypotheses,
            })
        })
        .collect();

    HypothesesResponse { groups }
}

fn to_detail(dataset: &ReportDataset, record: &HypothesisRecord) -> HypothesisDetail {
    let currency = &dataset.report.currency;
    let channel_cpl = dataset
        .channel(record.channel)
        .and_then(|c| cpl(c.spend, c.conversions));

    let metrics = record
        .metrics
        .iter()
        .map(|m| EvidenceMetric {
            label: m.label.clone(),
            value: m.value,
            unit: m.unit,
            display: match m.unit {
                EvidenceUnit::Money => format_money_exact(currency, m.value),
                EvidenceUnit::Percent => format_percent(m.value, 1),
                EvidenceUnit::Count => format_amount(m.value),
                EvidenceUnit::Ratio => format!("{:.1}x", m.value),
            },
        })
        .collect();

    let regions = record
        .regions
        .iter()
        .map(|r| RegionalCplRow {
            region: r.region.clone(),
            cpl: r.cpl,
            conversions: r.conversions,
            status: efficiency_status(Some(r.cpl), r.conversions, channel_cpl),
            display_cpl: format_money_exact(currency, r.cpl),
        })
        .collect();

    let tested_by = dataset
        .roadmap
        .iter()
        .flat_map(|phase| &phase.actions)
        .filter(|action| action.refs.iter().any(|r| *r == record.id))
        .map(|action| action.number)
        .collect();

    HypothesisDetail {
        id: record.id.clone(),
        severity: record.severity,
        title: record.title.clone(),
        observation: record.observation.clone(),
        explanation: record.explanation.clone(),
        evidence: record.evidence.clone(),
        metrics,
        regions,
        tested_by,
    }
}
