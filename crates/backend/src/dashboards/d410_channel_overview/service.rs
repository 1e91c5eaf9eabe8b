use contracts::dashboards::d410_channel_overview::{
    ChannelOverviewResponse, Finding, FindingKind,
};
use contracts::enums::AdChannel;
use contracts::shared::indicators::{IndicatorContext, IndicatorStatus};

use crate::shared::data::dataset::ReportDataset;
use crate::shared::format::{format_money, format_money_exact, format_percent};
use crate::shared::indicators::metadata::overview_set;
use crate::shared::indicators::registry::IndicatorRegistry;
use crate::shared::metrics::{
    cpl, performance_row, share_percent, MIN_CONVERSIONS_FOR_STATUS,
};

/// Executive summary: KPIs, channel comparison and headline findings
pub fn get_channel_overview(dataset: &ReportDataset) -> ChannelOverviewResponse {
    let indicators = IndicatorRegistry::new().compute(
        &overview_set(),
        &IndicatorContext::default(),
        dataset,
    );

    let total_spend: f64 = dataset.channels.iter().map(|c| c.spend).sum();
    let total_conversions: f64 = dataset.channels.iter().map(|c| c.conversions).sum();
    let blended = cpl(total_spend, total_conversions);

    let channels = dataset
        .channels
        .iter()
        .map(|c| {
            performance_row(
                c.channel.code(),
                c.channel.display_name(),
                None,
                c.spend,
                c.conversions,
                total_spend,
                blended,
            )
        })
        .collect();

    let channel_cpl = |channel| {
        dataset
            .channel(channel)
            .and_then(|c| cpl(c.spend, c.conversions))
    };
    let meta_vs_google_cpl_gap_percent =
        match (channel_cpl(AdChannel::Google), channel_cpl(AdChannel::Meta)) {
            (Some(google), Some(meta)) if google > 0.0 => Some((google - meta) / google * 100.0),
            _ => None,
        };

    let findings = [
        budget_drain(dataset),
        underfunded_opportunity(dataset),
        winning_message(dataset),
    ]
    .into_iter()
    .flatten()
    .collect();

    ChannelOverviewResponse {
        indicators,
        channels,
        meta_vs_google_cpl_gap_percent,
        findings,
    }
}

/// Google intent with the highest CPL among those with enough conversions
fn budget_drain(dataset: &ReportDataset) -> Option<Finding> {
    let currency = &dataset.report.currency;
    let intent_spend: f64 = dataset.google_intents.iter().map(|i| i.spend).sum();

    let (intent, worst_cpl) = dataset
        .google_intents
        .iter()
        .filter(|i| i.conversions >= MIN_CONVERSIONS_FOR_STATUS)
        .filter_map(|i| cpl(i.spend, i.conversions).map(|c| (i, c)))
        .max_by(|a, b| a.1.total_cmp(&b.1))?;

    let best_cpl = dataset
        .google_intents
        .iter()
        .filter(|i| i.conversions >= MIN_CONVERSIONS_FOR_STATUS)
        .filter_map(|i| cpl(i.spend, i.conversions))
        .min_by(f64::total_cmp)?;

    Some(Finding {
        kind: FindingKind::BudgetDrain,
        title: format!("{}: largest budget drain", intent.label),
        headline: format_money_exact(currency, intent.spend),
        details: vec![
            format!(
                "{} of search intent spend",
                format_percent(share_percent(intent.spend, intent_spend), 1)
            ),
            format!(
                "CPL {} ({:.1}x the cheapest intent)",
                format_money_exact(currency, worst_cpl),
                worst_cpl / best_cpl
            ),
            format!(
                "CTR {} but CVR only {}",
                format_percent(intent.ctr_percent, 1),
                format_percent(intent.cvr_percent, 1)
            ),
        ],
        status: IndicatorStatus::Bad,
    })
}

/// Best converting Google intent and how little budget it gets
fn underfunded_opportunity(dataset: &ReportDataset) -> Option<Finding> {
    let currency = &dataset.report.currency;
    let intent_spend: f64 = dataset.google_intents.iter().map(|i| i.spend).sum();

    let intent = dataset
        .google_intents
        .iter()
        .filter(|i| i.conversions > 0.0)
        .max_by(|a, b| a.cvr_percent.total_cmp(&b.cvr_percent))?;

    let mut details = vec![format!(
        "Only {} of search intent spend ({})",
        format_percent(share_percent(intent.spend, intent_spend), 1),
        format_money(currency, intent.spend)
    )];
    if let Some(c) = cpl(intent.spend, intent.conversions) {
        details.push(format!("CPL {}", format_money_exact(currency, c)));
    }

    Some(Finding {
        kind: FindingKind::UnderfundedOpportunity,
        title: format!("{}: highest conversion rate", intent.label),
        headline: format!("CVR {}", format_percent(intent.cvr_percent, 1)),
        details,
        status: IndicatorStatus::Good,
    })
}

/// Message type with the lowest CPL on any channel
fn winning_message(dataset: &ReportDataset) -> Option<Finding> {
    let currency = &dataset.report.currency;

    let (message, channel, best) = dataset
        .message_types
        .iter()
        .flat_map(|m| {
            [
                m.google_cpl.map(|c| (m, AdChannel::Google, c)),
                m.meta_cpl.map(|c| (m, AdChannel::Meta, c)),
            ]
        })
        .flatten()
        .filter(|(_, _, c)| *c > 0.0)
        .min_by(|a, b| a.2.total_cmp(&b.2))?;

    let mut details = vec![format!("Cheapest on {}", channel.display_name())];
    for (other, value) in [
        (AdChannel::Google, message.google_cpl),
        (AdChannel::Meta, message.meta_cpl),
    ] {
        if let Some(v) = value.filter(|_| other != channel) {
            details.push(format!(
                "{}: {}",
                other.display_name(),
                format_money_exact(currency, v)
            ));
        }
    }

    Some(Finding {
        kind: FindingKind::WinningMessage,
        title: format!("{}: winning message", message.label),
        headline: format!("CPL {}", format_money_exact(currency, best)),
        details,
        status: IndicatorStatus::Good,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::report_store::test_dataset;

    #[test]
    fn test_channel_rows() {
        let response = get_channel_overview(test_dataset());
        assert_eq!(response.channels.len(), 2);

        let google = &response.channels[0];
        assert_eq!(google.id, "google");
        assert!((google.budget_share_percent - 39.54).abs() < 0.01);
        assert_eq!(google.status, IndicatorStatus::Bad);

        let shares: f64 = response.channels.iter().map(|c| c.budget_share_percent).sum();
        assert!((shares - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_meta_cheaper_than_google() {
        let response = get_channel_overview(test_dataset());
        let gap = response.meta_vs_google_cpl_gap_percent.unwrap();
        assert!((gap - 42.7).abs() < 0.1, "got {gap}");
    }

    #[test]
    fn test_findings() {
        let response = get_channel_overview(test_dataset());
        let kinds: Vec<_> = response.findings.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FindingKind::BudgetDrain,
                FindingKind::UnderfundedOpportunity,
                FindingKind::WinningMessage
            ]
        );

        assert!(response.findings[0].title.starts_with("Van / freight"));
        assert_eq!(response.findings[0].headline, "₩2,626,506");
        assert_eq!(response.findings[0].details[0], "35.7% of search intent spend");

        assert!(response.findings[1].title.starts_with("Studio / small moves"));
        assert_eq!(response.findings[1].headline, "CVR 27.4%");

        assert!(response.findings[2].title.starts_with("Price / comparison"));
        assert_eq!(response.findings[2].headline, "CPL ₩3,850");
        assert_eq!(response.findings[2].details, vec!["Cheapest on Meta Ads", "Google Ads: ₩5,767"]);
    }

    #[test]
    fn test_indicators_follow_overview_set() {
        let response = get_channel_overview(test_dataset());
        let ids: Vec<_> = response.indicators.iter().map(|v| v.id.clone()).collect();
        assert_eq!(ids, overview_set());
    }

    #[test]
    fn test_empty_tables_give_no_findings() {
        let mut dataset = test_dataset().clone();
        dataset.google_intents.clear();
        dataset.message_types.clear();
        let response = get_channel_overview(&dataset);
        assert!(response.findings.is_empty());
    }
}
