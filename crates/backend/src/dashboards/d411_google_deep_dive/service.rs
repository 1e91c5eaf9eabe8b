use contracts::dashboards::d411_google_deep_dive::{
    AssetGroupRow, GoogleDeepDiveResponse, IntentRow, QuadrantThresholds,
};
use contracts::enums::AdChannel;

use crate::shared::data::dataset::ReportDataset;
use crate::shared::metrics::{
    cpl, cpl_sort_key, efficiency_status, performance_row, quadrant, share_percent,
    DEFAULT_QUADRANT_THRESHOLDS,
};

/// Google page: intents on the opportunity matrix, campaigns, PMax groups
pub fn get_google_deep_dive(dataset: &ReportDataset) -> GoogleDeepDiveResponse {
    get_google_deep_dive_with(dataset, DEFAULT_QUADRANT_THRESHOLDS)
}

pub fn get_google_deep_dive_with(
    dataset: &ReportDataset,
    thresholds: QuadrantThresholds,
) -> GoogleDeepDiveResponse {
    let (spend, conversions) = dataset
        .channel(AdChannel::Google)
        .map(|c| (c.spend, c.conversions))
        .unwrap_or_default();
    let channel_cpl = cpl(spend, conversions);

    let intent_spend: f64 = dataset.google_intents.iter().map(|i| i.spend).sum();
    let intent_conversions: f64 = dataset.google_intents.iter().map(|i| i.conversions).sum();
    let intent_cpl = cpl(intent_spend, intent_conversions);

    let mut intents: Vec<IntentRow> = dataset
        .google_intents
        .iter()
        .map(|i| {
            let row_cpl = cpl(i.spend, i.conversions);
            IntentRow {
                id: i.id.clone(),
                label: i.label.clone(),
                spend: i.spend,
                conversions: i.conversions,
                cpl: row_cpl,
                ctr_percent: i.ctr_percent,
                cvr_percent: i.cvr_percent,
                budget_share_percent: share_percent(i.spend, intent_spend),
                service_match: i.service_match,
                status: efficiency_status(row_cpl, i.conversions, intent_cpl),
                quadrant: quadrant(row_cpl, i.cvr_percent, &thresholds),
            }
        })
        .collect();
    intents.sort_by(|a, b| cpl_sort_key(a.cpl).total_cmp(&cpl_sort_key(b.cpl)));

    let campaign_spend: f64 = dataset.google_campaigns.iter().map(|c| c.spend).sum();
    let campaigns = dataset
        .google_campaigns
        .iter()
        .map(|c| {
            performance_row(
                &c.id,
                &c.name,
                Some(c.kind.clone()),
                c.spend,
                c.conversions,
                campaign_spend,
                channel_cpl,
            )
        })
        .collect();

    let group_spend: f64 = dataset.pmax_asset_groups.iter().map(|g| g.spend).sum();
    let pmax_asset_groups = dataset
        .pmax_asset_groups
        .iter()
        .map(|g| AssetGroupRow {
            name: g.name.clone(),
            spend: g.spend,
            conversions: g.conversions,
            cpl: cpl(g.spend, g.conversions),
            cvr_percent: g.cvr_percent,
            budget_share_percent: share_percent(g.spend, group_spend),
        })
        .collect();

    GoogleDeepDiveResponse {
        spend,
        conversions,
        cpl: channel_cpl,
        intents,
        quadrant_thresholds: thresholds,
        campaigns,
        pmax_asset_groups,
    }
}
