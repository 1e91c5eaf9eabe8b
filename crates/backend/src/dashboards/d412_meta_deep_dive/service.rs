use std::collections::BTreeMap;

use contracts::dashboards::d412_meta_deep_dive::{
    AdSetRow, CreativeMonthPoint, CreativeTrend, MetaDeepDiveQuery, MetaDeepDiveResponse,
    MonthlyCplPoint, PlatformMonthRow,
};
use contracts::enums::AdChannel;

use crate::dashboards::ReportError;
use crate::shared::data::dataset::{CreativeMonth, PlatformMonth, ReportDataset};
use crate::shared::metrics::{
    cpl, cpl_sort_key, efficiency_status, median, pct_change, share_percent, trend_direction,
};

/// Ad sets below this share of Meta spend are hidden by default (percent)
pub const DEFAULT_MIN_BUDGET_SHARE: f64 = 0.5;

/// Meta page: ad sets, platform months and creative trends
pub fn get_meta_deep_dive(
    dataset: &ReportDataset,
    query: &MetaDeepDiveQuery,
) -> Result<MetaDeepDiveResponse, ReportError> {
    let min_share = query.min_budget_share.unwrap_or(DEFAULT_MIN_BUDGET_SHARE);
    if !(0.0..=100.0).contains(&min_share) {
        return Err(ReportError::InvalidShareThreshold(min_share));
    }

    let (spend, conversions) = dataset
        .channel(AdChannel::Meta)
        .map(|c| (c.spend, c.conversions))
        .unwrap_or_default();
    let channel_cpl = cpl(spend, conversions);

    let ad_set_spend: f64 = dataset.meta_ad_sets.iter().map(|a| a.spend).sum();
    let (visible, hidden): (Vec<_>, Vec<_>) = dataset
        .meta_ad_sets
        .iter()
        .partition(|a| share_percent(a.spend, ad_set_spend) >= min_share);

    // CTR/CVR gap is judged against the ad sets actually shown
    let ctrs: Vec<f64> = visible.iter().map(|a| a.ctr_percent).collect();
    let cvrs: Vec<f64> = visible.iter().map(|a| a.cvr_percent).collect();
    let median_ctr = median(&ctrs);
    let median_cvr = median(&cvrs);

    let mut ad_sets: Vec<AdSetRow> = visible
        .iter()
        .map(|a| {
            let row_cpl = cpl(a.spend, a.conversions);
            let high_ctr_low_cvr = match (median_ctr, median_cvr) {
                (Some(ctr), Some(cvr)) => a.ctr_percent >= ctr && a.cvr_percent < cvr,
                _ => false,
            };
            AdSetRow {
                id: a.id.clone(),
                label: a.label.clone(),
                audience: a.audience.clone(),
                message_type: a.message_type.clone(),
                spend: a.spend,
                conversions: a.conversions,
                cpl: row_cpl,
                ctr_percent: a.ctr_percent,
                cvr_percent: a.cvr_percent,
                budget_share_percent: share_percent(a.spend, ad_set_spend),
                high_ctr_low_cvr,
                status: efficiency_status(row_cpl, a.conversions, channel_cpl),
            }
        })
        .collect();
    ad_sets.sort_by(|a, b| cpl_sort_key(a.cpl).total_cmp(&cpl_sort_key(b.cpl)));

    let platform_months = dataset
        .meta_platform_months
        .iter()
        .map(|p| PlatformMonthRow {
            month: p.month.clone(),
            platform: p.platform.clone(),
            spend: p.spend,
            conversions: p.conversions,
            cpl: cpl(p.spend, p.conversions),
        })
        .collect();

    let monthly = monthly_cpl(&dataset.meta_platform_months);
    let cpl_trend_percent = match (monthly.first(), monthly.last()) {
        (Some(first), Some(last)) if monthly.len() >= 2 => match (first.cpl, last.cpl) {
            (Some(f), Some(l)) => pct_change(l, f),
            _ => None,
        },
        _ => None,
    };

    Ok(MetaDeepDiveResponse {
        spend,
        conversions,
        cpl: channel_cpl,
        min_budget_share_percent: min_share,
        ad_sets,
        hidden_ad_sets: hidden.len(),
        platform_months,
        monthly_cpl: monthly,
        cpl_trend_percent,
        creative_trends: creative_trends(&dataset.meta_creative_months),
    })
}

/// Channel CPL per month across platforms, in chronological order
pub fn monthly_cpl(rows: &[PlatformMonth]) -> Vec<MonthlyCplPoint> {
    let mut months: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for row in rows {
        let entry = months.entry(row.month.as_str()).or_default();
        entry.0 += row.spend;
        entry.1 += row.conversions;
    }

    months
        .into_iter()
        .map(|(month, (spend, conversions))| MonthlyCplPoint {
            month: month.to_string(),
            spend,
            conversions,
            cpl: cpl(spend, conversions),
        })
        .collect()
}

/// One trend per creative, in order of first appearance
pub fn creative_trends(rows: &[CreativeMonth]) -> Vec<CreativeTrend> {
    let mut order: Vec<&str> = Vec::new();
    let mut points: BTreeMap<&str, Vec<CreativeMonthPoint>> = BTreeMap::new();

    for row in rows {
        if !points.contains_key(row.creative.as_str()) {
            order.push(&row.creative);
        }
        points
            .entry(row.creative.as_str())
            .or_default()
            .push(CreativeMonthPoint {
                month: row.month.clone(),
                cpl: row.cpl,
                conversions: row.conversions,
            });
    }

    order
        .into_iter()
        .filter_map(|creative| {
            let mut series = points.remove(creative)?;
            series.sort_by(|a, b| a.month.cmp(&b.month));
            let first = series.first()?.clone();
            let last = series.last()?.clone();
            let change_percent = if series.len() >= 2 {
                pct_change(last.cpl, first.cpl)
            } else {
                None
            };
            Some(CreativeTrend {
                creative: creative.to_string(),
                first_month: first.month,
                last_month: last.month,
                first_cpl: first.cpl,
                last_cpl: last.cpl,
                change_percent,
                direction: trend_direction(change_percent),
                points: series,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::report_store::test_dataset;
    use contracts::dashboards::d412_meta_deep_dive::TrendDirection;
    use contracts::shared::indicators::IndicatorStatus;

    fn default_page() -> MetaDeepDiveResponse {
        get_meta_deep_dive(test_dataset(), &MetaDeepDiveQuery::default()).unwrap()
    }

    #[test]
    fn test_small_ad_sets_hidden() {
        let response = default_page();
        assert_eq!(response.min_budget_share_percent, DEFAULT_MIN_BUDGET_SHARE);
        assert_eq!(response.ad_sets.len(), 6);
        assert_eq!(response.hidden_ad_sets, 2);
        assert!(response.ad_sets.iter().all(|a| a.id != "common" && a.id != "new_nov"));
    }

    #[test]
    fn test_zero_threshold_shows_everything() {
        let query = MetaDeepDiveQuery {
            min_budget_share: Some(0.0),
        };
        let response = get_meta_deep_dive(test_dataset(), &query).unwrap();
        assert_eq!(response.ad_sets.len(), 8);
        assert_eq!(response.hidden_ad_sets, 0);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let query = MetaDeepDiveQuery {
            min_budget_share: Some(150.0),
        };
        assert!(matches!(
            get_meta_deep_dive(test_dataset(), &query),
            Err(ReportError::InvalidShareThreshold(_))
        ));
    }

    #[test]
    fn test_ad_sets_sorted_and_flagged() {
        let response = default_page();
        assert_eq!(response.ad_sets[0].id, "moving_price");
        assert_eq!(response.ad_sets[0].status, IndicatorStatus::Good);

        let flagged: Vec<&str> = response
            .ad_sets
            .iter()
            .filter(|a| a.high_ctr_low_cvr)
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(flagged, vec!["everytime"]);
    }

    #[test]
    fn test_monthly_cpl_trend() {
        let response = default_page();
        let months: Vec<&str> = response.monthly_cpl.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2025-11", "2025-12", "2026-01"]);
        assert_eq!(response.monthly_cpl[0].conversions, 1_155.0);
        assert!((response.cpl_trend_percent.unwrap() + 11.64).abs() < 0.01);
    }

    #[test]
    fn test_creative_trends() {
        let trends = default_page().creative_trends;
        let direction = |name: &str| {
            trends
                .iter()
                .find(|t| t.creative.contains(name))
                .map(|t| t.direction)
        };
        assert_eq!(direction("Price creative"), Some(TrendDirection::Improving));
        assert_eq!(direction("Everytime"), Some(TrendDirection::Stable));
        assert_eq!(direction("All creatives"), Some(TrendDirection::Worsening));

        let single = trends.iter().find(|t| t.creative.contains("New creative")).unwrap();
        assert_eq!(single.points.len(), 1);
        assert_eq!(single.change_percent, None);
        assert_eq!(single.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_monthly_cpl_orders_months() {
        let rows = vec![
            PlatformMonth {
                month: "2026-01".into(),
                platform: "Instagram".into(),
                spend: 100.0,
                conversions: 0.0,
            },
            PlatformMonth {
                month: "2025-12".into(),
                platform: "Instagram".into(),
                spend: 100.0,
                conversions: 4.0,
            },
        ];
        let points = monthly_cpl(&rows);
        assert_eq!(points[0].month, "2025-12");
        assert_eq!(points[0].cpl, Some(25.0));
        assert_eq!(points[1].cpl, None);
    }
}
