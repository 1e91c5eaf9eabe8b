use anyhow::{anyhow, Result};
use contracts::enums::AdChannel;
use contracts::shared::indicators::*;

use crate::dashboards::d412_meta_deep_dive::service::monthly_cpl;
use crate::shared::data::dataset::ReportDataset;
use crate::shared::format::{
    format_amount, format_money, format_money_exact, format_signed_percent, NOT_COMPUTABLE,
};
use crate::shared::indicators::metadata::ids;
use crate::shared::metrics::{cpl, efficiency_status, pct_change, status_by_cost_change};

// ---------------------------------------------------------------------------
// Scope helpers
// ---------------------------------------------------------------------------

/// (spend, conversions) for the context's channel, or all channels
fn scoped_totals(dataset: &ReportDataset, ctx: &IndicatorContext) -> Result<(f64, f64)> {
    match ctx.channel {
        Some(channel) => channel_totals(dataset, channel),
        None => Ok(dataset
            .channels
            .iter()
            .fold((0.0, 0.0), |(s, c), row| (s + row.spend, c + row.conversions))),
    }
}

fn channel_totals(dataset: &ReportDataset, channel: AdChannel) -> Result<(f64, f64)> {
    dataset
        .channel(channel)
        .map(|c| (c.spend, c.conversions))
        .ok_or_else(|| anyhow!("no totals for channel {channel}"))
}

fn scope_label(ctx: &IndicatorContext) -> String {
    match ctx.channel {
        Some(channel) => channel.display_name().to_string(),
        None => "All channels".to_string(),
    }
}

fn all_channels_cpl(dataset: &ReportDataset) -> Option<f64> {
    let (spend, conversions) = dataset
        .channels
        .iter()
        .fold((0.0, 0.0), |(s, c), row| (s + row.spend, c + row.conversions));
    cpl(spend, conversions)
}

fn money_display(dataset: &ReportDataset, value: Option<f64>) -> String {
    value
        .map(|v| format_money_exact(&dataset.report.currency, v))
        .unwrap_or_else(|| NOT_COMPUTABLE.to_string())
}

// ---------------------------------------------------------------------------
// Public compute functions
// ---------------------------------------------------------------------------

pub fn compute_total_spend(dataset: &ReportDataset, ctx: &IndicatorContext) -> Result<IndicatorValue> {
    let (spend, _) = scoped_totals(dataset, ctx)?;
    Ok(IndicatorValue {
        id: ids::ads_total_spend(),
        value: Some(spend),
        previous_value: None,
        change_percent: None,
        status: IndicatorStatus::Neutral,
        display: format_money(&dataset.report.currency, spend),
        subtitle: Some(format!(
            "{}, {} months",
            scope_label(ctx),
            dataset.report.period_months()
        )),
    })
}

pub fn compute_total_conversions(
    dataset: &ReportDataset,
    ctx: &IndicatorContext,
) -> Result<IndicatorValue> {
    let (_, conversions) = scoped_totals(dataset, ctx)?;
    Ok(IndicatorValue {
        id: ids::ads_total_conversions(),
        value: Some(conversions),
        previous_value: None,
        change_percent: None,
        status: IndicatorStatus::Neutral,
        display: format_amount(conversions),
        subtitle: Some(scope_label(ctx)),
    })
}

/// Scoped to one channel, the status compares it with the all-channel CPL.
pub fn compute_blended_cpl(dataset: &ReportDataset, ctx: &IndicatorContext) -> Result<IndicatorValue> {
    let (spend, conversions) = scoped_totals(dataset, ctx)?;
    let value = cpl(spend, conversions);
    let status = match ctx.channel {
        Some(_) => efficiency_status(value, conversions, all_channels_cpl(dataset)),
        None => IndicatorStatus::Neutral,
    };

    Ok(IndicatorValue {
        id: ids::ads_blended_cpl(),
        value,
        previous_value: None,
        change_percent: None,
        status,
        display: money_display(dataset, value),
        subtitle: Some(scope_label(ctx)),
    })
}

fn compute_channel_cpl(
    dataset: &ReportDataset,
    channel: AdChannel,
    id: IndicatorId,
) -> Result<IndicatorValue> {
    let (spend, conversions) = channel_totals(dataset, channel)?;
    let value = cpl(spend, conversions);
    let reference = all_channels_cpl(dataset);

    Ok(IndicatorValue {
        id,
        value,
        previous_value: None,
        change_percent: None,
        status: efficiency_status(value, conversions, reference),
        display: money_display(dataset, value),
        subtitle: reference.map(|r| {
            format!(
                "vs {} blended",
                format_money_exact(&dataset.report.currency, r)
            )
        }),
    })
}

pub fn compute_google_cpl(dataset: &ReportDataset, _ctx: &IndicatorContext) -> Result<IndicatorValue> {
    compute_channel_cpl(dataset, AdChannel::Google, ids::google_cpl())
}

pub fn compute_meta_cpl(dataset: &ReportDataset, _ctx: &IndicatorContext) -> Result<IndicatorValue> {
    compute_channel_cpl(dataset, AdChannel::Meta, ids::meta_cpl())
}

/// Change of the monthly Meta CPL between the first and last month
pub fn compute_meta_cpl_trend(
    dataset: &ReportDataset,
    _ctx: &IndicatorContext,
) -> Result<IndicatorValue> {
    let months = monthly_cpl(&dataset.meta_platform_months);
    let (first, last) = match (months.first(), months.last()) {
        (Some(first), Some(last)) if months.len() >= 2 => (first, last),
        _ => return Err(anyhow!("need at least two months of Meta data")),
    };

    let change = match (first.cpl, last.cpl) {
        (Some(f), Some(l)) => pct_change(l, f),
        _ => None,
    };

    Ok(IndicatorValue {
        id: ids::meta_cpl_trend(),
        value: change,
        previous_value: first.cpl,
        change_percent: change,
        status: status_by_cost_change(change),
        display: change
            .map(|c| format_signed_percent(c, 1))
            .unwrap_or_else(|| NOT_COMPUTABLE.to_string()),
        subtitle: Some(format!("{} to {}", first.month, last.month)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::report_store::test_dataset;

    #[test]
    fn test_total_spend_all_channels() {
        let value = compute_total_spend(test_dataset(), &IndicatorContext::default()).unwrap();
        assert_eq!(value.value, Some(41_220_286.0));
        assert_eq!(value.display, "₩41.2M");
        assert_eq!(value.subtitle.as_deref(), Some("All channels, 3 months"));
    }

    #[test]
    fn test_scoped_conversions() {
        let ctx = IndicatorContext {
            channel: Some(AdChannel::Meta),
        };
        let value = compute_total_conversions(test_dataset(), &ctx).unwrap();
        assert_eq!(value.value, Some(4_694.0));
        assert_eq!(value.display, "4,694");
    }

    #[test]
    fn test_channel_cpl_status() {
        let google = compute_google_cpl(test_dataset(), &IndicatorContext::default()).unwrap();
        assert_eq!(google.display, "₩9,272");
        assert_eq!(google.status, IndicatorStatus::Bad);

        let meta = compute_meta_cpl(test_dataset(), &IndicatorContext::default()).unwrap();
        assert_eq!(meta.display, "₩5,309");
        assert_eq!(meta.status, IndicatorStatus::Neutral);
    }

    #[test]
    fn test_blended_cpl_without_conversions() {
        let mut dataset = test_dataset().clone();
        for c in &mut dataset.channels {
            c.conversions = 0.0;
        }
        let value = compute_blended_cpl(&dataset, &IndicatorContext::default()).unwrap();
        assert_eq!(value.value, None);
        assert_eq!(value.display, NOT_COMPUTABLE);
    }

    #[test]
    fn test_meta_cpl_trend_improves() {
        let value = compute_meta_cpl_trend(test_dataset(), &IndicatorContext::default()).unwrap();
        let change = value.change_percent.unwrap();
        assert!(change < -5.0, "got {change}");
        assert_eq!(value.status, IndicatorStatus::Good);
        assert_eq!(value.subtitle.as_deref(), Some("2025-11 to 2026-01"));
    }
}
