//! Derived advertising metrics shared by the report pages

use contracts::dashboards::d411_google_deep_dive::{Quadrant, QuadrantThresholds};
use contracts::dashboards::d412_meta_deep_dive::TrendDirection;
use contracts::shared::indicators::IndicatorStatus;
use contracts::shared::metrics::PerformanceRow;

/// Below this many conversions a CPL says little
pub const MIN_CONVERSIONS_FOR_STATUS: f64 = 5.0;

/// CPL under `GOOD_RATIO × reference` is good, over `BAD_RATIO × reference` bad
pub const GOOD_RATIO: f64 = 0.8;
pub const BAD_RATIO: f64 = 1.2;

/// Month-over-period CPL change (%) treated as noise
pub const TREND_STABLE_BAND: f64 = 5.0;

pub const DEFAULT_QUADRANT_THRESHOLDS: QuadrantThresholds = QuadrantThresholds {
    cpl: 12_000.0,
    cvr_percent: 17.0,
};

/// Cost per lead; `None` without conversions
pub fn cpl(spend: f64, conversions: f64) -> Option<f64> {
    if conversions > 0.0 {
        Some(spend / conversions)
    } else {
        None
    }
}

/// `part / total` in percent, 0 for an empty total
pub fn share_percent(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}

pub fn pct_change(cur: f64, prev: f64) -> Option<f64> {
    if prev.abs() < 0.01 {
        None
    } else {
        Some(((cur - prev) / prev.abs()) * 100.0)
    }
}

/// Status of a cost figure against a reference CPL (lower is better)
pub fn efficiency_status(
    cpl: Option<f64>,
    conversions: f64,
    reference: Option<f64>,
) -> IndicatorStatus {
    if conversions < MIN_CONVERSIONS_FOR_STATUS {
        return IndicatorStatus::Warning;
    }
    cost_status(cpl, reference)
}

/// Same as [`efficiency_status`] for figures without a conversion count
pub fn cost_status(cpl: Option<f64>, reference: Option<f64>) -> IndicatorStatus {
    match (cpl, reference) {
        (Some(c), Some(r)) if c < r * GOOD_RATIO => IndicatorStatus::Good,
        (Some(c), Some(r)) if c > r * BAD_RATIO => IndicatorStatus::Bad,
        _ => IndicatorStatus::Neutral,
    }
}

/// Status of a change where a decrease is an improvement
pub fn status_by_cost_change(change_percent: Option<f64>) -> IndicatorStatus {
    match change_percent {
        Some(c) if c < -TREND_STABLE_BAND => IndicatorStatus::Good,
        Some(c) if c > TREND_STABLE_BAND => IndicatorStatus::Bad,
        _ => IndicatorStatus::Neutral,
    }
}

pub fn quadrant(
    cpl: Option<f64>,
    cvr_percent: f64,
    thresholds: &QuadrantThresholds,
) -> Option<Quadrant> {
    let cpl = cpl?;
    let cheap = cpl < thresholds.cpl;
    let converts = cvr_percent >= thresholds.cvr_percent;
    Some(match (cheap, converts) {
        (true, true) => Quadrant::SweetSpot,
        (false, true) => Quadrant::ScaleCandidate,
        (true, false) => Quadrant::CheapLowIntent,
        (false, false) => Quadrant::Drain,
    })
}

pub fn trend_direction(change_percent: Option<f64>) -> TrendDirection {
    match change_percent {
        Some(c) if c < -TREND_STABLE_BAND => TrendDirection::Improving,
        Some(c) if c > TREND_STABLE_BAND => TrendDirection::Worsening,
        _ => TrendDirection::Stable,
    }
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Sort key putting rows without a CPL last
pub fn cpl_sort_key(cpl: Option<f64>) -> f64 {
    cpl.unwrap_or(f64::INFINITY)
}

/// Build a spend/conversion row; `total_spend` drives the share and
/// `reference_cpl` the status
pub fn performance_row(
    id: impl Into<String>,
    label: impl Into<String>,
    kind: Option<String>,
    spend: f64,
    conversions: f64,
    total_spend: f64,
    reference_cpl: Option<f64>,
) -> PerformanceRow {
    let row_cpl = cpl(spend, conversions);
    PerformanceRow {
        id: id.into(),
        label: label.into(),
        kind,
        spend,
        conversions,
        cpl: row_cpl,
        budget_share_percent: share_percent(spend, total_spend),
        status: efficiency_status(row_cpl, conversions, reference_cpl),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpl() {
        assert_eq!(cpl(1_000.0, 4.0), Some(250.0));
        assert_eq!(cpl(1_000.0, 0.0), None);
    }

    #[test]
    fn test_share_percent() {
        assert_eq!(share_percent(25.0, 200.0), 12.5);
        assert_eq!(share_percent(25.0, 0.0), 0.0);
    }

    #[test]
    fn test_pct_change() {
        assert_eq!(pct_change(110.0, 100.0), Some(10.0));
        assert_eq!(pct_change(5.0, 0.0), None);
    }

    #[test]
    fn test_efficiency_status() {
        let reference = Some(10_000.0);
        assert_eq!(efficiency_status(Some(7_000.0), 50.0, reference), IndicatorStatus::Good);
        assert_eq!(efficiency_status(Some(13_000.0), 50.0, reference), IndicatorStatus::Bad);
        assert_eq!(efficiency_status(Some(11_000.0), 50.0, reference), IndicatorStatus::Neutral);
        assert_eq!(efficiency_status(Some(1_000.0), 2.0, reference), IndicatorStatus::Warning);
        assert_eq!(efficiency_status(None, 0.0, reference), IndicatorStatus::Warning);
        assert_eq!(efficiency_status(Some(1_000.0), 20.0, None), IndicatorStatus::Neutral);
    }

    #[test]
    fn test_quadrant() {
        let t = DEFAULT_QUADRANT_THRESHOLDS;
        assert_eq!(quadrant(Some(4_741.0), 15.4, &t), Some(Quadrant::CheapLowIntent));
        assert_eq!(quadrant(Some(10_727.0), 27.4, &t), Some(Quadrant::SweetSpot));
        assert_eq!(quadrant(Some(12_675.0), 21.3, &t), Some(Quadrant::ScaleCandidate));
        assert_eq!(quadrant(Some(18_761.0), 12.6, &t), Some(Quadrant::Drain));
        assert_eq!(quadrant(None, 30.0, &t), None);
    }

    #[test]
    fn test_trend_direction() {
        assert_eq!(trend_direction(Some(-21.0)), TrendDirection::Improving);
        assert_eq!(trend_direction(Some(27.9)), TrendDirection::Worsening);
        assert_eq!(trend_direction(Some(4.8)), TrendDirection::Stable);
        assert_eq!(trend_direction(None), TrendDirection::Stable);
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn test_performance_row() {
        let row = performance_row("pmax", "PMax", None, 500.0, 0.0, 1_000.0, Some(10.0));
        assert_eq!(row.cpl, None);
        assert_eq!(row.budget_share_percent, 50.0);
        assert_eq!(row.status, IndicatorStatus::Warning);
    }
}
