use anyhow::Result;
use contracts::shared::indicators::*;
use std::collections::HashMap;

use super::compute::ads;
use super::metadata::ids;
use crate::shared::data::dataset::ReportDataset;
use crate::shared::format::NOT_COMPUTABLE;

type ComputeFn = fn(&ReportDataset, &IndicatorContext) -> Result<IndicatorValue>;

/// Central registry: maps `IndicatorId` to its compute function.
pub struct IndicatorRegistry {
    fns: HashMap<String, ComputeFn>,
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        let mut fns: HashMap<String, ComputeFn> = HashMap::new();

        fns.insert(ids::ads_total_spend().0, ads::compute_total_spend);
        fns.insert(ids::ads_total_conversions().0, ads::compute_total_conversions);
        fns.insert(ids::ads_blended_cpl().0, ads::compute_blended_cpl);
        fns.insert(ids::google_cpl().0, ads::compute_google_cpl);
        fns.insert(ids::meta_cpl().0, ads::compute_meta_cpl);
        fns.insert(ids::meta_cpl_trend().0, ads::compute_meta_cpl_trend);

        Self { fns }
    }

    /// Compute a batch of indicators in request order.
    ///
    /// Unknown ids are skipped; failing ones yield an empty value with the
    /// error as subtitle.
    pub fn compute(
        &self,
        ids: &[IndicatorId],
        ctx: &IndicatorContext,
        dataset: &ReportDataset,
    ) -> Vec<IndicatorValue> {
        let mut results = Vec::with_capacity(ids.len());

        for id in ids {
            if let Some(compute_fn) = self.fns.get(&id.0) {
                match compute_fn(dataset, ctx) {
                    Ok(val) => results.push(val),
                    Err(e) => {
                        tracing::warn!("indicator {} compute error: {e:#}", id.0);
                        results.push(IndicatorValue {
                            id: id.clone(),
                            value: None,
                            previous_value: None,
                            change_percent: None,
                            status: IndicatorStatus::Neutral,
                            display: NOT_COMPUTABLE.to_string(),
                            subtitle: Some(format!("Error: {e}")),
                        });
                    }
                }
            } else {
                tracing::warn!("indicator {} not found in registry", id.0);
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::report_store::test_dataset;
    use contracts::enums::AdChannel;

    #[test]
    fn test_compute_keeps_order_and_skips_unknown() {
        let registry = IndicatorRegistry::new();
        let ids = vec![
            ids::meta_cpl(),
            IndicatorId::new("no_such_indicator"),
            ids::ads_total_spend(),
        ];
        let values = registry.compute(&ids, &IndicatorContext::default(), test_dataset());
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].id, ids::meta_cpl());
        assert_eq!(values[1].id, ids::ads_total_spend());
    }

    #[test]
    fn test_failing_indicator_reports_error() {
        let mut dataset = test_dataset().clone();
        dataset.channels.retain(|c| c.channel != AdChannel::Meta);

        let values = IndicatorRegistry::new().compute(
            &[ids::meta_cpl()],
            &IndicatorContext::default(),
            &dataset,
        );
        assert_eq!(values[0].value, None);
        assert_eq!(values[0].display, NOT_COMPUTABLE);
        assert!(values[0].subtitle.as_deref().unwrap_or("").starts_with("Error:"));
    }

    #[test]
    fn test_every_catalog_indicator_is_registered() {
        let registry = IndicatorRegistry::new();
        let catalog = crate::shared::indicators::metadata::build_catalog("₩");
        for meta in catalog.indicators {
            assert!(registry.fns.contains_key(&meta.id.0), "{} not registered", meta.id.0);
        }
    }
}
