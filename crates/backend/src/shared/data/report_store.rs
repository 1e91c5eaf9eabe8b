use std::path::Path;

use anyhow::Context;
use once_cell::sync::OnceCell;

use super::dataset::ReportDataset;

static DATASET: OnceCell<ReportDataset> = OnceCell::new();

/// Dataset shipped with the binary, used when no file is configured or found
pub const DEFAULT_DATASET: &str = include_str!("../../../data/report.toml");

/// Load and validate the report dataset, then publish it for the handlers.
///
/// Falls back to the embedded dataset when `path` does not exist. The
/// dataset is loaded once; later calls keep it and only log a warning.
pub fn initialize_dataset(path: Option<&Path>) -> anyhow::Result<&'static ReportDataset> {
    if let Some(existing) = DATASET.get() {
        tracing::warn!(
            "Report dataset already initialized ('{}'), ignoring {}",
            existing.report.title,
            path.map_or_else(|| "embedded dataset".into(), |p| p.display().to_string())
        );
        return Ok(existing);
    }

    let dataset = match path {
        Some(p) if p.exists() => {
            tracing::info!("Loading report dataset from: {}", p.display());
            let contents = std::fs::read_to_string(p)
                .with_context(|| format!("cannot read dataset {}", p.display()))?;
            ReportDataset::from_toml(&contents)
                .with_context(|| format!("invalid dataset {}", p.display()))?
        }
        other => {
            if let Some(p) = other {
                tracing::warn!("Dataset not found at: {}", p.display());
            }
            tracing::info!("Using embedded report dataset");
            ReportDataset::from_toml(DEFAULT_DATASET).context("invalid embedded dataset")?
        }
    };

    tracing::info!(
        "Report dataset ready: '{}' ({} .. {}), {} intents, {} ad sets, {} simulator segments",
        dataset.report.title,
        dataset.report.period_start,
        dataset.report.period_end,
        dataset.google_intents.len(),
        dataset.meta_ad_sets.len(),
        dataset.simulator.segments.len()
    );

    if DATASET.set(dataset).is_err() {
        tracing::warn!("Report dataset was initialized concurrently, keeping the first one");
    }
    Ok(get_dataset())
}

/// Dataset loaded at startup.
///
/// Panics if called before `initialize_dataset`; the server does not start
/// without a dataset.
pub fn get_dataset() -> &'static ReportDataset {
    DATASET
        .get()
        .expect("Report dataset has not been initialized")
}

#[cfg(test)]
pub fn test_dataset() -> &'static ReportDataset {
    DATASET.get_or_init(|| {
        ReportDataset::from_toml(DEFAULT_DATASET).expect("embedded dataset must be valid")
    })
}
