use thiserror::Error;

use crate::shared::projection::ProjectionError;

/// Errors of the report page services
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("unknown report page '{0}'")]
    UnknownPage(String),

    #[error("unknown roadmap phase '{0}'")]
    UnknownPhase(String),

    #[error("min_budget_share must be within [0, 100], got {0}")]
    InvalidShareThreshold(f64),

    #[error("unknown simulator segment '{0}'")]
    UnknownSegment(String),

    #[error("segment '{segment}': allocation {fraction} exceeds the maximum {max}")]
    AboveMaxFraction {
        segment: String,
        fraction: f64,
        max: f64,
    },

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}
