use axum::http::StatusCode;

use crate::dashboards::ReportError;
use crate::shared::projection::ProjectionError;

// Dashboard handlers (d410-d416)
pub mod d410_channel_overview;
pub mod d411_google_deep_dive;
pub mod d412_meta_deep_dive;
pub mod d413_cross_channel;
pub mod d414_budget_simulator;
pub mod d415_test_roadmap;
pub mod d416_hypotheses;

pub mod indicators;
pub mod report;

/// HTTP status for a failed page request
pub(crate) fn report_error_status(error: &ReportError) -> StatusCode {
    match error {
        ReportError::UnknownPage(_) => StatusCode::NOT_FOUND,
        ReportError::UnknownPhase(_)
        | ReportError::InvalidShareThreshold(_)
        | ReportError::UnknownSegment(_)
        | ReportError::AboveMaxFraction { .. } => StatusCode::BAD_REQUEST,
        // Recovered by the simulator service; reaching here is a bug
        ReportError::Projection(ProjectionError::OverAllocation { .. }) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        ReportError::Projection(_) => StatusCode::BAD_REQUEST,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_error_status() {
        assert_eq!(
            report_error_status(&ReportError::UnknownPage("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            report_error_status(&ReportError::UnknownPhase("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            report_error_status(&ReportError::Projection(ProjectionError::NoSegments)),
            StatusCode::BAD_REQUEST
        );
    }
}
