use axum::{extract::Path, http::StatusCode, Json};
use contracts::dashboards::report::{PageContent, ReportInfoResponse};

use super::report_error_status;
use crate::dashboards::report::service;
use crate::shared::data::report_store::get_dataset;

/// GET /api/report
pub async fn get_report_info() -> Json<ReportInfoResponse> {
    Json(service::get_report_info(get_dataset()))
}

/// GET /api/pages/:page
///
/// `page` is a dashboard code ("d412") or slug ("meta_deep_dive"); the page
/// is built with its default parameters.
pub async fn get_page(Path(page): Path<String>) -> Result<Json<PageContent>, StatusCode> {
    let resolved = service::resolve_page(&page).map_err(|e| {
        tracing::warn!("Report: {}", e);
        report_error_status(&e)
    })?;

    tracing::info!("Report: Building page {}", resolved.code());
    match service::get_page(get_dataset(), resolved) {
        Ok(content) => Ok(Json(content)),
        Err(e) => {
            tracing::error!("Report: Failed to build page {}: {}", resolved.code(), e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::report_store::test_dataset;

    #[tokio::test]
    async fn test_get_page_by_slug() {
        test_dataset();
        let Json(content) = get_page(Path("cross_channel".into())).await.unwrap();
        assert!(matches!(content, PageContent::CrossChannel(_)));

        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["page"], "cross_channel");
        assert!(json["data"]["messages"].is_array());
    }

    #[tokio::test]
    async fn test_unknown_page_is_not_found() {
        test_dataset();
        let status = get_page(Path("d999".into())).await.unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_hypotheses_page() {
        test_dataset();
        let Json(content) = get_page(Path("hypotheses".into())).await.unwrap();
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["page"], "hypotheses");
        let regions = &json["data"]["groups"][0]["hypotheses"][4]["regions"];
        assert_eq!(regions[2]["region"], "Gyeongnam");
    }

    #[tokio::test]
    async fn test_report_info() {
        test_dataset();
        let Json(info) = get_report_info().await;
        assert_eq!(info.currency, "₩");
        assert_eq!(info.pages.len(), 7);
    }
}
