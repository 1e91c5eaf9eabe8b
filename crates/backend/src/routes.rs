use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // REPORT
        // ========================================
        .route("/api/report", get(handlers::report::get_report_info))
        .route("/api/pages/:page", get(handlers::report::get_page))
        // ========================================
        // DASHBOARDS (d410-d416)
        // ========================================
        .route(
            "/api/d410/channel_overview",
            get(handlers::d410_channel_overview::get_channel_overview),
        )
        .route(
            "/api/d411/google_deep_dive",
            get(handlers::d411_google_deep_dive::get_google_deep_dive),
        )
        .route(
            "/api/d412/meta_deep_dive",
            get(handlers::d412_meta_deep_dive::get_meta_deep_dive),
        )
        .route(
            "/api/d413/cross_channel",
            get(handlers::d413_cross_channel::get_cross_channel),
        )
        .route(
            "/api/d414/budget_simulator",
            get(handlers::d414_budget_simulator::get_budget_simulator),
        )
        .route(
            "/api/d414/budget_simulator/project",
            post(handlers::d414_budget_simulator::project),
        )
        .route(
            "/api/d414/budget_simulator/scenarios",
            get(handlers::d414_budget_simulator::get_scenarios),
        )
        .route(
            "/api/d415/test_roadmap",
            get(handlers::d415_test_roadmap::get_test_roadmap),
        )
        .route(
            "/api/d416/hypotheses",
            get(handlers::d416_hypotheses::get_hypotheses),
        )
        // ========================================
        // INDICATORS
        // ========================================
        .route(
            "/api/indicators/meta",
            get(handlers::indicators::get_indicator_catalog),
        )
        .route(
            "/api/indicators/compute",
            post(handlers::indicators::compute_indicators),
        )
}
