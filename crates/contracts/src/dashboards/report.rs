use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::d410_channel_overview::ChannelOverviewResponse;
use super::d411_google_deep_dive::GoogleDeepDiveResponse;
use super::d412_meta_deep_dive::MetaDeepDiveResponse;
use super::d413_cross_channel::CrossChannelResponse;
use super::d414_budget_simulator::BudgetSimulatorResponse;
use super::d415_test_roadmap::TestRoadmapResponse;
use super::d416_hypotheses::HypothesesResponse;

/// Pages of the report, in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPage {
    ChannelOverview,
    GoogleDeepDive,
    MetaDeepDive,
    CrossChannel,
    Hypotheses,
    BudgetSimulator,
    TestRoadmap,
}

impl ReportPage {
    pub fn all() -> Vec<ReportPage> {
        vec![
            ReportPage::ChannelOverview,
            ReportPage::GoogleDeepDive,
            ReportPage::MetaDeepDive,
            ReportPage::CrossChannel,
            ReportPage::Hypotheses,
            ReportPage::BudgetSimulator,
            ReportPage::TestRoadmap,
        ]
    }

    /// Dashboard code, also used as the API path prefix ("d410")
    pub fn code(&self) -> &'static str {
        match self {
            ReportPage::ChannelOverview => "d410",
            ReportPage::GoogleDeepDive => "d411",
            ReportPage::MetaDeepDive => "d412",
            ReportPage::CrossChannel => "d413",
            ReportPage::BudgetSimulator => "d414",
            ReportPage::TestRoadmap => "d415",
            ReportPage::Hypotheses => "d416",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            ReportPage::ChannelOverview => "channel_overview",
            ReportPage::GoogleDeepDive => "google_deep_dive",
            ReportPage::MetaDeepDive => "meta_deep_dive",
            ReportPage::CrossChannel => "cross_channel",
            ReportPage::BudgetSimulator => "budget_simulator",
            ReportPage::TestRoadmap => "test_roadmap",
            ReportPage::Hypotheses => "hypotheses",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportPage::ChannelOverview => "Executive Summary",
            ReportPage::GoogleDeepDive => "Google Deep-Dive",
            ReportPage::MetaDeepDive => "Meta Deep-Dive",
            ReportPage::CrossChannel => "Cross-Channel Insights",
            ReportPage::BudgetSimulator => "Budget Simulator",
            ReportPage::TestRoadmap => "Test Roadmap",
            ReportPage::Hypotheses => "Hypotheses & Root Causes",
        }
    }

    /// Accepts either the dashboard code or the slug
    pub fn from_code(code: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|p| p.code() == code || p.slug() == code)
    }
}

/// Navigation entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: ReportPage,
    pub code: String,
    pub title: String,
    pub path: String,
}

impl From<ReportPage> for PageInfo {
    fn from(page: ReportPage) -> Self {
        Self {
            page,
            code: page.code().to_string(),
            title: page.title().to_string(),
            path: format!("/api/{}/{}", page.code(), page.slug()),
        }
    }
}

/// Response of GET /api/report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInfoResponse {
    pub title: String,
    pub subtitle: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// Number of calendar months touched by the period
    pub period_months: u32,
    pub currency: String,
    pub sources: Vec<String>,
    pub author: String,
    pub pages: Vec<PageInfo>,
}

/// Response of GET /api/pages/:page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "page", content = "data", rename_all = "snake_case")]
pub enum PageContent {
    ChannelOverview(ChannelOverviewResponse),
    GoogleDeepDive(GoogleDeepDiveResponse),
    MetaDeepDive(MetaDeepDiveResponse),
    CrossChannel(CrossChannelResponse),
    Hypotheses(HypothesesResponse),
    BudgetSimulator(BudgetSimulatorResponse),
    TestRoadmap(TestRoadmapResponse),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_accepts_code_and_slug() {
        assert_eq!(ReportPage::from_code("d414"), Some(ReportPage::BudgetSimulator));
        assert_eq!(
            ReportPage::from_code("meta_deep_dive"),
            Some(ReportPage::MetaDeepDive)
        );
        assert_eq!(ReportPage::from_code("d499"), None);
    }

    #[test]
    fn test_hypotheses_page_follows_cross_channel() {
        let pages = ReportPage::all();
        assert_eq!(pages.len(), 7);
        assert_eq!(pages[4], ReportPage::Hypotheses);
        assert_eq!(ReportPage::from_code("hypotheses"), Some(ReportPage::Hypotheses));
        assert_eq!(ReportPage::from_code("d416"), Some(ReportPage::Hypotheses));
        assert_eq!(
            PageInfo::from(ReportPage::Hypotheses).path,
            "/api/d416/hypotheses"
        );
    }

    #[test]
    fn test_page_info_path() {
        let info = PageInfo::from(ReportPage::TestRoadmap);
        assert_eq!(info.path, "/api/d415/test_roadmap");
    }
}
