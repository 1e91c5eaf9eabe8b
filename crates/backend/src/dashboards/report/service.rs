use contracts::dashboards::d412_meta_deep_dive::MetaDeepDiveQuery;
use contracts::dashboards::d415_test_roadmap::RoadmapQuery;
use contracts::dashboards::d416_hypotheses::HypothesesQuery;
use contracts::dashboards::report::{PageContent, PageInfo, ReportInfoResponse, ReportPage};

use crate::dashboards::{
    d410_channel_overview, d411_google_deep_dive, d412_meta_deep_dive, d413_cross_channel,
    d414_budget_simulator, d415_test_roadmap, d416_hypotheses, ReportError,
};
use crate::shared::data::dataset::ReportDataset;

pub fn get_report_info(dataset: &ReportDataset) -> ReportInfoResponse {
    let meta = &dataset.report;
    ReportInfoResponse {
        title: meta.title.clone(),
        subtitle: meta.subtitle.clone(),
        period_start: meta.period_start,
        period_end: meta.period_end,
        period_months: meta.period_months(),
        currency: meta.currency.clone(),
        sources: meta.sources.clone(),
        author: meta.author.clone(),
        pages: ReportPage::all().into_iter().map(PageInfo::from).collect(),
    }
}

pub fn resolve_page(code: &str) -> Result<ReportPage, ReportError> {
    ReportPage::from_code(code).ok_or_else(|| ReportError::UnknownPage(code.to_string()))
}

/// Build one page with its default parameters
pub fn get_page(dataset: &ReportDataset, page: ReportPage) -> Result<PageContent, ReportError> {
    Ok(match page {
        ReportPage::ChannelOverview => {
            PageContent::ChannelOverview(d410_channel_overview::service::get_channel_overview(dataset))
        }
        ReportPage::GoogleDeepDive => {
            PageContent::GoogleDeepDive(d411_google_deep_dive::service::get_google_deep_dive(dataset))
        }
        ReportPage::MetaDeepDive => PageContent::MetaDeepDive(
            d412_meta_deep_dive::service::get_meta_deep_dive(dataset, &MetaDeepDiveQuery::default())?,
        ),
        ReportPage::CrossChannel => {
            PageContent::CrossChannel(d413_cross_channel::service::get_cross_channel(dataset))
        }
        ReportPage::Hypotheses => PageContent::Hypotheses(d416_hypotheses::service::get_hypotheses(
            dataset,
            &HypothesesQuery::default(),
        )),
        ReportPage::BudgetSimulator => PageContent::BudgetSimulator(
            d414_budget_simulator::service::get_budget_simulator(dataset)?,
        ),
        ReportPage::TestRoadmap => PageContent::TestRoadmap(
            d415_test_roadmap::service::get_test_roadmap(dataset, &RoadmapQuery::default())?,
        ),
    })
}
