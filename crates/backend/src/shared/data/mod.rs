pub mod dataset;
pub mod report_store;
