pub mod d410_channel_overview;
pub mod d411_google_deep_dive;
pub mod d412_meta_deep_dive;
pub mod d413_cross_channel;
pub mod d414_budget_simulator;
pub mod d415_test_roadmap;
pub mod d416_hypotheses;
pub mod error;
pub mod report;

pub use error::ReportError;
