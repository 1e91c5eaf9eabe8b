pub mod indicators;
pub mod metrics;
