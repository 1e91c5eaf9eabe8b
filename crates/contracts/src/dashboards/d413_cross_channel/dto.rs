use serde::{Deserialize, Serialize};

use crate::enums::AdChannel;
use crate::shared::indicators::IndicatorStatus;

/// One message type compared across channels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageTypeRow {
    pub id: String,
    pub label: String,
    pub google_cpl: Option<f64>,
    pub meta_cpl: Option<f64>,
    /// Channels where the message ran
    pub channels: Vec<AdChannel>,
    pub best_channel: Option<AdChannel>,
    pub best_cpl: Option<f64>,
    /// Relative to the report-wide blended CPL
    pub status: IndicatorStatus,
}

/// Response for the cross-channel dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossChannelResponse {
    pub blended_cpl: Option<f64>,
    /// Sorted by best CPL ascending
    pub messages: Vec<MessageTypeRow>,
}
