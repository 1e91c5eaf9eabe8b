use serde::{Deserialize, Serialize};
use std::fmt;

/// Advertising channels covered by the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdChannel {
    Google,
    Meta,
}

impl AdChannel {
    /// Channel code used in the dataset and query strings
    pub fn code(&self) -> &'static str {
        match self {
            AdChannel::Google => "google",
            AdChannel::Meta => "meta",
        }
    }

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            AdChannel::Google => "Google Ads",
            AdChannel::Meta => "Meta Ads",
        }
    }

    pub fn all() -> Vec<AdChannel> {
        vec![AdChannel::Google, AdChannel::Meta]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "google" => Some(AdChannel::Google),
            "meta" => Some(AdChannel::Meta),
            _ => None,
        }
    }
}

impl fmt::Display for AdChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
