//! Traffic-by-channel breakdown

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSource {
    pub name: String,
    pub value: u64,
    /// Hex color for charts
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficBreakdown {
    pub total_visits: u64,
    pub insight: String,
    pub sources: Vec<TrafficSource>,
}

impl TrafficBreakdown {
    /// Sum of per-channel visits (may differ from `total_visits` by rounding)
    pub fn channel_sum(&self) -> u64 {
        self.sources.iter().map(|s| s.value).sum()
    }
}
