//! Listing analysis request/result and history snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{MarketSignals, PriceRecommendation, ScoreBreakdown};

/// Calling-layer facts about the listing being analyzed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub listing_id: String,
    /// Seller's current title; also the adjacency pool for tag repair
    #[serde(default = "default_product_title")]
    pub product_title: String,
    #[serde(default = "default_image_count")]
    pub image_count: u32,
    #[serde(default)]
    pub has_video: bool,
    /// Competitor listings anchor their price to the observed minimum
    #[serde(default)]
    pub is_competitor: bool,
    #[serde(default)]
    pub market: MarketSignals,
}

fn default_product_title() -> String {
    "New Product".to_string()
}

fn default_image_count() -> u32 {
    1
}

impl AnalysisRequest {
    pub fn new(listing_id: impl Into<String>, product_title: impl Into<String>) -> Self {
        Self {
            listing_id: listing_id.into(),
            product_title: product_title.into(),
            image_count: default_image_count(),
            has_video: false,
            is_competitor: false,
            market: MarketSignals::default(),
        }
    }
}

/// Result of one end-to-end analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingAnalysis {
    pub listing_id: String,
    /// Title that was scored
    pub title: String,
    pub description: String,
    /// Canonical tags
    pub tags: Vec<String>,
    pub score: ScoreBreakdown,
    /// Total rounded to one decimal; this value drives pricing
    pub lqs_score: f64,
    pub lqs_reason: String,
    pub price: PriceRecommendation,
    pub trend_score: f64,
    pub best_selling_months: Vec<String>,
    /// Hex SHA-256 of the inputs, stable across runs
    pub fingerprint: String,
}

/// A point-in-time record of an analysis, kept for history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSnapshot {
    pub id: String,
    pub listing_id: String,
    pub created_at: DateTime<Utc>,
    pub fingerprint: String,
    pub lqs_score: f64,
    pub lqs_visual_score: f64,
    pub lqs_seo_score: f64,
    pub lqs_zeitgeist_score: f64,
    pub lqs_reason: String,
    pub suggested_title: String,
    pub suggested_tags: Vec<String>,
    pub predicted_price_min: f64,
    pub predicted_price_optimal: f64,
    pub predicted_price_max: f64,
    pub price_reason: String,
    pub is_trendsetter: bool,
}
