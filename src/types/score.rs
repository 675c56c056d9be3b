//! Listing Quality Score inputs and breakdown

use serde::{Deserialize, Serialize};

use crate::types::VisualSignals;

/// Everything the quality scorer looks at for one listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingSignals {
    pub visual: VisualSignals,
    pub title: String,
    /// Canonical tags (output of the tag normalizer)
    pub tags: Vec<String>,
    pub image_count: u32,
    pub has_video: bool,
}

/// Market terms for the Zeitgeist module, supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketSignals {
    /// Trend velocity; below the low threshold means falling demand
    pub velocity: f64,
    /// In-season bonus
    pub in_season: f64,
}

impl Default for MarketSignals {
    fn default() -> Self {
        Self {
            velocity: crate::DEFAULT_VELOCITY,
            in_season: crate::DEFAULT_IN_SEASON,
        }
    }
}

/// Per-component Visual Impulse values
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualDetails {
    pub sharpness: f64,
    pub simplicity: f64,
    pub texture: f64,
    pub lifestyle: f64,
}

impl VisualDetails {
    pub fn sum(&self) -> f64 {
        self.sharpness + self.simplicity + self.texture + self.lifestyle
    }
}

/// Computed LQS with per-module breakdown
///
/// `total == min(100, visual_impulse + seo_foundation + zeitgeist)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// 0-35
    pub visual_impulse: f64,
    /// 0-35
    pub seo_foundation: f64,
    /// 0-30
    pub zeitgeist: f64,
    /// 0-100
    pub total: f64,
    pub visual_details: VisualDetails,
    /// Ordered, human-readable findings
    pub feedback: Vec<String>,
    pub is_trendsetter: bool,
}

impl ScoreBreakdown {
    /// Summary line stored with the listing
    pub fn reason_line(&self) -> String {
        format!(
            "Visual: {:.1}/35, SEO: {:.1}/35, Zeitgeist: {:.1}/30",
            self.visual_impulse, self.seo_foundation, self.zeitgeist
        )
    }

    /// Total rounded for display and pricing
    pub fn rounded_total(&self) -> f64 {
        crate::round_to(self.total, 1)
    }
}
