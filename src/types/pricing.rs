//! Pricing input and recommendation types

use serde::{Deserialize, Serialize};

use crate::{Error, Result, MAX_SEASONALITY_MONTHS};

/// Inputs to the pricing engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingInput {
    /// Listing Quality Score, 0-100
    pub lqs_score: f64,
    /// Competitor price, 0 when unknown
    #[serde(default)]
    pub competitor_price: f64,
    pub category_min: f64,
    pub category_max: f64,
    /// Monthly demand indices, current month first, at most 12
    #[serde(default)]
    pub seasonality: Vec<f64>,
}

impl PricingInput {
    pub fn new(lqs_score: f64, category_min: f64, category_max: f64) -> Self {
        Self {
            lqs_score,
            competitor_price: 0.0,
            category_min,
            category_max,
            seasonality: Vec::new(),
        }
    }

    pub fn with_competitor(mut self, price: f64) -> Self {
        self.competitor_price = price;
        self
    }

    pub fn with_seasonality(mut self, seasonality: Vec<f64>) -> Self {
        self.seasonality = seasonality;
        self
    }

    /// Check caller preconditions. Violations are programming errors in the
    /// calling layer and are never clamped.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.lqs_score) {
            return Err(Error::precondition(format!(
                "lqs_score must be within 0-100, got {}",
                self.lqs_score
            )));
        }
        if !(self.competitor_price.is_finite() && self.competitor_price >= 0.0) {
            return Err(Error::precondition(format!(
                "competitor_price must be >= 0, got {}",
                self.competitor_price
            )));
        }
        if !(self.category_min.is_finite() && self.category_min >= 0.0) {
            return Err(Error::precondition(format!(
                "category_min must be >= 0, got {}",
                self.category_min
            )));
        }
        if !(self.category_max.is_finite() && self.category_min <= self.category_max) {
            return Err(Error::precondition(format!(
                "category_min ({}) must not exceed category_max ({})",
                self.category_min, self.category_max
            )));
        }
        if self.seasonality.len() > MAX_SEASONALITY_MONTHS {
            return Err(Error::precondition(format!(
                "seasonality holds at most {} months, got {}",
                MAX_SEASONALITY_MONTHS,
                self.seasonality.len()
            )));
        }
        if let Some(bad) = self
            .seasonality
            .iter()
            .find(|d| !(d.is_finite() && **d >= 0.0))
        {
            return Err(Error::precondition(format!(
                "seasonality indices must be >= 0, got {}",
                bad
            )));
        }
        Ok(())
    }
}

/// Which anchoring branch produced the strategic price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingStrategy {
    /// No competitor price; perceived value only
    QualityBased,
    /// LQS high enough to price above the competitor
    Premium,
    /// Undercut the competitor to win traffic
    Penetration,
}

impl PricingStrategy {
    pub fn note(&self) -> &'static str {
        match self {
            Self::QualityBased => "Quality-based valuation",
            Self::Premium => "Premium: listing looks stronger than the competitor (+15%)",
            Self::Penetration => "Penetration: priced under the competitor to enter the market (-10%)",
        }
    }
}

/// Seasonality outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalAdjustment {
    Neutral,
    HighSeason,
    OffSeason,
}

impl SeasonalAdjustment {
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Neutral => 1.0,
            Self::HighSeason => crate::HIGH_SEASON_MULTIPLIER,
            Self::OffSeason => crate::OFF_SEASON_MULTIPLIER,
        }
    }

    /// Annotation appended to the reason, `None` when neutral
    pub fn note(&self) -> Option<&'static str> {
        match self {
            Self::Neutral => None,
            Self::HighSeason => Some("High season (+10%)"),
            Self::OffSeason => Some("Off-season discount (-5%)"),
        }
    }
}

/// Three-point price recommendation
///
/// `min <= optimal <= max`, `min >= category_min`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecommendation {
    pub min: f64,
    pub optimal: f64,
    pub max: f64,
    /// Diagnostic text; not machine-parsed
    pub reason: String,
    pub strategy: PricingStrategy,
    pub seasonal: SeasonalAdjustment,
}
