//! Pricing Engine: LQS-driven price band with competitor anchoring,
//! seasonality and charm rounding
//!
//! perceived value = min + (lqs/100)^2 * (max - min)
//!   → competitor anchor (premium ≥ 75 LQS, penetration below)
//!   → seasonality multiplier (1.10 / 1.0 / 0.95)
//!   → charm pricing
//!   → band [optimal * 0.85 (≥ category min), optimal * 1.25]

use tracing::{debug, warn};

use crate::config::PricingConfig;
use crate::types::{PriceRecommendation, PricingInput, PricingStrategy, SeasonalAdjustment};
use crate::{
    round_to, Result, BAND_LOWER_FACTOR, BAND_UPPER_FACTOR, CHARM_CENTS, CHARM_MID_TICKET_LIMIT,
    CHARM_SMALL_TICKET_LIMIT, HIGH_SEASON_RATIO, OFF_SEASON_RATIO, PENETRATION_COMPETITOR_DISCOUNT,
    PENETRATION_VALUE_WEIGHT, PREMIUM_COMPETITOR_MARKUP, PREMIUM_VALUE_WEIGHT,
    SEASON_LOOKAHEAD_MONTHS,
};

#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Compute the recommendation. Fails only on caller precondition violations.
    pub fn calculate(&self, input: &PricingInput) -> Result<PriceRecommendation> {
        if let Err(e) = input.validate() {
            warn!(error = %e, "Rejected pricing input");
            return Err(e);
        }

        let perceived = perceived_value(input.lqs_score, input.category_min, input.category_max);
        let (strategic, strategy) = self.anchor(perceived, input);

        let seasonal = seasonality_adjustment(&input.seasonality);
        let charmed = apply_charm_pricing(strategic * seasonal.multiplier());

        let optimal = round_to(charmed, 2).max(input.category_min);
        let min = round_to(optimal * BAND_LOWER_FACTOR, 2)
            .max(input.category_min)
            .min(optimal);
        let max = round_to(optimal * BAND_UPPER_FACTOR, 2).max(optimal);

        let mut reason = strategy.note().to_string();
        if let Some(note) = seasonal.note() {
            reason.push_str(" + ");
            reason.push_str(note);
        }

        debug!(
            lqs = input.lqs_score,
            perceived,
            strategic,
            ?strategy,
            ?seasonal,
            optimal,
            "Priced listing"
        );

        Ok(PriceRecommendation {
            min,
            optimal,
            max,
            reason,
            strategy,
            seasonal,
        })
    }

    /// Blend perceived value with a competitor target when one is known
    fn anchor(&self, perceived: f64, input: &PricingInput) -> (f64, PricingStrategy) {
        if input.competitor_price <= 0.0 {
            return (perceived, PricingStrategy::QualityBased);
        }

        if input.lqs_score >= self.config.premium_lqs_threshold {
            let target = input.competitor_price * PREMIUM_COMPETITOR_MARKUP;
            let price = perceived * PREMIUM_VALUE_WEIGHT + target * (1.0 - PREMIUM_VALUE_WEIGHT);
            (price, PricingStrategy::Premium)
        } else {
            let target = input.competitor_price * PENETRATION_COMPETITOR_DISCOUNT;
            let price =
                perceived * PENETRATION_VALUE_WEIGHT + target * (1.0 - PENETRATION_VALUE_WEIGHT);
            (price, PricingStrategy::Penetration)
        }
    }
}

/// Price a listing with default engine settings
pub fn price_listing(
    lqs_score: f64,
    competitor_price: f64,
    category_min: f64,
    category_max: f64,
    seasonality: &[f64],
) -> Result<PriceRecommendation> {
    let input = PricingInput {
        lqs_score,
        competitor_price,
        category_min,
        category_max,
        seasonality: seasonality.to_vec(),
    };
    PricingEngine::new().calculate(&input)
}

/// Quadratic in LQS so quality gains compound near the top of the range
pub fn perceived_value(lqs_score: f64, category_min: f64, category_max: f64) -> f64 {
    let quality_ratio = (lqs_score / 100.0).powi(2);
    category_min + quality_ratio * (category_max - category_min)
}

/// Compare near-term demand (first 3 months) with the whole sequence
pub fn seasonality_adjustment(seasonality: &[f64]) -> SeasonalAdjustment {
    if seasonality.is_empty() {
        return SeasonalAdjustment::Neutral;
    }

    let overall = mean(seasonality);
    let lookahead = &seasonality[..seasonality.len().min(SEASON_LOOKAHEAD_MONTHS)];
    let near_term = mean(lookahead);

    if near_term > overall * HIGH_SEASON_RATIO {
        SeasonalAdjustment::HighSeason
    } else if near_term < overall * OFF_SEASON_RATIO {
        SeasonalAdjustment::OffSeason
    } else {
        SeasonalAdjustment::Neutral
    }
}

/// Seasonality multiplier: 1.10, 1.0 or 0.95
pub fn seasonality_multiplier(seasonality: &[f64]) -> f64 {
    seasonality_adjustment(seasonality).multiplier()
}

/// Psychological price endings:
/// - under 10: `x.95` just below or at the whole part depending on the fraction
/// - 10 to 50: whole part + .95
/// - 50 and up: nearest whole number
///
/// Re-applying to an already charmed price returns it unchanged. Inputs below
/// 0.5 charm to -0.05; `PricingEngine::calculate` floors the result at the
/// category minimum.
pub fn apply_charm_pricing(price: f64) -> f64 {
    let charmed = if price < CHARM_SMALL_TICKET_LIMIT {
        let whole = price.trunc();
        if price - whole < 0.5 {
            whole - (1.0 - CHARM_CENTS)
        } else {
            whole + CHARM_CENTS
        }
    } else if price < CHARM_MID_TICKET_LIMIT {
        price.trunc() + CHARM_CENTS
    } else {
        price.round()
    };
    round_to(charmed, 2)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

// =============================================================================
// TESTS
// =============================================================================
