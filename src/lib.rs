//! Cyclear: listing optimization core
//!
//! Tag pool → TagNormalizer → QualityScorer (LQS) → PricingEngine → price band.
//! All three engines are pure; persistence, traffic and HTTP live at the edges.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};

// =============================================================================
// TAG RULES - marketplace listing constraints
// =============================================================================

/// Maximum characters in a single tag
pub const MAX_TAG_CHARS: usize = 20;

/// Minimum characters for a tag that had to be shortened
pub const MIN_TRUNCATED_TAG_CHARS: usize = 3;

/// Maximum tags per listing
pub const MAX_TAGS: usize = 13;

// =============================================================================
// LQS MODULE CAPS (sum = 100)
// =============================================================================

pub const VISUAL_IMPULSE_CAP: f64 = 35.0;
pub const SEO_FOUNDATION_CAP: f64 = 35.0;
pub const ZEITGEIST_CAP: f64 = 30.0;
pub const LQS_MAX: f64 = 100.0;

// =============================================================================
// VISUAL IMPULSE
// =============================================================================

pub const SHARPNESS_POINTS: f64 = 5.0;
pub const SIMPLICITY_MAX: f64 = 10.0;
/// Simplicity when no explicit score and the object is not centered
pub const SIMPLICITY_OFF_CENTER: f64 = 5.0;
pub const TEXTURE_MAX: f64 = 10.0;
/// Texture when no explicit score and the image is low contrast
pub const TEXTURE_LOW_CONTRAST: f64 = 4.0;
pub const LIFESTYLE_POINTS: f64 = 10.0;

/// Component scores below this produce feedback
pub const VISUAL_FEEDBACK_THRESHOLD: f64 = 7.0;

// =============================================================================
// SEO FOUNDATION
// =============================================================================

/// Starting value of the Pareto title check
pub const PARETO_BASE: f64 = 15.0;
pub const PARETO_CORE_OBJECT_PENALTY: f64 = 8.0;
pub const PARETO_SHORT_TITLE_PENALTY: f64 = 4.0;
pub const PARETO_SPAM_PENALTY: f64 = 3.0;

/// Core object must appear within this many leading title characters
pub const PARETO_PREFIX_CHARS: usize = 40;

/// Titles shorter than this lose points
pub const MIN_TITLE_CHARS: usize = 80;

/// A word repeated more than this many times counts as keyword stuffing
pub const MAX_WORD_REPEATS: usize = 3;

pub const TAG_DENSITY_MAX: f64 = 2.0;

pub const RELEVANCE_HIGH_RATIO: f64 = 0.4;
pub const RELEVANCE_LOW_RATIO: f64 = 0.1;
pub const RELEVANCE_HIGH_POINTS: f64 = 6.0;
pub const RELEVANCE_LOW_POINTS: f64 = 3.0;

pub const LONG_TAIL_HIGH_COUNT: usize = 7;
pub const LONG_TAIL_LOW_COUNT: usize = 4;
pub const LONG_TAIL_HIGH_POINTS: f64 = 7.0;
pub const LONG_TAIL_LOW_POINTS: f64 = 3.5;

pub const RICH_IMAGE_COUNT: u32 = 5;
pub const SOME_IMAGE_COUNT: u32 = 2;
pub const RICH_IMAGE_POINTS: f64 = 4.0;
pub const SOME_IMAGE_POINTS: f64 = 2.0;
pub const VIDEO_POINTS: f64 = 1.0;

// =============================================================================
// ZEITGEIST
// =============================================================================

/// Weight of the best-seller similarity term (scaled by visual / 35)
pub const BEST_SELLER_WEIGHT: f64 = 15.0;

/// Market velocity when the caller supplies none ("stable")
pub const DEFAULT_VELOCITY: f64 = 8.0;

/// In-season bonus when the caller supplies none
pub const DEFAULT_IN_SEASON: f64 = 5.0;

/// Velocity below this counts as low/falling demand
pub const LOW_VELOCITY_THRESHOLD: f64 = 6.0;

/// Visual impulse above this qualifies for the trendsetter override
pub const TRENDSETTER_VISUAL_THRESHOLD: f64 = 30.0;

/// Zeitgeist value forced by the trendsetter override
pub const TRENDSETTER_ZEITGEIST: f64 = 25.0;

// =============================================================================
// PRICING
// =============================================================================

pub const DEFAULT_CATEGORY_MIN: f64 = 5.0;
pub const DEFAULT_CATEGORY_MAX: f64 = 100.0;

/// LQS at or above this takes the premium branch
pub const PREMIUM_LQS_THRESHOLD: f64 = 75.0;

pub const PREMIUM_COMPETITOR_MARKUP: f64 = 1.15;
pub const PREMIUM_VALUE_WEIGHT: f64 = 0.6;
pub const PENETRATION_COMPETITOR_DISCOUNT: f64 = 0.90;
pub const PENETRATION_VALUE_WEIGHT: f64 = 0.4;

/// Months of demand data considered "near term"
pub const SEASON_LOOKAHEAD_MONTHS: usize = 3;
pub const MAX_SEASONALITY_MONTHS: usize = 12;
pub const HIGH_SEASON_RATIO: f64 = 1.2;
pub const OFF_SEASON_RATIO: f64 = 0.8;
pub const HIGH_SEASON_MULTIPLIER: f64 = 1.10;
pub const OFF_SEASON_MULTIPLIER: f64 = 0.95;

/// Charm pricing tiers
pub const CHARM_SMALL_TICKET_LIMIT: f64 = 10.0;
pub const CHARM_MID_TICKET_LIMIT: f64 = 50.0;
pub const CHARM_CENTS: f64 = 0.95;

/// Price band around the optimal price
pub const BAND_LOWER_FACTOR: f64 = 0.85;
pub const BAND_UPPER_FACTOR: f64 = 1.25;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "3.2.0";

/// Round to `places` decimals, half away from zero
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
