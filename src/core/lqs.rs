//! Quality Scorer: computes the Listing Quality Score (LQS)
//!
//! Three capped modules, summed and capped at 100:
//! - Visual Impulse (35): sharpness, simplicity, texture, lifestyle
//! - SEO Foundation (35): Pareto title, tag density, relevance, long tail, assets
//! - Zeitgeist (30): best-seller similarity + market velocity + in-season,
//!   with the trendsetter override for low velocity and outstanding visuals
//!
//! Scoring never fails; unusable inputs fall back to their defaults.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::config::ScoringConfig;
use crate::core::tags::tokenize;
use crate::types::{
    Feedback, ListingSignals, MarketSignals, ScoreBreakdown, VisualDetails, VisualSignals,
};
use crate::{
    BEST_SELLER_WEIGHT, LIFESTYLE_POINTS, LONG_TAIL_HIGH_COUNT, LONG_TAIL_HIGH_POINTS,
    LONG_TAIL_LOW_COUNT, LONG_TAIL_LOW_POINTS, LQS_MAX, PARETO_BASE, PARETO_CORE_OBJECT_PENALTY,
    PARETO_SHORT_TITLE_PENALTY, PARETO_SPAM_PENALTY, RELEVANCE_HIGH_POINTS, RELEVANCE_HIGH_RATIO,
    RELEVANCE_LOW_POINTS, RELEVANCE_LOW_RATIO, RICH_IMAGE_COUNT, RICH_IMAGE_POINTS,
    SEO_FOUNDATION_CAP, SHARPNESS_POINTS, SIMPLICITY_MAX, SIMPLICITY_OFF_CENTER, SOME_IMAGE_COUNT,
    SOME_IMAGE_POINTS, TAG_DENSITY_MAX, TEXTURE_LOW_CONTRAST, TEXTURE_MAX, TRENDSETTER_ZEITGEIST,
    VIDEO_POINTS, VISUAL_FEEDBACK_THRESHOLD, VISUAL_IMPULSE_CAP, ZEITGEIST_CAP,
};

/// Listing Quality Score engine
#[derive(Debug, Clone, Default)]
pub struct QualityScorer {
    config: ScoringConfig,
}

impl QualityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score a listing
    pub fn score(&self, listing: &ListingSignals, market: &MarketSignals) -> ScoreBreakdown {
        let mut feedback = Vec::new();

        let visual_details = self.visual_components(&listing.visual, &mut feedback);
        let visual_impulse = visual_details.sum().clamp(0.0, VISUAL_IMPULSE_CAP);

        let seo_foundation = self.seo_foundation(listing, &mut feedback);

        let (zeitgeist, is_trendsetter) = self.zeitgeist(visual_impulse, market);
        if is_trendsetter {
            feedback.push(Feedback::F301_TRENDSETTER);
        }

        let total = (visual_impulse + seo_foundation + zeitgeist).min(LQS_MAX);

        debug!(
            visual_impulse,
            seo_foundation,
            zeitgeist,
            total,
            is_trendsetter,
            "Scored listing"
        );

        ScoreBreakdown {
            visual_impulse,
            seo_foundation,
            zeitgeist,
            total,
            visual_details,
            feedback: feedback.iter().map(|f| f.message().to_string()).collect(),
            is_trendsetter,
        }
    }

    // =========================================================================
    // Module A: Visual Impulse
    // =========================================================================

    fn visual_components(&self, v: &VisualSignals, feedback: &mut Vec<Feedback>) -> VisualDetails {
        let sharpness = if v.is_sharp.unwrap_or(false) {
            SHARPNESS_POINTS
        } else {
            0.0
        };
        if sharpness < SHARPNESS_POINTS {
            feedback.push(Feedback::F101_LOW_SHARPNESS);
        }

        let simplicity = match v.simplicity_score {
            Some(explicit) => explicit.clamp(0.0, SIMPLICITY_MAX),
            None if v.is_centered.unwrap_or(false) => SIMPLICITY_MAX,
            None => SIMPLICITY_OFF_CENTER,
        };
        if simplicity < VISUAL_FEEDBACK_THRESHOLD {
            feedback.push(Feedback::F102_CLUTTERED_COMPOSITION);
        }

        let texture = match v.texture_aesthetics {
            Some(explicit) => explicit.clamp(0.0, TEXTURE_MAX),
            None if v.high_contrast.unwrap_or(false) => TEXTURE_MAX,
            None => TEXTURE_LOW_CONTRAST,
        };
        if texture < VISUAL_FEEDBACK_THRESHOLD {
            feedback.push(Feedback::F103_WEAK_TEXTURE);
        }

        let lifestyle = if v.has_lifestyle.unwrap_or(false) {
            LIFESTYLE_POINTS
        } else {
            0.0
        };
        if lifestyle < LIFESTYLE_POINTS / 2.0 {
            feedback.push(Feedback::F104_NO_LIFESTYLE);
        }

        VisualDetails {
            sharpness,
            simplicity,
            texture,
            lifestyle,
        }
    }

    // =========================================================================
    // Module B: SEO Foundation
    // =========================================================================

    fn seo_foundation(&self, listing: &ListingSignals, feedback: &mut Vec<Feedback>) -> f64 {
        let core_object = listing.visual.core_object_lower();
        let tags = &listing.tags;

        let pareto = self.pareto_title(&listing.title, &core_object, feedback);
        let density = self.tag_density(tags.len());
        let relevance = semantic_relevance(tags, &core_object);

        let long_tail_count = tags.iter().filter(|t| t.trim().contains(' ')).count();
        let long_tail = if long_tail_count >= LONG_TAIL_HIGH_COUNT {
            LONG_TAIL_HIGH_POINTS
        } else if long_tail_count >= LONG_TAIL_LOW_COUNT {
            LONG_TAIL_LOW_POINTS
        } else {
            feedback.push(Feedback::F204_FEW_LONG_TAIL_TAGS);
            0.0
        };

        let assets = asset_richness(listing.image_count, listing.has_video);

        (pareto + density + relevance + long_tail + assets).clamp(0.0, SEO_FOUNDATION_CAP)
    }

    /// 15-point check rewarding an early core keyword and no spam patterns
    fn pareto_title(&self, title: &str, core_object: &str, feedback: &mut Vec<Feedback>) -> f64 {
        let mut pareto = PARETO_BASE;

        if !core_object.is_empty() {
            let prefix: String = title
                .to_lowercase()
                .chars()
                .take(self.config.pareto_prefix_chars)
                .collect();
            if !prefix.contains(core_object) {
                pareto -= PARETO_CORE_OBJECT_PENALTY;
                feedback.push(Feedback::F201_CORE_OBJECT_LATE);
            }
        }

        if title.chars().count() < self.config.min_title_chars {
            pareto -= PARETO_SHORT_TITLE_PENALTY;
            feedback.push(Feedback::F202_SHORT_TITLE);
        }

        if is_shouting(title) || self.has_stuffed_word(title) {
            pareto -= PARETO_SPAM_PENALTY;
            feedback.push(Feedback::F203_SPAMMY_TITLE);
        }

        pareto.max(0.0)
    }

    fn has_stuffed_word(&self, title: &str) -> bool {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for word in tokenize(title) {
            *counts.entry(word).or_insert(0) += 1;
        }
        counts.values().any(|c| *c > self.config.max_word_repeats)
    }

    fn tag_density(&self, tag_count: usize) -> f64 {
        let target = self.config.target_tag_count.max(1) as f64;
        (tag_count as f64 / target * TAG_DENSITY_MAX).min(TAG_DENSITY_MAX)
    }

    // =========================================================================
    // Module C: Zeitgeist
    // =========================================================================

    /// Returns the zeitgeist score and whether the trendsetter override fired
    fn zeitgeist(&self, visual_impulse: f64, market: &MarketSignals) -> (f64, bool) {
        let low_velocity = market.velocity < self.config.low_velocity_threshold;
        if low_velocity && visual_impulse > self.config.trendsetter_visual_threshold {
            return (TRENDSETTER_ZEITGEIST, true);
        }

        let best_seller = visual_impulse / VISUAL_IMPULSE_CAP * BEST_SELLER_WEIGHT;
        let raw = best_seller + market.velocity + market.in_season;
        let score = if raw.is_nan() {
            0.0
        } else {
            raw.clamp(0.0, ZEITGEIST_CAP)
        };
        (score, false)
    }
}

/// Score an untyped visual field map plus listing facts with default market terms
pub fn score_listing<S: AsRef<str>>(
    visual_signals: &Value,
    title: &str,
    tags: &[S],
    image_count: u32,
    has_video: bool,
) -> ScoreBreakdown {
    let listing = ListingSignals {
        visual: VisualSignals::from_value(visual_signals),
        title: title.to_string(),
        tags: tags.iter().map(|t| t.as_ref().to_string()).collect(),
        image_count,
        has_video,
    };
    QualityScorer::new().score(&listing, &MarketSignals::default())
}

/// Share of tags mentioning the core object. Empty tags or an unknown core
/// object score nothing.
fn semantic_relevance(tags: &[String], core_object: &str) -> f64 {
    if tags.is_empty() || core_object.is_empty() {
        return 0.0;
    }
    let matches = tags
        .iter()
        .filter(|t| t.to_lowercase().contains(core_object))
        .count();
    let ratio = matches as f64 / tags.len() as f64;

    if ratio > RELEVANCE_HIGH_RATIO {
        RELEVANCE_HIGH_POINTS
    } else if ratio > RELEVANCE_LOW_RATIO {
        RELEVANCE_LOW_POINTS
    } else {
        0.0
    }
}

fn asset_richness(image_count: u32, has_video: bool) -> f64 {
    let images = if image_count >= RICH_IMAGE_COUNT {
        RICH_IMAGE_POINTS
    } else if image_count >= SOME_IMAGE_COUNT {
        SOME_IMAGE_POINTS
    } else {
        0.0
    };
    images + if has_video { VIDEO_POINTS } else { 0.0 }
}

/// At least one cased letter and no lower-case ones
fn is_shouting(title: &str) -> bool {
    let mut any_upper = false;
    for c in title.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            any_upper = true;
        }
    }
    any_upper
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const LONG_TITLE: &str =
        "Ceramic Mug Handmade Stoneware Coffee Cup, Speckled Glaze Pottery Gift for Tea Lovers";

    fn listing(visual: Value, title: &str, tags: &[&str]) -> ListingSignals {
        ListingSignals {
            visual: VisualSignals::from_value(&visual),
            title: title.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image_count: 1,
            has_video: false,
        }
    }

    #[test]
    fn test_empty_inputs_use_defaults() {
        let result = score_listing::<&str>(&json!(null), "", &[], 0, false);

        assert_eq!(result.visual_details.sharpness, 0.0);
        assert_eq!(result.visual_details.simplicity, SIMPLICITY_OFF_CENTER);
        assert_eq!(result.visual_details.texture, TEXTURE_LOW_CONTRAST);
        assert_eq!(result.visual_impulse, 9.0);
        // Pareto 15 - 4 (short title); no tags, no assets
        assert_eq!(result.seo_foundation, 11.0);
        assert!(!result.is_trendsetter);
        assert!(result.total >= 0.0 && result.total <= 100.0);
    }

    #[test]
    fn test_full_visuals() {
        let scorer = QualityScorer::new();
        let result = scorer.score(
            &listing(
                json!({"sharp": true, "centered": true, "high_contrast": true, "has_lifestyle": true}),
                LONG_TITLE,
                &[],
            ),
            &MarketSignals::default(),
        );
        assert_eq!(result.visual_impulse, 35.0);
        assert!(!result.feedback.iter().any(|f| f == Feedback::F101_LOW_SHARPNESS.message()));
    }

    #[test]
    fn test_explicit_subscores_are_clamped() {
        let scorer = QualityScorer::new();
        let result = scorer.score(
            &listing(
                json!({"is_sharp": true, "simplicity_score": 14, "texture_aesthetics": -2, "centered": false}),
                LONG_TITLE,
                &[],
            ),
            &MarketSignals::default(),
        );
        assert_eq!(result.visual_details.simplicity, 10.0);
        assert_eq!(result.visual_details.texture, 0.0);
        assert_eq!(result.visual_impulse, 15.0);
    }

    #[test]
    fn test_core_object_late_in_title() {
        let scorer = QualityScorer::new();
        let title = "Handmade Stoneware Coffee Cup With Speckled Glaze For Tea Lovers And A Ceramic Mug";
        assert!(title.chars().count() >= 80);
        let mut feedback = Vec::new();
        let pareto = scorer.pareto_title(title, "ceramic mug", &mut feedback);
        assert_eq!(pareto, 7.0);
        assert_eq!(feedback, vec![Feedback::F201_CORE_OBJECT_LATE]);
    }

    #[test]
    fn test_pareto_floor_and_spam() {
        let scorer = QualityScorer::new();
        let mut feedback = Vec::new();
        // Late core object, short and shouting: 15 - 8 - 4 - 3 = 0
        assert_eq!(scorer.pareto_title("BIG SALE VASE", "ring", &mut feedback), 0.0);

        let mut feedback = Vec::new();
        assert!(scorer.has_stuffed_word("ring ring ring ring necklace"));
        assert!(!scorer.has_stuffed_word("ring ring ring necklace"));
        scorer.pareto_title("ring ring ring ring necklace", "ring", &mut feedback);
        assert!(feedback.contains(&Feedback::F203_SPAMMY_TITLE));
    }

    #[test]
    fn test_shouting_needs_letters() {
        assert!(is_shouting("GOLD RING 14K"));
        assert!(!is_shouting("Gold Ring"));
        assert!(!is_shouting("1234 !!"));
    }

    #[test]
    fn test_semantic_relevance_thresholds() {
        let tags: Vec<String> = ["Mug Gift", "Coffee Mug", "Tea Cup", "Pottery", "Stoneware"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        // 2/5 = 0.4 is not above 0.4
        assert_eq!(semantic_relevance(&tags, "mug"), RELEVANCE_LOW_POINTS);
        assert_eq!(semantic_relevance(&tags[..2], "mug"), RELEVANCE_HIGH_POINTS);
        assert_eq!(semantic_relevance(&tags, "vase"), 0.0);
        assert_eq!(semantic_relevance(&tags, ""), 0.0);
        assert_eq!(semantic_relevance(&[], "mug"), 0.0);
    }

    #[test]
    fn test_asset_richness() {
        assert_eq!(asset_richness(0, false), 0.0);
        assert_eq!(asset_richness(2, false), 2.0);
        assert_eq!(asset_richness(5, true), 5.0);
    }

    #[test]
    fn test_zeitgeist_default_market() {
        let scorer = QualityScorer::new();
        let (z, trend) = scorer.zeitgeist(35.0, &MarketSignals::default());
        assert_eq!(z, 28.0);
        assert!(!trend);

        let (z, _) = scorer.zeitgeist(17.5, &MarketSignals::default());
        assert_eq!(z, 20.5);
    }

    #[test]
    fn test_zeitgeist_capped() {
        let scorer = QualityScorer::new();
        let hot = MarketSignals { velocity: 20.0, in_season: 10.0 };
        assert_eq!(scorer.zeitgeist(35.0, &hot).0, ZEITGEIST_CAP);

        let crash = MarketSignals { velocity: -50.0, in_season: 0.0 };
        assert_eq!(scorer.zeitgeist(10.0, &crash).0, 0.0);
    }

    #[test]
    fn test_zeitgeist_infinite_market_clamps() {
        let scorer = QualityScorer::new();
        let boom = MarketSignals { velocity: f64::INFINITY, in_season: 5.0 };
        assert_eq!(scorer.zeitgeist(10.0, &boom), (ZEITGEIST_CAP, false));

        // -inf velocity is "low", but weak visuals keep the override off
        let bust = MarketSignals { velocity: f64::NEG_INFINITY, in_season: 5.0 };
        assert_eq!(scorer.zeitgeist(10.0, &bust), (0.0, false));

        // inf + -inf
        let torn = MarketSignals { velocity: f64::INFINITY, in_season: f64::NEG_INFINITY };
        assert_eq!(scorer.zeitgeist(10.0, &torn), (0.0, false));
    }

    #[test]
    fn test_trendsetter_requires_both_conditions() {
        let scorer = QualityScorer::new();
        let slow = MarketSignals { velocity: 3.0, in_season: 5.0 };

        assert_eq!(scorer.zeitgeist(35.0, &slow), (TRENDSETTER_ZEITGEIST, true));
        // Visual exactly at threshold does not qualify
        let (z, trend) = scorer.zeitgeist(30.0, &slow);
        assert!(!trend);
        assert!((z - (30.0 / 35.0 * 15.0 + 3.0 + 5.0)).abs() < 1e-9);
        // Velocity at threshold is not "low"
        let steady = MarketSignals { velocity: 6.0, in_season: 5.0 };
        assert!(!scorer.zeitgeist(35.0, &steady).1);
    }

    #[test]
    fn test_trendsetter_feedback_appended_last() {
        let scorer = QualityScorer::new();
        let result = scorer.score(
            &listing(
                json!({"sharp": true, "centered": true, "high_contrast": true, "has_lifestyle": true}),
                LONG_TITLE,
                &[],
            ),
            &MarketSignals { velocity: 2.0, in_season: 5.0 },
        );
        assert!(result.is_trendsetter);
        assert_eq!(result.zeitgeist, 25.0);
        assert_eq!(
            result.feedback.last().map(String::as_str),
            Some(Feedback::F301_TRENDSETTER.message())
        );
    }
}
