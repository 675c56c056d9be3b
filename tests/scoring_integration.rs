//! Integration tests for the Listing Quality Score
//!
//! Covers module caps, the trendsetter override and the untyped visual boundary.

use cyclear::config::ScoringConfig;
use cyclear::core::{score_listing, QualityScorer};
use cyclear::types::{Feedback, ListingSignals, MarketSignals, VisualSignals};
use serde_json::json;

/// 90 chars, core object in the first 40
const MUG_TITLE: &str =
    "Ceramic Mug Handmade Stoneware Coffee Cup, Speckled Glaze Pottery Gift for Tea Lovers Moms";

fn long_tail_tags(n: usize) -> Vec<String> {
    [
        "Ceramic Mug",
        "Coffee Mug",
        "Stoneware Mug",
        "Pottery Mug",
        "Tea Mug Gift",
        "Handmade Mug",
        "Speckled Mug",
        "Glazed Coffee Cup",
        "Rustic Tea Cup",
        "Mug For Mom",
        "Large Coffee Mug",
        "Latte Mug",
        "Camping Mug",
    ]
    .iter()
    .take(n)
    .map(|s| s.to_string())
    .collect()
}

fn perfect_visual() -> serde_json::Value {
    json!({
        "sharp": true,
        "centered": true,
        "high_contrast": true,
        "has_lifestyle": true,
        "core_object": "Mug"
    })
}

// =============================================================================
// SCENARIO: Strong listing hits both caps
// =============================================================================

#[test]
fn test_strong_listing_hits_visual_and_seo_caps() {
    assert_eq!(MUG_TITLE.chars().count(), 90);

    let score = score_listing(&perfect_visual(), MUG_TITLE, &long_tail_tags(13), 6, true);

    assert_eq!(score.visual_impulse, 35.0);
    assert_eq!(score.seo_foundation, 35.0);
    // best seller 15 + default velocity 8 + in season 5
    assert_eq!(score.zeitgeist, 28.0);
    assert_eq!(score.total, 98.0);
    assert!(!score.is_trendsetter);
    assert!(score.feedback.is_empty(), "unexpected feedback {:?}", score.feedback);
}

#[test]
fn test_ten_long_tail_tags_fall_short_of_density() {
    let score = score_listing(&perfect_visual(), MUG_TITLE, &long_tail_tags(10), 6, true);

    // pareto 15 + density 10/13*2 + relevance 6 + long tail 7 + assets 5
    let expected = 15.0 + 10.0 / 13.0 * 2.0 + 6.0 + 7.0 + 5.0;
    assert!((score.seo_foundation - expected).abs() < 1e-9);
    assert!(score.seo_foundation < 35.0);
}

// =============================================================================
// SCENARIO: Trendsetter override
// =============================================================================

#[test]
fn test_trendsetter_iff_low_velocity_and_outstanding_visual() {
    let scorer = QualityScorer::new();
    let listing = ListingSignals {
        visual: VisualSignals::from_value(&perfect_visual()),
        title: MUG_TITLE.to_string(),
        tags: long_tail_tags(13),
        image_count: 6,
        has_video: true,
    };

    let slow = MarketSignals { velocity: 2.0, in_season: 0.0 };
    let score = scorer.score(&listing, &slow);
    assert!(score.is_trendsetter);
    assert_eq!(score.zeitgeist, 25.0);
    assert!(score.feedback.contains(&Feedback::F301_TRENDSETTER.message().to_string()));

    // Velocity at the threshold is not low
    let steady = MarketSignals { velocity: 6.0, in_season: 0.0 };
    let score = scorer.score(&listing, &steady);
    assert!(!score.is_trendsetter);
    assert_eq!(score.zeitgeist, 21.0);

    // Visual at exactly 30 does not qualify
    let mut plain = listing.clone();
    plain.visual.simplicity_score = Some(5.0);
    let score = scorer.score(&plain, &slow);
    assert_eq!(score.visual_impulse, 30.0);
    assert!(!score.is_trendsetter);
}

#[test]
fn test_trendsetter_threshold_configurable() {
    let scorer = QualityScorer::with_config(ScoringConfig {
        trendsetter_visual_threshold: 15.0,
        ..ScoringConfig::default()
    });
    let listing = ListingSignals {
        visual: VisualSignals::from_value(&json!({"is_sharp": true, "is_centered": true, "core_object": "mug"})),
        title: MUG_TITLE.to_string(),
        ..ListingSignals::default()
    };
    let score = scorer.score(&listing, &MarketSignals { velocity: 1.0, in_season: 0.0 });
    assert_eq!(score.visual_impulse, 19.0);
    assert!(score.is_trendsetter);
}

// =============================================================================
// SCENARIO: Weak and malformed inputs
// =============================================================================

#[test]
fn test_empty_listing_scores_within_bounds() {
    let score = score_listing::<&str>(&json!({}), "", &[], 0, false);

    // off-center 5 + low contrast 4
    assert_eq!(score.visual_impulse, 9.0);
    // short title penalty only; no core object so no relevance or Pareto check
    assert_eq!(score.seo_foundation, 11.0);
    assert!(score.total >= 0.0 && score.total <= 100.0);
    assert!(score.feedback.contains(&Feedback::F101_LOW_SHARPNESS.message().to_string()));
    assert!(score.feedback.contains(&Feedback::F204_FEW_LONG_TAIL_TAGS.message().to_string()));
}

#[test]
fn test_garbage_visual_fields_use_defaults() {
    let garbage = json!({
        "is_sharp": [1, 2],
        "simplicity_score": "lots",
        "texture_aesthetics": {"x": 1},
        "has_lifestyle": null
    });
    let score = score_listing::<&str>(&garbage, "", &[], 0, false);
    assert_eq!(score.visual_details.sharpness, 0.0);
    assert_eq!(score.visual_details.simplicity, 5.0);
    assert_eq!(score.visual_details.texture, 4.0);
    assert_eq!(score.visual_details.lifestyle, 0.0);

    let not_an_object = score_listing::<&str>(&json!("sharp"), "", &[], 0, false);
    assert_eq!(not_an_object.visual_impulse, 9.0);
}

#[test]
fn test_out_of_range_components_clamped() {
    let wild = json!({"simplicity_score": 50, "texture_aesthetics": -3});
    let score = score_listing::<&str>(&wild, "", &[], 0, false);
    assert_eq!(score.visual_details.simplicity, 10.0);
    assert_eq!(score.visual_details.texture, 0.0);

    let market = MarketSignals { velocity: 1000.0, in_season: 1000.0 };
    let score = QualityScorer::new().score(&ListingSignals::default(), &market);
    assert_eq!(score.zeitgeist, 30.0);

    let market = MarketSignals { velocity: -1000.0, in_season: 0.0 };
    let score = QualityScorer::new().score(&ListingSignals::default(), &market);
    assert_eq!(score.zeitgeist, 0.0);
}

#[test]
fn test_spammy_title_penalized() {
    let shouting = "CERAMIC MUG HANDMADE STONEWARE COFFEE CUP SPECKLED GLAZE POTTERY GIFT FOR TEA LOVERS";
    let stuffed = "mug mug mug mug ceramic coffee cup speckled glaze pottery gift for tea lovers and friends";

    for title in [shouting, stuffed] {
        let score = score_listing::<&str>(&json!({"core_object": "mug"}), title, &[], 0, false);
        assert!(
            score.feedback.contains(&Feedback::F203_SPAMMY_TITLE.message().to_string()),
            "no spam feedback for {}",
            title
        );
    }
}

#[test]
fn test_reason_line_format() {
    let score = score_listing(&perfect_visual(), MUG_TITLE, &long_tail_tags(13), 6, true);
    assert_eq!(score.reason_line(), "Visual: 35.0/35, SEO: 35.0/35, Zeitgeist: 28.0/30");
}
