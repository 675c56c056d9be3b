//! Traffic estimation
//!
//! Real traffic comes from an analytics provider owned by the calling layer.
//! `ScoreDrivenEstimator` is the fallback: it spreads an LQS-proportional visit
//! count across channels using an injected RNG, so a seeded RNG reproduces it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::types::{ListingAnalysis, TrafficBreakdown, TrafficSource};

/// Source of a traffic-by-channel breakdown for a scored listing
pub trait TrafficEstimator {
    fn estimate(&mut self, lqs_score: f64) -> TrafficBreakdown;
}

/// Channel name and chart color
const ETSY_SEARCH: (&str, &str) = ("Etsy Search", "#F97316");
const GOOGLE_ORGANIC: (&str, &str) = ("Google Organic", "#4285F4");
const PINTEREST: (&str, &str) = ("Pinterest/Social", "#E60023");
const DIRECT: (&str, &str) = ("Direct", "#9CA3AF");

/// Smallest share the direct channel is given
const MIN_DIRECT_SHARE: f64 = 0.05;

#[derive(Debug)]
pub struct ScoreDrivenEstimator<R: Rng> {
    rng: R,
}

impl<R: Rng> ScoreDrivenEstimator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> TrafficEstimator for ScoreDrivenEstimator<R> {
    fn estimate(&mut self, lqs_score: f64) -> TrafficBreakdown {
        let base = (lqs_score.clamp(0.0, 100.0) * 100.0) as u64;
        let total_visits = base + self.rng.gen_range(50..=500);

        let mut google: f64 = self.rng.gen_range(0.3..0.5);
        let mut etsy: f64 = self.rng.gen_range(0.2..0.4);
        let mut pinterest: f64 = self.rng.gen_range(0.1..0.2);
        let mut direct = 1.0 - (google + etsy + pinterest);
        if direct < MIN_DIRECT_SHARE {
            // Overdrawn: keep a direct floor and rescale so shares sum to one
            direct = MIN_DIRECT_SHARE;
            let scale = (1.0 - direct) / (google + etsy + pinterest);
            google *= scale;
            etsy *= scale;
            pinterest *= scale;
        }

        let share = |(name, color): (&str, &str), fraction: f64| TrafficSource {
            name: name.to_string(),
            value: (total_visits as f64 * fraction) as u64,
            color: color.to_string(),
        };

        let sources = vec![
            share(ETSY_SEARCH, etsy),
            share(GOOGLE_ORGANIC, google),
            share(PINTEREST, pinterest),
            share(DIRECT, direct),
        ];

        debug!(lqs_score, total_visits, "Estimated traffic");

        TrafficBreakdown {
            total_visits,
            insight: "Traffic estimation based on LQS score.".to_string(),
            sources,
        }
    }
}

/// Fallback estimate for an analysis, seeded from its input fingerprint so the
/// same listing inputs always produce the same breakdown
pub fn estimate_for(analysis: &ListingAnalysis) -> TrafficBreakdown {
    let seed_hex = &analysis.fingerprint[..16.min(analysis.fingerprint.len())];
    let seed = u64::from_str_radix(seed_hex, 16).unwrap_or(0);
    ScoreDrivenEstimator::new(StdRng::seed_from_u64(seed)).estimate(analysis.lqs_score)
}
