//! Listing analysis: the full pipeline the calling layer runs per listing
//!
//! generator output → tags → LQS → price, plus an input fingerprint that lets
//! callers cache results and key history snapshots.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::config::{Config, PricingConfig};
use crate::core::{PricingEngine, QualityScorer, TagNormalizer};
use crate::types::{
    AnalysisRequest, GeneratedContent, ListingAnalysis, ListingSignals, ListingSnapshot,
    PricingInput, VisualSignals,
};
use crate::Result;

#[derive(Debug, Clone, Default)]
pub struct ListingAnalyzer {
    tags: TagNormalizer,
    scorer: QualityScorer,
    pricing: PricingEngine,
    pricing_config: PricingConfig,
}

impl ListingAnalyzer {
    pub fn new(config: &Config) -> Self {
        Self {
            tags: TagNormalizer::with_config(config.tags.clone()),
            scorer: QualityScorer::with_config(config.scoring.clone()),
            pricing: PricingEngine::with_config(config.pricing.clone()),
            pricing_config: config.pricing.clone(),
        }
    }

    pub fn analyze(
        &self,
        request: &AnalysisRequest,
        content: &GeneratedContent,
    ) -> Result<ListingAnalysis> {
        let fingerprint = fingerprint(request, content)?;

        let tags = self.tags.normalize(&content.tags_pool, &request.product_title);
        let title = content
            .suggested_title
            .clone()
            .unwrap_or_else(|| request.product_title.clone());

        let signals = ListingSignals {
            visual: VisualSignals::from_value(&content.visual_data),
            title: title.clone(),
            tags: tags.clone(),
            image_count: request.image_count,
            has_video: request.has_video,
        };
        let score = self.scorer.score(&signals, &request.market);
        let lqs_score = score.rounded_total();

        let price = self.pricing.calculate(&self.pricing_input(lqs_score, request, content))?;

        info!(
            listing_id = %request.listing_id,
            lqs = lqs_score,
            optimal = price.optimal,
            tags = tags.len(),
            "Analyzed listing"
        );

        Ok(ListingAnalysis {
            listing_id: request.listing_id.clone(),
            title,
            description: content.suggested_description.clone(),
            tags,
            lqs_reason: score.reason_line(),
            lqs_score,
            score,
            price,
            trend_score: content.trend_score,
            best_selling_months: content.best_months.clone(),
            fingerprint,
        })
    }

    /// Category ceiling comes from the generator's valuation when it is usable
    fn pricing_input(
        &self,
        lqs_score: f64,
        request: &AnalysisRequest,
        content: &GeneratedContent,
    ) -> PricingInput {
        let category_min = self.pricing_config.category_min;
        let category_max = if content.price_max_valuation >= category_min
            && content.price_max_valuation > 0.0
        {
            content.price_max_valuation
        } else {
            if content.price_max_valuation > 0.0 {
                warn!(
                    valuation = content.price_max_valuation,
                    category_min, "Generator valuation below category floor, using default ceiling"
                );
            }
            self.pricing_config.category_max
        };

        let competitor_price = if request.is_competitor {
            content.price_min
        } else {
            0.0
        };

        PricingInput {
            lqs_score: lqs_score.clamp(0.0, 100.0),
            competitor_price,
            category_min,
            category_max,
            seasonality: content.monthly_popularity.clone(),
        }
    }
}

impl ListingAnalysis {
    /// History record for this analysis
    pub fn to_snapshot(&self, created_at: DateTime<Utc>) -> ListingSnapshot {
        let id = format!(
            "snap_{}_{}",
            created_at.format("%Y%m%d_%H%M%S"),
            &self.fingerprint[..8.min(self.fingerprint.len())]
        );

        ListingSnapshot {
            id,
            listing_id: self.listing_id.clone(),
            created_at,
            fingerprint: self.fingerprint.clone(),
            lqs_score: self.lqs_score,
            lqs_visual_score: crate::round_to(self.score.visual_impulse, 1),
            lqs_seo_score: crate::round_to(self.score.seo_foundation, 1),
            lqs_zeitgeist_score: crate::round_to(self.score.zeitgeist, 1),
            lqs_reason: self.lqs_reason.clone(),
            suggested_title: self.title.clone(),
            suggested_tags: self.tags.clone(),
            predicted_price_min: self.price.min,
            predicted_price_optimal: self.price.optimal,
            predicted_price_max: self.price.max,
            price_reason: self.price.reason.clone(),
            is_trendsetter: self.score.is_trendsetter,
        }
    }
}

/// Hex SHA-256 over the serialized request and generator content
pub fn fingerprint(request: &AnalysisRequest, content: &GeneratedContent) -> Result<String> {
    let payload = serde_json::to_vec(&(request, content))?;
    let mut hasher = Sha256::new();
    hasher.update(&payload);
    Ok(hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect())
}

// =============================================================================
// TESTS
// =============================================================================
