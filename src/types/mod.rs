//! Core types for Cyclear

mod analysis;
mod content;
mod feedback;
mod pricing;
mod score;
mod traffic;
mod visual;

pub use analysis::{AnalysisRequest, ListingAnalysis, ListingSnapshot};
pub use content::GeneratedContent;
pub use feedback::Feedback;
pub use pricing::{PriceRecommendation, PricingInput, PricingStrategy, SeasonalAdjustment};
pub use score::{ListingSignals, MarketSignals, ScoreBreakdown, VisualDetails};
pub use traffic::{TrafficBreakdown, TrafficSource};
pub use visual::VisualSignals;
