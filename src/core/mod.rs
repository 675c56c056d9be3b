//! Core modules for Cyclear

pub mod tags;
pub mod lqs;
pub mod pricing;
pub mod analysis;
pub mod traffic;
pub mod snapshot;
pub mod api;

pub use tags::{normalize_tags, TagNormalizer};
pub use lqs::{score_listing, QualityScorer};
pub use pricing::{apply_charm_pricing, price_listing, seasonality_multiplier, PricingEngine};
pub use analysis::{fingerprint, ListingAnalyzer};
pub use traffic::{estimate_for, ScoreDrivenEstimator, TrafficEstimator};
pub use snapshot::{load_snapshot, JsonFileStore, SnapshotStore};
pub use api::{create_router, run_server};
