//! HTTP API for the calling layer
//!
//! Endpoints:
//! - GET  /health                  - Health check
//! - POST /tags/normalize          - Normalize a tag pool against a title
//! - POST /score                   - Compute the LQS breakdown
//! - POST /price                   - Compute the price band
//! - POST /analyze                 - Full pipeline from generator output
//! - GET  /listings/:id/history    - Stored snapshots for a listing

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Config;
use crate::core::{
    traffic, ListingAnalyzer, PricingEngine, QualityScorer, SnapshotStore, TagNormalizer,
};
use crate::types::{
    AnalysisRequest, GeneratedContent, ListingAnalysis, ListingSignals, ListingSnapshot,
    MarketSignals, PriceRecommendation, PricingInput, ScoreBreakdown, TrafficBreakdown,
    VisualSignals,
};
use crate::Error;

/// App state
pub struct AppState {
    pub tags: TagNormalizer,
    pub scorer: QualityScorer,
    pub pricing: PricingEngine,
    pub analyzer: ListingAnalyzer,
    /// History store; `None` disables snapshots
    pub store: Option<Arc<dyn SnapshotStore>>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    #[serde(default)]
    pub raw_tags: Vec<String>,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub visual_signals: Value,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_count: u32,
    #[serde(default)]
    pub has_video: bool,
    #[serde(default)]
    pub market: MarketSignals,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub request: AnalysisRequest,
    /// Raw content generator output
    #[serde(default)]
    pub content: Value,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: ListingAnalysis,
    pub traffic: TrafficBreakdown,
    pub snapshot_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Library errors mapped onto HTTP statuses
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_precondition() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            error!(error = %self.0, "Request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(ErrorResponse { error: self.0.to_string() })).into_response()
    }
}

/// Create the API router
pub fn create_router(config: &Config, store: Option<Arc<dyn SnapshotStore>>) -> Router {
    let state = Arc::new(AppState {
        tags: TagNormalizer::with_config(config.tags.clone()),
        scorer: QualityScorer::with_config(config.scoring.clone()),
        pricing: PricingEngine::with_config(config.pricing.clone()),
        analyzer: ListingAnalyzer::new(config),
        store,
    });

    Router::new()
        .route("/health", get(health))
        .route("/tags/normalize", post(normalize))
        .route("/score", post(score))
        .route("/price", post(price))
        .route("/analyze", post(analyze))
        .route("/listings/:id/history", get(history))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

async fn normalize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NormalizeRequest>,
) -> Json<NormalizeResponse> {
    Json(NormalizeResponse {
        tags: state.tags.normalize(&req.raw_tags, &req.title),
    })
}

async fn score(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScoreRequest>,
) -> Json<ScoreBreakdown> {
    let listing = ListingSignals {
        visual: VisualSignals::from_value(&req.visual_signals),
        title: req.title,
        tags: req.tags,
        image_count: req.image_count,
        has_video: req.has_video,
    };
    Json(state.scorer.score(&listing, &req.market))
}

async fn price(
    State(state): State<Arc<AppState>>,
    Json(input): Json<PricingInput>,
) -> Result<Json<PriceRecommendation>, ApiError> {
    Ok(Json(state.pricing.calculate(&input)?))
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let content = GeneratedContent::from_value(&req.content);
    let analysis = state.analyzer.analyze(&req.request, &content)?;

    let snapshot_path = match &state.store {
        Some(store) => Some(store.save(&analysis.to_snapshot(chrono::Utc::now()))?),
        None => None,
    };

    Ok(Json(AnalyzeResponse {
        traffic: traffic::estimate_for(&analysis),
        analysis,
        snapshot_path,
    }))
}

async fn history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ListingSnapshot>>, ApiError> {
    match &state.store {
        Some(store) => Ok(Json(store.history(&id)?)),
        None => Ok(Json(Vec::new())),
    }
}

/// Run the API server
pub async fn run_server(
    addr: &str,
    config: &Config,
    store: Option<Arc<dyn SnapshotStore>>,
) -> crate::Result<()> {
    let router = create_router(config, store);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Cyclear API listening");
    info!("  POST /tags/normalize       - Normalize tags");
    info!("  POST /score                - Listing Quality Score");
    info!("  POST /price                - Price recommendation");
    info!("  POST /analyze              - Full listing analysis");
    info!("  GET  /listings/:id/history - Snapshot history");
    info!("  GET  /health               - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
