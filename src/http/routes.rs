use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::error::RestError;
use crate::pipeline::{AnalysisReport, Analyzer};

#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<Analyzer>,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze/{category}", get(analyze))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn analyze(
    Path(category): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AnalysisReport>, RestError> {
    let category = category.trim();
    if category.is_empty() {
        return Err(RestError::EmptyCategory);
    }

    info!("Analysis requested for category: {}", category);
    let report = state.analyzer.analyze(category).await?;

    Ok(Json(report))
}
