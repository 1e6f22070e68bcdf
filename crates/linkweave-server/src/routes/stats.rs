//! Store stats and health routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use super::{blocking, ApiError};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/health", get(health))
}

/// GET /api/stats: article and link counts for the whole store.
async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let stats = blocking(state, |s| s.store.get_stats()).await?;

    Ok(Json(serde_json::json!({
        "articles": stats.total_articles,
        "publishedArticles": stats.published_articles,
        "links": {
            "total": stats.total_links,
            "applied": stats.applied_links,
            "suggested": stats.suggested_links,
            "rejected": stats.rejected_links,
        },
        "dbSizeMb": stats.db_size_mb,
    })))
}

/// GET /api/health
async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "port": state.config.port,
        "blogPath": state.config.blog_path,
    }))
}
