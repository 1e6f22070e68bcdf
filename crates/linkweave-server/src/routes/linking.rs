//! Internal-linking routes: analysis, suggestions, link application, KPIs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;

use linkweave_core::Error;
use linkweave_linking::{
    analyze_internal_links, apply_internal_links, detect_orphan_content,
    get_article_link_suggestions, get_internal_linking_stats, LinkInstruction,
};
use linkweave_store::LinkStatus;

use super::{blocking, ApiError};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orgs/{org_id}/internal-links/analysis", get(analysis))
        .route("/orgs/{org_id}/internal-links/stats", get(linking_stats))
        .route("/orgs/{org_id}/internal-links/orphans", get(orphans))
        .route("/articles/{id}/link-suggestions", get(suggestions))
        .route("/articles/{id}/internal-links", post(apply_links))
        .route("/internal-links/{id}/status", put(update_link_status))
}

#[derive(Deserialize)]
struct ApplyLinksRequest {
    links: Vec<LinkInstruction>,
}

#[derive(Deserialize)]
struct LinkStatusRequest {
    status: LinkStatus,
}

/// GET /api/orgs/{org_id}/internal-links/analysis
async fn analysis(
    State(state): State<Arc<AppState>>,
    Path(org_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let analysis = blocking(state, move |s| analyze_internal_links(&s.store, &org_id)).await?;
    Ok(Json(serde_json::to_value(analysis).map_err(Error::from)?))
}

/// GET /api/orgs/{org_id}/internal-links/stats
async fn linking_stats(
    State(state): State<Arc<AppState>>,
    Path(org_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let stats = blocking(state, move |s| get_internal_linking_stats(&s.store, &org_id)).await?;
    Ok(Json(serde_json::to_value(stats).map_err(Error::from)?))
}

/// GET /api/orgs/{org_id}/internal-links/orphans
async fn orphans(
    State(state): State<Arc<AppState>>,
    Path(org_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let articles = blocking(state, move |s| detect_orphan_content(&s.store, &org_id)).await?;
    Ok(Json(serde_json::json!({
        "count": articles.len(),
        "articles": articles,
    })))
}

/// GET /api/articles/{id}/link-suggestions
async fn suggestions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let suggestions = blocking(state, move |s| get_article_link_suggestions(&s.store, &id)).await?;
    Ok(Json(serde_json::json!({ "suggestions": suggestions })))
}

/// POST /api/articles/{id}/internal-links
///
/// Responds 404 with the (unsuccessful) result body when the source article
/// does not exist.
///
/// The request timeout drops the response future but not the blocking task.
/// The task refuses to start writing once the timeout has elapsed; a batch
/// that is already running when the client gets its 408 still commits.
async fn apply_links(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ApplyLinksRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let started = Instant::now();
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let result = blocking(state, move |s| {
        if started.elapsed() >= timeout {
            return Err(Error::Internal(format!(
                "request for article {id} timed out before links were applied"
            )));
        }
        apply_internal_links(&s.store, &id, &req.links, &s.apply_options)
    })
    .await?;

    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    Ok((status, Json(serde_json::to_value(result).map_err(Error::from)?)))
}

/// PUT /api/internal-links/{id}/status
async fn update_link_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<LinkStatusRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let link = blocking(state, move |s| {
        if !s.store.set_link_status(&id, req.status)? {
            return Err(Error::NotFound(format!("internal link {id}")));
        }
        s.store.get_link(&id)
    })
    .await?;
    Ok(Json(serde_json::json!({ "link": link })))
}
