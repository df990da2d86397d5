//! Action request API
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/actions/pending | GET | Vendor's open requests |
//! | /api/actions/{id}/resolve | POST | Approve or reject a request |

use axum::{
    Router,
    extract::{Path, State},
    routing::{get, post},
    Json,
};
use serde::Deserialize;

use crate::auth::VendorContext;
use crate::core::ServerState;
use crate::orders::{ledger, resolution};
use crate::orders::resolution::ResolutionOutcome;
use shared::models::{OrderActionRequest, ResolutionDecision};
use shared::{ApiResponse, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/actions", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/pending", get(list_pending))
        .route("/{id}/resolve", post(resolve))
}

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub decision: ResolutionDecision,
    #[serde(default)]
    pub vendor_response: Option<String>,
}

/// The vendor's open requests, newest first
pub async fn list_pending(
    State(state): State<ServerState>,
    ctx: VendorContext,
) -> AppResult<ApiResponse<Vec<OrderActionRequest>>> {
    let actions = ledger::list_pending(&state.store, &ctx.vendor_id)?;
    Ok(ApiResponse::success(actions))
}

/// Resolve one pending request (at most once)
pub async fn resolve(
    State(state): State<ServerState>,
    ctx: VendorContext,
    Path(id): Path<String>,
    Json(payload): Json<ResolveRequest>,
) -> AppResult<ApiResponse<ResolutionOutcome>> {
    let outcome = resolution::resolve(
        &state.store,
        &ctx.vendor_id,
        &ctx.username,
        &id,
        payload.decision,
        payload.vendor_response.as_deref(),
    )?;
    Ok(ApiResponse::success_with_message(
        "Action request resolved",
        outcome,
    ))
}
