//! Dashboard API
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/dashboard | GET | Vendor summary: counts, latest metric, documents |

use axum::{Router, extract::State, routing::get};

use crate::auth::VendorContext;
use crate::core::ServerState;
use crate::orders::dashboard::{self, DashboardSummary};
use shared::{ApiResponse, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/dashboard", get(summary))
}

pub async fn summary(
    State(state): State<ServerState>,
    ctx: VendorContext,
) -> AppResult<ApiResponse<DashboardSummary>> {
    let summary = dashboard::aggregate(&state.store, &ctx.vendor_id)?;
    Ok(ApiResponse::success(summary))
}
