//! Order API
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/orders | GET | Vendor's orders, newest first, with pending flags |
//! | /api/orders/{id} | GET | Order detail: items + pending requests |
//! | /api/orders/{id} | PUT | Update delivery estimate and/or status |
//! | /api/orders/{id}/statuses | GET | Selectable status targets |
//! | /api/orders/{id}/actions | GET | Full action request history |

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
    Json,
};
use serde::Serialize;

use crate::auth::VendorContext;
use crate::core::ServerState;
use crate::orders::{ledger, status, OrderUpdate};
use shared::models::{OrderActionRequest, OrderStatus, PurchaseOrder, PurchaseOrderItem};
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(list))
        .route("/{id}", get(get_by_id).put(update))
        .route("/{id}/statuses", get(selectable_statuses))
        .route("/{id}/actions", get(action_history))
}

/// List entry: the order plus the derived pending-action flag
#[derive(Debug, Serialize)]
pub struct OrderListEntry {
    #[serde(flatten)]
    pub order: PurchaseOrder,
    pub has_pending_action: bool,
}

/// Order detail: order, immutable items, open requests
#[derive(Debug, Serialize)]
pub struct OrderDetail {
    pub order: PurchaseOrder,
    pub items: Vec<PurchaseOrderItem>,
    pub pending_actions: Vec<OrderActionRequest>,
}

/// Fetch an order and verify it belongs to the calling vendor
fn load_owned_order(
    state: &ServerState,
    ctx: &VendorContext,
    order_id: &str,
) -> AppResult<PurchaseOrder> {
    let order = state.store.get_order(order_id)?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::OrderNotFound,
            format!("Order {} not found", order_id),
        )
    })?;
    if order.vendor_id != ctx.vendor_id {
        return Err(AppError::access_denied("Order belongs to another vendor"));
    }
    Ok(order)
}

/// List the vendor's orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    ctx: VendorContext,
) -> AppResult<ApiResponse<Vec<OrderListEntry>>> {
    let mut orders = state.store.get_orders_for_vendor(&ctx.vendor_id)?;
    orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));

    let flagged = ledger::orders_with_pending(&state.store, &ctx.vendor_id)?;
    let entries = orders
        .into_iter()
        .map(|order| OrderListEntry {
            has_pending_action: flagged.contains(&order.id),
            order,
        })
        .collect();

    Ok(ApiResponse::success(entries))
}

/// Get one order with its items and open requests
pub async fn get_by_id(
    State(state): State<ServerState>,
    ctx: VendorContext,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<OrderDetail>> {
    let order = load_owned_order(&state, &ctx, &id)?;
    let items = state.store.get_items_for_order(&id)?;
    let pending_actions = ledger::list_for_order(&state.store, &id)?
        .into_iter()
        .filter(|a| a.is_pending())
        .collect();

    Ok(ApiResponse::success(OrderDetail {
        order,
        items,
        pending_actions,
    }))
}

/// Update expected delivery date and/or advance the status
pub async fn update(
    State(state): State<ServerState>,
    ctx: VendorContext,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<ApiResponse<PurchaseOrder>> {
    let order = status::update_order(&state.store, &ctx.vendor_id, &id, &payload)?;
    Ok(ApiResponse::success_with_message("Order updated", order))
}

/// The status targets this order may be set to: `{current} ∪ allowed_next`
pub async fn selectable_statuses(
    State(state): State<ServerState>,
    ctx: VendorContext,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<OrderStatus>>> {
    let order = load_owned_order(&state, &ctx, &id)?;
    Ok(ApiResponse::success(order.status.selectable()))
}

/// Full action request history of one order, oldest first
pub async fn action_history(
    State(state): State<ServerState>,
    ctx: VendorContext,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<OrderActionRequest>>> {
    // Ownership check before exposing the ledger
    load_owned_order(&state, &ctx, &id)?;
    let actions = ledger::list_for_order(&state.store, &id)?;
    Ok(ApiResponse::success(actions))
}
