//! Resolution coordinator
//!
//! The only code path that takes an action request out of PENDING, and the
//! only sanctioned way an action request touches its order. Approving a
//! CANCEL request writes the request and the cancelled order in one redb
//! transaction, so a failure between the two can never leave an approved
//! cancellation with a live order.

use chrono::Utc;
use serde::Serialize;

use crate::store::PortalStore;
use shared::models::{
    ActionType, OrderActionRequest, OrderStatus, PurchaseOrder, RequestStatus, ResolutionDecision,
};
use shared::{AppError, AppResult, ErrorCode};

/// Result of a resolution: the resolved request, plus the order when the
/// resolution changed it (APPROVE + CANCEL)
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionOutcome {
    pub request: OrderActionRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<PurchaseOrder>,
}

/// Resolve a pending action request exactly once
///
/// - a request that already left PENDING yields `AlreadyResolved`, whichever
///   caller lost the race;
/// - REJECT requires a non-empty reason (`MissingReason` before any write);
/// - an empty response on APPROVE records the canonical `"Approved"`;
/// - APPROVE of a CANCEL force-sets the order to CANCELLED in the same
///   transaction.
pub fn resolve(
    store: &PortalStore,
    vendor_id: &str,
    resolved_by: &str,
    action_id: &str,
    decision: ResolutionDecision,
    vendor_response: Option<&str>,
) -> AppResult<ResolutionOutcome> {
    let txn = store.begin_write()?;

    let mut request = store.get_action_txn(&txn, action_id)?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::ActionNotFound,
            format!("Action request {} not found", action_id),
        )
    })?;

    if request.vendor_id != vendor_id {
        return Err(AppError::access_denied(
            "Action request belongs to another vendor",
        ));
    }

    if !request.is_pending() {
        return Err(AppError::already_resolved(request.status.as_str()));
    }

    let trimmed = vendor_response.map(str::trim).unwrap_or("");

    let (new_status, response_text) = match decision {
        ResolutionDecision::Approve => {
            let text = if trimmed.is_empty() { "Approved" } else { trimmed };
            (RequestStatus::Approved, text.to_string())
        }
        ResolutionDecision::Reject => {
            if trimmed.is_empty() {
                return Err(AppError::missing_reason());
            }
            (RequestStatus::Rejected, trimmed.to_string())
        }
    };

    request.status = new_status;
    request.resolved_at = Some(Utc::now());
    request.resolved_by = Some(resolved_by.to_string());
    request.vendor_response = Some(response_text);

    // An approved CANCEL is the only path into CANCELLED
    let order = if new_status == RequestStatus::Approved
        && request.action_type == ActionType::Cancel
    {
        let mut order = store
            .get_order_txn(&txn, &request.purchase_order_id)?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::OrderNotFound,
                    format!("Order {} not found", request.purchase_order_id),
                )
            })?;
        order.status = OrderStatus::Cancelled;
        store.store_order(&txn, &order)?;
        Some(order)
    } else {
        None
    };

    store.store_action(&txn, &request)?;
    txn.commit().map_err(crate::store::StoreError::from)?;

    tracing::info!(
        action_id = %request.id,
        order_id = %request.purchase_order_id,
        status = %request.status,
        "Action request resolved"
    );

    Ok(ResolutionOutcome { request, order })
}
