//! Order status machine and vendor-side order updates
//!
//! The vendor moves an order strictly forward:
//! PENDING → CONFIRMED → SHIPPED → DELIVERED. No skipping, no reverting.
//! CANCELLED is reached only through [`crate::orders::resolution`].

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::store::PortalStore;
use shared::models::{OrderStatus, PurchaseOrder};
use shared::{AppError, AppResult};

/// Vendor-editable order fields
///
/// Both fields optional; an update carrying neither is a no-op.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderUpdate {
    pub expected_delivery_date: Option<DateTime<Utc>>,
    pub status: Option<OrderStatus>,
}

/// Check that `target` is a legal move from `current`
///
/// Re-selecting the current status is a no-op and always allowed on
/// non-terminal orders.
pub fn propose_status(current: OrderStatus, target: OrderStatus) -> AppResult<()> {
    if current.is_terminal() {
        return Err(AppError::order_finalized(current.as_str()));
    }
    if target == current {
        return Ok(());
    }
    if current.allowed_next() == Some(target) {
        return Ok(());
    }
    Err(AppError::invalid_transition(current.as_str(), target.as_str()))
}

/// Apply a vendor's order update in one transaction
///
/// Validates ownership, terminal-state immutability and the status chain
/// before writing. The first transition into DELIVERED stamps
/// `actual_delivery_date`; an already-set date is never overwritten.
pub fn update_order(
    store: &PortalStore,
    vendor_id: &str,
    order_id: &str,
    update: &OrderUpdate,
) -> AppResult<PurchaseOrder> {
    let txn = store.begin_write()?;

    let mut order = store
        .get_order_txn(&txn, order_id)?
        .ok_or_else(|| AppError::with_message(
            shared::ErrorCode::OrderNotFound,
            format!("Order {} not found", order_id),
        ))?;

    if order.vendor_id != vendor_id {
        return Err(AppError::access_denied("Order belongs to another vendor"));
    }

    if order.status.is_terminal() {
        return Err(AppError::order_finalized(order.status.as_str()));
    }

    if let Some(target) = update.status {
        propose_status(order.status, target)?;
        if target == OrderStatus::Delivered && order.actual_delivery_date.is_none() {
            order.actual_delivery_date = Some(Utc::now());
        }
        order.status = target;
    }

    if let Some(expected) = update.expected_delivery_date {
        order.expected_delivery_date = expected;
    }

    store.store_order(&txn, &order)?;
    txn.commit().map_err(crate::store::StoreError::from)?;

    tracing::info!(order_id = %order.id, status = %order.status, "Order updated");
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shared::ErrorCode;

    fn seed_order(store: &PortalStore, id: &str, status: OrderStatus) -> PurchaseOrder {
        let order = PurchaseOrder {
            id: id.to_string(),
            vendor_id: "vendor-1".to_string(),
            plant_id: "plant-1".to_string(),
            order_date: Utc::now(),
            expected_delivery_date: Utc::now() + Duration::days(14),
            actual_delivery_date: None,
            status,
        };
        store.put_order(&order).unwrap();
        order
    }

    #[test]
    fn test_propose_status_forward_chain_only() {
        assert!(propose_status(OrderStatus::Pending, OrderStatus::Confirmed).is_ok());
        assert!(propose_status(OrderStatus::Confirmed, OrderStatus::Shipped).is_ok());
        assert!(propose_status(OrderStatus::Shipped, OrderStatus::Delivered).is_ok());

        // No skipping
        let err = propose_status(OrderStatus::Pending, OrderStatus::Shipped).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransition);

        // No reverting
        let err = propose_status(OrderStatus::Shipped, OrderStatus::Confirmed).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransition);

        // No direct cancel
        let err = propose_status(OrderStatus::Pending, OrderStatus::Cancelled).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransition);
    }

    #[test]
    fn test_propose_status_noop_allowed() {
        assert!(propose_status(OrderStatus::Confirmed, OrderStatus::Confirmed).is_ok());
    }

    #[test]
    fn test_propose_status_terminal_rejects_everything() {
        for terminal in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            let err = propose_status(terminal, terminal).unwrap_err();
            assert_eq!(err.code, ErrorCode::OrderFinalized);
        }
    }

    #[test]
    fn test_update_advances_status() {
        let store = PortalStore::open_in_memory().unwrap();
        seed_order(&store, "po-1", OrderStatus::Pending);

        let update = OrderUpdate {
            expected_delivery_date: None,
            status: Some(OrderStatus::Confirmed),
        };
        let order = update_order(&store, "vendor-1", "po-1", &update).unwrap();
        assert_eq!(order.status, OrderStatus::Confirmed);

        // Persisted
        let stored = store.get_order("po-1").unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Confirmed);
    }

    #[test]
    fn test_update_rejects_skip_without_side_effects() {
        let store = PortalStore::open_in_memory().unwrap();
        seed_order(&store, "po-1", OrderStatus::Pending);

        let update = OrderUpdate {
            expected_delivery_date: Some(Utc::now() + Duration::days(30)),
            status: Some(OrderStatus::Shipped),
        };
        let err = update_order(&store, "vendor-1", "po-1", &update).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransition);

        // Nothing written, including the date change in the same request
        let stored = store.get_order("po-1").unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Pending);
        assert!(stored.expected_delivery_date < Utc::now() + Duration::days(30));
    }

    #[test]
    fn test_delivery_stamps_actual_date_once() {
        let store = PortalStore::open_in_memory().unwrap();
        seed_order(&store, "po-1", OrderStatus::Shipped);

        let update = OrderUpdate {
            expected_delivery_date: None,
            status: Some(OrderStatus::Delivered),
        };
        let order = update_order(&store, "vendor-1", "po-1", &update).unwrap();
        assert!(order.actual_delivery_date.is_some());

        // Terminal now: any further mutation is rejected
        let err = update_order(&store, "vendor-1", "po-1", &update).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderFinalized);
    }

    #[test]
    fn test_terminal_order_rejects_date_change() {
        let store = PortalStore::open_in_memory().unwrap();
        seed_order(&store, "po-1", OrderStatus::Cancelled);

        let update = OrderUpdate {
            expected_delivery_date: Some(Utc::now() + Duration::days(1)),
            status: None,
        };
        let err = update_order(&store, "vendor-1", "po-1", &update).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderFinalized);
    }

    #[test]
    fn test_update_checks_ownership() {
        let store = PortalStore::open_in_memory().unwrap();
        seed_order(&store, "po-1", OrderStatus::Pending);

        let update = OrderUpdate {
            expected_delivery_date: None,
            status: Some(OrderStatus::Confirmed),
        };
        let err = update_order(&store, "vendor-2", "po-1", &update).unwrap_err();
        assert_eq!(err.code, ErrorCode::AccessDenied);
    }

    #[test]
    fn test_update_missing_order() {
        let store = PortalStore::open_in_memory().unwrap();
        let update = OrderUpdate {
            expected_delivery_date: None,
            status: None,
        };
        let err = update_order(&store, "vendor-1", "po-missing", &update).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }
}
