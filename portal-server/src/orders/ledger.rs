//! Read-only views over the action request ledger
//!
//! The ledger itself is append-only from the portal's perspective: requests
//! arrive from the admin side already PENDING and are only ever mutated by
//! [`crate::orders::resolution`].

use std::collections::HashSet;

use crate::store::PortalStore;
use shared::models::OrderActionRequest;
use shared::AppResult;

/// A vendor's open requests, newest first
pub fn list_pending(store: &PortalStore, vendor_id: &str) -> AppResult<Vec<OrderActionRequest>> {
    let mut actions = store.get_pending_actions_for_vendor(vendor_id)?;
    actions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(actions)
}

/// Full request history of one order, oldest first
pub fn list_for_order(store: &PortalStore, order_id: &str) -> AppResult<Vec<OrderActionRequest>> {
    let mut actions = store.get_actions_for_order(order_id)?;
    actions.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(actions)
}

/// Order ids that currently have at least one pending request
///
/// Drives the `has_pending_action` flag on order listings.
pub fn orders_with_pending(store: &PortalStore, vendor_id: &str) -> AppResult<HashSet<String>> {
    Ok(store
        .get_pending_actions_for_vendor(vendor_id)?
        .into_iter()
        .map(|a| a.purchase_order_id)
        .collect())
}
