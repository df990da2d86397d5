//! Vendor dashboard aggregate
//!
//! A pure fold over the vendor's orders, pending actions, metric history and
//! documents. Empty inputs produce a zeroed summary, never an error.

use serde::Serialize;

use crate::orders::ledger;
use crate::store::PortalStore;
use shared::models::{
    OrderStatus, PerformanceMetric, PurchaseOrder, Vendor, VendorDocument,
};
use shared::AppResult;

/// How many orders the recent-orders panel shows
const RECENT_ORDERS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_orders: usize,
    pub pending_orders: usize,
    pub shipped_orders: usize,
    pub delivered_orders: usize,
    pub pending_actions: usize,
    /// From the latest recorded metric; 0.0 when no metric exists yet
    pub on_time_delivery_rate: f64,
    pub quality_score: f64,
    pub total_documents: usize,
    pub verified_documents: usize,
    /// Last 5 orders by order_date, newest first
    pub recent_orders: Vec<PurchaseOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<Vendor>,
}

/// Fold the vendor's records into a summary
pub fn summarize(
    orders: &[PurchaseOrder],
    pending_actions: usize,
    latest_metric: Option<&PerformanceMetric>,
    documents: &[VendorDocument],
    vendor: Option<Vendor>,
) -> DashboardSummary {
    let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();

    let mut recent: Vec<PurchaseOrder> = orders.to_vec();
    recent.sort_by(|a, b| b.order_date.cmp(&a.order_date));
    recent.truncate(RECENT_ORDERS);

    DashboardSummary {
        total_orders: orders.len(),
        pending_orders: count(OrderStatus::Pending),
        shipped_orders: count(OrderStatus::Shipped),
        delivered_orders: count(OrderStatus::Delivered),
        pending_actions,
        on_time_delivery_rate: latest_metric.map(|m| m.on_time_delivery_rate).unwrap_or(0.0),
        quality_score: latest_metric.map(|m| m.quality_score).unwrap_or(0.0),
        total_documents: documents.len(),
        verified_documents: documents.iter().filter(|d| d.verified).count(),
        recent_orders: recent,
        vendor,
    }
}

/// Load everything the dashboard needs and fold it
pub fn aggregate(store: &PortalStore, vendor_id: &str) -> AppResult<DashboardSummary> {
    let orders = store.get_orders_for_vendor(vendor_id)?;
    let pending = ledger::list_pending(store, vendor_id)?;
    let latest_metric = store.get_latest_metric(vendor_id)?;
    let documents = store.get_documents_for_vendor(vendor_id)?;
    let vendor = store.get_vendor(vendor_id)?;

    Ok(summarize(
        &orders,
        pending.len(),
        latest_metric.as_ref(),
        &documents,
        vendor,
    ))
}
