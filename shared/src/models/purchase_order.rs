//! Purchase order and line item models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Purchase order lifecycle status
///
/// The normal path is a strict forward chain:
/// PENDING → CONFIRMED → SHIPPED → DELIVERED.
///
/// CANCELLED is terminal and is reachable only through an approved CANCEL
/// action request, never through the vendor's normal edit path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Issued by the buyer, awaiting vendor confirmation
    #[default]
    Pending,
    /// Vendor has confirmed the order
    Confirmed,
    /// Goods are in transit
    Shipped,
    /// Goods arrived; actual_delivery_date is stamped on this transition
    Delivered,
    /// Cancelled via an approved CANCEL action request
    Cancelled,
}

impl OrderStatus {
    /// The single legal next status on the forward chain, if any
    pub fn allowed_next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Terminal statuses admit no further mutation
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The target set a caller may choose from: `{current} ∪ allowed_next`
    ///
    /// Never the full enum, so a client cannot even offer an illegal choice.
    pub fn selectable(&self) -> Vec<OrderStatus> {
        let mut options = vec![*self];
        if let Some(next) = self.allowed_next() {
            options.push(next);
        }
        options
    }

    /// Wire name (matches the serde representation)
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A purchase order issued by the buyer organization to a vendor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseOrder {
    /// Opaque unique id
    pub id: String,
    /// Owning vendor
    pub vendor_id: String,
    /// Receiving plant
    pub plant_id: String,
    /// When the order was issued
    pub order_date: DateTime<Utc>,
    /// Vendor-maintained delivery estimate
    pub expected_delivery_date: DateTime<Utc>,
    /// Stamped once, by the first transition into DELIVERED
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_delivery_date: Option<DateTime<Utc>>,
    /// Current lifecycle status
    pub status: OrderStatus,
}

/// Immutable line item of a purchase order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseOrderItem {
    pub id: String,
    pub purchase_order_id: String,
    pub product_id: String,
    pub quantity: i32,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_chain() {
        assert_eq!(
            OrderStatus::Pending.allowed_next(),
            Some(OrderStatus::Confirmed)
        );
        assert_eq!(
            OrderStatus::Confirmed.allowed_next(),
            Some(OrderStatus::Shipped)
        );
        assert_eq!(
            OrderStatus::Shipped.allowed_next(),
            Some(OrderStatus::Delivered)
        );
        assert_eq!(OrderStatus::Delivered.allowed_next(), None);
        assert_eq!(OrderStatus::Cancelled.allowed_next(), None);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Confirmed.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_selectable_never_full_enum() {
        assert_eq!(
            OrderStatus::Pending.selectable(),
            vec![OrderStatus::Pending, OrderStatus::Confirmed]
        );
        assert_eq!(
            OrderStatus::Shipped.selectable(),
            vec![OrderStatus::Shipped, OrderStatus::Delivered]
        );
        // Terminal statuses offer only themselves
        assert_eq!(
            OrderStatus::Delivered.selectable(),
            vec![OrderStatus::Delivered]
        );
        assert_eq!(
            OrderStatus::Cancelled.selectable(),
            vec![OrderStatus::Cancelled]
        );
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&OrderStatus::Shipped).unwrap();
        assert_eq!(json, "\"SHIPPED\"");

        let status: OrderStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
    }
}
