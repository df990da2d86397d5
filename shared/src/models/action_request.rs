//! Admin-initiated action requests against a purchase order

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the admin side is asking the vendor to accept
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    /// Change order details (applied manually after approval)
    Update,
    /// Cancel the order; approval force-cancels the owning order
    Cancel,
    /// Return delivered goods (applied manually after approval)
    Return,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Update => "UPDATE",
            ActionType::Cancel => "CANCEL",
            ActionType::Return => "RETURN",
        }
    }
}

/// Resolution state of an action request
///
/// A request leaves PENDING exactly once and is immutable afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Approved => "APPROVED",
            RequestStatus::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The vendor's verdict on a pending request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionDecision {
    Approve,
    Reject,
}

/// An admin-initiated request that the vendor must approve or reject
///
/// Created externally in PENDING state; resolved exactly once through the
/// resolution coordinator; never deleted. The resolution fields
/// (`resolved_at`, `resolved_by`, `vendor_response`) are all `None` while
/// PENDING and all populated once resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderActionRequest {
    pub id: String,
    pub purchase_order_id: String,
    pub vendor_id: String,
    pub action_type: ActionType,
    /// Admin-authored free text explaining the request
    pub message: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_response: Option<String>,
}

impl OrderActionRequest {
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}
