//! Vendor master data (read-only from the portal core's perspective)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Vendor account status, managed by the admin side
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VendorStatus {
    #[default]
    Pending,
    Approved,
    Suspended,
    Inactive,
}

/// A supplier organization fulfilling purchase orders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub status: VendorStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    pub created_at: DateTime<Utc>,
}
