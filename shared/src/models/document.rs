//! Vendor compliance documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document the vendor has uploaded for compliance review
///
/// The portal only counts these for the dashboard; upload and verification
/// happen elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VendorDocument {
    pub id: String,
    pub vendor_id: String,
    pub name: String,
    pub verified: bool,
    pub uploaded_at: DateTime<Utc>,
}
