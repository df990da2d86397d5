//! Vendor performance metric snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point-in-time performance snapshot for a vendor
///
/// Snapshots are recorded by the admin side; the portal only reads them.
/// The "latest" metric for a vendor is the snapshot with the greatest
/// `recorded_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceMetric {
    pub id: String,
    pub vendor_id: String,
    /// Fraction of orders delivered on time, 0.0..=1.0
    pub on_time_delivery_rate: f64,
    /// Aggregate quality score, 0.0..=100.0
    pub quality_score: f64,
    pub recorded_at: DateTime<Utc>,
}
