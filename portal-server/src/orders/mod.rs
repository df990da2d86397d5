//! Purchase order core
//!
//! - [`status`] - the order status machine and vendor-side order updates
//! - [`ledger`] - read-only views over the action request ledger
//! - [`resolution`] - the only path that resolves an action request
//! - [`dashboard`] - the vendor dashboard aggregate

pub mod dashboard;
pub mod ledger;
pub mod resolution;
pub mod status;

pub use dashboard::DashboardSummary;
pub use status::OrderUpdate;
