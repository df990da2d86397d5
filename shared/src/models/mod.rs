//! Domain models shared between the server and its clients

pub mod action_request;
pub mod document;
pub mod performance;
pub mod purchase_order;
pub mod vendor;

pub use action_request::{ActionType, OrderActionRequest, RequestStatus, ResolutionDecision};
pub use document::VendorDocument;
pub use performance::PerformanceMetric;
pub use purchase_order::{OrderStatus, PurchaseOrder, PurchaseOrderItem};
pub use vendor::{Vendor, VendorStatus};
