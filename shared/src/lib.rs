//! Shared types for the vendor supply portal
//!
//! This crate holds everything the server and any future client agree on:
//!
//! - **models**: purchase orders, order items, action requests, vendor
//!   master data, performance metrics, documents
//! - **error**: unified error codes, [`AppError`] and the [`ApiResponse`]
//!   envelope used by every API endpoint

pub mod error;
pub mod models;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{
    ActionType, OrderActionRequest, OrderStatus, PurchaseOrder, PurchaseOrderItem, RequestStatus,
    ResolutionDecision,
};
