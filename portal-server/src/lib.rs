//! Vendor Supply Portal - backend for vendor-side purchase order fulfillment
//!
//! # Module structure
//!
//! ```text
//! portal-server/src/
//! ├── core/          # Config, server state, server loop
//! ├── auth/          # JWT validation, vendor context extractor
//! ├── store/         # redb-backed persistence
//! ├── orders/        # Status machine, action ledger, resolution, dashboard
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # Logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod orders;
pub mod store;
pub mod utils;

// Re-export public types
pub use auth::{JwtService, VendorContext};
pub use core::{Config, Server, ServerState};
pub use store::PortalStore;

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
