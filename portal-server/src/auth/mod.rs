//! Authentication module
//!
//! Token *issuance* lives on the identity side; this server only validates
//! bearer tokens and derives the vendor context from them.
//!
//! - [`JwtService`] - token validation
//! - [`VendorContext`] - authenticated vendor, extracted per request

pub mod extractor;
pub mod jwt;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService, VendorContext};
