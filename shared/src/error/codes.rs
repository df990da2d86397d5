//! Unified error codes for the vendor portal
//!
//! Error codes are shared between portal-server and its clients and are
//! organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Purchase order errors
//! - 5xxx: Action request errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Vendor acting on an order or request it does not own
    AccessDenied = 2001,

    // ==================== 4xxx: Purchase Order ====================
    /// Purchase order not found
    OrderNotFound = 4001,
    /// Illegal status move attempted (skip, revert, or CANCELLED via edit)
    InvalidTransition = 4002,
    /// Order is DELIVERED or CANCELLED and can no longer be modified
    OrderFinalized = 4003,
    /// Order item not found
    OrderItemNotFound = 4004,

    // ==================== 5xxx: Action Request ====================
    /// Action request not found
    ActionNotFound = 5001,
    /// Resolving a request that is no longer PENDING
    AlreadyResolved = 5002,
    /// Rejection without a non-empty reason
    MissingReason = 5003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Storage error (data file damaged, serialization failure)
    StorageError = 9002,
    /// Storage temporarily unavailable (IO fault, retry later)
    StorageUnavailable = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Token has expired",
            ErrorCode::TokenInvalid => "Token is invalid",

            // Permission
            ErrorCode::AccessDenied => "You do not have access to this resource",

            // Purchase order
            ErrorCode::OrderNotFound => "Purchase order not found",
            ErrorCode::InvalidTransition => "Illegal order status transition",
            ErrorCode::OrderFinalized => "Order is finalized and cannot be modified",
            ErrorCode::OrderItemNotFound => "Order item not found",

            // Action request
            ErrorCode::ActionNotFound => "Action request not found",
            ErrorCode::AlreadyResolved => "Action request has already been resolved",
            ErrorCode::MissingReason => "A reason is required to reject an action request",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StorageError => "Storage error",
            ErrorCode::StorageUnavailable => "Storage temporarily unavailable",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.message())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code.code()
    }
}

/// Error returned when converting an unknown u16 to [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            7 => ErrorCode::RequiredField,
            1001 => ErrorCode::NotAuthenticated,
            1002 => ErrorCode::InvalidCredentials,
            1003 => ErrorCode::TokenExpired,
            1004 => ErrorCode::TokenInvalid,
            2001 => ErrorCode::AccessDenied,
            4001 => ErrorCode::OrderNotFound,
            4002 => ErrorCode::InvalidTransition,
            4003 => ErrorCode::OrderFinalized,
            4004 => ErrorCode::OrderItemNotFound,
            5001 => ErrorCode::ActionNotFound,
            5002 => ErrorCode::AlreadyResolved,
            5003 => ErrorCode::MissingReason,
            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::StorageError,
            9003 => ErrorCode::StorageUnavailable,
            9004 => ErrorCode::TimeoutError,
            9005 => ErrorCode::ConfigError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::AccessDenied.code(), 2001);
        assert_eq!(ErrorCode::InvalidTransition.code(), 4002);
        assert_eq!(ErrorCode::AlreadyResolved.code(), 5002);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_round_trip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::NotAuthenticated,
            ErrorCode::AccessDenied,
            ErrorCode::OrderNotFound,
            ErrorCode::InvalidTransition,
            ErrorCode::OrderFinalized,
            ErrorCode::ActionNotFound,
            ErrorCode::AlreadyResolved,
            ErrorCode::MissingReason,
            ErrorCode::StorageUnavailable,
        ] {
            let value: u16 = code.into();
            assert_eq!(ErrorCode::try_from(value).unwrap(), code);
        }
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(ErrorCode::try_from(65535), Err(InvalidErrorCode(65535)));
    }

    #[test]
    fn test_serde_as_u16() {
        let json = serde_json::to_string(&ErrorCode::AlreadyResolved).unwrap();
        assert_eq!(json, "5002");

        let code: ErrorCode = serde_json::from_str("4002").unwrap();
        assert_eq!(code, ErrorCode::InvalidTransition);
    }
}
