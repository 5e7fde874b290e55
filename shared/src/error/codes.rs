//! Unified error codes for the bookstore platform
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 6xxx: Catalog errors
//! - 7xxx: Review errors
//! - 8xxx: Account errors
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

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Email address is already registered
    EmailAlreadyRegistered = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Staff role required
    StaffRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has already been completed
    OrderAlreadyCompleted = 4002,
    /// Order has already been cancelled
    OrderAlreadyCancelled = 4003,
    /// Cart is empty
    EmptyCart = 4004,
    /// Not enough stock to fulfil the order
    InsufficientStock = 4005,
    /// No pending order matches the claim code
    ClaimCodeNotFound = 4006,
    /// Cart entry not found
    CartEntryNotFound = 4007,

    // ==================== 6xxx: Catalog ====================
    /// Book not found
    BookNotFound = 6001,
    /// Book ISBN already exists
    IsbnExists = 6002,
    /// Book is referenced by order history and cannot be deleted
    BookInOrderHistory = 6003,
    /// Bookmark not found
    BookmarkNotFound = 6101,
    /// Announcement not found
    AnnouncementNotFound = 6201,

    // ==================== 7xxx: Review ====================
    /// User has no completed order containing this book
    ReviewNotEligible = 7001,
    /// Review not found
    ReviewNotFound = 7002,
    /// Rating must be between 1 and 5
    InvalidRating = 7003,

    // ==================== 8xxx: Account ====================
    /// User not found
    UserNotFound = 8001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",

            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid email or password",
            Self::TokenExpired => "Token has expired",
            Self::TokenInvalid => "Token is invalid",
            Self::EmailAlreadyRegistered => "Email address is already registered",

            Self::PermissionDenied => "Permission denied",
            Self::StaffRequired => "Staff role required",
            Self::AdminRequired => "Admin role required",

            Self::OrderNotFound => "Order not found",
            Self::OrderAlreadyCompleted => "Order has already been completed",
            Self::OrderAlreadyCancelled => "Order has already been cancelled",
            Self::EmptyCart => "Cart is empty",
            Self::InsufficientStock => "Not enough stock to fulfil the order",
            Self::ClaimCodeNotFound => "No pending order matches the claim code",
            Self::CartEntryNotFound => "Cart entry not found",

            Self::BookNotFound => "Book not found",
            Self::IsbnExists => "A book with this ISBN already exists",
            Self::BookInOrderHistory => "Book is referenced by order history",
            Self::BookmarkNotFound => "Bookmark not found",
            Self::AnnouncementNotFound => "Announcement not found",

            Self::ReviewNotEligible => "A completed order containing this book is required",
            Self::ReviewNotFound => "Review not found",
            Self::InvalidRating => "Rating must be between 1 and 5",

            Self::UserNotFound => "User not found",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when deserializing an unknown error code value
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            1005 => Self::EmailAlreadyRegistered,

            2001 => Self::PermissionDenied,
            2002 => Self::StaffRequired,
            2003 => Self::AdminRequired,

            4001 => Self::OrderNotFound,
            4002 => Self::OrderAlreadyCompleted,
            4003 => Self::OrderAlreadyCancelled,
            4004 => Self::EmptyCart,
            4005 => Self::InsufficientStock,
            4006 => Self::ClaimCodeNotFound,
            4007 => Self::CartEntryNotFound,

            6001 => Self::BookNotFound,
            6002 => Self::IsbnExists,
            6003 => Self::BookInOrderHistory,
            6101 => Self::BookmarkNotFound,
            6201 => Self::AnnouncementNotFound,

            7001 => Self::ReviewNotEligible,
            7002 => Self::ReviewNotFound,
            7003 => Self::InvalidRating,

            8001 => Self::UserNotFound,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::InsufficientStock,
            ErrorCode::ClaimCodeNotFound,
            ErrorCode::ReviewNotEligible,
            ErrorCode::DatabaseError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()).unwrap(), code);
        }
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(ErrorCode::try_from(4999).is_err());
    }
}
