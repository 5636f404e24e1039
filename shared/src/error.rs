//! Unified error system for the reservation engine
//!
//! - [`ErrorCode`]: standardized error codes for all error types
//! - [`AppError`]: rich error type with codes, messages, and details
//! - [`AppResult`]: result alias used at the engine boundary
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Reservation errors
//! - 5xxx: Payment errors
//! - 9xxx: System/network errors

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Unified error code enum
///
/// Codes are represented as u16 values for efficient serialization and
/// cross-language compatibility with the web console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
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

    // ==================== 4xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 4001,
    /// No cabin or room matches the requested guest count and dates
    NoAvailability = 4002,
    /// Reservation status transition rejected by the backend
    StatusChangeFailed = 4003,
    /// Companion could not be attached to its reservation
    CompanionLinkFailed = 4004,

    // ==================== 5xxx: Payment ====================
    /// Payment amount is invalid
    InvalidPaymentAmount = 5001,
    /// Payment could not be recorded
    PaymentFailed = 5002,

    // ==================== 9xxx: System ====================
    /// Network or transport failure
    NetworkError = 9001,
    /// Internal error
    InternalError = 9002,
}

impl ErrorCode {
    /// Numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::NoAvailability => "No accommodation available",
            ErrorCode::StatusChangeFailed => "Status change rejected",
            ErrorCode::CompanionLinkFailed => "Companion could not be linked",
            ErrorCode::InvalidPaymentAmount => "Payment amount is invalid",
            ErrorCode::PaymentFailed => "Payment could not be recorded",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::InternalError => "Internal error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            4001 => Ok(ErrorCode::ReservationNotFound),
            4002 => Ok(ErrorCode::NoAvailability),
            4003 => Ok(ErrorCode::StatusChangeFailed),
            4004 => Ok(ErrorCode::CompanionLinkFailed),
            5001 => Ok(ErrorCode::InvalidPaymentAmount),
            5002 => Ok(ErrorCode::PaymentFailed),
            9001 => Ok(ErrorCode::NetworkError),
            9002 => Ok(ErrorCode::InternalError),
            _ => Err(format!("unknown error code: {}", value)),
        }
    }
}

/// Application error with structured error code and details
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a no-availability error
    pub fn no_availability(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NoAvailability, msg)
    }

    /// Create a network error, preserving the raw transport message
    pub fn network(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NetworkError, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_message() {
        let err = AppError::with_message(ErrorCode::ValidationFailed, "end date before start");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "end date before start");
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Missing required fields")
            .with_detail("field", "client_id")
            .with_detail("reason", "required");

        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "client_id");
        assert_eq!(details.get("reason").unwrap(), "required");
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::not_found("Reservation");
        assert_eq!(format!("{}", err), "Reservation not found");
    }

    #[test]
    fn test_error_code_roundtrip() {
        let code = ErrorCode::NoAvailability;
        let raw: u16 = code.into();
        assert_eq!(raw, 4002);
        assert_eq!(ErrorCode::try_from(raw).unwrap(), code);
        assert!(ErrorCode::try_from(65000u16).is_err());
    }
}
