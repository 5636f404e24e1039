//! Engine-internal error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// A single field-level validation failure, surfaced inline on the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors raised by the booking engine
///
/// Validation and availability errors stay local and never reach the
/// network; network errors carry the raw server message when available.
#[derive(Debug, Clone, Error)]
pub enum BookingError {
    #[error("reservation {0} not found")]
    ReservationNotFound(u64),

    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("no accommodation available for {guests} guest(s)")]
    NoAvailability { guests: u32 },

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("network error: {0}")]
    Network(String),
}

impl BookingError {
    /// Field-level errors when this is a validation failure
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            BookingError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl From<AppError> for BookingError {
    fn from(err: AppError) -> Self {
        BookingError::Network(err.message)
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match &err {
            BookingError::ReservationNotFound(id) => {
                AppError::with_message(ErrorCode::ReservationNotFound, err.to_string())
                    .with_detail("reservationId", *id)
            }
            BookingError::Validation(fields) => {
                let mut app = AppError::validation(err.to_string());
                for field in fields {
                    app = app.with_detail(field.field.clone(), field.message.clone());
                }
                app
            }
            BookingError::NoAvailability { .. } => AppError::no_availability(err.to_string()),
            BookingError::InvalidOperation(_) => AppError::invalid_request(err.to_string()),
            BookingError::Network(msg) => AppError::network(msg.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_carries_fields() {
        let err = BookingError::Validation(vec![
            FieldError::new("startDate", "start date must not be in the past"),
            FieldError::new("planId", "plan is required"),
        ]);
        assert_eq!(err.field_errors().len(), 2);
        assert_eq!(err.field_errors()[1].field, "planId");
    }

    #[test]
    fn test_conversion_to_app_error() {
        let err = BookingError::NoAvailability { guests: 4 };
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::NoAvailability);

        let err = BookingError::ReservationNotFound(12);
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::ReservationNotFound);
    }
}
