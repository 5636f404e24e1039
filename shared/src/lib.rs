//! Shared types for the lodging reservation engine
//!
//! Domain models (reservations, companions, accommodation, plans, services,
//! payments), the reservation status enum and the unified error types used
//! across the workspace crates.

pub mod error;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use models::reservation::{Reservation, ReservationStatus};
