//! Core configuration and error types

pub mod config;
pub mod error;

pub use config::EngineConfig;
pub use error::{BookingError, FieldError};
