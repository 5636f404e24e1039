//! Booking and availability engine for a lodging operation
//!
//! Drives the reservation lifecycle end to end: catalog prefetch, the
//! four-step creation wizard (basic info, companions, availability,
//! payment), pricing, the companion ledger, status transitions and the
//! searchable reservation table. Persistence lives behind the [`api::LodgeApi`]
//! trait; [`api::MockApi`] backs the test suites.

pub mod api;
pub mod availability;
pub mod catalog;
pub mod companions;
pub mod core;
pub mod notify;
pub mod pricing;
pub mod query;
pub mod status;
pub mod utils;
pub mod wizard;

pub use crate::core::config::EngineConfig;
pub use crate::core::error::{BookingError, FieldError};
