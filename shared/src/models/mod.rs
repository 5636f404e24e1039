//! Domain models for the lodging reservation console
//!
//! These mirror the resources exposed by the REST backend. Wire-facing
//! structs serialize with camelCase field names to match the API contract.

pub mod accommodation;
pub mod client;
pub mod companion;
pub mod payment;
pub mod plan;
pub mod reservation;
pub mod service;

pub use accommodation::{Cabin, Room, UnitStatus};
pub use client::Client;
pub use companion::{Companion, DocumentType};
pub use payment::{Payment, PaymentStatus};
pub use plan::Plan;
pub use reservation::{
    AccommodationRef, CompanionPayload, CreateReservationPayload, Reservation, ReservationStatus,
    SelectedService,
};
pub use service::Service;
