//! External collaborator interface
//!
//! The engine consumes the REST backend exclusively through [`LodgeApi`];
//! [`http::HttpApi`] is the production implementation and [`mock::MockApi`]
//! the in-memory test double.

use async_trait::async_trait;
use shared::error::AppResult;
use shared::models::{
    Cabin, Client, CompanionPayload, CreateReservationPayload, Payment, Plan, Reservation,
    ReservationStatus, Room, Service,
};

pub mod http;
pub mod mock;

pub use http::HttpApi;
pub use mock::MockApi;

/// Request/response contract with the reservation backend
///
/// Calls within one wizard session are never issued concurrently with each
/// other except for catalog prefetch; the submission sequence (reservation
/// then companions then payments) is strictly ordered so child records can
/// reference the newly-issued reservation id.
#[async_trait]
pub trait LodgeApi: Send + Sync {
    // ==================== Catalogs ====================
    async fn list_clients(&self) -> AppResult<Vec<Client>>;
    async fn list_plans(&self) -> AppResult<Vec<Plan>>;
    async fn list_cabins(&self) -> AppResult<Vec<Cabin>>;
    async fn list_rooms(&self) -> AppResult<Vec<Room>>;
    async fn list_services(&self) -> AppResult<Vec<Service>>;

    // ==================== Reservations ====================
    async fn create_reservation(
        &self,
        payload: &CreateReservationPayload,
    ) -> AppResult<Reservation>;
    async fn update_reservation(
        &self,
        id: u64,
        payload: &CreateReservationPayload,
    ) -> AppResult<Reservation>;
    async fn change_reservation_status(
        &self,
        id: u64,
        status: ReservationStatus,
    ) -> AppResult<Reservation>;
    async fn list_reservations(&self) -> AppResult<Vec<Reservation>>;

    // ==================== Companions ====================
    async fn create_companion(&self, companion: &CompanionPayload) -> AppResult<u64>;
    async fn link_companion_to_reservation(
        &self,
        reservation_id: u64,
        companion_id: u64,
    ) -> AppResult<()>;
    async fn delete_companion_from_reservation(
        &self,
        reservation_id: u64,
        companion_id: u64,
    ) -> AppResult<()>;

    // ==================== Payments ====================
    async fn add_payment_to_reservation(
        &self,
        reservation_id: u64,
        payment: &Payment,
    ) -> AppResult<Payment>;
    async fn list_payments_for_reservation(&self, reservation_id: u64) -> AppResult<Vec<Payment>>;
}
