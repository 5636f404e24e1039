//! In-memory implementation of [`LodgeApi`] for tests
//!
//! Backs every collection with a `DashMap` and issues sequential ids the
//! way the backend does. Failure switches ("fail the next …") let tests
//! exercise the partial-failure and rollback paths deterministically.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use shared::error::{AppError, AppResult};
use shared::models::{
    Cabin, Client, CompanionPayload, CreateReservationPayload, Payment, Plan, Reservation,
    ReservationStatus, Room, Service,
};

use super::LodgeApi;

/// In-memory reservation backend
#[derive(Debug, Default)]
pub struct MockApi {
    pub clients: Vec<Client>,
    pub plans: Vec<Plan>,
    pub cabins: Vec<Cabin>,
    pub rooms: Vec<Room>,
    pub services: Vec<Service>,

    reservations: DashMap<u64, Reservation>,
    companions: DashMap<u64, CompanionPayload>,
    companion_links: DashMap<u64, Vec<u64>>,
    payments: DashMap<u64, Vec<Payment>>,

    next_reservation_id: AtomicU64,
    next_companion_id: AtomicU64,
    next_payment_id: AtomicU64,

    // Failure switches (one-shot, consumed on use)
    fail_next_status_change: AtomicBool,
    fail_next_companion_link: AtomicBool,
    fail_next_payment: AtomicBool,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            next_reservation_id: AtomicU64::new(1),
            next_companion_id: AtomicU64::new(1),
            next_payment_id: AtomicU64::new(1),
            ..Self::default()
        }
    }

    /// Builder-style catalog seeding
    pub fn with_catalog(
        mut self,
        clients: Vec<Client>,
        plans: Vec<Plan>,
        cabins: Vec<Cabin>,
        rooms: Vec<Room>,
        services: Vec<Service>,
    ) -> Self {
        self.clients = clients;
        self.plans = plans;
        self.cabins = cabins;
        self.rooms = rooms;
        self.services = services;
        self
    }

    /// Make the next status-change call fail with a network error
    pub fn fail_next_status_change(&self) {
        self.fail_next_status_change.store(true, Ordering::SeqCst);
    }

    /// Make the next companion-link call fail with a network error
    pub fn fail_next_companion_link(&self) {
        self.fail_next_companion_link.store(true, Ordering::SeqCst);
    }

    /// Make the next add-payment call fail with a network error
    pub fn fail_next_payment(&self) {
        self.fail_next_payment.store(true, Ordering::SeqCst);
    }

    fn take(flag: &AtomicBool) -> bool {
        flag.swap(false, Ordering::SeqCst)
    }

    /// Stored reservation by id (test assertions)
    pub fn reservation(&self, id: u64) -> Option<Reservation> {
        self.reservations.get(&id).map(|r| r.clone())
    }

    /// Companion ids linked to a reservation (test assertions)
    pub fn linked_companions(&self, reservation_id: u64) -> Vec<u64> {
        self.companion_links
            .get(&reservation_id)
            .map(|l| l.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LodgeApi for MockApi {
    async fn list_clients(&self) -> AppResult<Vec<Client>> {
        Ok(self.clients.clone())
    }

    async fn list_plans(&self) -> AppResult<Vec<Plan>> {
        Ok(self.plans.clone())
    }

    async fn list_cabins(&self) -> AppResult<Vec<Cabin>> {
        Ok(self.cabins.clone())
    }

    async fn list_rooms(&self) -> AppResult<Vec<Room>> {
        Ok(self.rooms.clone())
    }

    async fn list_services(&self) -> AppResult<Vec<Service>> {
        Ok(self.services.clone())
    }

    async fn create_reservation(
        &self,
        payload: &CreateReservationPayload,
    ) -> AppResult<Reservation> {
        let id = self.next_reservation_id.fetch_add(1, Ordering::SeqCst);
        let reservation = Reservation {
            id: Some(id),
            client_id: payload.client_id,
            plan_id: payload.plan_id,
            start_date: payload.start_date,
            end_date: payload.end_date,
            status: payload.status,
            accommodation: match (payload.cabin_id, payload.room_id) {
                (Some(cabin), None) => shared::models::AccommodationRef::Cabin(cabin),
                (None, Some(room)) => shared::models::AccommodationRef::Room(room),
                _ => shared::models::AccommodationRef::None,
            },
            services: payload.services.clone(),
            companions: Vec::new(),
            total: payload.total,
            companion_count: payload.companions.len() as u32,
        };
        self.reservations.insert(id, reservation.clone());
        Ok(reservation)
    }

    async fn update_reservation(
        &self,
        id: u64,
        payload: &CreateReservationPayload,
    ) -> AppResult<Reservation> {
        let mut entry = self
            .reservations
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("reservation"))?;
        entry.client_id = payload.client_id;
        entry.plan_id = payload.plan_id;
        entry.start_date = payload.start_date;
        entry.end_date = payload.end_date;
        entry.status = payload.status;
        entry.services = payload.services.clone();
        entry.total = payload.total;
        Ok(entry.clone())
    }

    async fn change_reservation_status(
        &self,
        id: u64,
        status: ReservationStatus,
    ) -> AppResult<Reservation> {
        if Self::take(&self.fail_next_status_change) {
            return Err(AppError::network("connection reset by peer"));
        }
        let mut entry = self
            .reservations
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("reservation"))?;
        entry.status = status;
        Ok(entry.clone())
    }

    async fn list_reservations(&self) -> AppResult<Vec<Reservation>> {
        Ok(self.reservations.iter().map(|r| r.clone()).collect())
    }

    async fn create_companion(&self, companion: &CompanionPayload) -> AppResult<u64> {
        let id = self.next_companion_id.fetch_add(1, Ordering::SeqCst);
        self.companions.insert(id, companion.clone());
        Ok(id)
    }

    async fn link_companion_to_reservation(
        &self,
        reservation_id: u64,
        companion_id: u64,
    ) -> AppResult<()> {
        if Self::take(&self.fail_next_companion_link) {
            return Err(AppError::network("connection reset by peer"));
        }
        if !self.reservations.contains_key(&reservation_id) {
            return Err(AppError::not_found("reservation"));
        }
        self.companion_links
            .entry(reservation_id)
            .or_default()
            .push(companion_id);
        Ok(())
    }

    async fn delete_companion_from_reservation(
        &self,
        reservation_id: u64,
        companion_id: u64,
    ) -> AppResult<()> {
        match self.companion_links.get_mut(&reservation_id) {
            Some(mut links) => {
                links.retain(|id| *id != companion_id);
                Ok(())
            }
            None => Err(AppError::not_found("reservation")),
        }
    }

    async fn add_payment_to_reservation(
        &self,
        reservation_id: u64,
        payment: &Payment,
    ) -> AppResult<Payment> {
        if Self::take(&self.fail_next_payment) {
            return Err(AppError::network("connection reset by peer"));
        }
        if !self.reservations.contains_key(&reservation_id) {
            return Err(AppError::not_found("reservation"));
        }
        let mut stored = payment.clone();
        stored.id = Some(self.next_payment_id.fetch_add(1, Ordering::SeqCst));
        self.payments
            .entry(reservation_id)
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn list_payments_for_reservation(&self, reservation_id: u64) -> AppResult<Vec<Payment>> {
        Ok(self
            .payments
            .get(&reservation_id)
            .map(|p| p.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn payload() -> CreateReservationPayload {
        CreateReservationPayload {
            client_id: 1,
            plan_id: 1,
            cabin_id: Some(2),
            room_id: None,
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
            status: ReservationStatus::Pendiente,
            total: 400.0,
            services: Vec::new(),
            companions: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_create_reservation_issues_sequential_ids() {
        let api = MockApi::new();
        let first = api.create_reservation(&payload()).await.unwrap();
        let second = api.create_reservation(&payload()).await.unwrap();
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn test_failure_switch_is_one_shot() {
        let api = MockApi::new();
        let created = api.create_reservation(&payload()).await.unwrap();
        let id = created.id.unwrap();

        api.fail_next_status_change();
        assert!(
            api.change_reservation_status(id, ReservationStatus::Confirmado)
                .await
                .is_err()
        );
        // Switch consumed, second attempt succeeds
        let updated = api
            .change_reservation_status(id, ReservationStatus::Confirmado)
            .await
            .unwrap();
        assert_eq!(updated.status, ReservationStatus::Confirmado);
    }

    #[tokio::test]
    async fn test_link_requires_existing_reservation() {
        let api = MockApi::new();
        assert!(api.link_companion_to_reservation(99, 1).await.is_err());
    }
}
