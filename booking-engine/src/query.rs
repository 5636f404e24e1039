//! Reservation table: enrichment, search, pagination
//!
//! Rows are reservations joined with the client and plan display names from
//! the catalog snapshot, so the free-text search can match what the operator
//! actually sees on screen rather than raw foreign keys.

use shared::models::{Payment, Reservation, ReservationStatus};

use crate::api::LodgeApi;
use crate::catalog::CatalogSnapshot;
use crate::core::error::BookingError;

/// A reservation with its display columns resolved
#[derive(Debug, Clone)]
pub struct ReservationRow {
    pub reservation: Reservation,
    pub client_name: String,
    pub plan_name: String,
}

impl ReservationRow {
    /// Case-insensitive match across every visible column, including
    /// companion names and documents
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        if term.is_empty() {
            return true;
        }

        let r = &self.reservation;
        let id = r.id.map(|id| id.to_string()).unwrap_or_default();

        id.contains(&term)
            || self.client_name.to_lowercase().contains(&term)
            || self.plan_name.to_lowercase().contains(&term)
            || r.start_date.format("%Y-%m-%d").to_string().contains(&term)
            || r.end_date.format("%Y-%m-%d").to_string().contains(&term)
            || r.status.label().to_lowercase().contains(&term)
            || r.total.to_string().contains(&term)
            || r.companions.iter().any(|c| {
                c.name.to_lowercase().contains(&term)
                    || c.last_name
                        .as_ref()
                        .is_some_and(|last| last.to_lowercase().contains(&term))
                    || c.document_number.to_lowercase().contains(&term)
            })
    }
}

/// Join reservations with catalog display names. Unknown ids keep an empty
/// name rather than dropping the row; the reservation is still real.
pub fn enrich(reservations: Vec<Reservation>, catalog: &CatalogSnapshot) -> Vec<ReservationRow> {
    reservations
        .into_iter()
        .map(|reservation| {
            let client_name = catalog
                .client(reservation.client_id)
                .map(|c| c.display_name())
                .unwrap_or_default();
            let plan_name = catalog
                .plan(reservation.plan_id)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            ReservationRow {
                reservation,
                client_name,
                plan_name,
            }
        })
        .collect()
}

/// Stateful view over the reservation table: term, voided filter, sort
/// direction and offset pagination
#[derive(Debug, Clone)]
pub struct ReservationQuery {
    rows: Vec<ReservationRow>,
    term: String,
    include_voided: bool,
    ascending: bool,
    page: usize,
    page_size: usize,
}

impl ReservationQuery {
    pub fn new(rows: Vec<ReservationRow>, page_size: usize) -> Self {
        Self {
            rows,
            term: String::new(),
            include_voided: false,
            ascending: false,
            page: 0,
            page_size: page_size.max(1),
        }
    }

    /// Replace the search term; the page resets so results are never hidden
    /// behind a stale offset
    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
        self.page = 0;
    }

    pub fn set_include_voided(&mut self, include_voided: bool) {
        self.include_voided = include_voided;
        self.page = 0;
    }

    pub fn set_ascending(&mut self, ascending: bool) {
        self.ascending = ascending;
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn next_page(&mut self) {
        if self.page + 1 < self.page_count() {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// All rows passing the term and voided filters, sorted by start date
    /// (descending unless configured otherwise)
    pub fn filtered(&self) -> Vec<&ReservationRow> {
        let mut rows: Vec<&ReservationRow> = self
            .rows
            .iter()
            .filter(|row| self.include_voided || !row.reservation.status.is_voided())
            .filter(|row| row.matches(&self.term))
            .collect();

        rows.sort_by(|a, b| {
            let ord = a.reservation.start_date.cmp(&b.reservation.start_date);
            if self.ascending { ord } else { ord.reverse() }
        });
        rows
    }

    pub fn total_matches(&self) -> usize {
        self.filtered().len()
    }

    pub fn page_count(&self) -> usize {
        self.total_matches().div_ceil(self.page_size)
    }

    /// The current page of rows
    pub fn page_rows(&self) -> Vec<&ReservationRow> {
        self.filtered()
            .into_iter()
            .skip(self.page * self.page_size)
            .take(self.page_size)
            .collect()
    }
}

// ==================== Detail-view operations ====================

/// Payments recorded against a reservation
pub async fn load_payments(
    api: &dyn LodgeApi,
    reservation_id: u64,
) -> Result<Vec<Payment>, BookingError> {
    Ok(api.list_payments_for_reservation(reservation_id).await?)
}

/// Remove a companion from a persisted reservation, keeping the local copy
/// in step with the backend
pub async fn detach_companion(
    api: &dyn LodgeApi,
    reservation: &mut Reservation,
    companion_id: u64,
) -> Result<(), BookingError> {
    let Some(reservation_id) = reservation.id else {
        return Err(BookingError::InvalidOperation(
            "cannot detach a companion from an unsaved reservation".to_string(),
        ));
    };

    api.delete_companion_from_reservation(reservation_id, companion_id)
        .await?;
    reservation
        .companions
        .retain(|c| c.id != Some(companion_id));
    reservation.companion_count = reservation.companion_count.saturating_sub(1);
    tracing::info!(reservation_id, companion_id, "companion detached");
    Ok(())
}

/// Convenience wrapper: fetch, enrich and wrap in a query
pub async fn search(
    api: &dyn LodgeApi,
    catalog: &CatalogSnapshot,
    page_size: usize,
) -> Result<ReservationQuery, BookingError> {
    let reservations = api.list_reservations().await?;
    Ok(ReservationQuery::new(
        enrich(reservations, catalog),
        page_size,
    ))
}
