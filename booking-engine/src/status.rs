//! Reservation status lifecycle
//!
//! Transitions are optimistic: the in-memory reservation is flipped first so
//! the table reflects the change immediately, then the backend is told. On
//! failure the previous status is restored. The backend accepts any
//! transition; `Anulado` is terminal only by convention, so entering it
//! raises a warning through the [`NotificationSink`] rather than being
//! blocked here.

use shared::models::{Reservation, ReservationStatus};

use crate::api::LodgeApi;
use crate::core::error::BookingError;
use crate::notify::NotificationSink;

/// One optimistic status mutation, revertible until the backend confirms
#[derive(Debug, Clone, Copy)]
pub struct StatusChange {
    previous: ReservationStatus,
    next: ReservationStatus,
}

impl StatusChange {
    pub fn new(previous: ReservationStatus, next: ReservationStatus) -> Self {
        Self { previous, next }
    }

    pub fn apply(&self, reservation: &mut Reservation) {
        reservation.status = self.next;
    }

    pub fn rollback(&self, reservation: &mut Reservation) {
        reservation.status = self.previous;
    }
}

/// Change a persisted reservation's status.
///
/// No-op when the status already matches. The reservation keeps its new
/// status only if the backend call succeeds; otherwise it is rolled back and
/// the error is surfaced.
pub async fn change_status(
    api: &dyn LodgeApi,
    reservation: &mut Reservation,
    next: ReservationStatus,
    notifier: &dyn NotificationSink,
) -> Result<(), BookingError> {
    let Some(id) = reservation.id else {
        return Err(BookingError::InvalidOperation(
            "cannot change the status of an unsaved reservation".to_string(),
        ));
    };
    if reservation.status == next {
        return Ok(());
    }

    if next == ReservationStatus::Anulado {
        notifier.warn(&format!(
            "reservation {id} is being voided; voided reservations are excluded from search"
        ));
    }

    let change = StatusChange::new(reservation.status, next);
    change.apply(reservation);

    match api.change_reservation_status(id, next).await {
        Ok(updated) => {
            // Backend wins in case it normalized the status
            reservation.status = updated.status;
            tracing::info!(reservation_id = id, status = %next, "reservation status changed");
            Ok(())
        }
        Err(err) => {
            change.rollback(reservation);
            tracing::warn!(
                reservation_id = id,
                status = %next,
                error = %err,
                "status change failed, reverted"
            );
            Err(err.into())
        }
    }
}
