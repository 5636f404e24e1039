//! Wizard submission
//!
//! `sanitize` re-runs every step validator over the final state and builds
//! the wire payload; `submit` creates the reservation first, then flushes
//! companions and payments one request at a time. The reservation itself is
//! the transaction boundary: once it exists, a failing sub-record is logged
//! and reported but never rolls the reservation back.

use chrono::NaiveDate;
use shared::models::{
    AccommodationRef, CompanionPayload, CreateReservationPayload, ReservationStatus,
};

use crate::api::LodgeApi;
use crate::core::error::{BookingError, FieldError};

use super::{validate, ReservationWizard};

/// Outcome of a submission. The reservation was created even when some
/// sub-records failed; callers surface the partial failures to the operator.
#[derive(Debug, Clone)]
pub struct SubmissionReport {
    pub reservation_id: u64,
    /// Document numbers of companions that could not be saved or linked
    pub failed_companions: Vec<String>,
    /// Amounts of payments that could not be recorded
    pub failed_payments: Vec<f64>,
}

impl SubmissionReport {
    fn new(reservation_id: u64) -> Self {
        Self {
            reservation_id,
            failed_companions: Vec::new(),
            failed_payments: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed_companions.is_empty() && self.failed_payments.is_empty()
    }
}

impl ReservationWizard {
    /// Re-validate the whole form and produce the wire payload.
    ///
    /// The declared companion count is reconciled to the actual ledger
    /// length here, so the backend never sees a count that disagrees with
    /// the companion list.
    pub fn sanitize(&self, today: NaiveDate) -> Result<CreateReservationPayload, BookingError> {
        // 1. Every step validator runs again over the final state
        let mut errors =
            validate::validate_basic_info(&self.basic, self.config().max_companions, today);
        if self.basic.has_companions {
            errors.extend(validate::validate_companions(&self.ledger));
        }
        if self.availability.selection.is_none() {
            errors.push(FieldError::new(
                "accommodation",
                "select a cabin or room before submitting",
            ));
        }
        errors.extend(validate::validate_payment_step(
            &self.payment.payments,
            self.config().require_payment_on_submit,
        ));
        if !errors.is_empty() {
            return Err(BookingError::Validation(errors));
        }

        // 2. The selection enum guarantees cabin and room are exclusive
        let (cabin_id, room_id) = match self.availability.selection {
            AccommodationRef::Cabin(id) => (Some(id), None),
            AccommodationRef::Room(id) => (None, Some(id)),
            AccommodationRef::None => unreachable!("checked above"),
        };

        let companions: Vec<CompanionPayload> =
            self.ledger.list().iter().map(CompanionPayload::from).collect();

        Ok(CreateReservationPayload {
            client_id: self.basic.client_id.unwrap_or_default(),
            plan_id: self.basic.plan_id.unwrap_or_default(),
            cabin_id,
            room_id,
            start_date: self.basic.start_date.unwrap_or(today),
            end_date: self.basic.end_date.unwrap_or(today),
            status: ReservationStatus::Pendiente,
            total: self.total(),
            services: self.availability.services.clone(),
            companions,
        })
    }

    /// Create the reservation, then flush companions and payments.
    ///
    /// Sub-records are sent strictly in sequence; the cancellation token is
    /// consulted between requests, never mid-flight. Anything skipped after
    /// a cancellation is reported as failed.
    pub async fn submit(
        &self,
        api: &dyn LodgeApi,
        today: NaiveDate,
    ) -> Result<SubmissionReport, BookingError> {
        let payload = self.sanitize(today)?;

        // 1. The reservation itself; any failure here aborts the submission
        let created = api.create_reservation(&payload).await?;
        let reservation_id = created.id.ok_or_else(|| {
            BookingError::InvalidOperation("backend returned a reservation without an id".to_string())
        })?;
        tracing::info!(
            session_id = %self.session_id,
            reservation_id,
            total = payload.total,
            "reservation created"
        );

        let mut report = SubmissionReport::new(reservation_id);

        // 2. Companions, one by one: create the record, then link it
        for companion in self.ledger.list() {
            if self.cancel_token().is_cancelled() {
                tracing::warn!(
                    session_id = %self.session_id,
                    reservation_id,
                    "submission cancelled, skipping remaining companions"
                );
                report
                    .failed_companions
                    .push(companion.document_number.clone());
                continue;
            }

            let result = match api.create_companion(&CompanionPayload::from(companion)).await {
                Ok(companion_id) => {
                    api.link_companion_to_reservation(reservation_id, companion_id)
                        .await
                }
                Err(err) => Err(err),
            };

            if let Err(err) = result {
                tracing::warn!(
                    reservation_id,
                    document = %companion.document_number,
                    error = %err,
                    "companion could not be attached"
                );
                report
                    .failed_companions
                    .push(companion.document_number.clone());
            }
        }

        // 3. Payments
        for payment in &self.payment.payments {
            if self.cancel_token().is_cancelled() {
                tracing::warn!(
                    session_id = %self.session_id,
                    reservation_id,
                    "submission cancelled, skipping remaining payments"
                );
                report.failed_payments.push(payment.amount);
                continue;
            }

            if let Err(err) = api.add_payment_to_reservation(reservation_id, payment).await {
                tracing::warn!(
                    reservation_id,
                    amount = payment.amount,
                    error = %err,
                    "payment could not be recorded"
                );
                report.failed_payments.push(payment.amount);
            }
        }

        if !report.is_clean() {
            self.notifier.error(&format!(
                "reservation {reservation_id} saved, but {} companion(s) and {} payment(s) failed",
                report.failed_companions.len(),
                report.failed_payments.len()
            ));
        }

        Ok(report)
    }

    /// Overwrite an existing reservation with the wizard's current state,
    /// through the same sanitizer as creation. Companions and payments are
    /// managed through their own endpoints and are not re-flushed here.
    pub async fn submit_update(
        &self,
        api: &dyn LodgeApi,
        reservation_id: u64,
        today: NaiveDate,
    ) -> Result<(), BookingError> {
        let payload = self.sanitize(today)?;
        api.update_reservation(reservation_id, &payload).await?;
        tracing::info!(
            session_id = %self.session_id,
            reservation_id,
            total = payload.total,
            "reservation updated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApi;
    use crate::catalog::CatalogSnapshot;
    use crate::companions::CompanionInput;
    use crate::core::config::EngineConfig;
    use shared::models::{
        Cabin, Client, DocumentType, Payment, PaymentStatus, Plan, Room, UnitStatus,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 6, 1)
    }

    fn api() -> MockApi {
        MockApi::new().with_catalog(
            vec![Client {
                id: 1,
                name: "Laura".to_string(),
                last_name: None,
                email: None,
                document_number: None,
            }],
            vec![Plan {
                id: 1,
                name: "Plan Familiar".to_string(),
                base_price: 600_000.0,
                capacity: 6,
                description: None,
            }],
            vec![Cabin {
                id: 1,
                name: "Cabaña del Lago".to_string(),
                capacity: 4,
                status: UnitStatus::EnServicio,
                description: None,
                images: Vec::new(),
            }],
            vec![Room {
                id: 10,
                name: "Habitación 10".to_string(),
                capacity: 2,
                status: UnitStatus::EnServicio,
                description: None,
                images: Vec::new(),
            }],
            Vec::new(),
        )
    }

    fn companion(document_number: &str) -> CompanionInput {
        CompanionInput {
            name: "Ana".to_string(),
            last_name: None,
            birthdate: date(2000, 1, 1),
            document_type: DocumentType::Cedula,
            document_number: document_number.to_string(),
            eps: "Sura".to_string(),
            email: None,
            phone: None,
        }
    }

    fn payment(amount: f64) -> Payment {
        Payment {
            id: None,
            amount,
            payment_method: "Efectivo".to_string(),
            payment_date: today(),
            status: PaymentStatus::Pendiente,
            note: None,
        }
    }

    async fn filled_wizard(api: &MockApi) -> crate::wizard::ReservationWizard {
        let catalog = CatalogSnapshot::prefetch(api).await.unwrap();
        let mut w =
            crate::wizard::ReservationWizard::for_tests(EngineConfig::default(), catalog);
        w.set_client(1);
        w.set_plan(1);
        w.set_dates(date(2025, 6, 10), date(2025, 6, 12));
        w.set_has_companions(true);
        w.set_companion_count(2);
        w.next(today()).unwrap();
        w.add_companion(companion("1001"), today()).unwrap();
        w.add_companion(companion("1002"), today()).unwrap();
        w.next(today()).unwrap();
        w.select_cabin(1).unwrap();
        w.next(today()).unwrap();
        w
    }

    #[tokio::test]
    async fn test_submit_flushes_reservation_companions_and_payments() {
        let api = api();
        let mut w = filled_wizard(&api).await;
        w.add_payment(payment(300_000.0), today()).unwrap();

        let report = w.submit(&api, today()).await.unwrap();
        assert!(report.is_clean());

        let saved = api.reservation(report.reservation_id).unwrap();
        assert_eq!(saved.total, 600_000.0 + 2.0 * 150_000.0);
        assert_eq!(saved.status, ReservationStatus::Pendiente);
        assert_eq!(saved.companion_count, 2);
        assert_eq!(api.linked_companions(report.reservation_id).len(), 2);
    }

    #[tokio::test]
    async fn test_failed_companion_link_keeps_reservation() {
        let api = api();
        let w = filled_wizard(&api).await;

        api.fail_next_companion_link();
        let report = w.submit(&api, today()).await.unwrap();

        assert_eq!(report.failed_companions, vec!["1001".to_string()]);
        // The reservation and the second companion both survived
        assert!(api.reservation(report.reservation_id).is_some());
        assert_eq!(api.linked_companions(report.reservation_id).len(), 1);
    }

    #[tokio::test]
    async fn test_failed_payment_reported_not_fatal() {
        let api = api();
        let mut w = filled_wizard(&api).await;
        w.add_payment(payment(100_000.0), today()).unwrap();

        api.fail_next_payment();
        let report = w.submit(&api, today()).await.unwrap();

        assert_eq!(report.failed_payments, vec![100_000.0]);
        assert!(api.reservation(report.reservation_id).is_some());
    }

    #[tokio::test]
    async fn test_cancellation_skips_remaining_subrecords() {
        let api = api();
        let w = filled_wizard(&api).await;

        w.cancel();
        let report = w.submit(&api, today()).await.unwrap();

        // Reservation was already in flight; companions were skipped
        assert!(api.reservation(report.reservation_id).is_some());
        assert_eq!(report.failed_companions.len(), 2);
        assert!(api.linked_companions(report.reservation_id).is_empty());
    }

    #[tokio::test]
    async fn test_sanitize_reconciles_payload() {
        let api = api();
        let w = filled_wizard(&api).await;

        let payload = w.sanitize(today()).unwrap();
        assert_eq!(payload.cabin_id, Some(1));
        assert_eq!(payload.room_id, None);
        assert_eq!(payload.companions.len(), 2);
        assert_eq!(payload.status, ReservationStatus::Pendiente);
    }

    #[tokio::test]
    async fn test_sanitize_requires_payment_when_configured() {
        let api = api();
        let catalog = CatalogSnapshot::prefetch(&api).await.unwrap();
        let config = EngineConfig {
            require_payment_on_submit: true,
            ..EngineConfig::default()
        };
        let mut w = crate::wizard::ReservationWizard::for_tests(config, catalog);
        w.set_client(1);
        w.set_plan(1);
        w.set_dates(date(2025, 6, 10), date(2025, 6, 12));
        w.next(today()).unwrap();
        w.select_room(10).unwrap();
        w.next(today()).unwrap();

        let err = w.sanitize(today()).unwrap_err();
        assert!(err.field_errors().iter().any(|e| e.field == "payments"));

        w.add_payment(payment(50_000.0), today()).unwrap();
        assert!(w.sanitize(today()).is_ok());
    }

    #[tokio::test]
    async fn test_submit_update_overwrites_existing_reservation() {
        let api = api();
        let mut w = filled_wizard(&api).await;
        let report = w.submit(&api, today()).await.unwrap();

        w.set_dates(date(2025, 7, 1), date(2025, 7, 3));
        w.submit_update(&api, report.reservation_id, today())
            .await
            .unwrap();

        let saved = api.reservation(report.reservation_id).unwrap();
        assert_eq!(saved.start_date, date(2025, 7, 1));
        assert_eq!(saved.end_date, date(2025, 7, 3));
    }
}
