//! Reservation wizard
//!
//! Four-step creation flow: basic info, companions (skipped when the guest
//! travels alone), availability, payment. Steps advance only forward through
//! validation; `back` never validates and never discards entered data. All
//! state lives in memory until `submit` flushes it to the backend.

pub mod submit;
pub mod validate;

pub use submit::SubmissionReport;

use std::sync::Arc;

use chrono::NaiveDate;
use shared::error::AppResult;
use shared::models::{AccommodationRef, Payment, SelectedService};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::api::LodgeApi;
use crate::availability::{filter_available, AvailableUnits};
use crate::catalog::CatalogSnapshot;
use crate::companions::{CompanionInput, CompanionLedger};
use crate::core::config::EngineConfig;
use crate::core::error::{BookingError, FieldError};
use crate::notify::{AuthSession, NotificationSink};
use crate::pricing::calculate_total;

// ==================== Steps ====================

/// The wizard's position. `Companions` is reachable only when the basic
/// info step declared companions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    BasicInfo,
    Companions,
    Availability,
    Payment,
}

// ==================== Per-step state ====================

/// Step 1: who, which plan, when, and whether companions travel along
#[derive(Debug, Clone, Default)]
pub struct BasicInfoState {
    pub client_id: Option<u64>,
    pub plan_id: Option<u64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub has_companions: bool,
    pub companion_count: u32,
}

/// Step 3: the filtered unit set, the chosen unit and extra services
#[derive(Debug, Clone, Default)]
pub struct AvailabilityState {
    pub available: AvailableUnits,
    pub selection: AccommodationRef,
    pub services: Vec<SelectedService>,
}

impl AvailabilityState {
    /// Recompute the available set for the current party size. A selection
    /// that fell out of the new set is cleared so it can never be submitted.
    pub fn refresh(&mut self, guest_count: u32, catalog: &CatalogSnapshot) {
        self.available = filter_available(guest_count, &catalog.cabins, &catalog.rooms);
        if !self.selection.is_none() && !self.available.contains(&self.selection) {
            self.selection = AccommodationRef::None;
        }
    }

    /// Add a service or bump its quantity when already selected
    pub fn select_service(&mut self, service_id: u64, quantity: u32) {
        if let Some(existing) = self.services.iter_mut().find(|s| s.service_id == service_id) {
            existing.quantity += quantity;
        } else {
            self.services.push(SelectedService {
                service_id,
                quantity,
            });
        }
    }

    pub fn deselect_service(&mut self, service_id: u64) {
        self.services.retain(|s| s.service_id != service_id);
    }
}

/// Step 4: payments recorded before submission
#[derive(Debug, Clone, Default)]
pub struct PaymentState {
    pub payments: Vec<Payment>,
}

// ==================== Wizard ====================

/// One reservation-creation session
pub struct ReservationWizard {
    /// Session identifier, used for log correlation only
    pub session_id: Uuid,
    pub basic: BasicInfoState,
    pub ledger: CompanionLedger,
    pub availability: AvailabilityState,
    pub payment: PaymentState,
    config: EngineConfig,
    catalog: CatalogSnapshot,
    session: AuthSession,
    notifier: Arc<dyn NotificationSink>,
    cancel: CancellationToken,
    step: WizardStep,
}

impl ReservationWizard {
    pub fn new(
        config: EngineConfig,
        catalog: CatalogSnapshot,
        session: AuthSession,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        let session_id = Uuid::new_v4();
        tracing::info!(%session_id, user = %session.user_id, "reservation wizard opened");

        Self {
            session_id,
            basic: BasicInfoState::default(),
            ledger: CompanionLedger::new(),
            availability: AvailabilityState::default(),
            payment: PaymentState::default(),
            config,
            catalog,
            session,
            notifier,
            cancel: CancellationToken::new(),
            step: WizardStep::BasicInfo,
        }
    }

    /// Prefetch the catalog and open a wizard over it
    pub async fn open(
        api: &dyn LodgeApi,
        config: EngineConfig,
        session: AuthSession,
        notifier: Arc<dyn NotificationSink>,
    ) -> AppResult<Self> {
        let catalog = CatalogSnapshot::prefetch(api).await?;
        Ok(Self::new(config, catalog, session, notifier))
    }

    /// Test constructor with a silent sink and an open session
    #[cfg(test)]
    pub fn for_tests(config: EngineConfig, catalog: CatalogSnapshot) -> Self {
        Self::new(
            config,
            catalog,
            AuthSession::new(1, "Test User", vec!["*".to_string()]),
            Arc::new(crate::notify::NullSink),
        )
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Abort the session. In-flight requests complete, but no further
    /// request is started.
    pub fn cancel(&self) {
        tracing::info!(session_id = %self.session_id, "reservation wizard cancelled");
        self.cancel.cancel();
    }

    // ==================== Step 1 mutators ====================

    pub fn set_client(&mut self, client_id: u64) {
        self.basic.client_id = Some(client_id);
    }

    pub fn set_plan(&mut self, plan_id: u64) {
        self.basic.plan_id = Some(plan_id);
    }

    /// Changing the range re-filters availability like any other input that
    /// affects which units may be assigned
    pub fn set_dates(&mut self, start: NaiveDate, end: NaiveDate) {
        self.basic.start_date = Some(start);
        self.basic.end_date = Some(end);
        self.refresh_availability();
    }

    /// Toggle the companion branch. Turning it off clears the ledger so a
    /// stale companion list can never be submitted for a solo guest.
    pub fn set_has_companions(&mut self, has_companions: bool) {
        self.basic.has_companions = has_companions;
        if !has_companions {
            self.basic.companion_count = 0;
            self.ledger.clear();
        }
        self.refresh_availability();
    }

    pub fn set_companion_count(&mut self, count: u32) {
        self.basic.companion_count = count;
    }

    // ==================== Step 2 mutators ====================

    /// Validate and add a companion. A duplicate document number is rejected
    /// as a field error rather than silently dropped.
    pub fn add_companion(
        &mut self,
        input: CompanionInput,
        today: NaiveDate,
    ) -> Result<(), BookingError> {
        let mut errors = input.validate_on(today);
        if self.ledger.len() as u32 >= self.config.max_companions {
            errors.push(FieldError::new(
                "companions",
                format!(
                    "at most {} companions are allowed",
                    self.config.max_companions
                ),
            ));
        }
        if !errors.is_empty() {
            return Err(BookingError::Validation(errors));
        }

        if !self.ledger.add(input, today) {
            return Err(BookingError::Validation(vec![FieldError::new(
                "documentNumber",
                "a companion with this document number is already registered",
            )]));
        }

        self.refresh_availability();
        Ok(())
    }

    pub fn remove_companion(&mut self, document_number: &str) {
        self.ledger.remove(document_number);
        self.refresh_availability();
    }

    // ==================== Step 3 mutators ====================

    /// Recompute the available set for the current party size
    pub fn refresh_availability(&mut self) {
        self.availability.refresh(self.guest_count(), &self.catalog);
    }

    pub fn select_cabin(&mut self, cabin_id: u64) -> Result<(), BookingError> {
        let selection = AccommodationRef::Cabin(cabin_id);
        if !self.availability.available.contains(&selection) {
            return Err(BookingError::InvalidOperation(format!(
                "cabin {cabin_id} is not in the available set"
            )));
        }
        self.availability.selection = selection;
        Ok(())
    }

    pub fn select_room(&mut self, room_id: u64) -> Result<(), BookingError> {
        let selection = AccommodationRef::Room(room_id);
        if !self.availability.available.contains(&selection) {
            return Err(BookingError::InvalidOperation(format!(
                "room {room_id} is not in the available set"
            )));
        }
        self.availability.selection = selection;
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.availability.selection = AccommodationRef::None;
    }

    pub fn select_service(&mut self, service_id: u64, quantity: u32) {
        self.availability.select_service(service_id, quantity);
    }

    pub fn deselect_service(&mut self, service_id: u64) {
        self.availability.deselect_service(service_id);
    }

    // ==================== Step 4 mutators ====================

    /// Validate and record a payment for submission
    pub fn add_payment(&mut self, payment: Payment, today: NaiveDate) -> Result<(), BookingError> {
        let errors = validate::validate_payment_input(&payment, today);
        if !errors.is_empty() {
            return Err(BookingError::Validation(errors));
        }
        self.payment.payments.push(payment);
        Ok(())
    }

    pub fn remove_payment(&mut self, index: usize) {
        if index < self.payment.payments.len() {
            self.payment.payments.remove(index);
        }
    }

    // ==================== Derived values ====================

    /// Companions that count toward pricing and capacity. The ledger wins
    /// over the declared count as soon as it has entries; without companions
    /// the count is always zero.
    pub fn effective_companion_count(&self) -> u32 {
        if !self.basic.has_companions {
            0
        } else if !self.ledger.is_empty() {
            self.ledger.len() as u32
        } else {
            self.basic.companion_count
        }
    }

    /// Party size: the primary guest plus companions
    pub fn guest_count(&self) -> u32 {
        1 + self.effective_companion_count()
    }

    /// Current reservation total; 0 until a plan is chosen
    pub fn total(&self) -> f64 {
        let Some(plan) = self.basic.plan_id.and_then(|id| self.catalog.plan(id)) else {
            return 0.0;
        };
        calculate_total(
            plan,
            self.effective_companion_count(),
            &self.availability.services,
            &self.catalog.services,
            self.config.companion_fee,
        )
    }

    // ==================== Navigation ====================

    /// Validate the current step and advance. The companion step is skipped
    /// entirely for solo guests; entering the availability step refreshes
    /// the filtered set.
    pub fn next(&mut self, today: NaiveDate) -> Result<WizardStep, BookingError> {
        match self.step {
            WizardStep::BasicInfo => {
                let errors =
                    validate::validate_basic_info(&self.basic, self.config.max_companions, today);
                if !errors.is_empty() {
                    return Err(BookingError::Validation(errors));
                }
                self.step = if self.basic.has_companions {
                    WizardStep::Companions
                } else {
                    self.refresh_availability();
                    WizardStep::Availability
                };
            }
            WizardStep::Companions => {
                let errors = validate::validate_companions(&self.ledger);
                if !errors.is_empty() {
                    return Err(BookingError::Validation(errors));
                }
                self.refresh_availability();
                self.step = WizardStep::Availability;
            }
            WizardStep::Availability => {
                if self.availability.available.is_empty() {
                    return Err(BookingError::NoAvailability {
                        guests: self.guest_count(),
                    });
                }
                if self.availability.selection.is_none() {
                    return Err(BookingError::Validation(vec![FieldError::new(
                        "accommodation",
                        "select a cabin or room to continue",
                    )]));
                }
                self.step = WizardStep::Payment;
            }
            WizardStep::Payment => {
                return Err(BookingError::InvalidOperation(
                    "already on the final step".to_string(),
                ));
            }
        }
        Ok(self.step)
    }

    /// [`Self::next`] against the wall clock
    pub fn advance(&mut self) -> Result<WizardStep, BookingError> {
        self.next(crate::utils::time::today())
    }

    /// Move backwards without validating; entered data is kept. Mirrors the
    /// forward skip of the companion step for solo guests.
    pub fn back(&mut self) -> WizardStep {
        self.step = match self.step {
            WizardStep::BasicInfo => WizardStep::BasicInfo,
            WizardStep::Companions => WizardStep::BasicInfo,
            WizardStep::Availability => {
                if self.basic.has_companions {
                    WizardStep::Companions
                } else {
                    WizardStep::BasicInfo
                }
            }
            WizardStep::Payment => WizardStep::Availability,
        };
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Cabin, Client, Plan, Room, UnitStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 6, 1)
    }

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot {
            clients: vec![Client {
                id: 1,
                name: "Laura".to_string(),
                last_name: Some("Gómez".to_string()),
                email: None,
                document_number: None,
            }],
            plans: vec![Plan {
                id: 1,
                name: "Plan Familiar".to_string(),
                base_price: 600_000.0,
                capacity: 6,
                description: None,
            }],
            cabins: vec![
                Cabin {
                    id: 1,
                    name: "Cabaña del Lago".to_string(),
                    capacity: 4,
                    status: UnitStatus::EnServicio,
                    description: None,
                    images: Vec::new(),
                },
                Cabin {
                    id: 2,
                    name: "Cabaña Pequeña".to_string(),
                    capacity: 2,
                    status: UnitStatus::EnServicio,
                    description: None,
                    images: Vec::new(),
                },
            ],
            rooms: vec![Room {
                id: 10,
                name: "Habitación 10".to_string(),
                capacity: 2,
                status: UnitStatus::EnServicio,
                description: None,
                images: Vec::new(),
            }],
            services: Vec::new(),
        }
    }

    fn wizard() -> ReservationWizard {
        ReservationWizard::for_tests(EngineConfig::default(), catalog())
    }

    fn companion(document_number: &str) -> CompanionInput {
        CompanionInput {
            name: "Ana".to_string(),
            last_name: None,
            birthdate: date(2000, 1, 1),
            document_type: shared::models::DocumentType::Cedula,
            document_number: document_number.to_string(),
            eps: "Sura".to_string(),
            email: None,
            phone: None,
        }
    }

    fn fill_basic_solo(w: &mut ReservationWizard) {
        w.set_client(1);
        w.set_plan(1);
        w.set_dates(date(2025, 6, 10), date(2025, 6, 12));
    }

    #[test]
    fn test_solo_flow_skips_companion_step() {
        let mut w = wizard();
        fill_basic_solo(&mut w);

        assert_eq!(w.next(today()).unwrap(), WizardStep::Availability);
        // Solo guest: rooms only
        assert!(w.availability.available.cabins.is_empty());
        assert_eq!(w.availability.available.rooms.len(), 1);

        assert_eq!(w.back(), WizardStep::BasicInfo);
    }

    #[test]
    fn test_companion_flow_visits_all_steps() {
        let mut w = wizard();
        fill_basic_solo(&mut w);
        w.set_has_companions(true);
        w.set_companion_count(2);

        assert_eq!(w.next(today()).unwrap(), WizardStep::Companions);

        // Cannot leave with an empty ledger
        assert!(matches!(
            w.next(today()),
            Err(BookingError::Validation(_))
        ));

        w.add_companion(companion("1001"), today()).unwrap();
        w.add_companion(companion("1002"), today()).unwrap();
        assert_eq!(w.next(today()).unwrap(), WizardStep::Availability);

        // Party of 3: only the 4-person cabin qualifies
        assert_eq!(w.availability.available.cabins.len(), 1);
        assert!(w.availability.available.rooms.is_empty());

        w.select_cabin(1).unwrap();
        assert_eq!(w.next(today()).unwrap(), WizardStep::Payment);
        assert_eq!(w.back(), WizardStep::Availability);
        assert_eq!(w.back(), WizardStep::Companions);
    }

    #[test]
    fn test_invalid_basic_info_blocks_advance() {
        let mut w = wizard();
        let err = w.next(today()).unwrap_err();
        assert!(!err.field_errors().is_empty());
        assert_eq!(w.step(), WizardStep::BasicInfo);
    }

    #[test]
    fn test_selection_outside_available_set_rejected() {
        let mut w = wizard();
        fill_basic_solo(&mut w);
        w.next(today()).unwrap();

        // Rooms are offered, so picking a cabin is illegal
        assert!(matches!(
            w.select_cabin(1),
            Err(BookingError::InvalidOperation(_))
        ));
        w.select_room(10).unwrap();
    }

    #[test]
    fn test_stale_selection_cleared_on_party_growth() {
        let mut w = wizard();
        fill_basic_solo(&mut w);
        w.set_has_companions(true);
        w.set_companion_count(1);
        w.next(today()).unwrap();
        w.add_companion(companion("1001"), today()).unwrap();
        w.next(today()).unwrap();

        // Party of 2: the small cabin fits
        w.select_cabin(2).unwrap();

        // Growing the party invalidates the 2-person cabin
        w.add_companion(companion("1002"), today()).unwrap();
        w.add_companion(companion("1003"), today()).unwrap();
        assert!(w.availability.selection.is_none());
        assert_eq!(w.availability.available.cabins.len(), 1);
        assert_eq!(w.availability.available.cabins[0].id, 1);
    }

    #[test]
    fn test_no_availability_blocks_step() {
        let mut w = wizard();
        fill_basic_solo(&mut w);
        w.set_has_companions(true);
        w.set_companion_count(6);
        w.next(today()).unwrap();
        for i in 0..6 {
            w.add_companion(companion(&format!("10{i}")), today()).unwrap();
        }
        w.next(today()).unwrap();

        // Party of 7 exceeds every cabin
        assert!(matches!(
            w.next(today()),
            Err(BookingError::NoAvailability { guests: 7 })
        ));
    }

    #[test]
    fn test_total_tracks_companions_and_fee() {
        let mut w = wizard();
        fill_basic_solo(&mut w);
        assert_eq!(w.total(), 600_000.0);

        w.set_has_companions(true);
        w.add_companion(companion("1001"), today()).unwrap();
        w.add_companion(companion("1002"), today()).unwrap();
        let fee = w.config().companion_fee;
        assert_eq!(w.total(), 600_000.0 + 2.0 * fee);

        // Ledger wins over the declared count
        w.set_companion_count(5);
        assert_eq!(w.total(), 600_000.0 + 2.0 * fee);
    }

    #[test]
    fn test_date_change_refilters_availability() {
        let mut w = wizard();
        w.set_client(1);
        w.set_plan(1);
        assert!(w.availability.available.is_empty());

        // The set is recomputed on the date change itself, not on `next`
        w.set_dates(date(2025, 6, 10), date(2025, 6, 12));
        assert_eq!(w.availability.available.rooms.len(), 1);
    }

    #[test]
    fn test_ledger_smaller_than_declared_count_still_advances() {
        let mut w = wizard();
        fill_basic_solo(&mut w);
        w.set_has_companions(true);
        w.set_companion_count(2);
        w.next(today()).unwrap();

        // One companion against a declared count of two is enough
        w.add_companion(companion("1001"), today()).unwrap();
        assert_eq!(w.next(today()).unwrap(), WizardStep::Availability);

        // The ledger drives pricing and the submitted companion list
        assert_eq!(w.effective_companion_count(), 1);
        w.select_cabin(2).unwrap();
        w.next(today()).unwrap();
        let payload = w.sanitize(today()).unwrap();
        assert_eq!(payload.companions.len(), 1);
        assert_eq!(
            payload.total,
            600_000.0 + w.config().companion_fee
        );
    }

    #[test]
    fn test_unselecting_companions_clears_ledger() {
        let mut w = wizard();
        fill_basic_solo(&mut w);
        w.set_has_companions(true);
        w.add_companion(companion("1001"), today()).unwrap();

        w.set_has_companions(false);
        assert!(w.ledger.is_empty());
        assert_eq!(w.guest_count(), 1);
    }

    #[test]
    fn test_payment_validation_on_add() {
        let mut w = wizard();
        let bad = Payment {
            id: None,
            amount: -10.0,
            payment_method: "Efectivo".to_string(),
            payment_date: today(),
            status: Default::default(),
            note: None,
        };
        assert!(w.add_payment(bad, today()).is_err());
        assert!(w.payment.payments.is_empty());
    }
}
