//! Per-step validators
//!
//! Validation errors are field-level, stay on the client and block step
//! advancement; they are never sent to the network. Every validator takes
//! `today` explicitly so tests stay deterministic.

use chrono::NaiveDate;
use shared::models::Payment;

use crate::companions::CompanionLedger;
use crate::core::error::FieldError;
use crate::pricing::money;

use super::BasicInfoState;

/// Step 1: client, plan, dates and the companion toggle
pub fn validate_basic_info(
    state: &BasicInfoState,
    max_companions: u32,
    today: NaiveDate,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if state.client_id.is_none() {
        errors.push(FieldError::new("clientId", "client is required"));
    }
    if state.plan_id.is_none() {
        errors.push(FieldError::new("planId", "plan is required"));
    }

    match state.start_date {
        None => errors.push(FieldError::new("startDate", "start date is required")),
        Some(start) if start < today => {
            errors.push(FieldError::new(
                "startDate",
                "start date must not be in the past",
            ));
        }
        Some(_) => {}
    }

    match (state.start_date, state.end_date) {
        (_, None) => errors.push(FieldError::new("endDate", "end date is required")),
        (Some(start), Some(end)) if end <= start => {
            errors.push(FieldError::new(
                "endDate",
                "end date must be after the start date",
            ));
        }
        _ => {}
    }

    if state.has_companions {
        if state.companion_count < 1 {
            errors.push(FieldError::new(
                "companionCount",
                "at least one companion is required",
            ));
        } else if state.companion_count > max_companions {
            errors.push(FieldError::new(
                "companionCount",
                format!("at most {max_companions} companions are allowed"),
            ));
        }
    }

    errors
}

/// Step 2: the ledger must be non-empty.
///
/// Deliberately loose: the count entered in step 1 is NOT required to match
/// the ledger length here — `companion_count` is reconciled to the actual
/// list length when the form is sanitized for submission.
pub fn validate_companions(ledger: &CompanionLedger) -> Vec<FieldError> {
    if ledger.is_empty() {
        vec![FieldError::new(
            "companions",
            "add at least one companion",
        )]
    } else {
        Vec::new()
    }
}

/// Step 4: payment presence, gated by configuration
pub fn validate_payment_step(payments: &[Payment], require_payment: bool) -> Vec<FieldError> {
    if require_payment && payments.is_empty() {
        vec![FieldError::new(
            "payments",
            "record at least one payment before submitting",
        )]
    } else {
        Vec::new()
    }
}

/// A single temporary payment before it enters the wizard's list
pub fn validate_payment_input(payment: &Payment, today: NaiveDate) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Err(err) = money::validate_amount(payment.amount) {
        errors.push(FieldError::new("amount", err.to_string()));
    }
    if payment.payment_method.trim().is_empty() {
        errors.push(FieldError::new(
            "paymentMethod",
            "payment method is required",
        ));
    }
    if payment.payment_date > today {
        errors.push(FieldError::new(
            "paymentDate",
            "payment date must not be in the future",
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::PaymentStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 6, 1)
    }

    fn valid_basic() -> BasicInfoState {
        BasicInfoState {
            client_id: Some(1),
            plan_id: Some(1),
            start_date: Some(date(2025, 6, 10)),
            end_date: Some(date(2025, 6, 12)),
            has_companions: false,
            companion_count: 0,
        }
    }

    #[test]
    fn test_valid_basic_info_passes() {
        assert!(validate_basic_info(&valid_basic(), 10, today()).is_empty());
    }

    #[test]
    fn test_missing_client_and_plan() {
        let state = BasicInfoState::default();
        let errors = validate_basic_info(&state, 10, today());
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"clientId"));
        assert!(fields.contains(&"planId"));
        assert!(fields.contains(&"startDate"));
        assert!(fields.contains(&"endDate"));
    }

    #[test]
    fn test_start_date_in_the_past() {
        let mut state = valid_basic();
        state.start_date = Some(date(2025, 5, 31));
        let errors = validate_basic_info(&state, 10, today());
        assert!(errors.iter().any(|e| e.field == "startDate"));
    }

    #[test]
    fn test_end_date_must_be_after_start() {
        let mut state = valid_basic();
        state.end_date = state.start_date;
        let errors = validate_basic_info(&state, 10, today());
        assert!(errors.iter().any(|e| e.field == "endDate"));
    }

    #[test]
    fn test_companion_count_bounds() {
        let mut state = valid_basic();
        state.has_companions = true;

        state.companion_count = 0;
        assert!(
            validate_basic_info(&state, 10, today())
                .iter()
                .any(|e| e.field == "companionCount")
        );

        state.companion_count = 11;
        assert!(
            validate_basic_info(&state, 10, today())
                .iter()
                .any(|e| e.field == "companionCount")
        );

        state.companion_count = 10;
        assert!(validate_basic_info(&state, 10, today()).is_empty());
    }

    #[test]
    fn test_companions_step_only_checks_non_empty() {
        let ledger = CompanionLedger::new();
        assert_eq!(validate_companions(&ledger).len(), 1);
    }

    #[test]
    fn test_payment_step_gated_by_config() {
        assert!(validate_payment_step(&[], false).is_empty());
        assert_eq!(validate_payment_step(&[], true).len(), 1);
    }

    #[test]
    fn test_payment_input_rules() {
        let payment = Payment {
            id: None,
            amount: 0.0,
            payment_method: " ".to_string(),
            payment_date: date(2025, 6, 2),
            status: PaymentStatus::Pendiente,
            note: None,
        };

        let errors = validate_payment_input(&payment, today());
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"amount"));
        assert!(fields.contains(&"paymentMethod"));
        assert!(fields.contains(&"paymentDate"));
    }
}
