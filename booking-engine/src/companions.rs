//! Companion ledger
//!
//! In-memory collection of dependent-guest records for one wizard session.
//! Fully independent of persistence: entries are flushed individually when
//! the parent reservation is saved (see `wizard::submit`).

use chrono::NaiveDate;
use shared::models::companion::{age_on, Companion, DocumentType};
use validator::Validate;

use crate::core::error::FieldError;

/// Raw companion form input, validated at the form layer before entering
/// the ledger
#[derive(Debug, Clone, Validate)]
pub struct CompanionInput {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub last_name: Option<String>,
    pub birthdate: NaiveDate,
    pub document_type: DocumentType,
    #[validate(length(min = 1, message = "document number is required"))]
    pub document_number: String,
    #[validate(length(min = 1, message = "eps is required"))]
    pub eps: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CompanionInput {
    /// Field-level validation, including the future-birthdate rule that the
    /// derive cannot express
    pub fn validate_on(&self, today: NaiveDate) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if let Err(validation) = self.validate() {
            for (field, field_errors) in validation.field_errors() {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"));
                    errors.push(FieldError::new(field.to_string(), message));
                }
            }
        }

        if self.birthdate > today {
            errors.push(FieldError::new(
                "birthdate",
                "birthdate must not be in the future",
            ));
        }

        errors
    }
}

/// Append/remove collection of companions tied to one reservation
#[derive(Debug, Clone, Default)]
pub struct CompanionLedger {
    entries: Vec<Companion>,
}

impl CompanionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a companion, computing `age` from the birthdate at insertion
    /// time. A duplicate `document_number` is an idempotent no-op (the same
    /// person cannot be registered twice), signalled by the `false` return.
    pub fn add(&mut self, input: CompanionInput, today: NaiveDate) -> bool {
        if self.contains_document(&input.document_number) {
            return false;
        }

        self.entries.push(Companion {
            id: None,
            age: age_on(input.birthdate, today),
            name: input.name,
            last_name: input.last_name,
            birthdate: input.birthdate,
            document_type: input.document_type,
            document_number: input.document_number,
            eps: input.eps,
            email: input.email,
            phone: input.phone,
        });
        true
    }

    /// Remove by document number; missing entries are a no-op
    pub fn remove(&mut self, document_number: &str) {
        self.entries
            .retain(|c| c.document_number != document_number);
    }

    pub fn list(&self) -> &[Companion] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_document(&self, document_number: &str) -> bool {
        self.entries
            .iter()
            .any(|c| c.document_number == document_number)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
