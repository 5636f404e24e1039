//! Companion (dependent guest) model

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Identity document types accepted for companions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DocumentType {
    /// Cédula de ciudadanía
    #[default]
    #[serde(rename = "CC")]
    Cedula,
    /// Tarjeta de identidad (minors)
    #[serde(rename = "TI")]
    TarjetaIdentidad,
    /// Cédula de extranjería
    #[serde(rename = "CE")]
    CedulaExtranjeria,
    /// Pasaporte
    #[serde(rename = "PAS")]
    Pasaporte,
}

/// A dependent guest attached to a reservation, distinct from the primary
/// client. Created transiently in the wizard ledger and persisted only when
/// the parent reservation is saved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Companion {
    /// Issued by persistence once the companion record is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub birthdate: NaiveDate,
    /// Derived from birthdate, recomputed whenever birthdate changes
    pub age: u32,
    pub document_type: DocumentType,
    /// Unique within a single reservation's companion list
    pub document_number: String,
    /// Health-insurance identifier, free text
    pub eps: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Companion {
    /// Recompute `age` from `birthdate` against the given date
    pub fn recompute_age(&mut self, today: NaiveDate) {
        self.age = age_on(self.birthdate, today);
    }
}

/// Whole-year floor difference between `birthdate` and `today`
///
/// A birthdate later in the year than today counts one year less.
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - birthdate.year();
    let had_birthday = (today.month(), today.day()) >= (birthdate.month(), birthdate.day());
    if !had_birthday {
        years -= 1;
    }
    years.max(0) as u32
}
