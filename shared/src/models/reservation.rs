//! Reservation model, status lifecycle and persistence payload

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::companion::Companion;

/// Lifecycle of a persisted reservation
///
/// Staff may move a reservation between any two states; `Anulado` is
/// terminal by convention only (it is excluded from default listing and
/// financial views, and the engine warns before entering it).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ReservationStatus {
    #[default]
    Pendiente,
    Reservado,
    Confirmado,
    Anulado,
}

impl ReservationStatus {
    /// Whether this status is excluded from default views
    pub fn is_voided(&self) -> bool {
        matches!(self, ReservationStatus::Anulado)
    }

    /// Display label (matches the wire representation)
    pub fn label(&self) -> &'static str {
        match self {
            ReservationStatus::Pendiente => "Pendiente",
            ReservationStatus::Reservado => "Reservado",
            ReservationStatus::Confirmado => "Confirmado",
            ReservationStatus::Anulado => "Anulado",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accommodation assigned to a reservation: a cabin or a room, never both.
///
/// `None` is only legal while the reservation is still in the wizard's
/// availability step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", content = "id")]
pub enum AccommodationRef {
    #[default]
    None,
    Cabin(u64),
    Room(u64),
}

impl AccommodationRef {
    pub fn is_none(&self) -> bool {
        matches!(self, AccommodationRef::None)
    }

    pub fn cabin_id(&self) -> Option<u64> {
        match self {
            AccommodationRef::Cabin(id) => Some(*id),
            _ => None,
        }
    }

    pub fn room_id(&self) -> Option<u64> {
        match self {
            AccommodationRef::Room(id) => Some(*id),
            _ => None,
        }
    }
}

/// A selected additional service with its quantity
///
/// A service id appears at most once per reservation; reselecting the same
/// service increments `quantity` instead of duplicating the entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SelectedService {
    pub service_id: u64,
    /// Always >= 1
    pub quantity: u32,
}

/// A reservation as held in memory and exchanged with persistence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Generated by persistence on creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub client_id: u64,
    pub plan_id: u64,
    pub start_date: NaiveDate,
    /// Always >= start_date
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default)]
    pub accommodation: AccommodationRef,
    #[serde(default)]
    pub services: Vec<SelectedService>,
    #[serde(default)]
    pub companions: Vec<Companion>,
    /// Derived monetary total, non-negative
    #[serde(default)]
    pub total: f64,
    /// Provisional target count during wizard step 1; reconciled to
    /// `companions.len()` when the reservation is sanitized for submission
    #[serde(default)]
    pub companion_count: u32,
}

impl Reservation {
    pub fn has_companions(&self) -> bool {
        !self.companions.is_empty()
    }

    /// Total guests: the primary client plus companions
    pub fn guest_count(&self) -> u32 {
        1 + self.companions.len() as u32
    }

    /// Add a service selection; a repeated service id increments quantity
    pub fn select_service(&mut self, service_id: u64, quantity: u32) {
        let quantity = quantity.max(1);
        match self.services.iter_mut().find(|s| s.service_id == service_id) {
            Some(existing) => existing.quantity += quantity,
            None => self.services.push(SelectedService {
                service_id,
                quantity,
            }),
        }
    }

    /// Remove a service selection entirely; no-op when absent
    pub fn deselect_service(&mut self, service_id: u64) {
        self.services.retain(|s| s.service_id != service_id);
    }
}

/// Companion fields sent to persistence when flushing the ledger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanionPayload {
    pub document_number: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub birthdate: NaiveDate,
    pub age: u32,
    pub document_type: super::companion::DocumentType,
    pub eps: String,
}

impl From<&Companion> for CompanionPayload {
    fn from(c: &Companion) -> Self {
        Self {
            document_number: c.document_number.clone(),
            name: c.name.clone(),
            last_name: c.last_name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            birthdate: c.birthdate,
            age: c.age,
            document_type: c.document_type,
            eps: c.eps.clone(),
        }
    }
}

/// Sanitized submission payload for create/update reservation
///
/// `cabin_id` and `room_id` are mutually exclusive; dates are plain
/// `YYYY-MM-DD` strings on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationPayload {
    pub client_id: u64,
    pub plan_id: u64,
    pub cabin_id: Option<u64>,
    pub room_id: Option<u64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ReservationStatus,
    pub total: f64,
    pub services: Vec<SelectedService>,
    pub companions: Vec<CompanionPayload>,
}
