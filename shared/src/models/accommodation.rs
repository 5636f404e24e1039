//! Accommodation catalog models (cabins and rooms)
//!
//! Owned by the external inventory services. The engine only reads and
//! filters these, never mutates them.

use serde::{Deserialize, Serialize};

/// Operational state of an accommodation unit
///
/// Only `EnServicio` units are assignable to a reservation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum UnitStatus {
    /// In service, assignable
    #[default]
    #[serde(rename = "En servicio")]
    EnServicio,
    /// Under maintenance
    #[serde(rename = "En mantenimiento")]
    EnMantenimiento,
    /// Out of service
    #[serde(rename = "Fuera de servicio")]
    FueraDeServicio,
}

impl UnitStatus {
    /// Whether a unit with this status can be assigned
    pub fn is_in_service(&self) -> bool {
        matches!(self, UnitStatus::EnServicio)
    }
}

/// A cabin: group accommodation sized by explicit capacity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cabin {
    pub id: u64,
    pub name: String,
    /// Maximum number of guests (always > 0 in catalog data)
    pub capacity: u32,
    pub status: UnitStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

/// A room: single/double accommodation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: u64,
    pub name: String,
    /// Nominal capacity (rooms are assumed single/double use)
    pub capacity: u32,
    pub status: UnitStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_status_serde_labels() {
        let json = serde_json::to_string(&UnitStatus::EnServicio).unwrap();
        assert_eq!(json, "\"En servicio\"");

        let parsed: UnitStatus = serde_json::from_str("\"En mantenimiento\"").unwrap();
        assert_eq!(parsed, UnitStatus::EnMantenimiento);
    }

    #[test]
    fn test_only_en_servicio_is_assignable() {
        assert!(UnitStatus::EnServicio.is_in_service());
        assert!(!UnitStatus::EnMantenimiento.is_in_service());
        assert!(!UnitStatus::FueraDeServicio.is_in_service());
    }
}
