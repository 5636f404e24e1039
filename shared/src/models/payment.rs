//! Payment model
//!
//! Payments are recorded, not processed: the wizard holds them in a
//! temporary list and flushes them to persistence after the reservation is
//! created.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Payment lifecycle state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    #[default]
    Pendiente,
    Confirmado,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Issued by persistence once the payment record is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Strictly positive
    pub amount: f64,
    pub payment_method: String,
    /// Must not be in the future
    pub payment_date: NaiveDate,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_serde_camel_case() {
        let payment = Payment {
            id: None,
            amount: 120.5,
            payment_method: "Efectivo".to_string(),
            payment_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            status: PaymentStatus::Pendiente,
            note: None,
        };

        let json = serde_json::to_string(&payment).unwrap();
        assert!(json.contains("\"paymentMethod\":\"Efectivo\""));
        assert!(json.contains("\"paymentDate\":\"2025-06-01\""));
        assert!(json.contains("\"status\":\"Pendiente\""));
    }
}
