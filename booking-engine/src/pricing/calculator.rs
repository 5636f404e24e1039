//! Reservation total calculator
//!
//! Formula: `plan.base_price + companion_count * companion_fee +
//! Σ(service.unit_price * quantity)`. Service lookups are tolerant of stale
//! ids — an id missing from the catalog contributes 0 rather than failing,
//! since the catalog snapshot can lag behind the backend.

use rust_decimal::Decimal;
use shared::models::{Plan, SelectedService, Service};

use super::money::{to_decimal, to_f64};

/// Compute the reservation total from the current wizard inputs
pub fn calculate_total(
    plan: &Plan,
    companion_count: u32,
    selected: &[SelectedService],
    catalog: &[Service],
    companion_fee: f64,
) -> f64 {
    let base = to_decimal(plan.base_price);
    let companions = Decimal::from(companion_count) * to_decimal(companion_fee);

    let services: Decimal = selected
        .iter()
        .map(|s| {
            let unit_price = catalog
                .iter()
                .find(|svc| svc.id == s.service_id)
                .map(|svc| to_decimal(svc.unit_price))
                .unwrap_or(Decimal::ZERO);
            unit_price * Decimal::from(s.quantity)
        })
        .sum();

    to_f64((base + companions + services).max(Decimal::ZERO))
}
