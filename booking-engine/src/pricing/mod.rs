//! Pricing
//!
//! Derives a reservation's monetary total from the plan base price, the
//! per-companion surcharge and the selected services. Recomputed
//! synchronously on every relevant input change, never cached.

pub mod calculator;
pub mod money;

pub use calculator::calculate_total;
pub use money::{to_decimal, to_f64};
