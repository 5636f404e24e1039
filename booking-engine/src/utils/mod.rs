//! Utility helpers

pub mod logger;
pub mod time;
