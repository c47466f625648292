//! Core types and the cross-database reconciliation engine for Pulse.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing heavier than
//! `chrono` and `serde`.

pub mod engagement;
pub mod growth;
pub mod profile;
pub mod reconcile;
pub mod source;
pub mod talent;

pub use reconcile::{
  CountryActivity, CountryDirectory, MonthlyActivity, UNKNOWN_COUNTRY,
  monthly_active_by_country,
};
