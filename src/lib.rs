//! Cashier-side billing reconciliation client for the hospital management API.
//!
//! Loads the patient roster with its embedded billing records, resolves every
//! referenced subsequent payment to an amount, computes outstanding balances,
//! and posts new payments back against a billing record.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
