//! Services module for the cashier console.

pub mod console;
pub mod gateway;
pub mod metrics;
pub mod reconciler;

pub use console::CashierConsole;
pub use gateway::{HospitalApi, HttpHospitalApi};
pub use metrics::{
    get_metrics, init_metrics, record_payment_lookup, record_payment_submission,
    record_roster_load,
};
pub use reconciler::BillingReconciler;
