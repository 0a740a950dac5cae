//! Prometheus metrics for the cashier console.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram, CounterVec, Encoder, Histogram, TextEncoder,
};

/// Counter for worklist loads by status.
pub static ROSTER_LOADS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "cashier_roster_loads_total",
        "Total number of outstanding-billings loads",
        &["status"]
    )
    .expect("Failed to register ROSTER_LOADS")
});

/// Histogram for end-to-end worklist load duration.
pub static ROSTER_LOAD_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "cashier_roster_load_duration_seconds",
        "Outstanding-billings load duration in seconds",
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register ROSTER_LOAD_DURATION")
});

/// Counter for payment-amount lookups by status.
pub static PAYMENT_LOOKUPS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "cashier_payment_lookups_total",
        "Total number of payment-amount lookups",
        &["status"]
    )
    .expect("Failed to register PAYMENT_LOOKUPS")
});

/// Counter for payment submissions by status.
pub static PAYMENT_SUBMISSIONS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "cashier_payment_submissions_total",
        "Total number of payment submissions",
        &["status"]
    )
    .expect("Failed to register PAYMENT_SUBMISSIONS")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&ROSTER_LOADS);
    Lazy::force(&ROSTER_LOAD_DURATION);
    Lazy::force(&PAYMENT_LOOKUPS);
    Lazy::force(&PAYMENT_SUBMISSIONS);
}

/// Get all metrics as Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Record a worklist load.
pub fn record_roster_load(status: &str) {
    ROSTER_LOADS.with_label_values(&[status]).inc();
}

/// Record a payment-amount lookup.
pub fn record_payment_lookup(status: &str) {
    PAYMENT_LOOKUPS.with_label_values(&[status]).inc();
}

/// Record a payment submission.
pub fn record_payment_submission(status: &str) {
    PAYMENT_SUBMISSIONS.with_label_values(&[status]).inc();
}
