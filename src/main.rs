//! Cashier console entry point.
//!
//! Loads configuration, performs one full worklist load against the
//! configured hospital API, and logs the outstanding rows.

use cashier_console::config::CashierConfig;
use cashier_console::services::{init_metrics, BillingReconciler, CashierConsole, HttpHospitalApi};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = CashierConfig::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        service_name = %config.service_name,
        api_base_url = %config.api.base_url,
        roster_window_start = config.roster_window.start,
        roster_window_stop = config.roster_window.stop,
        "Starting cashier-console"
    );

    init_metrics();

    let api = HttpHospitalApi::new(config.api.base_url.clone());
    let reconciler =
        BillingReconciler::new(api, config.roster_window.start, config.roster_window.stop);
    let mut console = CashierConsole::new(reconciler);

    if let Err(e) = console.refresh().await {
        tracing::error!(error = %e, "Failed to load outstanding billings");
        return Err(std::io::Error::other(format!("Worklist load error: {}", e)));
    }

    for entry in console.worklist() {
        tracing::info!(
            key = %entry.key,
            patient = %entry.patient_name,
            charge = %entry.billing.charge_amount,
            down_payment = %entry.billing.down_payment,
            amount_due = %entry.amount_due,
            balance = %entry.filter_balance,
            "Outstanding billing"
        );
    }

    tracing::info!(
        outstanding = console.worklist().len(),
        "Worklist load complete"
    );
    Ok(())
}
