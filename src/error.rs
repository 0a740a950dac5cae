//! Error taxonomy for the cashier console.
//!
//! Individual payment-amount lookup failures are deliberately absent from the
//! fatal paths: they degrade to [`crate::models::ResolvedAmount::Unavailable`]
//! and contribute zero to balance arithmetic.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Roster fetch failed; nothing can render without it.
    #[error("Roster fetch failed: {0}")]
    RosterFetch(anyhow::Error),

    /// A single payment-amount lookup failed. Tolerated by the reconciler.
    #[error("Payment lookup failed: {0}")]
    PaymentLookup(anyhow::Error),

    /// Posting a payment failed; the modal stays open with the typed amount.
    #[error("Payment submission failed: {0}")]
    PaymentSubmit(anyhow::Error),

    /// A collaborator returned JSON that failed boundary validation.
    #[error("Invalid response payload: {0}")]
    InvalidPayload(anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}
