//! Billing balance reconciliation.
//!
//! Builds the cashier's down-payment worklist: fetches the patient roster,
//! resolves every referenced subsequent payment concurrently, and computes
//! per-billing balances.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::error::AppError;
use crate::models::{
    Billing, OutstandingBilling, Patient, PaymentAmountCache, ResolvedAmount,
};
use crate::services::gateway::HospitalApi;
use crate::services::metrics;

pub struct BillingReconciler<A: HospitalApi> {
    api: A,
    window_start: u32,
    window_stop: u32,
}

impl<A: HospitalApi> BillingReconciler<A> {
    pub fn new(api: A, window_start: u32, window_stop: u32) -> Self {
        Self {
            api,
            window_start,
            window_stop,
        }
    }

    /// Full load of the outstanding-billings worklist.
    ///
    /// Retains (patient, billing) pairs with a positive down payment and a
    /// positive filter balance, in roster order, deduplicated by composite
    /// key. A roster fetch or validation failure aborts the whole load;
    /// individual payment lookups may fail without consequence.
    pub async fn load_outstanding_billings(&self) -> Result<Vec<OutstandingBilling>, AppError> {
        let timer = metrics::ROSTER_LOAD_DURATION.start_timer();
        let result = self.load_inner().await;
        timer.observe_duration();

        match &result {
            Ok(worklist) => {
                metrics::record_roster_load("success");
                tracing::info!(outstanding = worklist.len(), "outstanding billings loaded");
            }
            Err(e) => {
                metrics::record_roster_load("failure");
                tracing::error!(error = %e, "failed to load outstanding billings");
            }
        }

        result
    }

    async fn load_inner(&self) -> Result<Vec<OutstandingBilling>, AppError> {
        let raw = self
            .api
            .fetch_roster(self.window_start, self.window_stop)
            .await?;

        let patients = raw
            .into_iter()
            .map(Patient::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let payment_ids = distinct_payment_ids(&patients);
        let cache = self.resolve_payment_amounts(&payment_ids).await;

        let mut seen = HashSet::new();
        let mut worklist = Vec::new();

        for patient in &patients {
            // Payments always post against the patient's first billing
            // record, not the row being viewed.
            // TODO: raise with the billing product owner whether payments
            // should target the billing record actually displayed when a
            // patient has several.
            let payment_target = patient.billings.first().map(|b| b.id.clone());

            for (index, billing) in patient.billings.iter().enumerate() {
                if billing.down_payment <= Decimal::ZERO {
                    continue;
                }

                let subsequent = subsequent_total(billing, &cache);
                let balance = filter_balance(billing, subsequent);
                if balance <= Decimal::ZERO {
                    continue;
                }

                let key = composite_key(&patient.id, index);
                if !seen.insert(key.clone()) {
                    continue;
                }

                worklist.push(OutstandingBilling {
                    key,
                    patient_id: patient.id.clone(),
                    patient_name: patient.display_name.clone(),
                    payment_target_id: payment_target
                        .clone()
                        .unwrap_or_else(|| billing.id.clone()),
                    amount_due: amount_due(billing, subsequent),
                    filter_balance: balance,
                    billing: billing.clone(),
                });
            }
        }

        Ok(worklist)
    }

    /// Resolve every distinct payment id with one lookup each, all issued
    /// concurrently. A failed lookup resolves to `Unavailable` instead of
    /// failing the batch; the caller gets a complete cache either way.
    pub async fn resolve_payment_amounts(&self, payment_ids: &[String]) -> PaymentAmountCache {
        let lookups = payment_ids.iter().map(|payment_id| {
            let api = &self.api;
            async move {
                match api.fetch_payment(payment_id).await {
                    Ok(raw) => {
                        metrics::record_payment_lookup("success");
                        (
                            payment_id.clone(),
                            ResolvedAmount::Amount(crate::models::parse_money(&raw.amount)),
                        )
                    }
                    Err(e) => {
                        metrics::record_payment_lookup("failure");
                        tracing::warn!(
                            payment_id = %payment_id,
                            error = %e,
                            "payment lookup failed, amount treated as unavailable"
                        );
                        (payment_id.clone(), ResolvedAmount::Unavailable)
                    }
                }
            }
        });

        futures::future::join_all(lookups).await.into_iter().collect()
    }

    /// Post a payment against a billing record. The worklist is not touched
    /// here; callers reload it in full after a successful post.
    pub async fn submit_payment(&self, billing_id: &str, amount: &str) -> Result<(), AppError> {
        match self.api.post_payment(billing_id, amount).await {
            Ok(()) => {
                metrics::record_payment_submission("success");
                Ok(())
            }
            Err(e) => {
                metrics::record_payment_submission("failure");
                Err(e)
            }
        }
    }
}

/// Dedup key for one worklist row. Billing ids repeat across patients in the
/// roster view, so the key is the patient id plus the billing's index within
/// that patient.
pub fn composite_key(patient_id: &str, billing_index: usize) -> String {
    format!("{}#{}", patient_id, billing_index)
}

/// Sum of the billing's resolved subsequent payments; unavailable amounts
/// count as zero.
pub fn subsequent_total(billing: &Billing, cache: &PaymentAmountCache) -> Decimal {
    billing
        .payments
        .iter()
        .map(|id| cache.amount_of(id))
        .sum()
}

/// Balance used by the worklist membership predicate:
/// `charge - down_payment - subsequent`.
pub fn filter_balance(billing: &Billing, subsequent_total: Decimal) -> Decimal {
    billing.charge_amount - billing.down_payment - subsequent_total
}

/// Figure shown as "Amount Due" in the payment modal: `charge - subsequent`.
///
/// The down payment is not subtracted here, while the worklist filter
/// ([`filter_balance`]) does subtract it. Negative values are not clamped.
// TODO: confirm with the billing product owner whether the modal figure
// should also subtract the down payment, and unify the two formulas if so.
pub fn amount_due(billing: &Billing, subsequent_total: Decimal) -> Decimal {
    billing.charge_amount - subsequent_total
}

fn distinct_payment_ids(patients: &[Patient]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for patient in patients {
        for billing in &patient.billings {
            for id in &billing.payments {
                if seen.insert(id.clone()) {
                    ids.push(id.clone());
                }
            }
        }
    }
    ids
}
