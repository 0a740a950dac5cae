//! Cashier console view-model.
//!
//! Holds the loaded worklist and the payment modal, and drives the
//! open/submit/reload cycle a UI layer would bind to.

use anyhow::anyhow;

use crate::error::AppError;
use crate::models::{ModalState, OutstandingBilling, PaymentModal};
use crate::services::gateway::HospitalApi;
use crate::services::reconciler::BillingReconciler;

pub struct CashierConsole<A: HospitalApi> {
    reconciler: BillingReconciler<A>,
    modal: PaymentModal,
    worklist: Vec<OutstandingBilling>,
}

impl<A: HospitalApi> CashierConsole<A> {
    pub fn new(reconciler: BillingReconciler<A>) -> Self {
        Self {
            reconciler,
            modal: PaymentModal::new(),
            worklist: Vec::new(),
        }
    }

    pub fn worklist(&self) -> &[OutstandingBilling] {
        &self.worklist
    }

    pub fn modal(&self) -> &PaymentModal {
        &self.modal
    }

    /// Full reload of the outstanding-billings worklist. The balances shown
    /// are never adjusted locally; this is the only way they change.
    pub async fn refresh(&mut self) -> Result<(), AppError> {
        self.worklist = self.reconciler.load_outstanding_billings().await?;
        Ok(())
    }

    /// Open the payment modal for a worklist row. Returns `false` when the
    /// key no longer matches a loaded row.
    pub fn open_payment_modal(&mut self, key: &str) -> bool {
        match self.worklist.iter().find(|entry| entry.key == key) {
            Some(entry) => {
                self.modal.open(key, &entry.payment_target_id);
                true
            }
            None => false,
        }
    }

    pub fn set_amount(&mut self, text: &str) {
        self.modal.set_amount(text);
    }

    /// Submit the typed amount against the selected row's payment target.
    ///
    /// On success the modal closes and the worklist reloads end to end,
    /// exactly once. On failure the modal stays open with the typed amount
    /// untouched and the error is returned for display.
    pub async fn submit_payment(&mut self) -> Result<(), AppError> {
        let (billing_id, amount) = self
            .modal
            .begin_submit()
            .ok_or_else(|| AppError::PaymentSubmit(anyhow!("no payment ready to submit")))?;

        match self.reconciler.submit_payment(&billing_id, &amount).await {
            Ok(()) => {
                self.modal.submit_succeeded();
                self.refresh().await
            }
            Err(e) => {
                self.modal.submit_failed();
                Err(e)
            }
        }
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    pub fn modal_state(&self) -> ModalState {
        self.modal.state()
    }
}
