//! Payment modal state machine.
//!
//! `Idle -> ModalOpen` on open, `ModalOpen -> Submitting` on submit, then
//! back to `Idle` on success (worklist reloads) or to `ModalOpen` on failure
//! with the typed amount preserved.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Idle,
    ModalOpen,
    Submitting,
}

impl ModalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ModalOpen => "modal_open",
            Self::Submitting => "submitting",
        }
    }
}

/// Ephemeral UI state for the payment form: which worklist row is selected,
/// which billing id the payment will post against, and the raw amount text
/// the cashier typed.
#[derive(Debug, Clone, Default)]
pub struct PaymentModal {
    state: ModalState,
    selected_key: Option<String>,
    target_billing_id: Option<String>,
    amount_input: String,
}

impl PaymentModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.selected_key.as_deref()
    }

    pub fn amount_input(&self) -> &str {
        &self.amount_input
    }

    /// Open the modal for a worklist row. Any previously typed amount is
    /// cleared.
    pub fn open(&mut self, key: &str, target_billing_id: &str) {
        self.state = ModalState::ModalOpen;
        self.selected_key = Some(key.to_string());
        self.target_billing_id = Some(target_billing_id.to_string());
        self.amount_input.clear();
    }

    /// Store the user-entered amount verbatim. No validation beyond presence
    /// happens before submission.
    pub fn set_amount(&mut self, text: &str) {
        self.amount_input = text.to_string();
    }

    /// Transition to `Submitting` and hand back the target billing id and
    /// amount, or `None` when there is nothing ready to submit (modal not
    /// open, or no amount entered).
    pub fn begin_submit(&mut self) -> Option<(String, String)> {
        if self.state != ModalState::ModalOpen {
            return None;
        }
        let target = self.target_billing_id.clone()?;
        if self.amount_input.trim().is_empty() {
            return None;
        }
        self.state = ModalState::Submitting;
        Some((target, self.amount_input.clone()))
    }

    /// Successful post: close the modal and clear the form.
    pub fn submit_succeeded(&mut self) {
        self.state = ModalState::Idle;
        self.selected_key = None;
        self.target_billing_id = None;
        self.amount_input.clear();
    }

    /// Failed post: reopen the modal, keeping the typed amount so the
    /// cashier can retry.
    pub fn submit_failed(&mut self) {
        self.state = ModalState::ModalOpen;
    }

    pub fn close(&mut self) {
        self.state = ModalState::Idle;
        self.selected_key = None;
        self.target_billing_id = None;
        self.amount_input.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_submit_success_cycle() {
        let mut modal = PaymentModal::new();
        assert_eq!(modal.state(), ModalState::Idle);

        modal.open("p1#0", "b1");
        assert_eq!(modal.state(), ModalState::ModalOpen);
        assert_eq!(modal.selected_key(), Some("p1#0"));

        modal.set_amount("50.00");
        let (target, amount) = modal.begin_submit().unwrap();
        assert_eq!(target, "b1");
        assert_eq!(amount, "50.00");
        assert_eq!(modal.state(), ModalState::Submitting);

        modal.submit_succeeded();
        assert_eq!(modal.state(), ModalState::Idle);
        assert_eq!(modal.amount_input(), "");
    }

    #[test]
    fn test_failure_preserves_typed_amount() {
        let mut modal = PaymentModal::new();
        modal.open("p1#0", "b1");
        modal.set_amount("75.00");
        modal.begin_submit().unwrap();

        modal.submit_failed();
        assert_eq!(modal.state(), ModalState::ModalOpen);
        assert_eq!(modal.amount_input(), "75.00");
    }

    #[test]
    fn test_submit_requires_open_modal_and_amount() {
        let mut modal = PaymentModal::new();
        assert!(modal.begin_submit().is_none());

        modal.open("p1#0", "b1");
        assert!(modal.begin_submit().is_none());
        assert_eq!(modal.state(), ModalState::ModalOpen);

        modal.set_amount("   ");
        assert!(modal.begin_submit().is_none());
    }

    #[test]
    fn test_reopen_clears_previous_amount() {
        let mut modal = PaymentModal::new();
        modal.open("p1#0", "b1");
        modal.set_amount("20");
        modal.close();

        modal.open("p2#0", "b2");
        assert_eq!(modal.amount_input(), "");
    }
}
