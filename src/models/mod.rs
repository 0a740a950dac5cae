//! Domain models for the cashier console.

mod billing;
mod payment;
mod session;

pub use billing::{parse_money, Billing, OutstandingBilling, Patient, RawBilling, RawPatient};
pub use payment::{PaymentAmountCache, RawPayment, ResolvedAmount};
pub use session::{ModalState, PaymentModal};
