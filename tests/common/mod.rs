//! Common test utilities for cashier-console integration tests.

#![allow(dead_code)]

use std::sync::Once;

use cashier_console::services::{BillingReconciler, CashierConsole, HttpHospitalApi};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,cashier_console=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Build a reconciler pointed at the mock server, using the default test
/// roster window `0/100`.
pub fn test_reconciler(server: &MockServer) -> BillingReconciler<HttpHospitalApi> {
    init_tracing();
    BillingReconciler::new(HttpHospitalApi::new(server.uri()), 0, 100)
}

/// Build a console pointed at the mock server.
pub fn test_console(server: &MockServer) -> CashierConsole<HttpHospitalApi> {
    CashierConsole::new(test_reconciler(server))
}

pub fn billing_json(id: &str, charge: &str, down: &str, payments: &[&str]) -> Value {
    json!({
        "id": id,
        "charge_amount": charge,
        "down_payment": down,
        "payments": payments,
        "procedure_code": "null",
        "diagnosis_code": "null",
    })
}

pub fn patient_json(id: &str, first_name: &str, last_name: &str, billings: Vec<Value>) -> Value {
    json!({
        "id": id,
        "first_name": first_name,
        "last_name": last_name,
        "billings": billings,
    })
}

/// Mount the roster endpoint, expecting it to be hit `expected_calls` times.
pub async fn mount_roster(server: &MockServer, patients: Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/patient/patient-with-payment/0/100/payment/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(patients))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Mount a successful payment lookup for one payment id.
pub async fn mount_payment(server: &MockServer, payment_id: &str, amount: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/billing/payment/{}/", payment_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "amount": amount })))
        .mount(server)
        .await;
}

/// Mount a failing payment lookup for one payment id.
pub async fn mount_payment_failure(server: &MockServer, payment_id: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/billing/payment/{}/", payment_id)))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}
