//! HTTP gateway for the hospital management API.
//!
//! Three collaborator endpoints: the patient roster with embedded billings,
//! the per-id payment lookup, and the payment posting endpoint. No retries
//! and no timeouts are configured; failures surface only as transport errors
//! or non-2xx statuses.

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::AppError;
use crate::models::{RawPatient, RawPayment};

#[derive(Debug, Serialize)]
struct AddPaymentRequest {
    amount: String,
}

/// Seam over the hospital API so the reconciler can be exercised against
/// fakes in tests.
#[async_trait]
pub trait HospitalApi: Send + Sync {
    /// GET `/patient/patient-with-payment/{start}/{stop}/payment/`.
    async fn fetch_roster(&self, start: u32, stop: u32) -> Result<Vec<RawPatient>, AppError>;

    /// GET `/billing/payment/{id}/`.
    async fn fetch_payment(&self, payment_id: &str) -> Result<RawPayment, AppError>;

    /// POST `/billing/add-payment-to/{billing_id}/` with `{"amount": "..."}`.
    async fn post_payment(&self, billing_id: &str, amount: &str) -> Result<(), AppError>;
}

/// `reqwest`-backed implementation against a fixed base host.
#[derive(Clone)]
pub struct HttpHospitalApi {
    client: Client,
    base_url: String,
}

impl HttpHospitalApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl HospitalApi for HttpHospitalApi {
    async fn fetch_roster(&self, start: u32, stop: u32) -> Result<Vec<RawPatient>, AppError> {
        let url = self.url(&format!(
            "/patient/patient-with-payment/{}/{}/payment/",
            start, stop
        ));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::RosterFetch(anyhow!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::RosterFetch(anyhow!("failed to read roster body: {}", e)))?;

        tracing::debug!(status = %status, "patient roster response");

        if !status.is_success() {
            tracing::error!(status = %status, "roster endpoint returned an error");
            return Err(AppError::RosterFetch(anyhow!(
                "roster endpoint returned {}: {}",
                status,
                body
            )));
        }

        let patients: Vec<RawPatient> = serde_json::from_str(&body)
            .map_err(|e| AppError::InvalidPayload(anyhow!("malformed roster payload: {}", e)))?;

        tracing::info!(patients = patients.len(), "patient roster loaded");
        Ok(patients)
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<RawPayment, AppError> {
        let url = self.url(&format!("/billing/payment/{}/", payment_id));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::PaymentLookup(anyhow!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::PaymentLookup(anyhow!("failed to read payment body: {}", e))
        })?;

        if !status.is_success() {
            return Err(AppError::PaymentLookup(anyhow!(
                "payment lookup for {} returned {}",
                payment_id,
                status
            )));
        }

        let payment: RawPayment = serde_json::from_str(&body)
            .map_err(|e| AppError::InvalidPayload(anyhow!("malformed payment payload: {}", e)))?;

        tracing::debug!(payment_id = %payment_id, amount = %payment.amount, "payment amount resolved");
        Ok(payment)
    }

    async fn post_payment(&self, billing_id: &str, amount: &str) -> Result<(), AppError> {
        let url = self.url(&format!("/billing/add-payment-to/{}/", billing_id));
        let request = AddPaymentRequest {
            amount: amount.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::PaymentSubmit(anyhow!("request to {} failed: {}", url, e)))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                billing_id = %billing_id,
                status = %status,
                "payment posting failed"
            );
            return Err(AppError::PaymentSubmit(anyhow!(
                "add-payment endpoint returned {}: {}",
                status,
                body
            )));
        }

        tracing::info!(billing_id = %billing_id, amount = %amount, "payment posted");
        Ok(())
    }
}
