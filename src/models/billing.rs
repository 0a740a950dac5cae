//! Billing records: raw API images and validated domain types.

use std::str::FromStr;

use anyhow::anyhow;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::AppError;

/// Sentinel string the hospital API emits where a field is absent.
const NULL_SENTINEL: &str = "null";

// ============================================================================
// Raw boundary DTOs
// ============================================================================

/// Billing sub-record exactly as the roster endpoint returns it. All money
/// fields arrive as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBilling {
    pub id: String,
    #[serde(default)]
    pub charge_amount: String,
    #[serde(default)]
    pub down_payment: String,
    /// Ids of subsequent payments, resolved to amounts via separate lookups.
    #[serde(default)]
    pub payments: Vec<String>,
    #[serde(default)]
    pub procedure_code: Option<String>,
    #[serde(default)]
    pub diagnosis_code: Option<String>,
}

/// Patient entry from the roster endpoint, with embedded billings.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPatient {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub billings: Vec<RawBilling>,
}

// ============================================================================
// Validated domain types
// ============================================================================

/// Parse a decimal money string, defaulting to zero on anything non-numeric.
/// The API emits free-form strings here; a bad value must never block
/// rendering.
pub fn parse_money(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

fn optional_code(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.is_empty() && s != NULL_SENTINEL)
}

#[derive(Debug, Clone)]
pub struct Billing {
    pub id: String,
    pub charge_amount: Decimal,
    pub down_payment: Decimal,
    pub payments: Vec<String>,
    pub procedure_code: Option<String>,
    pub diagnosis_code: Option<String>,
}

impl TryFrom<RawBilling> for Billing {
    type Error = AppError;

    fn try_from(raw: RawBilling) -> Result<Self, Self::Error> {
        if raw.id.is_empty() {
            return Err(AppError::InvalidPayload(anyhow!(
                "billing record with empty id"
            )));
        }

        Ok(Self {
            id: raw.id,
            charge_amount: parse_money(&raw.charge_amount),
            down_payment: parse_money(&raw.down_payment),
            payments: raw.payments,
            procedure_code: optional_code(raw.procedure_code),
            diagnosis_code: optional_code(raw.diagnosis_code),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Patient {
    pub id: String,
    pub display_name: String,
    pub billings: Vec<Billing>,
}

impl TryFrom<RawPatient> for Patient {
    type Error = AppError;

    fn try_from(raw: RawPatient) -> Result<Self, Self::Error> {
        if raw.id.is_empty() {
            return Err(AppError::InvalidPayload(anyhow!(
                "patient record with empty id"
            )));
        }

        let mut name_parts: Vec<&str> = Vec::new();
        for part in [raw.first_name.as_deref(), raw.last_name.as_deref()]
            .into_iter()
            .flatten()
        {
            if !part.is_empty() && part != NULL_SENTINEL {
                name_parts.push(part);
            }
        }
        let display_name = if name_parts.is_empty() {
            raw.id.clone()
        } else {
            name_parts.join(" ")
        };

        let billings = raw
            .billings
            .into_iter()
            .map(Billing::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: raw.id,
            display_name,
            billings,
        })
    }
}

/// One row of the cashier's down-payment worklist.
#[derive(Debug, Clone)]
pub struct OutstandingBilling {
    /// Composite dedup key, unique per (patient, billing-index) pair. Billing
    /// ids are not globally unique across patients in the roster view.
    pub key: String,
    pub patient_id: String,
    pub patient_name: String,
    /// Billing id payments are posted against: the patient's first billing
    /// record, regardless of which row is displayed.
    pub payment_target_id: String,
    pub billing: Billing,
    /// Figure shown as "Amount Due" in the payment modal.
    pub amount_due: Decimal,
    /// Balance used by the worklist membership predicate.
    pub filter_balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("500.00"), Decimal::from_str("500").unwrap());
        assert_eq!(parse_money(" 12.5 "), Decimal::from_str("12.5").unwrap());
        assert_eq!(parse_money("abc"), Decimal::ZERO);
        assert_eq!(parse_money(""), Decimal::ZERO);
        assert_eq!(parse_money("null"), Decimal::ZERO);
    }

    #[test]
    fn test_null_sentinel_maps_to_none() {
        let raw = RawBilling {
            id: "b1".to_string(),
            charge_amount: "100.00".to_string(),
            down_payment: "10.00".to_string(),
            payments: vec![],
            procedure_code: Some("null".to_string()),
            diagnosis_code: Some("Malaria".to_string()),
        };

        let billing = Billing::try_from(raw).unwrap();
        assert_eq!(billing.procedure_code, None);
        assert_eq!(billing.diagnosis_code.as_deref(), Some("Malaria"));
    }

    #[test]
    fn test_empty_billing_id_rejected() {
        let raw = RawBilling {
            id: String::new(),
            charge_amount: "100.00".to_string(),
            down_payment: "0".to_string(),
            payments: vec![],
            procedure_code: None,
            diagnosis_code: None,
        };

        assert!(Billing::try_from(raw).is_err());
    }

    #[test]
    fn test_patient_display_name_falls_back_to_id() {
        let raw = RawPatient {
            id: "p1".to_string(),
            first_name: Some("null".to_string()),
            last_name: None,
            billings: vec![],
        };

        let patient = Patient::try_from(raw).unwrap();
        assert_eq!(patient.display_name, "p1");
    }
}
