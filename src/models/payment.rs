//! Payment lookup results and the per-load-cycle amount cache.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Response body of the payment-lookup endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPayment {
    #[serde(default)]
    pub amount: String,
}

/// Outcome of resolving one payment reference. A failed lookup never fails
/// the batch; it resolves to `Unavailable` and counts as zero in arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAmount {
    Amount(Decimal),
    Unavailable,
}

impl ResolvedAmount {
    /// Value used in balance arithmetic.
    pub fn as_decimal(&self) -> Decimal {
        match self {
            Self::Amount(amount) => *amount,
            Self::Unavailable => Decimal::ZERO,
        }
    }
}

impl fmt::Display for ResolvedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(amount) => write!(f, "{}", amount),
            Self::Unavailable => f.write_str("N/A"),
        }
    }
}

/// Resolved payment amounts keyed by payment id.
///
/// Scoped to a single roster-load cycle: built once per load, passed through
/// the balance computation, then dropped. Never promoted to shared state.
#[derive(Debug, Clone, Default)]
pub struct PaymentAmountCache {
    entries: HashMap<String, ResolvedAmount>,
}

impl PaymentAmountCache {
    pub fn insert(&mut self, payment_id: String, amount: ResolvedAmount) {
        self.entries.insert(payment_id, amount);
    }

    pub fn resolved(&self, payment_id: &str) -> Option<&ResolvedAmount> {
        self.entries.get(payment_id)
    }

    /// Arithmetic value for a payment id; unresolved or unavailable ids
    /// count as zero.
    pub fn amount_of(&self, payment_id: &str) -> Decimal {
        self.entries
            .get(payment_id)
            .map(ResolvedAmount::as_decimal)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ResolvedAmount)> for PaymentAmountCache {
    fn from_iter<I: IntoIterator<Item = (String, ResolvedAmount)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_unavailable_counts_as_zero() {
        let mut cache = PaymentAmountCache::default();
        cache.insert(
            "pay1".to_string(),
            ResolvedAmount::Amount(Decimal::from_str("50.00").unwrap()),
        );
        cache.insert("pay2".to_string(), ResolvedAmount::Unavailable);

        assert_eq!(cache.amount_of("pay1"), Decimal::from_str("50").unwrap());
        assert_eq!(cache.amount_of("pay2"), Decimal::ZERO);
        assert_eq!(cache.amount_of("missing"), Decimal::ZERO);
    }

    #[test]
    fn test_unavailable_renders_as_na() {
        assert_eq!(ResolvedAmount::Unavailable.to_string(), "N/A");
    }
}
