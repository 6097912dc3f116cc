use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle states of a payment record.
///
/// The gateway only ever moves a record from `Waiting` to `Confirmed`; every
/// other transition belongs to the application that owns the record.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Unknown,
    Waiting,
    Confirmed,
    Rejected,
    Error,
    Refunded,
}

/// Where the provider and the payer are sent back to once checkout ends.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
pub struct ReturnUrls {
    /// Server-to-server notification endpoint.
    pub process: String,
    pub success: String,
    pub failure: String,
}

/// A payment record as seen by the gateway.
///
/// The record is created and persisted by the caller before checkout starts.
/// The gateway reads it to build the checkout request and mutates it only
/// when an authenticated callback confirms the payment.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Payment {
    /// The unique, caller-assigned token identifying this payment.
    pub token: String,
    pub description: String,
    pub total: Decimal,
    /// ISO 4217 currency code, e.g. `USD`.
    pub currency: String,
    #[serde(default)]
    pub status: PaymentStatus,
    /// Provider-side transaction identifier, set on confirmation.
    #[serde(default)]
    pub transaction_id: Option<String>,
    pub urls: ReturnUrls,
}

impl Payment {
    pub fn new(
        token: impl Into<String>,
        description: impl Into<String>,
        total: Decimal,
        currency: impl Into<String>,
        urls: ReturnUrls,
    ) -> Self {
        Self {
            token: token.into(),
            description: description.into(),
            total,
            currency: currency.into(),
            status: PaymentStatus::Waiting,
            transaction_id: None,
            urls,
        }
    }

    pub fn process_url(&self) -> &str {
        &self.urls.process
    }

    pub fn success_url(&self) -> &str {
        &self.urls.success
    }

    pub fn failure_url(&self) -> &str {
        &self.urls.failure
    }

    pub fn change_status(&mut self, status: PaymentStatus) {
        self.status = status;
    }

    /// Records the provider transaction and confirms the payment.
    ///
    /// Returns `false` without touching the record unless it is still waiting,
    /// so duplicate notifications leave the first confirmation intact.
    pub fn confirm(&mut self, transaction_id: impl Into<String>) -> bool {
        if self.status != PaymentStatus::Waiting {
            return false;
        }
        self.transaction_id = Some(transaction_id.into());
        self.change_status(PaymentStatus::Confirmed);
        true
    }
}
