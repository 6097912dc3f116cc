use serde::Deserialize;
use std::fmt;

/// Notification body posted by the provider once a checkout completes.
///
/// Every field is optional at this level so a structurally incomplete body
/// can be told apart from one that is not JSON at all.
#[derive(Debug, Deserialize, Default)]
pub struct CallbackPayload {
    #[serde(default)]
    pub order: Option<CallbackOrder>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CallbackOrder {
    #[serde(default)]
    pub custom: Option<String>,
    #[serde(default)]
    pub transaction: Option<CallbackTransaction>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CallbackTransaction {
    #[serde(default)]
    pub id: Option<String>,
}

impl CallbackPayload {
    pub fn parse(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    pub fn custom(&self) -> Option<&str> {
        self.order.as_ref()?.custom.as_deref()
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.order.as_ref()?.transaction.as_ref()?.id.as_deref()
    }
}

/// Why a callback was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The body is not a JSON document of the expected shape.
    MalformedBody,
    /// A required field is absent; holds its dotted path.
    MissingField(&'static str),
    /// `order.custom` does not match the token derived for the payment.
    TokenMismatch,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::MalformedBody => write!(f, "malformed body"),
            RejectReason::MissingField(field) => write!(f, "missing field `{}`", field),
            RejectReason::TokenMismatch => write!(f, "custom token mismatch"),
        }
    }
}

/// Outcome of verifying a provider callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackVerdict {
    /// Authenticated and the payment moved from waiting to confirmed.
    Confirmed,
    /// Authenticated, but the payment was not waiting so nothing changed.
    Acknowledged,
    Rejected(RejectReason),
}

impl CallbackVerdict {
    /// Whether the callback was authenticated, regardless of any state change.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, CallbackVerdict::Rejected(_))
    }
}
