use super::payment::Payment;
use super::signature::SignedRequest;
use crate::error::Result;
use async_trait::async_trait;

/// Persistence for payment records, owned by the embedding application.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn save(&self, payment: Payment) -> Result<()>;
    async fn get(&self, token: &str) -> Result<Option<Payment>>;
}

/// The provider's button-creation API.
#[async_trait]
pub trait ButtonApi: Send + Sync {
    /// Sends a signed button request and returns the checkout code.
    async fn create_button(&self, key: &str, request: &SignedRequest) -> Result<String>;
}

pub type PaymentStoreBox = Box<dyn PaymentStore>;
pub type ButtonApiBox = Box<dyn ButtonApi>;
