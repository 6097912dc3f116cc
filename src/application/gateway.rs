use crate::config::GatewayConfig;
use crate::domain::button::{ButtonAttributes, canonical_body};
use crate::domain::callback::{CallbackPayload, CallbackVerdict, RejectReason};
use crate::domain::payment::{Payment, PaymentStatus};
use crate::domain::ports::{ButtonApiBox, PaymentStoreBox};
use crate::domain::signature::{Nonce, SignedRequest, custom_token};
use constant_time_eq::constant_time_eq;
use crate::error::{GatewayError, Result};
use crate::infrastructure::http::HttpButtonApi;
use tracing::{debug, info, warn};

/// Coinbase checkout adapter.
///
/// `CoinbaseGateway` turns a payment record into a hosted-checkout redirect and
/// authenticates the asynchronous notification the provider sends once the
/// payer has paid. It owns the provider API client and the payment store the
/// embedding application persists records in.
pub struct CoinbaseGateway {
    config: GatewayConfig,
    api: ButtonApiBox,
    store: PaymentStoreBox,
}

impl CoinbaseGateway {
    /// Creates a gateway talking to the provider over HTTP.
    ///
    /// Fails with `UnsupportedMode` when `capture` is disabled: the provider
    /// has no pre-authorization step distinct from capture.
    pub fn new(config: GatewayConfig, store: PaymentStoreBox) -> Result<Self> {
        Self::check_capture(&config)?;
        let api = HttpButtonApi::with_timeout(config.request_timeout())?;
        Self::with_api(config, Box::new(api), store)
    }

    /// Creates a gateway with a caller-supplied button API implementation.
    pub fn with_api(config: GatewayConfig, api: ButtonApiBox, store: PaymentStoreBox) -> Result<Self> {
        Self::check_capture(&config)?;
        config.validate()?;
        Ok(Self { config, api, store })
    }

    fn check_capture(config: &GatewayConfig) -> Result<()> {
        if !config.capture {
            return Err(GatewayError::UnsupportedMode(
                "Coinbase does not support pre-authorization".to_string(),
            ));
        }
        Ok(())
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn store(&self) -> &PaymentStoreBox {
        &self.store
    }

    /// The token echoed back by the provider for `payment`.
    pub fn custom_token(&self, payment: &Payment) -> String {
        custom_token(&payment.token, &self.config.key)
    }

    /// Builds the signed button request for `payment` using `nonce`.
    pub fn signed_request(&self, payment: &Payment, nonce: Nonce) -> Result<SignedRequest> {
        let attributes = ButtonAttributes::for_payment(payment, self.custom_token(payment));
        let body = canonical_body(&attributes)?;
        Ok(SignedRequest::new(
            &self.config.secret,
            nonce,
            self.config.api_url(),
            body,
        ))
    }

    /// Registers the payment with the provider and returns its checkout code.
    pub async fn checkout_code(&self, payment: &Payment) -> Result<String> {
        let request = self.signed_request(payment, Nonce::now())?;
        debug!(
            endpoint = %self.config.endpoint,
            nonce = %request.nonce,
            payment = %payment.token,
            "Creating checkout button"
        );
        let code = self.api.create_button(&self.config.key, &request).await?;
        info!(payment = %payment.token, code = %code, "Checkout button created");
        Ok(code)
    }

    /// The hosted checkout URL the payer should be redirected to.
    pub async fn action_url(&self, payment: &Payment) -> Result<String> {
        let code = self.checkout_code(payment).await?;
        Ok(format!("{}/{}", self.config.checkout_url(), code))
    }

    /// Authenticates a provider notification for `payment`.
    ///
    /// Untrusted or garbage input yields `CallbackVerdict::Rejected` and leaves
    /// the record untouched. An authenticated callback confirms a waiting
    /// payment and persists it; for any other status it is acknowledged
    /// without changes, so redelivery is harmless. Only storage failures are
    /// reported as errors, and `payment` is updated only once the confirmed
    /// record has been saved.
    pub async fn process_callback(
        &self,
        payment: &mut Payment,
        body: &[u8],
    ) -> Result<CallbackVerdict> {
        match self.verify(payment, body) {
            Err(reason) => {
                warn!(payment = %payment.token, %reason, "Callback rejected");
                Ok(CallbackVerdict::Rejected(reason))
            }
            Ok(None) => {
                info!(payment = %payment.token, status = ?payment.status, "Duplicate callback acknowledged");
                Ok(CallbackVerdict::Acknowledged)
            }
            Ok(Some(transaction_id)) => {
                let mut confirmed = payment.clone();
                confirmed.confirm(transaction_id.as_str());
                self.store.save(confirmed.clone()).await?;
                *payment = confirmed;
                info!(payment = %payment.token, transaction = %transaction_id, "Payment confirmed");
                Ok(CallbackVerdict::Confirmed)
            }
        }
    }

    /// Checks `body` against `payment` without touching it.
    ///
    /// `Ok(Some(id))` carries the transaction to confirm, `Ok(None)` means the
    /// callback is genuine but the payment is no longer waiting.
    fn verify(
        &self,
        payment: &Payment,
        body: &[u8],
    ) -> std::result::Result<Option<String>, RejectReason> {
        let payload = CallbackPayload::parse(body).map_err(|_| RejectReason::MalformedBody)?;
        let custom = payload
            .custom()
            .ok_or(RejectReason::MissingField("order.custom"))?;
        let expected = self.custom_token(payment);
        if !constant_time_eq(custom.as_bytes(), expected.as_bytes()) {
            return Err(RejectReason::TokenMismatch);
        }
        if payment.status != PaymentStatus::Waiting {
            return Ok(None);
        }
        let transaction_id = payload
            .transaction_id()
            .ok_or(RejectReason::MissingField("order.transaction.id"))?;
        Ok(Some(transaction_id.to_string()))
    }
}
