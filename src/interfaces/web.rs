//! Framework-agnostic entry points for the web layer that embeds the gateway.
//!
//! The surrounding server owns routing and request parsing; these helpers look
//! the payment up by token, run the gateway and tell the server what to answer.

use crate::application::gateway::CoinbaseGateway;
use crate::domain::callback::CallbackVerdict;
use crate::error::Result;
use http::StatusCode;

/// What the web layer should send back to the provider for a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackResponse {
    pub status: StatusCode,
    /// `None` when no payment exists for the token.
    pub verdict: Option<CallbackVerdict>,
}

impl CallbackResponse {
    fn from_verdict(verdict: CallbackVerdict) -> Self {
        let status = if verdict.is_accepted() {
            StatusCode::OK
        } else {
            StatusCode::FORBIDDEN
        };
        Self {
            status,
            verdict: Some(verdict),
        }
    }
}

/// Handles a provider notification for the payment identified by `token`.
///
/// A rejected callback maps to `403 Forbidden` so the provider may retry; an
/// unknown token maps to `404 Not Found`.
pub async fn handle_callback(
    gateway: &CoinbaseGateway,
    token: &str,
    body: &[u8],
) -> Result<CallbackResponse> {
    let Some(mut payment) = gateway.store().get(token).await? else {
        return Ok(CallbackResponse {
            status: StatusCode::NOT_FOUND,
            verdict: None,
        });
    };
    let verdict = gateway.process_callback(&mut payment, body).await?;
    Ok(CallbackResponse::from_verdict(verdict))
}

/// Resolves the hosted checkout URL for the payment identified by `token`.
///
/// Returns `None` when no such payment exists.
pub async fn checkout_redirect(gateway: &CoinbaseGateway, token: &str) -> Result<Option<String>> {
    match gateway.store().get(token).await? {
        Some(payment) => Ok(Some(gateway.action_url(&payment).await?)),
        None => Ok(None),
    }
}
