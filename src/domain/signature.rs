use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Derives the correlation token sent to the provider as `custom`.
///
/// `md5("coinbase-{payment_token}-{api_key}")`, hex encoded. The provider
/// echoes it back in callbacks, which is how a notification is tied to the
/// payment it claims to concern.
pub fn custom_token(payment_token: &str, api_key: &str) -> String {
    let value = format!("coinbase-{}-{}", payment_token, api_key);
    hex::encode(Md5::digest(value.as_bytes()))
}

/// Request nonce: microseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Nonce(pub i64);

impl Nonce {
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_micros())
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Signs `nonce + url + body` with HMAC-SHA256 and returns the hex digest.
pub fn sign(secret: &str, nonce: Nonce, url: &str, body: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(nonce.to_string().as_bytes());
    mac.update(url.as_bytes());
    mac.update(body.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// A fully prepared API call: the exact bytes to send and the headers that
/// authenticate them.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedRequest {
    pub url: String,
    pub nonce: Nonce,
    pub body: String,
    pub signature: String,
}

impl SignedRequest {
    pub fn new(secret: &str, nonce: Nonce, url: impl Into<String>, body: String) -> Self {
        let url = url.into();
        let signature = sign(secret, nonce, &url, &body);
        Self {
            url,
            nonce,
            body,
            signature,
        }
    }
}
