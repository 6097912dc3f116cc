use crate::error::{GatewayError, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const SANDBOX_ENDPOINT: &str = "sandbox.coinbase.com";
pub const PRODUCTION_ENDPOINT: &str = "coinbase.com";

/// Prefix of the environment variables read by [`GatewayConfig::load`].
pub const ENV_PREFIX: &str = "COINBASE";

/// Adapter configuration: credentials plus the provider host to talk to.
#[derive(Clone, Deserialize)]
pub struct GatewayConfig {
    /// API key, sent as `ACCESS_KEY` and mixed into the custom token.
    pub key: String,
    /// Shared secret used to sign requests.
    pub secret: String,
    /// Provider host, e.g. `sandbox.coinbase.com`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Must stay `true`: the provider captures funds immediately.
    #[serde(default = "default_capture")]
    pub capture: bool,
    /// Overrides `https://api.<endpoint>`.
    #[serde(default)]
    pub api_root: Option<String>,
    /// Overrides `https://<endpoint>`.
    #[serde(default)]
    pub checkout_root: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    SANDBOX_ENDPOINT.to_string()
}

fn default_capture() -> bool {
    true
}

impl GatewayConfig {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            endpoint: default_endpoint(),
            capture: default_capture(),
            api_root: None,
            checkout_root: None,
            request_timeout_secs: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_capture(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }

    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = Some(api_root.into());
        self
    }

    pub fn with_checkout_root(mut self, checkout_root: impl Into<String>) -> Self {
        self.checkout_root = Some(checkout_root.into());
        self
    }

    /// Loads configuration from an optional TOML file, overridden by
    /// `COINBASE_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.key.is_empty() {
            return Err(GatewayError::Configuration("API key is empty".to_string()));
        }
        if self.secret.is_empty() {
            return Err(GatewayError::Configuration("API secret is empty".to_string()));
        }
        if self.endpoint.is_empty() {
            return Err(GatewayError::Configuration("endpoint is empty".to_string()));
        }
        Ok(())
    }

    /// `https://api.<endpoint>/v1/buttons`
    pub fn api_url(&self) -> String {
        let root = match &self.api_root {
            Some(root) => root.trim_end_matches('/').to_string(),
            None => format!("https://api.{}", self.endpoint),
        };
        format!("{}/v1/buttons", root)
    }

    /// `https://<endpoint>/checkouts`
    pub fn checkout_url(&self) -> String {
        let root = match &self.checkout_root {
            Some(root) => root.trim_end_matches('/').to_string(),
            None => format!("https://{}", self.endpoint),
        };
        format!("{}/checkouts", root)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("key", &self.key)
            .field("secret", &"***")
            .field("endpoint", &self.endpoint)
            .field("capture", &self.capture)
            .field("api_root", &self.api_root)
            .field("checkout_root", &self.checkout_root)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
