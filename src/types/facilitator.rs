//! Facilitator configuration and response types

use super::constants::DEFAULT_FACILITATOR_URL;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Type alias for authentication headers function
pub type AuthHeadersFn =
    dyn Fn() -> crate::Result<HashMap<String, HashMap<String, String>>> + Send + Sync;

/// Type alias for authentication headers function wrapped in Arc
pub type AuthHeadersFnArc = Arc<AuthHeadersFn>;

/// Type alias for authentication headers function wrapped in Box
pub type AuthHeadersFnBox = Box<AuthHeadersFn>;

/// Facilitator configuration
#[derive(Clone)]
pub struct FacilitatorConfig {
    /// Base URL of the facilitator service
    pub url: String,
    /// Request timeout
    pub timeout: Option<Duration>,
    /// Function to create authentication headers, keyed by endpoint ("verify", "settle", "supported")
    pub create_auth_headers: Option<AuthHeadersFnArc>,
}

impl std::fmt::Debug for FacilitatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacilitatorConfig")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .field("create_auth_headers", &"<function>")
            .finish()
    }
}

impl FacilitatorConfig {
    /// Create a new facilitator config
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
            create_auth_headers: None,
        }
    }

    /// Validate the facilitator configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.url.is_empty() {
            return Err(crate::X402Error::config("Facilitator URL cannot be empty"));
        }

        let parsed = url::Url::parse(&self.url).map_err(|e| {
            crate::X402Error::config(format!("Invalid facilitator URL '{}': {}", self.url, e))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(crate::X402Error::config(
                "Facilitator URL must start with http:// or https://",
            ));
        }

        Ok(())
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the auth headers creator
    pub fn with_auth_headers(mut self, creator: AuthHeadersFnBox) -> Self {
        self.create_auth_headers = Some(Arc::from(creator));
        self
    }
}

impl Default for FacilitatorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FACILITATOR_URL).with_timeout(Duration::from_secs(30))
    }
}

/// Payment verification response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyResponse {
    /// Whether the payment is valid
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    /// Reason for invalidity (if applicable)
    #[serde(rename = "invalidReason", skip_serializing_if = "Option::is_none")]
    pub invalid_reason: Option<String>,
}

impl VerifyResponse {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            invalid_reason: None,
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            invalid_reason: Some(reason.into()),
        }
    }
}

/// Payment settlement response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettleResponse {
    /// Event tag reported by the facilitator (e.g. "payment.settled")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    /// Transaction hash of the settlement
    #[serde(
        rename = "txHash",
        alias = "transaction",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tx_hash: Option<String>,
    /// Network where the transaction was executed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    /// Payer address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Payee address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Settled amount in base units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Error reason if settlement failed
    #[serde(
        default,
        alias = "errorReason",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
}

impl SettleResponse {
    /// Whether the facilitator reports the payment as settled
    pub fn is_settled(&self) -> bool {
        self.error.is_none()
            && (self.tx_hash.is_some() || self.event.as_deref() == Some("payment.settled"))
    }

    /// Encode the settle response to base64
    pub fn to_base64(&self) -> crate::Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(general_purpose::STANDARD.encode(json))
    }

    /// Decode a settle response from an `X-PAYMENT-RESPONSE` header value
    pub fn from_base64(encoded: &str) -> crate::Result<Self> {
        let decoded = general_purpose::STANDARD.decode(encoded.trim())?;
        Ok(serde_json::from_slice(&decoded)?)
    }
}

/// Supported payment schemes and networks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportedKinds {
    /// List of supported payment schemes and networks
    pub kinds: Vec<SupportedKind>,
}

/// Individual supported payment scheme and network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportedKind {
    /// Protocol version
    #[serde(rename = "x402Version")]
    pub x402_version: u32,
    /// Payment scheme identifier
    pub scheme: String,
    /// Blockchain network identifier
    pub network: String,
    /// Additional metadata provided by the facilitator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}
