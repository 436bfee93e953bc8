//! Payment-related types

use super::constants::{schemes, DEFAULT_MAX_TIMEOUT_SECONDS};
use super::network::Network;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// x402 protocol version
pub const X402_VERSION: u32 = 1;

/// Payment requirements for a protected operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequirements {
    /// Payment scheme identifier (e.g., "exact")
    pub scheme: String,
    /// Network identifier (e.g., "cronos-testnet")
    pub network: String,
    /// Recipient wallet address for the payment
    #[serde(rename = "payTo")]
    pub pay_to: String,
    /// Token contract address
    pub asset: String,
    /// Required payment amount in base units, as a decimal integer string
    #[serde(rename = "maxAmountRequired")]
    pub max_amount_required: String,
    /// Human-readable description of the operation
    pub description: String,
    /// MIME type of the expected response
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Maximum time allowed for payment completion in seconds
    #[serde(rename = "maxTimeoutSeconds")]
    pub max_timeout_seconds: u32,
    /// Scheme-specific additional information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
}

impl PaymentRequirements {
    /// Create requirements for the exact scheme on `network`
    pub fn new(
        network: Network,
        pay_to: impl Into<String>,
        max_amount_required: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            scheme: schemes::EXACT.to_string(),
            network: network.as_str().to_string(),
            pay_to: pay_to.into(),
            asset: network.usdc_address().to_string(),
            max_amount_required: max_amount_required.into(),
            description: description.into(),
            mime_type: Some("application/json".to_string()),
            max_timeout_seconds: DEFAULT_MAX_TIMEOUT_SECONDS,
            extra: None,
        }
    }

    /// Set USDC token information in the extra field
    pub fn set_usdc_info(&mut self, network: Network) -> crate::Result<()> {
        self.extra = Some(serde_json::json!({
            "name": network.usdc_name(),
            "version": "2",
            "chainId": network.chain_id(),
        }));
        Ok(())
    }

    /// Required amount in base units
    pub fn amount_in_base_units(&self) -> crate::Result<u128> {
        self.max_amount_required.parse().map_err(|_| {
            crate::X402Error::config(format!(
                "Invalid amount format: {}",
                self.max_amount_required
            ))
        })
    }

    /// Encode the requirements for the `X-PAYMENT-REQUIRED` header
    pub fn to_base64(&self) -> crate::Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(general_purpose::STANDARD.encode(json))
    }

    /// Decode requirements from an `X-PAYMENT-REQUIRED` header value
    pub fn from_base64(encoded: &str) -> crate::Result<Self> {
        let decoded = general_purpose::STANDARD.decode(encoded.trim())?;
        let requirements: PaymentRequirements = serde_json::from_slice(&decoded)?;
        Ok(requirements)
    }
}

/// Opaque payment proof taken verbatim from the `X-PAYMENT` header.
///
/// The gate never looks inside; it is forwarded to the facilitator as-is.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentProof(String);

impl PaymentProof {
    pub fn new(proof: impl Into<String>) -> Self {
        Self(proof.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Proofs are bearer authorizations; keep them out of logs.
impl std::fmt::Debug for PaymentProof {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentProof(<{} bytes>)", self.0.len())
    }
}

impl From<&str> for PaymentProof {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PaymentProof {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Body of the 402 response sent when no proof was supplied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequiredBody {
    /// Always "Payment Required"
    pub error: String,
    /// The requirements in plain form
    pub requirements: PaymentRequirements,
}

impl PaymentRequiredBody {
    pub fn new(requirements: PaymentRequirements) -> Self {
        Self {
            error: "Payment Required".to_string(),
            requirements,
        }
    }
}

/// Body of an error response, e.g. a rejected proof
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentErrorBody {
    pub error: String,
}

impl PaymentErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
