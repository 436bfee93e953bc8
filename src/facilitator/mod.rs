//! Facilitator integration for payment verification and settlement
//!
//! A facilitator checks payment authorizations and settles them on the
//! ledger. The gate treats it as authoritative and opaque: it never inspects a
//! proof itself, it only forwards it here.
//!
//! # Architecture
//!
//! - [`Facilitator`] - The capability the gate depends on
//! - [`FacilitatorClient`] - HTTP implementation talking to a hosted facilitator
//!
//! # Examples
//!
//! ```no_run
//! use x402_cronos::facilitator::{Facilitator, FacilitatorClient};
//! use x402_cronos::requirements::RequirementsParams;
//! use x402_cronos::types::{FacilitatorConfig, Network, PaymentProof};
//!
//! # async fn example() -> x402_cronos::Result<()> {
//! let client = FacilitatorClient::new(FacilitatorConfig::default(), Network::Testnet)?;
//!
//! let requirements = client.generate_payment_requirements(RequirementsParams {
//!     pay_to: "0x419E5aD68d2Ff4d1786FE4bB7ebe7b3563A5A6d7".to_string(),
//!     description: "Tool access".to_string(),
//!     max_amount_required: "20000".to_string(),
//! })?;
//!
//! let proof = PaymentProof::new("eyJ4NDAyVmVyc2lvbiI6MX0=");
//! if client.verify(&proof, &requirements).await?.is_valid {
//!     let receipt = client.settle(&proof, &requirements).await?;
//!     println!("Payment settled: {:?}", receipt.tx_hash);
//! }
//! # Ok(())
//! # }
//! ```

use crate::requirements::{build_requirements, RequirementsParams};
use crate::types::{
    headers, FacilitatorConfig, Network, PaymentProof, PaymentRequirements, SettleResponse,
    SupportedKinds, VerifyResponse, X402_VERSION,
};
use crate::{Result, X402Error};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

#[cfg(test)]
mod tests;

/// Payment verification and settlement capability used by the gate.
///
/// Implementations must be safe to call concurrently from many requests.
/// `verify` is not assumed to be idempotent; the gate calls it at most once
/// per request.
#[async_trait]
pub trait Facilitator: Send + Sync {
    /// Network the facilitator settles on
    fn network(&self) -> Network;

    /// Describe the payment a caller must make
    fn generate_payment_requirements(
        &self,
        params: RequirementsParams,
    ) -> Result<PaymentRequirements> {
        build_requirements(self.network(), params)
    }

    /// Check a proof against the requirements without moving funds
    async fn verify(
        &self,
        proof: &PaymentProof,
        requirements: &PaymentRequirements,
    ) -> Result<VerifyResponse>;

    /// Finalize a verified payment on the ledger
    async fn settle(
        &self,
        proof: &PaymentProof,
        requirements: &PaymentRequirements,
    ) -> Result<SettleResponse>;
}

/// Facilitator client for verifying and settling payments over HTTP
#[derive(Clone)]
pub struct FacilitatorClient {
    /// Base URL of the facilitator service
    url: String,
    /// Network payments are settled on
    network: Network,
    /// HTTP client
    client: Client,
    /// Configuration for authentication headers
    auth_config: Option<crate::types::AuthHeadersFnArc>,
}

impl std::fmt::Debug for FacilitatorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacilitatorClient")
            .field("url", &self.url)
            .field("network", &self.network)
            .field("auth_config", &"<function>")
            .finish()
    }
}

impl FacilitatorClient {
    /// Create a new facilitator client
    pub fn new(config: FacilitatorConfig, network: Network) -> Result<Self> {
        config.validate()?;

        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|e| X402Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            url: config.url.trim_end_matches('/').to_string(),
            network,
            client,
            auth_config: config.create_auth_headers,
        })
    }

    /// Get the base URL of this facilitator
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get supported payment schemes and networks
    pub async fn supported(&self) -> Result<SupportedKinds> {
        let request = self.client.get(format!("{}/supported", self.url));
        let request = self.with_auth_headers(request, "supported")?;

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(X402Error::facilitator_error(format!(
                "Failed to get supported kinds with status: {}",
                response.status()
            )));
        }

        let supported: SupportedKinds = response.json().await?;
        Ok(supported)
    }

    fn with_auth_headers(
        &self,
        mut request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<reqwest::RequestBuilder> {
        if let Some(auth_config) = &self.auth_config {
            let headers = auth_config()?;
            if let Some(endpoint_headers) = headers.get(endpoint) {
                for (key, value) in endpoint_headers {
                    request = request.header(key, value);
                }
            }
        }
        Ok(request)
    }

    async fn post(
        &self,
        endpoint: &str,
        proof: &PaymentProof,
        requirements: &PaymentRequirements,
    ) -> Result<reqwest::Response> {
        let request_body = json!({
            "x402Version": X402_VERSION,
            "paymentHeader": proof,
            "paymentRequirements": requirements,
        });

        tracing::debug!("Sending request to: {}/{}", self.url, endpoint);
        tracing::debug!(
            "Payment requirements: {}",
            serde_json::to_string(requirements).unwrap_or_default()
        );

        let request = self
            .client
            .post(format!("{}/{}", self.url, endpoint))
            .header(headers::X402_VERSION, X402_VERSION.to_string())
            .json(&request_body);
        let request = self.with_auth_headers(request, endpoint)?;

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let response_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            tracing::error!(
                "Facilitator {} failed with status: {}. Response body: {}",
                endpoint,
                status,
                response_body
            );
            return Err(X402Error::facilitator_error(format!(
                "{} failed with status: {}. Response: {}",
                endpoint, status, response_body
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl Facilitator for FacilitatorClient {
    fn network(&self) -> Network {
        self.network
    }

    async fn verify(
        &self,
        proof: &PaymentProof,
        requirements: &PaymentRequirements,
    ) -> Result<VerifyResponse> {
        let response = self.post("verify", proof, requirements).await?;
        let verify_response: VerifyResponse = response.json().await?;
        Ok(verify_response)
    }

    async fn settle(
        &self,
        proof: &PaymentProof,
        requirements: &PaymentRequirements,
    ) -> Result<SettleResponse> {
        let response = self.post("settle", proof, requirements).await?;
        let settle_response: SettleResponse = response.json().await?;
        Ok(settle_response)
    }
}

#[async_trait]
impl<F: Facilitator + ?Sized> Facilitator for std::sync::Arc<F> {
    fn network(&self) -> Network {
        (**self).network()
    }

    fn generate_payment_requirements(
        &self,
        params: RequirementsParams,
    ) -> Result<PaymentRequirements> {
        (**self).generate_payment_requirements(params)
    }

    async fn verify(
        &self,
        proof: &PaymentProof,
        requirements: &PaymentRequirements,
    ) -> Result<VerifyResponse> {
        (**self).verify(proof, requirements).await
    }

    async fn settle(
        &self,
        proof: &PaymentProof,
        requirements: &PaymentRequirements,
    ) -> Result<SettleResponse> {
        (**self).settle(proof, requirements).await
    }
}
