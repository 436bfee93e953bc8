//! HTTP client for calling paid tools
//!
//! Drives the caller side of the 402 handshake: request without payment,
//! decode the `X-PAYMENT-REQUIRED` header, obtain a proof for those
//! requirements, then resend with `X-PAYMENT`. Producing the proof (signing a
//! transfer authorization) is left to the caller.

use crate::types::{headers, PaymentProof, PaymentRequirements, SettleResponse};
use crate::{Result, X402Error};
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;

/// Successful paid call
#[derive(Debug, Clone)]
pub struct PaidResponse<T> {
    /// Decoded body returned by the tool
    pub body: T,
    /// Settlement receipt, when the server confirmed one
    pub settlement: Option<SettleResponse>,
}

/// Client for a single paid endpoint
#[derive(Debug, Clone)]
pub struct X402Client {
    url: String,
    client: Client,
}

impl X402Client {
    /// Create a client for the tool at `url` (e.g. `http://localhost:8000/send`)
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, Client::new())
    }

    /// Create a client reusing an existing HTTP client
    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// Endpoint this client calls
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Call without payment and return the requirements from the 402 challenge
    pub async fn fetch_requirements<I: Serialize + ?Sized>(
        &self,
        input: &I,
    ) -> Result<PaymentRequirements> {
        let response = self.client.post(&self.url).json(input).send().await?;
        let status = response.status();

        if status != StatusCode::PAYMENT_REQUIRED {
            let body = response.text().await.unwrap_or_default();
            return Err(X402Error::unexpected_response(format!(
                "Expected 402 Payment Required, got {}: {}",
                status, body
            )));
        }

        let header = response
            .headers()
            .get(headers::X_PAYMENT_REQUIRED)
            .ok_or_else(|| {
                X402Error::unexpected_response("402 response without X-PAYMENT-REQUIRED header")
            })?
            .to_str()
            .map_err(|e| {
                X402Error::unexpected_response(format!("Unreadable X-PAYMENT-REQUIRED header: {}", e))
            })?;

        let requirements = PaymentRequirements::from_base64(header)?;
        tracing::debug!(
            "Payment required: {} base units to {}",
            requirements.max_amount_required,
            requirements.pay_to
        );
        Ok(requirements)
    }

    /// Call with a payment proof attached
    pub async fn call_with_payment<I, T>(
        &self,
        input: &I,
        proof: &PaymentProof,
    ) -> Result<PaidResponse<T>>
    where
        I: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(&self.url)
            .header(headers::X_PAYMENT, proof.as_str())
            .json(input)
            .send()
            .await?;

        let status = response.status();
        let settlement = match response.headers().get(headers::X_PAYMENT_RESPONSE) {
            Some(value) => match value.to_str() {
                Ok(encoded) => SettleResponse::from_base64(encoded).ok(),
                Err(_) => None,
            },
            None => None,
        };

        if status == StatusCode::PAYMENT_REQUIRED {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let reason = body
                .get("error")
                .and_then(|e| e.as_str())
                .unwrap_or(crate::middleware::INVALID_PAYMENT);
            return Err(X402Error::payment_invalid(reason));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(X402Error::unexpected_response(format!(
                "Paid call failed with status {}: {}",
                status, body
            )));
        }

        let body: T = response.json().await?;
        Ok(PaidResponse { body, settlement })
    }

    /// Full handshake: fetch requirements, let `pay` produce a proof, resend
    pub async fn call<I, T, P, Fut>(&self, input: &I, pay: P) -> Result<PaidResponse<T>>
    where
        I: Serialize + ?Sized,
        T: DeserializeOwned,
        P: FnOnce(PaymentRequirements) -> Fut,
        Fut: Future<Output = Result<PaymentProof>>,
    {
        let requirements = self.fetch_requirements(input).await?;
        let proof = pay(requirements).await?;
        self.call_with_payment(input, &proof).await
    }
}
