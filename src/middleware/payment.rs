//! Payment gate implementation

use super::config::GateConfig;
use crate::facilitator::{Facilitator, FacilitatorClient};
use crate::types::{
    headers, PaymentErrorBody, PaymentProof, PaymentRequiredBody, PaymentRequirements,
    SettleResponse,
};
use crate::{Result, X402Error};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::future::Future;
use std::sync::Arc;

/// Fallback message when the facilitator rejects a proof without a reason
pub const INVALID_PAYMENT: &str = "Invalid payment";

/// Per-request states of the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    AwaitingProof,
    Verifying,
    Executing,
    Settling,
    Done,
    Aborted,
}

/// What the request carried in its `X-PAYMENT` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofHeader {
    Missing,
    /// Present but not a visible-ASCII string
    Malformed,
    Present(PaymentProof),
}

impl ProofHeader {
    /// Read the payment proof carrier from request headers
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match headers.get(headers::X_PAYMENT) {
            None => ProofHeader::Missing,
            Some(value) => match value.to_str() {
                Ok(proof) if proof.trim().is_empty() => ProofHeader::Missing,
                Ok(proof) => ProofHeader::Present(PaymentProof::new(proof.trim())),
                Err(_) => ProofHeader::Malformed,
            },
        }
    }
}

/// Payment processing result
#[derive(Debug)]
pub enum PaymentResult {
    /// Handler succeeded and the payment was settled
    Settled {
        response: Response,
        settlement: SettleResponse,
    },
    /// No proof supplied (402 with requirements)
    PaymentRequired { response: Response },
    /// Facilitator rejected the proof (402 with reason)
    VerificationFailed { response: Response },
    /// Facilitator could not be asked to verify
    VerificationError { response: Response },
    /// Handler failed after verification; settlement skipped
    HandlerFailed { response: Response },
    /// Handler succeeded but settlement did not
    SettlementFailed { response: Response, error: String },
}

impl PaymentResult {
    /// Terminal state the request reached
    pub fn state(&self) -> GateState {
        match self {
            PaymentResult::PaymentRequired { .. }
            | PaymentResult::VerificationFailed { .. }
            | PaymentResult::VerificationError { .. } => GateState::Aborted,
            PaymentResult::Settled { .. }
            | PaymentResult::HandlerFailed { .. }
            | PaymentResult::SettlementFailed { .. } => GateState::Done,
        }
    }
}

impl IntoResponse for PaymentResult {
    fn into_response(self) -> Response {
        match self {
            PaymentResult::Settled { response, .. }
            | PaymentResult::PaymentRequired { response }
            | PaymentResult::VerificationFailed { response }
            | PaymentResult::VerificationError { response }
            | PaymentResult::HandlerFailed { response }
            | PaymentResult::SettlementFailed { response, .. } => response,
        }
    }
}

/// Gate in front of a single paid operation.
///
/// Requirements are computed once at construction and shared by every
/// request; nothing else is shared between requests.
pub struct PaymentGate<F = FacilitatorClient> {
    requirements: Arc<PaymentRequirements>,
    encoded_requirements: HeaderValue,
    facilitator: Arc<F>,
}

impl<F> Clone for PaymentGate<F> {
    fn clone(&self) -> Self {
        Self {
            requirements: Arc::clone(&self.requirements),
            encoded_requirements: self.encoded_requirements.clone(),
            facilitator: Arc::clone(&self.facilitator),
        }
    }
}

impl<F> std::fmt::Debug for PaymentGate<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentGate")
            .field("requirements", &self.requirements)
            .finish_non_exhaustive()
    }
}

impl PaymentGate<FacilitatorClient> {
    /// Build a gate talking to the facilitator described by `config`
    pub fn from_config(config: &GateConfig) -> Result<Self> {
        config.validate()?;
        let facilitator =
            FacilitatorClient::new(config.facilitator_config.clone(), config.network)?;
        Self::new(config, facilitator)
    }
}

impl<F: Facilitator + 'static> PaymentGate<F> {
    /// Create a gate with an explicit facilitator
    pub fn new(config: &GateConfig, facilitator: F) -> Result<Self> {
        config.validate()?;

        if facilitator.network() != config.network {
            return Err(X402Error::config(format!(
                "Facilitator settles on {} but the gate is configured for {}",
                facilitator.network(),
                config.network
            )));
        }

        let params = config.requirements_params(facilitator.network())?;
        let requirements = facilitator.generate_payment_requirements(params)?;

        if requirements.pay_to != config.pay_to {
            return Err(X402Error::config(format!(
                "Facilitator requirements pay {} instead of configured payee {}",
                requirements.pay_to, config.pay_to
            )));
        }

        let encoded_requirements = HeaderValue::from_str(&requirements.to_base64()?)
            .map_err(|e| X402Error::config(format!("Failed to encode requirements header: {}", e)))?;

        tracing::info!(
            "Payment gate ready: {} base units to {} on {}",
            requirements.max_amount_required,
            requirements.pay_to,
            requirements.network
        );

        Ok(Self {
            requirements: Arc::new(requirements),
            encoded_requirements,
            facilitator: Arc::new(facilitator),
        })
    }

    /// Requirements every request is checked against
    pub fn requirements(&self) -> &PaymentRequirements {
        &self.requirements
    }

    /// Facilitator used by this gate
    pub fn facilitator(&self) -> &F {
        &self.facilitator
    }

    /// Run one request through the gate.
    ///
    /// `run` is invoked only after the proof verified, and settlement happens
    /// only when `run` produced a success status.
    pub async fn process<Run, Fut>(&self, proof: ProofHeader, run: Run) -> PaymentResult
    where
        Run: FnOnce() -> Fut,
        Fut: Future<Output = Response>,
    {
        tracing::debug!(state = ?GateState::AwaitingProof);

        let proof = match proof {
            ProofHeader::Present(proof) => proof,
            ProofHeader::Missing => {
                tracing::debug!(state = ?GateState::Aborted, "No X-PAYMENT header");
                return PaymentResult::PaymentRequired {
                    response: self.payment_required_response(),
                };
            }
            ProofHeader::Malformed => {
                tracing::warn!(state = ?GateState::Aborted, "Unreadable X-PAYMENT header");
                return PaymentResult::VerificationFailed {
                    response: invalid_payment_response(INVALID_PAYMENT),
                };
            }
        };

        tracing::debug!(state = ?GateState::Verifying);
        let verification = match self.facilitator.verify(&proof, &self.requirements).await {
            Ok(verification) => verification,
            Err(e) => {
                tracing::error!(state = ?GateState::Aborted, "Payment verification failed: {}", e);
                return PaymentResult::VerificationError {
                    response: X402Error::facilitator_error(format!(
                        "Payment verification failed: {}",
                        e
                    ))
                    .into_response(),
                };
            }
        };

        if !verification.is_valid {
            let reason = verification
                .invalid_reason
                .as_deref()
                .filter(|reason| !reason.is_empty())
                .unwrap_or(INVALID_PAYMENT);
            tracing::warn!(state = ?GateState::Aborted, "Payment rejected: {}", reason);
            return PaymentResult::VerificationFailed {
                response: invalid_payment_response(reason),
            };
        }

        tracing::debug!(state = ?GateState::Executing);
        let mut response = run().await;

        if !response.status().is_success() {
            tracing::warn!(
                state = ?GateState::Done,
                "Handler returned {}, payment will not be settled",
                response.status()
            );
            return PaymentResult::HandlerFailed { response };
        }

        tracing::debug!(state = ?GateState::Settling);
        match self.settle(proof).await {
            Ok(settlement) => {
                match settlement
                    .to_base64()
                    .ok()
                    .and_then(|encoded| HeaderValue::from_str(&encoded).ok())
                {
                    Some(header_value) => {
                        response.headers_mut().insert(
                            HeaderName::from_static(headers::X_PAYMENT_RESPONSE),
                            header_value,
                        );
                    }
                    None => tracing::warn!("Failed to encode settlement receipt header"),
                }

                tracing::info!(
                    state = ?GateState::Done,
                    "Payment settled: transaction={}",
                    settlement.tx_hash.as_deref().unwrap_or("<unknown>")
                );
                PaymentResult::Settled {
                    response,
                    settlement,
                }
            }
            Err(e) => {
                tracing::error!(
                    state = ?GateState::Done,
                    "Settlement failed after successful handler run: {}",
                    e
                );
                PaymentResult::SettlementFailed {
                    response,
                    error: e.to_string(),
                }
            }
        }
    }

    /// Axum entry point: read the proof and guard `next`
    pub async fn handle(&self, request: Request, next: Next) -> PaymentResult {
        let proof = ProofHeader::from_headers(request.headers());
        self.process(proof, || next.run(request)).await
    }

    // Settlement runs on its own task so it completes even if the caller's
    // request future is dropped mid-flight.
    async fn settle(&self, proof: PaymentProof) -> Result<SettleResponse> {
        let facilitator = Arc::clone(&self.facilitator);
        let requirements = Arc::clone(&self.requirements);

        let settlement =
            tokio::spawn(async move { facilitator.settle(&proof, &requirements).await })
                .await
                .map_err(|e| X402Error::settlement_failed(format!("Settlement task failed: {}", e)))??;

        if !settlement.is_settled() {
            return Err(X402Error::settlement_failed(
                settlement
                    .error
                    .clone()
                    .unwrap_or_else(|| "Facilitator did not confirm settlement".to_string()),
            ));
        }

        Ok(settlement)
    }

    fn payment_required_response(&self) -> Response {
        (
            StatusCode::PAYMENT_REQUIRED,
            [(
                HeaderName::from_static(headers::X_PAYMENT_REQUIRED),
                self.encoded_requirements.clone(),
            )],
            Json(PaymentRequiredBody::new((*self.requirements).clone())),
        )
            .into_response()
    }
}

fn invalid_payment_response(reason: &str) -> Response {
    (
        StatusCode::PAYMENT_REQUIRED,
        Json(PaymentErrorBody::new(reason)),
    )
        .into_response()
}

/// Axum middleware function for gating routes behind a payment
pub async fn payment_middleware<F: Facilitator + 'static>(
    State(gate): State<PaymentGate<F>>,
    request: Request,
    next: Next,
) -> Response {
    gate.handle(request, next).await.into_response()
}
