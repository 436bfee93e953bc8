//! Error types for the payment gate

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Result type for x402 operations
pub type Result<T> = std::result::Result<T, X402Error>;

/// Errors produced while configuring or running a payment gate
#[derive(Debug, Error)]
pub enum X402Error {
    /// Invalid gate or facilitator setup. Fatal at construction.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The request carried no `X-PAYMENT` header
    #[error("Payment Required")]
    PaymentMissing,

    /// The facilitator rejected the payment proof
    #[error("{reason}")]
    PaymentInvalid { reason: String },

    /// The wrapped operation failed after the payment was verified
    #[error("Handler failed: {message}")]
    HandlerFailure { message: String },

    /// The facilitator could not settle a verified payment
    #[error("Settlement failed: {message}")]
    SettlementFailed { message: String },

    /// The facilitator could not be reached or answered with an error status
    #[error("Facilitator error: {message}")]
    Facilitator { message: String },

    /// Unexpected response from a paid endpoint
    #[error("Unexpected response: {message}")]
    UnexpectedResponse { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl X402Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a payment-invalid error carrying the facilitator's reason
    pub fn payment_invalid(reason: impl Into<String>) -> Self {
        Self::PaymentInvalid {
            reason: reason.into(),
        }
    }

    /// Create a handler failure error
    pub fn handler_failure(message: impl Into<String>) -> Self {
        Self::HandlerFailure {
            message: message.into(),
        }
    }

    /// Create a settlement failure error
    pub fn settlement_failed(message: impl Into<String>) -> Self {
        Self::SettlementFailed {
            message: message.into(),
        }
    }

    /// Create a facilitator transport error
    pub fn facilitator_error(message: impl Into<String>) -> Self {
        Self::Facilitator {
            message: message.into(),
        }
    }

    /// Create an unexpected response error
    pub fn unexpected_response(message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            message: message.into(),
        }
    }

    /// HTTP status this error is surfaced with
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::PaymentMissing | Self::PaymentInvalid { .. } => StatusCode::PAYMENT_REQUIRED,
            Self::Facilitator { .. } | Self::Http(_) => StatusCode::BAD_GATEWAY,
            Self::Json(_) | Self::Base64(_) => StatusCode::BAD_REQUEST,
            Self::Config { .. }
            | Self::HandlerFailure { .. }
            | Self::SettlementFailed { .. }
            | Self::UnexpectedResponse { .. }
            | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for X402Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
