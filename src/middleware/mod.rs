//! Payment gate middleware
//!
//! This module puts a single operation behind a per-request payment. It
//! plugs into Axum either through `from_fn_with_state` or as a Tower layer.
//!
//! # Architecture
//!
//! - [`config`] - Gate configuration and validation
//! - [`payment`] - The per-request state machine and the Axum middleware function
//! - [`service`] - Tower layer for framework integration
//!
//! # Examples
//!
//! ## Basic Axum Integration
//!
//! ```no_run
//! use axum::{routing::post, Json, Router};
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//! use x402_cronos::facilitator::FacilitatorClient;
//! use x402_cronos::middleware::{payment_middleware, GateConfig, PaymentGate};
//!
//! # fn example() -> x402_cronos::Result<()> {
//! let config = GateConfig::new(
//!     Decimal::from_str("0.02").unwrap(),
//!     "0x419E5aD68d2Ff4d1786FE4bB7ebe7b3563A5A6d7",
//! )
//! .with_description("Greeting");
//!
//! let gate = PaymentGate::from_config(&config)?;
//!
//! let app: Router = Router::new()
//!     .route("/send", post(|| async { Json(serde_json::json!({ "ok": true })) }))
//!     .layer(axum::middleware::from_fn_with_state(
//!         gate,
//!         payment_middleware::<FacilitatorClient>,
//!     ));
//! # Ok(())
//! # }
//! ```
//!
//! ## Tower Layer
//!
//! ```no_run
//! use axum::{routing::post, Router};
//! use rust_decimal::Decimal;
//! use x402_cronos::middleware::{GateConfig, PaymentGate, PaymentGateLayer};
//!
//! # fn example() -> x402_cronos::Result<()> {
//! let config = GateConfig::new(Decimal::new(1, 2), "0x419E5aD68d2Ff4d1786FE4bB7ebe7b3563A5A6d7");
//! let app: Router = Router::new()
//!     .route("/send", post(|| async { "paid" }))
//!     .layer(PaymentGateLayer::new(PaymentGate::from_config(&config)?));
//! # Ok(())
//! # }
//! ```
//!
//! # Payment Flow
//!
//! 1. Request arrives without X-PAYMENT header → 402 with `X-PAYMENT-REQUIRED`
//! 2. Request arrives with X-PAYMENT header → facilitator verifies the proof
//! 3. Proof rejected → 402 with the facilitator's reason
//! 4. Proof valid → handler runs
//! 5. Handler fails → its response is returned and nothing is settled
//! 6. Handler succeeds → payment is settled, receipt added as `X-PAYMENT-RESPONSE`

pub mod config;
pub mod payment;
pub mod service;


// Re-export commonly used types
pub use config::{GateConfig, DEFAULT_PORT};
pub use payment::{
    payment_middleware, GateState, PaymentGate, PaymentResult, ProofHeader, INVALID_PAYMENT,
};
pub use service::{PaymentGateLayer, PaymentGateService};
