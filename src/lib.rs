//! # x402 payment gate for Cronos
//!
//! Puts a single HTTP operation behind a per-request stablecoin payment using
//! the HTTP 402 status code. Callers without a payment proof receive the
//! payment requirements; callers with a proof have it verified by a
//! facilitator, the operation runs, and the payment is settled only when the
//! operation succeeded.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rust_decimal::Decimal;
//! use serde::{Deserialize, Serialize};
//! use std::convert::Infallible;
//! use std::str::FromStr;
//! use x402_cronos::{middleware::GateConfig, tool::{serve_tool, tool_fn}};
//!
//! #[derive(Deserialize)]
//! struct Input {
//!     name: String,
//! }
//!
//! #[derive(Serialize)]
//! struct Output {
//!     greeting: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GateConfig::new(
//!         Decimal::from_str("0.02")?,
//!         "0x419E5aD68d2Ff4d1786FE4bB7ebe7b3563A5A6d7",
//!     )
//!     .with_description("Greeting");
//!
//!     let greet = tool_fn(|input: Input| async move {
//!         Ok::<_, Infallible>(Output {
//!             greeting: format!("Hello {}", input.name),
//!         })
//!     });
//!
//!     serve_tool(greet, config).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`types`**: Requirements, proofs, facilitator responses and networks
//! - **`requirements`**: Price to base-unit conversion and requirement building
//! - **`facilitator`**: Verification and settlement through a facilitator
//! - **`middleware`**: The per-request payment gate (Axum and Tower)
//! - **`tool`**: Serving one paid function on `POST /send`
//! - **`client`**: Caller side of the 402 handshake
//! - **`error`**: Error type shared by all of the above
//!
//! ## Networks
//!
//! - **Cronos testnet** (`cronos-testnet`, default)
//! - **Cronos mainnet** (`cronos`)

pub mod client;
pub mod error;
pub mod facilitator;
pub mod middleware;
pub mod requirements;
pub mod tool;
pub mod types;

// Re-exports for convenience
pub use client::X402Client;
pub use error::{Result, X402Error};
pub use facilitator::{Facilitator, FacilitatorClient};
pub use middleware::{GateConfig, PaymentGate};
pub use requirements::generate_requirements;
pub use types::*;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
