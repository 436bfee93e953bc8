//! Core types for the payment gate
//!
//! This module defines the data exchanged between a caller, the gate and the
//! facilitator: payment requirements, the opaque payment proof, facilitator
//! responses and network details.
//!
//! # Architecture
//!
//! - [`network`] - Cronos network selection and asset details
//! - [`payment`] - Payment requirements, proof and 402 response bodies
//! - [`facilitator`] - Facilitator configuration and response types
//! - [`constants`] - Protocol constants (networks, schemes, headers)
//!
//! # Examples
//!
//! ```
//! use x402_cronos::types::{Network, PaymentRequirements};
//!
//! # fn example() -> x402_cronos::Result<()> {
//! let requirements = PaymentRequirements::new(
//!     Network::Testnet,
//!     "0x419E5aD68d2Ff4d1786FE4bB7ebe7b3563A5A6d7",
//!     "20000",
//!     "Tool access",
//! );
//!
//! // Encode for the X-PAYMENT-REQUIRED header
//! let header = requirements.to_base64()?;
//! assert_eq!(PaymentRequirements::from_base64(&header)?, requirements);
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod facilitator;
pub mod network;
pub mod payment;

// Re-export commonly used types
pub use constants::{headers, networks, schemes};
pub use facilitator::{
    AuthHeadersFn, AuthHeadersFnArc, AuthHeadersFnBox, FacilitatorConfig, SettleResponse,
    SupportedKind, SupportedKinds, VerifyResponse,
};
pub use network::Network;
pub use payment::{
    PaymentErrorBody, PaymentProof, PaymentRequiredBody, PaymentRequirements, X402_VERSION,
};
