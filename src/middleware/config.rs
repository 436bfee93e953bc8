//! Payment gate configuration

use crate::requirements::{to_base_units, RequirementsParams};
use crate::types::constants::DEFAULT_DESCRIPTION;
use crate::types::{FacilitatorConfig, Network};
use crate::{Result, X402Error};
use rust_decimal::Decimal;

/// Default port for a standalone tool server
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration for a payment gate
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Price per call in asset units (e.g., 0.02 for 2 cents of USDC)
    pub price: Decimal,
    /// Recipient wallet address
    pub pay_to: String,
    /// Payment description
    pub description: Option<String>,
    /// Listen port when served standalone
    pub port: Option<u16>,
    /// Network payments are taken on
    pub network: Network,
    /// Facilitator configuration
    pub facilitator_config: FacilitatorConfig,
}

impl GateConfig {
    /// Create a new gate config
    pub fn new(price: Decimal, pay_to: impl Into<String>) -> Self {
        Self {
            price,
            pay_to: pay_to.into(),
            description: None,
            port: None,
            network: Network::default(),
            facilitator_config: FacilitatorConfig::default(),
        }
    }

    /// Set the payment description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the listen port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the payment network
    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Set the facilitator configuration
    pub fn with_facilitator_config(mut self, facilitator_config: FacilitatorConfig) -> Self {
        self.facilitator_config = facilitator_config;
        self
    }

    /// Description shown to payers
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION)
    }

    /// Port to listen on when served standalone
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Reject configurations the gate cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.price <= Decimal::ZERO {
            return Err(X402Error::config(format!(
                "Price must be greater than zero, got {}",
                self.price
            )));
        }

        validate_evm_address(&self.pay_to)?;

        if let Some(description) = &self.description {
            if description.trim().is_empty() {
                return Err(X402Error::config("Description cannot be blank"));
            }
        }

        if self.port == Some(0) {
            return Err(X402Error::config("Port must be non-zero"));
        }

        self.facilitator_config.validate()
    }

    /// Convert the price once into the params the facilitator describes
    pub fn requirements_params(&self, network: Network) -> Result<RequirementsParams> {
        let max_amount_required = to_base_units(self.price, network.asset_decimals())?;
        if max_amount_required == "0" {
            return Err(X402Error::config(format!(
                "Price {} is below the smallest unit of the asset",
                self.price
            )));
        }

        Ok(RequirementsParams {
            pay_to: self.pay_to.clone(),
            description: self.description().to_string(),
            max_amount_required,
        })
    }
}

/// Check that `address` is a 0x-prefixed 20-byte hex address
fn validate_evm_address(address: &str) -> Result<()> {
    if address.is_empty() {
        return Err(X402Error::config("Payee address is required"));
    }

    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| X402Error::config(format!("Payee address must start with 0x: {}", address)))?;

    let bytes = hex::decode(digits)
        .map_err(|e| X402Error::config(format!("Payee address is not hex ({}): {}", e, address)))?;

    if bytes.len() != 20 {
        return Err(X402Error::config(format!(
            "Payee address must be 20 bytes, got {}: {}",
            bytes.len(),
            address
        )));
    }

    Ok(())
}
