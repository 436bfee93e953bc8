//! Requirements generation
//!
//! Converts a human readable price into base units of the payment asset and
//! builds the [`PaymentRequirements`] a caller must satisfy.

use crate::types::{Network, PaymentRequirements};
use crate::{Result, X402Error};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Convert `price` (asset units) into base units, rounded to the nearest unit.
///
/// Halves round away from zero. The result is a decimal integer string.
pub fn to_base_units(price: Decimal, decimals: u32) -> Result<String> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(X402Error::config(format!(
            "Price must be non-negative, got {}",
            price
        )));
    }

    let scale = 10u64
        .checked_pow(decimals)
        .map(Decimal::from)
        .ok_or_else(|| X402Error::config(format!("Unsupported asset decimals: {}", decimals)))?;

    let scaled = price
        .checked_mul(scale)
        .ok_or_else(|| X402Error::config(format!("Price {} is too large", price)))?;

    let units = scaled
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u128()
        .ok_or_else(|| X402Error::config(format!("Price {} is not representable", price)))?;

    Ok(units.to_string())
}

/// Inputs the facilitator needs to describe a payment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementsParams {
    pub pay_to: String,
    pub description: String,
    /// Amount in base units, already converted
    pub max_amount_required: String,
}

/// Build exact-scheme requirements on `network` from already converted params
pub fn build_requirements(
    network: Network,
    params: RequirementsParams,
) -> Result<PaymentRequirements> {
    if params.pay_to.trim().is_empty() {
        return Err(X402Error::config("Payee address cannot be empty"));
    }

    let mut requirements = PaymentRequirements::new(
        network,
        params.pay_to,
        params.max_amount_required,
        params.description,
    );
    requirements.set_usdc_info(network)?;

    tracing::debug!(
        "Generated payment requirements: {} base units to {} on {}",
        requirements.max_amount_required,
        requirements.pay_to,
        requirements.network
    );

    Ok(requirements)
}

/// Build the requirements for one protected operation.
///
/// Pure: identical inputs always yield identical requirements.
pub fn generate_requirements(
    network: Network,
    pay_to: &str,
    description: &str,
    price: Decimal,
) -> Result<PaymentRequirements> {
    let max_amount_required = to_base_units(price, network.asset_decimals())?;

    build_requirements(
        network,
        RequirementsParams {
            pay_to: pay_to.to_string(),
            description: description.to_string(),
            max_amount_required,
        },
    )
}
