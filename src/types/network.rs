//! Network configuration types

use super::constants::{networks, ASSET_DECIMALS};
use crate::{Result, X402Error};
use std::str::FromStr;

/// Cronos network a gate takes payments on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
}

impl Network {
    /// Get the network identifier string
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => networks::CRONOS_MAINNET,
            Network::Testnet => networks::CRONOS_TESTNET,
        }
    }

    /// EVM chain id
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => 25,
            Network::Testnet => 338,
        }
    }

    /// Get the USDC contract address for this network
    pub fn usdc_address(&self) -> &'static str {
        match self {
            Network::Mainnet => "0xf951eC28187D9E5Ca673Da8FE6757E6f0Be5F77C",
            Network::Testnet => "0xc01efAaF7C5C61bEbFAeb358E1161b537b8bC0e0",
        }
    }

    /// Get the USDC token name for this network
    pub fn usdc_name(&self) -> &'static str {
        match self {
            Network::Mainnet => "USD Coin",
            Network::Testnet => "USDC",
        }
    }

    /// Decimal places of the payment asset
    pub fn asset_decimals(&self) -> u32 {
        ASSET_DECIMALS
    }
}

impl FromStr for Network {
    type Err = X402Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            networks::CRONOS_MAINNET => Ok(Network::Mainnet),
            networks::CRONOS_TESTNET => Ok(Network::Testnet),
            other => Err(X402Error::config(format!(
                "Unsupported network '{}', expected one of: {}",
                other,
                networks::all_supported().join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
