//! Common constants for networks, schemes and headers

/// Cronos network identifiers as understood by the facilitator
pub mod networks {
    /// Cronos EVM mainnet
    pub const CRONOS_MAINNET: &str = "cronos";
    /// Cronos EVM testnet
    pub const CRONOS_TESTNET: &str = "cronos-testnet";

    /// Get the USDC contract address for a network
    pub fn get_usdc_address(network: &str) -> Option<&'static str> {
        match network {
            CRONOS_MAINNET => Some("0xf951eC28187D9E5Ca673Da8FE6757E6f0Be5F77C"),
            CRONOS_TESTNET => Some("0xc01efAaF7C5C61bEbFAeb358E1161b537b8bC0e0"),
            _ => None,
        }
    }

    /// Check if a network is supported
    pub fn is_supported(network: &str) -> bool {
        matches!(network, CRONOS_MAINNET | CRONOS_TESTNET)
    }

    /// Get all supported networks
    pub fn all_supported() -> Vec<&'static str> {
        vec![CRONOS_MAINNET, CRONOS_TESTNET]
    }
}

/// Common payment schemes
pub mod schemes {
    /// Exact payment scheme (EIP-3009)
    pub const EXACT: &str = "exact";
}

/// HTTP header names used by the payment gate
pub mod headers {
    /// Request header carrying the caller's payment proof
    pub const X_PAYMENT: &str = "x-payment";
    /// Response header carrying the base64 encoded requirements on a 402
    pub const X_PAYMENT_REQUIRED: &str = "x-payment-required";
    /// Response header carrying the base64 encoded settlement receipt
    pub const X_PAYMENT_RESPONSE: &str = "x-payment-response";
    /// Protocol version header sent to the facilitator
    pub const X402_VERSION: &str = "X402-Version";
}

/// Number of decimal places of the payment asset (USDC)
pub const ASSET_DECIMALS: u32 = 6;

/// Default facilitator endpoint
pub const DEFAULT_FACILITATOR_URL: &str = "https://facilitator.cronoslabs.org/v2/x402";

/// Description used when the gate is configured without one
pub const DEFAULT_DESCRIPTION: &str = "Tool access";

/// Default payment validity window in seconds
pub const DEFAULT_MAX_TIMEOUT_SECONDS: u32 = 300;
