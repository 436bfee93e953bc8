//! Paid greeting tool
//!
//! Serves `POST /send` behind an x402 payment gate on Cronos. Takes
//! `{"name": "..."}` and returns `{"greeting": "Hello ..."}` once the payment
//! verified.
//!
//! ## Environment
//!
//! - `DEV_WALLET` (required): address receiving payments
//! - `PRICE`: price per call in USDC (default `0.02`)
//! - `PORT`: listen port (default `3000`)
//! - `DESCRIPTION`: description shown to payers (default `Tool access`)
//! - `FACILITATOR_URL`: facilitator endpoint
//! - `X402_NETWORK`: `cronos-testnet` (default) or `cronos`

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::env;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;
use x402_cronos::{
    middleware::GateConfig,
    tool::{serve_tool, tool_fn},
    types::{FacilitatorConfig, Network},
    X402Error,
};

#[derive(Debug, Deserialize)]
struct GreetInput {
    name: String,
}

#[derive(Debug, Serialize)]
struct Greeting {
    greeting: String,
}

async fn greet(input: GreetInput) -> Result<Greeting, Infallible> {
    Ok(Greeting {
        greeting: format!("Hello {}", input.name),
    })
}

fn config_from_env() -> x402_cronos::Result<GateConfig> {
    let pay_to =
        env::var("DEV_WALLET").map_err(|_| X402Error::config("DEV_WALLET must be set"))?;

    let price = env::var("PRICE").unwrap_or_else(|_| "0.02".to_string());
    let price = Decimal::from_str(&price)
        .map_err(|e| X402Error::config(format!("Invalid PRICE {:?}: {}", price, e)))?;

    let mut config = GateConfig::new(price, pay_to);

    if let Ok(port) = env::var("PORT") {
        let port = port
            .parse::<u16>()
            .map_err(|e| X402Error::config(format!("Invalid PORT {:?}: {}", port, e)))?;
        config = config.with_port(port);
    }

    if let Ok(description) = env::var("DESCRIPTION") {
        config = config.with_description(description);
    }

    if let Ok(network) = env::var("X402_NETWORK") {
        config = config.with_network(Network::from_str(&network)?);
    }

    if let Ok(url) = env::var("FACILITATOR_URL") {
        let timeout = config.facilitator_config.timeout;
        let mut facilitator_config = FacilitatorConfig::new(url);
        facilitator_config.timeout = timeout;
        config = config.with_facilitator_config(facilitator_config);
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config_from_env()?;
    tracing::info!(
        "Charging {} USDC per call to {} on {}",
        config.price,
        config.pay_to,
        config.network
    );

    serve_tool(tool_fn(greet), config).await?;
    Ok(())
}
