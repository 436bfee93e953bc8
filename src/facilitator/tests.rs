//! Tests for facilitator client

use super::{Facilitator, FacilitatorClient};
use crate::requirements::{generate_requirements, RequirementsParams};
use crate::types::{FacilitatorConfig, Network, PaymentProof, PaymentRequirements};
use crate::X402Error;
use mockito::{Matcher, Server};
use rust_decimal::Decimal;
use serde_json::json;
use std::collections::HashMap;
use std::str::FromStr;

const PAYEE: &str = "0x419E5aD68d2Ff4d1786FE4bB7ebe7b3563A5A6d7";

fn create_test_payment_requirements() -> PaymentRequirements {
    generate_requirements(
        Network::Testnet,
        PAYEE,
        "Tool access",
        Decimal::from_str("0.02").unwrap(),
    )
    .unwrap()
}

fn client_for(server: &Server) -> FacilitatorClient {
    FacilitatorClient::new(FacilitatorConfig::new(server.url()), Network::Testnet).unwrap()
}

#[tokio::test]
async fn test_facilitator_client_creation() {
    let config = FacilitatorConfig::new("https://example.com/facilitator/");
    let client = FacilitatorClient::new(config, Network::Testnet).unwrap();
    assert_eq!(client.url(), "https://example.com/facilitator");
    assert_eq!(client.network(), Network::Testnet);
}

#[test]
fn test_facilitator_client_creation_with_invalid_config() {
    let result = FacilitatorClient::new(FacilitatorConfig::new("invalid-url"), Network::Testnet);
    assert!(matches!(result, Err(X402Error::Config { .. })));
}

#[test]
fn test_generate_payment_requirements_uses_client_network() {
    let client =
        FacilitatorClient::new(FacilitatorConfig::default(), Network::Mainnet).unwrap();
    let requirements = client
        .generate_payment_requirements(RequirementsParams {
            pay_to: PAYEE.to_string(),
            description: "Tool access".to_string(),
            max_amount_required: "20000".to_string(),
        })
        .unwrap();

    assert_eq!(requirements.network, "cronos");
    assert_eq!(requirements.asset, Network::Mainnet.usdc_address());
    assert_eq!(requirements.max_amount_required, "20000");
}

#[tokio::test]
async fn test_facilitator_verify_success() {
    let mut server = Server::new_async().await;
    let requirements = create_test_payment_requirements();
    let mock = server
        .mock("POST", "/verify")
        .match_header("X402-Version", "1")
        .match_body(Matcher::PartialJson(json!({
            "x402Version": 1,
            "paymentHeader": "proof-123",
            "paymentRequirements": { "maxAmountRequired": "20000", "payTo": PAYEE }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "isValid": true }).to_string())
        .create_async()
        .await;

    let response = client_for(&server)
        .verify(&PaymentProof::new("proof-123"), &requirements)
        .await
        .unwrap();

    assert!(response.is_valid);
    assert!(response.invalid_reason.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_facilitator_verify_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/verify")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "isValid": false, "invalidReason": "expired" }).to_string())
        .create_async()
        .await;

    let response = client_for(&server)
        .verify(
            &PaymentProof::new("bad-proof"),
            &create_test_payment_requirements(),
        )
        .await
        .unwrap();

    assert!(!response.is_valid);
    assert_eq!(response.invalid_reason, Some("expired".to_string()));
}

#[tokio::test]
async fn test_facilitator_settle_success() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/settle")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "event": "payment.settled",
                "txHash": "0x1234567890abcdef",
                "network": "cronos-testnet",
                "from": "0x857b06519E91e3A54538791bDbb0E22373e36b66",
                "to": PAYEE,
                "value": "20000"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let response = client_for(&server)
        .settle(
            &PaymentProof::new("proof-123"),
            &create_test_payment_requirements(),
        )
        .await
        .unwrap();

    assert!(response.is_settled());
    assert_eq!(response.tx_hash.as_deref(), Some("0x1234567890abcdef"));
    assert_eq!(response.value.as_deref(), Some("20000"));
}

#[tokio::test]
async fn test_facilitator_server_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/verify")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let result = client_for(&server)
        .verify(
            &PaymentProof::new("proof-123"),
            &create_test_payment_requirements(),
        )
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, X402Error::Facilitator { .. }));
    assert!(err.to_string().contains("verify failed with status: 500"));
}

#[tokio::test]
async fn test_facilitator_settle_server_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/settle")
        .with_status(503)
        .create_async()
        .await;

    let result = client_for(&server)
        .settle(
            &PaymentProof::new("proof-123"),
            &create_test_payment_requirements(),
        )
        .await;

    assert!(matches!(result, Err(X402Error::Facilitator { .. })));
}

#[tokio::test]
async fn test_facilitator_supported() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/supported")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "kinds": [
                    { "x402Version": 1, "scheme": "exact", "network": "cronos-testnet" },
                    { "x402Version": 1, "scheme": "exact", "network": "cronos" }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let supported = client_for(&server).supported().await.unwrap();
    assert_eq!(supported.kinds.len(), 2);
    assert_eq!(supported.kinds[0].network, "cronos-testnet");
    assert_eq!(supported.kinds[1].network, "cronos");
}

#[tokio::test]
async fn test_facilitator_with_auth_headers() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/settle")
        .match_header("Authorization", "Bearer test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "txHash": "0xabc" }).to_string())
        .create_async()
        .await;

    let create_auth_headers = || {
        let mut headers = HashMap::new();
        let mut settle_headers = HashMap::new();
        settle_headers.insert("Authorization".to_string(), "Bearer test-token".to_string());
        headers.insert("settle".to_string(), settle_headers);
        Ok(headers)
    };

    let config =
        FacilitatorConfig::new(server.url()).with_auth_headers(Box::new(create_auth_headers));
    let client = FacilitatorClient::new(config, Network::Testnet).unwrap();

    let response = client
        .settle(
            &PaymentProof::new("proof-123"),
            &create_test_payment_requirements(),
        )
        .await
        .unwrap();

    assert_eq!(response.tx_hash.as_deref(), Some("0xabc"));
    mock.assert_async().await;
}
