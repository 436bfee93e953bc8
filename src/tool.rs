//! Standalone paid tools
//!
//! Wraps a single async function behind `POST /send`, guarded by a
//! [`PaymentGate`], and serves it on its own port.
//!
//! ```no_run
//! use rust_decimal::Decimal;
//! use serde::{Deserialize, Serialize};
//! use std::convert::Infallible;
//! use x402_cronos::middleware::GateConfig;
//! use x402_cronos::tool::{serve_tool, tool_fn};
//!
//! #[derive(Deserialize)]
//! struct Input {
//!     name: String,
//! }
//!
//! #[derive(Serialize)]
//! struct Greeting {
//!     greeting: String,
//! }
//!
//! # async fn example() -> x402_cronos::Result<()> {
//! let greet = tool_fn(|input: Input| async move {
//!     Ok::<_, Infallible>(Greeting {
//!         greeting: format!("Hello {}", input.name),
//!     })
//! });
//!
//! let config = GateConfig::new(Decimal::new(2, 2), "0x419E5aD68d2Ff4d1786FE4bB7ebe7b3563A5A6d7")
//!     .with_port(8000);
//! serve_tool(greet, config).await
//! # }
//! ```

use crate::facilitator::Facilitator;
use crate::middleware::{payment_middleware, GateConfig, PaymentGate};
use crate::{Result, X402Error};
use async_trait::async_trait;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::marker::PhantomData;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Route the paid operation is mounted on
pub const TOOL_PATH: &str = "/send";

/// A paid operation: typed JSON input in, typed JSON output out
#[async_trait]
pub trait ToolHandler: Send + Sync + 'static {
    type Input: DeserializeOwned + Send + 'static;
    type Output: Serialize + Send + 'static;
    type Error: std::fmt::Display + Send + 'static;

    async fn call(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error>;
}

/// [`ToolHandler`] backed by an async closure, see [`tool_fn`]
pub struct ToolFn<F, I, O, E> {
    f: F,
    _marker: PhantomData<fn(I) -> (O, E)>,
}

/// Turn an async function into a [`ToolHandler`]
pub fn tool_fn<F, Fut, I, O, E>(f: F) -> ToolFn<F, I, O, E>
where
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<O, E>> + Send + 'static,
{
    ToolFn {
        f,
        _marker: PhantomData,
    }
}

#[async_trait]
impl<F, Fut, I, O, E> ToolHandler for ToolFn<F, I, O, E>
where
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<O, E>> + Send + 'static,
    I: DeserializeOwned + Send + 'static,
    O: Serialize + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    type Input = I;
    type Output = O;
    type Error = E;

    async fn call(&self, input: I) -> std::result::Result<O, E> {
        (self.f)(input).await
    }
}

/// Build the router for a paid tool
pub fn create_tool_app<H, F>(handler: H, gate: PaymentGate<F>) -> Router
where
    H: ToolHandler,
    F: Facilitator + 'static,
{
    Router::new()
        .route(TOOL_PATH, post(send_handler::<H>))
        .route_layer(axum::middleware::from_fn_with_state(
            gate,
            payment_middleware::<F>,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(handler))
}

async fn send_handler<H: ToolHandler>(
    State(handler): State<Arc<H>>,
    Json(input): Json<H::Input>,
) -> Response {
    match handler.call(input).await {
        Ok(output) => Json(output).into_response(),
        Err(e) => X402Error::handler_failure(e.to_string()).into_response(),
    }
}

/// Validate `config`, then serve `handler` on the configured port until Ctrl-C
pub async fn serve_tool<H: ToolHandler>(handler: H, config: GateConfig) -> Result<()> {
    let gate = PaymentGate::from_config(&config)?;
    let app = create_tool_app(handler, gate);
    serve(app, config.port()).await
}

/// Serve an already built tool router on `port`
pub async fn serve(app: Router, port: u16) -> Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| X402Error::config(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("x402 tool running on :{}{}", port, TOOL_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
