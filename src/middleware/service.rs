//! Tower service layer for the payment gate

use super::payment::{PaymentGate, ProofHeader};
use crate::facilitator::Facilitator;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Tower layer wrapping a service in a payment gate
pub struct PaymentGateLayer<F> {
    gate: PaymentGate<F>,
}

impl<F> Clone for PaymentGateLayer<F> {
    fn clone(&self) -> Self {
        Self {
            gate: self.gate.clone(),
        }
    }
}

impl<F> PaymentGateLayer<F> {
    pub fn new(gate: PaymentGate<F>) -> Self {
        Self { gate }
    }
}

impl<S, F> tower::Layer<S> for PaymentGateLayer<F> {
    type Service = PaymentGateService<S, F>;

    fn layer(&self, inner: S) -> Self::Service {
        PaymentGateService {
            inner,
            gate: self.gate.clone(),
        }
    }
}

/// Tower service enforcing payment before calling `inner`
pub struct PaymentGateService<S, F> {
    inner: S,
    gate: PaymentGate<F>,
}

impl<S: Clone, F> Clone for PaymentGateService<S, F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            gate: self.gate.clone(),
        }
    }
}

impl<S, F> tower::Service<Request> for PaymentGateService<S, F>
where
    S: tower::Service<Request, Response = Response, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send + 'static,
    F: Facilitator + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let gate = self.gate.clone();
        // Take the service that was driven to readiness and leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let proof = ProofHeader::from_headers(req.headers());

        Box::pin(async move {
            let result = gate
                .process(proof, move || async move {
                    match inner.call(req).await {
                        Ok(response) => response,
                        Err(never) => match never {},
                    }
                })
                .await;
            Ok(result.into_response())
        })
    }
}
