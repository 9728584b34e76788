// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Plain HTTP server exposing the mutating webhook

use crate::constants::{routes, WEBHOOK_ID};
use crate::injection::Injector;
use crate::mutator::Mutator;
use crate::webhook::review::review;
use anyhow::Context;
use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Method, Request, Response, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use kube::core::admission::AdmissionReview;
use kube::core::DynamicObject;
use std::convert::Infallible;
use std::fmt::Display;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, instrument, warn};

pub struct WebhookServer<I> {
    listen_addr: SocketAddr,
    mutator: Arc<Mutator<I>>,
}

impl<I> WebhookServer<I>
where
    I: Injector + Send + Sync + 'static,
{
    pub fn new(listen_addr: SocketAddr, mutator: Mutator<I>) -> Self {
        Self {
            listen_addr,
            mutator: Arc::new(mutator),
        }
    }

    /// Accept connections forever, serving each one on its own task
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.listen_addr)
            .await
            .with_context(|| format!("Failed to bind webhook listener on {}", self.listen_addr))?;

        info!(
            "Webhook {} listening on http://{}{}",
            WEBHOOK_ID,
            self.listen_addr,
            routes::MUTATE
        );

        loop {
            let (stream, remote_addr) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("Failed to accept incoming connection: {}", e);
                    continue;
                }
            };

            let mutator = self.mutator.clone();
            tokio::spawn(async move {
                let service = service_fn(move |request: Request<Incoming>| {
                    handle(mutator.clone(), request)
                });

                if let Err(e) = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await
                {
                    warn!("Failed to serve connection from {}: {}", remote_addr, e);
                }
            });
        }
    }
}

/// Route a single HTTP request
#[instrument(skip_all, fields(method = %request.method(), path = %request.uri().path()))]
pub async fn handle<I, B>(
    mutator: Arc<Mutator<I>>,
    request: Request<B>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    I: Injector,
    B: Body,
    B::Error: Display,
{
    let response = match (request.method(), request.uri().path()) {
        (&Method::POST, routes::MUTATE) => mutate(&mutator, request).await,
        (&Method::GET, routes::HEALTHZ) => text_response(StatusCode::OK, "ok"),
        _ => {
            debug!("No route for request");
            text_response(StatusCode::NOT_FOUND, "not found")
        }
    };

    Ok(response)
}

async fn mutate<I, B>(mutator: &Mutator<I>, request: Request<B>) -> Response<Full<Bytes>>
where
    I: Injector,
    B: Body,
    B::Error: Display,
{
    let body = match request.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!("Failed to read request body: {}", e);
            return error_response(StatusCode::BAD_REQUEST, format!("failed to read body: {e}"));
        }
    };

    let admission_review: AdmissionReview<DynamicObject> = match serde_json::from_slice(&body) {
        Ok(admission_review) => admission_review,
        Err(e) => {
            warn!("Failed to decode admission review: {}", e);
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("invalid admission review: {e}"),
            );
        }
    };

    match serde_json::to_vec(&review(mutator, admission_review)) {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to encode admission review: {e}"),
        ),
    }
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

fn error_response(status: StatusCode, message: String) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": message }).to_string();
    json_response(status, body.into_bytes())
}

fn text_response(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(body.as_bytes())));
    *response.status_mut() = status;
    response
}
