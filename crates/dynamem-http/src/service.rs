//! HTTP service implementing the hyper `Service` trait.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Limited};
use hyper::body::Incoming;

use dynamem_model::error::StoreError;

use crate::body::StoreResponseBody;
use crate::dispatch::{StoreHandler, dispatch_operation};
use crate::response::{CONTENT_TYPE, error_to_response};
use crate::router::resolve_operation;

/// Default cap on request body size (16 MiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 16 * 1024 * 1024;

/// Configuration for the HTTP service.
#[derive(Debug, Clone)]
pub struct StoreHttpConfig {
    /// Value of the `server` response header.
    pub server_name: String,
    /// Requests with a larger body are rejected with a validation error.
    pub max_body_size: usize,
}

impl Default for StoreHttpConfig {
    fn default() -> Self {
        Self {
            server_name: "DynaMem".to_owned(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

/// Hyper `Service` routing requests to a [`StoreHandler`].
#[derive(Debug)]
pub struct StoreHttpService<H: StoreHandler> {
    handler: Arc<H>,
    config: Arc<StoreHttpConfig>,
}

impl<H: StoreHandler> StoreHttpService<H> {
    /// Create a new `StoreHttpService`.
    pub fn new(handler: Arc<H>, config: StoreHttpConfig) -> Self {
        Self {
            handler,
            config: Arc::new(config),
        }
    }
}

impl<H: StoreHandler> Clone for StoreHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            config: Arc::clone(&self.config),
        }
    }
}

impl<H: StoreHandler> hyper::service::Service<http::Request<Incoming>> for StoreHttpService<H> {
    type Response = http::Response<StoreResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        let config = Arc::clone(&self.config);
        let request_id = uuid::Uuid::new_v4().to_string();

        Box::pin(async move {
            let response = process_request(req, handler.as_ref(), &config, &request_id).await;
            Ok(add_common_headers(response, &config, &request_id))
        })
    }
}

/// Run one request through the pipeline.
async fn process_request<H: StoreHandler>(
    req: http::Request<Incoming>,
    handler: &H,
    config: &StoreHttpConfig,
    request_id: &str,
) -> http::Response<StoreResponseBody> {
    let (parts, incoming) = req.into_parts();

    // 1. Only POST is accepted.
    if parts.method != http::Method::POST {
        let err = StoreError::validation(format!("Expected POST method, got {}", parts.method));
        return error_to_response(&err, request_id);
    }

    // 2. Route on X-Amz-Target.
    let op = match resolve_operation(&parts.headers) {
        Ok(op) => op,
        Err(err) => return error_to_response(&err, request_id),
    };

    // 3. Collect body.
    let body = match collect_body(incoming, config.max_body_size).await {
        Ok(body) => body,
        Err(err) => return error_to_response(&err, request_id),
    };

    // 4. Dispatch.
    match dispatch_operation(handler, op, body).await {
        Ok(response) => response,
        Err(err) => {
            tracing::debug!(operation = %op, code = %err.code, "operation failed");
            error_to_response(&err, request_id)
        }
    }
}

/// Collect the incoming body into a single `Bytes` buffer.
async fn collect_body(incoming: Incoming, limit: usize) -> Result<Bytes, StoreError> {
    Limited::new(incoming, limit)
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .map_err(|e| {
            if e.is::<http_body_util::LengthLimitError>() {
                StoreError::validation(format!("Request body exceeds {limit} bytes"))
            } else {
                StoreError::internal_error(format!("Failed to read request body: {e}"))
            }
        })
}

/// Add headers every response carries.
fn add_common_headers(
    mut response: http::Response<StoreResponseBody>,
    config: &StoreHttpConfig,
    request_id: &str,
) -> http::Response<StoreResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.entry("x-amzn-requestid").or_insert(hv);
    }

    headers
        .entry(http::header::CONTENT_TYPE)
        .or_insert(http::HeaderValue::from_static(CONTENT_TYPE));

    if let Ok(hv) = http::HeaderValue::from_str(&config.server_name) {
        headers.insert(http::header::SERVER, hv);
    }

    response
}
