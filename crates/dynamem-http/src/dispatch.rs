//! Handler trait and operation dispatch.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;

use dynamem_model::error::StoreError;
use dynamem_model::operations::StoreOperation;

use crate::body::StoreResponseBody;

/// Boxed future returned by [`StoreHandler::handle_operation`].
pub type HandlerFuture =
    Pin<Box<dyn Future<Output = Result<http::Response<StoreResponseBody>, StoreError>> + Send>>;

/// Boundary between the HTTP transport and the store.
///
/// The handler receives the resolved operation and the raw JSON body and
/// returns a complete HTTP response.
pub trait StoreHandler: Send + Sync + 'static {
    /// Handle an operation and produce an HTTP response.
    fn handle_operation(&self, op: StoreOperation, body: Bytes) -> HandlerFuture;
}

/// Dispatch an operation to the handler.
pub async fn dispatch_operation<H: StoreHandler>(
    handler: &H,
    op: StoreOperation,
    body: Bytes,
) -> Result<http::Response<StoreResponseBody>, StoreError> {
    tracing::debug!(operation = %op, "dispatching store operation");
    handler.handle_operation(op, body).await
}
