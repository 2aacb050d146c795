//! Handler bridging the HTTP layer to the document store.

use std::sync::Arc;

use bytes::Bytes;

use dynamem_http::body::StoreResponseBody;
use dynamem_http::dispatch::{HandlerFuture, StoreHandler};
use dynamem_http::response::json_response;
use dynamem_model::error::StoreError;
use dynamem_model::operations::StoreOperation;

use crate::provider::DocumentStore;

/// Handler that decodes requests, calls the [`DocumentStore`] and encodes
/// the result.
#[derive(Debug)]
pub struct DocumentStoreHandler {
    provider: Arc<DocumentStore>,
}

impl DocumentStoreHandler {
    /// Create a new handler wrapping a store.
    #[must_use]
    pub fn new(provider: Arc<DocumentStore>) -> Self {
        Self { provider }
    }
}

impl StoreHandler for DocumentStoreHandler {
    fn handle_operation(&self, op: StoreOperation, body: Bytes) -> HandlerFuture {
        let provider = Arc::clone(&self.provider);
        Box::pin(async move { dispatch(provider.as_ref(), op, &body) })
    }
}

fn dispatch(
    provider: &DocumentStore,
    op: StoreOperation,
    body: &[u8],
) -> Result<http::Response<StoreResponseBody>, StoreError> {
    let request_id = uuid::Uuid::new_v4().to_string();

    match op {
        StoreOperation::PutItem => {
            let input = deserialize(body)?;
            let output = provider.handle_put_item(input)?;
            serialize(&output, &request_id)
        }
        StoreOperation::GetItem => {
            let input = deserialize(body)?;
            let output = provider.handle_get_item(input)?;
            serialize(&output, &request_id)
        }
        StoreOperation::UpdateItem => {
            let input = deserialize(body)?;
            let output = provider.handle_update_item(input)?;
            serialize(&output, &request_id)
        }
        StoreOperation::DeleteItem => {
            let input = deserialize(body)?;
            let output = provider.handle_delete_item(input)?.unwrap_or_default();
            serialize(&output, &request_id)
        }
        StoreOperation::ListTables => {
            let input = deserialize(body)?;
            let output = provider.handle_list_tables(input);
            serialize(&output, &request_id)
        }
        StoreOperation::DescribeTable => {
            let input = deserialize(body)?;
            let output = provider.handle_describe_table(input)?;
            serialize(&output, &request_id)
        }
    }
}

/// Deserialize a JSON request body into an input type.
fn deserialize<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, StoreError> {
    serde_json::from_slice(body).map_err(|e| {
        StoreError::serialization_exception(format!("Failed to deserialize request body: {e}"))
            .with_source(e)
    })
}

/// Serialize an output type into a JSON HTTP response.
fn serialize<T: serde::Serialize>(
    output: &T,
    request_id: &str,
) -> Result<http::Response<StoreResponseBody>, StoreError> {
    let json = serde_json::to_vec(output)
        .map_err(|e| StoreError::internal_error(format!("Failed to serialize response: {e}")))?;
    Ok(json_response(json, request_id))
}
