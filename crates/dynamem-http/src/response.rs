//! Response serialization and error formatting.

use dynamem_model::error::StoreError;

use crate::body::StoreResponseBody;

/// Content type for JSON responses.
pub const CONTENT_TYPE: &str = "application/x-amz-json-1.0";

/// Serialize an error into a JSON response body.
///
/// ```json
/// {
///   "__type": "com.amazonaws.dynamodb.v20120810#ResourceNotFoundException",
///   "Message": "Requested resource not found"
/// }
/// ```
#[must_use]
pub fn error_to_json(error: &StoreError) -> Vec<u8> {
    serde_json::json!({
        "__type": error.error_type(),
        "Message": error.message,
    })
    .to_string()
    .into_bytes()
}

/// Convert a `StoreError` into a complete HTTP error response.
#[must_use]
pub fn error_to_response(error: &StoreError, request_id: &str) -> http::Response<StoreResponseBody> {
    build_response(error.status_code, error_to_json(error), request_id)
}

/// Build a success response from JSON bytes.
#[must_use]
pub fn json_response(json: Vec<u8>, request_id: &str) -> http::Response<StoreResponseBody> {
    build_response(http::StatusCode::OK, json, request_id)
}

fn build_response(
    status: http::StatusCode,
    json: Vec<u8>,
    request_id: &str,
) -> http::Response<StoreResponseBody> {
    let crc = crc32fast::hash(&json);
    let mut response = http::Response::new(StoreResponseBody::from_json(json));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static(CONTENT_TYPE),
    );
    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.insert("x-amzn-requestid", hv);
    }
    headers.insert("x-amz-crc32", http::HeaderValue::from(crc));

    response
}
