//! Store error types.
//!
//! Every failure that crosses the store boundary is a [`StoreError`]: a
//! [`StoreErrorCode`] that callers can branch on plus a human-readable
//! message. Over HTTP the code is rendered as a DynamoDB-style `__type`.

use std::fmt;

/// Well-known store error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum StoreErrorCode {
    /// Invalid table seeding request (bad or conflicting primary-key attribute).
    ConfigurationError,
    /// Table not found.
    ResourceNotFoundException,
    /// Key or item does not carry a usable primary-key attribute.
    InvalidKeyException,
    /// Malformed request (wrong method or oversized body).
    #[default]
    ValidationException,
    /// Request body could not be decoded.
    SerializationException,
    /// Internal server error.
    InternalServerError,
    /// Missing `X-Amz-Target` header.
    MissingAction,
    /// Unknown operation.
    UnrecognizedClientException,
}

impl StoreErrorCode {
    /// Returns the fully-qualified error type string for the JSON `__type` field.
    ///
    /// Key and configuration failures are reported to wire clients as
    /// validation errors, which is how DynamoDB SDKs expect them.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::ResourceNotFoundException => {
                "com.amazonaws.dynamodb.v20120810#ResourceNotFoundException"
            }
            Self::ConfigurationError | Self::InvalidKeyException | Self::ValidationException => {
                "com.amazon.coral.validate#ValidationException"
            }
            Self::SerializationException => {
                "com.amazonaws.dynamodb.v20120810#SerializationException"
            }
            Self::InternalServerError => "com.amazonaws.dynamodb.v20120810#InternalServerError",
            Self::MissingAction => "com.amazonaws.dynamodb.v20120810#MissingAction",
            Self::UnrecognizedClientException => {
                "com.amazonaws.dynamodb.v20120810#UnrecognizedClientException"
            }
        }
    }

    /// Returns the short error code string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigurationError => "ConfigurationError",
            Self::ResourceNotFoundException => "ResourceNotFoundException",
            Self::InvalidKeyException => "InvalidKeyException",
            Self::ValidationException => "ValidationException",
            Self::SerializationException => "SerializationException",
            Self::InternalServerError => "InternalServerError",
            Self::MissingAction => "MissingAction",
            Self::UnrecognizedClientException => "UnrecognizedClientException",
        }
    }

    /// Returns the default HTTP status code for this error.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::InternalServerError => http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => http::StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error returned by a store operation.
#[derive(Debug)]
pub struct StoreError {
    /// The error code.
    pub code: StoreErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoreError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl StoreError {
    /// Create a new `StoreError` with a custom message.
    #[must_use]
    pub fn with_message(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the `__type` string for the JSON error response.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        self.code.error_type()
    }

    // -- Convenience constructors --

    /// Invalid seeding configuration.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::with_message(StoreErrorCode::ConfigurationError, message)
    }

    /// Table not found.
    #[must_use]
    pub fn resource_not_found(message: impl Into<String>) -> Self {
        Self::with_message(StoreErrorCode::ResourceNotFoundException, message)
    }

    /// Key or item lacks a usable primary-key attribute.
    #[must_use]
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::with_message(StoreErrorCode::InvalidKeyException, message)
    }

    /// Validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_message(StoreErrorCode::ValidationException, message)
    }

    /// Serialization error.
    #[must_use]
    pub fn serialization_exception(message: impl Into<String>) -> Self {
        Self::with_message(StoreErrorCode::SerializationException, message)
    }

    /// Internal server error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(StoreErrorCode::InternalServerError, message)
    }

    /// Missing action header.
    #[must_use]
    pub fn missing_action() -> Self {
        Self::with_message(
            StoreErrorCode::MissingAction,
            "Missing required header: X-Amz-Target",
        )
    }

    /// Unknown operation.
    #[must_use]
    pub fn unknown_operation(target: &str) -> Self {
        Self::with_message(
            StoreErrorCode::UnrecognizedClientException,
            format!("Unrecognized operation: {target}"),
        )
    }

    /// Returns `true` when the error reports a missing table.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.code == StoreErrorCode::ResourceNotFoundException
    }
}
