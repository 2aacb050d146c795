//! Conversions from internal errors into [`StoreError`].

use dynamem_model::error::StoreError;

use crate::storage::StorageError;

/// Convert a storage error into an `InvalidKeyException`.
#[must_use]
pub fn storage_error_to_store(e: StorageError) -> StoreError {
    StoreError::invalid_key(e.to_string()).with_source(e)
}
