//! Model types for DynaMem, an in-memory document store.
//!
//! Documents, request/response structs and the error type shared by the
//! core store, the HTTP layer and the embedded server. Types serialize to the
//! DynamoDB JSON wire format so the HTTP layer can decode requests directly
//! into them.
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
#![allow(missing_docs)]

pub mod attribute_value;
pub mod error;
pub mod input;
pub mod operations;
pub mod output;
pub mod types;

pub use attribute_value::{AttributeValue, Document};
pub use error::{StoreError, StoreErrorCode};
pub use operations::StoreOperation;
pub use types::ReturnValue;
