//! Core of DynaMem: the table catalog, per-table document storage and the
//! update-expression interpreter, plus the handler that serves them over
//! HTTP.
#![allow(missing_docs, clippy::doc_markdown, clippy::module_name_repetitions)]

pub mod error;
pub mod expression;
pub mod handler;
pub mod provider;
pub mod state;
pub mod storage;

pub use handler::DocumentStoreHandler;
pub use provider::DocumentStore;
