//! HTTP transport for DynaMem.
//!
//! Speaks the DynamoDB `awsJson1_0` envelope so stock SDK clients can talk to
//! the in-memory store:
//!
//! - **Router**: picks the operation out of the `X-Amz-Target` header
//! - **Handler trait**: the seam between transport and store logic
//! - **Service**: a hyper `Service` running the request pipeline
//! - **Response helpers**: JSON success and error bodies
#![allow(missing_docs)]

pub mod body;
pub mod dispatch;
pub mod response;
pub mod router;
pub mod service;

pub use body::StoreResponseBody;
pub use dispatch::{HandlerFuture, StoreHandler};
pub use service::{StoreHttpConfig, StoreHttpService};
