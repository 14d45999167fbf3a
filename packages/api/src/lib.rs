//! # API crate: typed access to the shop's remote REST API
//!
//! All persistence of the dashboard lives behind a remote HTTP API. This crate
//! is the only place that knows its routes and wire format.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | `User`, `Product`, report payloads and their lenient wire decoding |
//! | [`envelope`] | The `{success, msg, data?}` wrapper and its decoding into `Result` |
//! | [`backend`] | The [`HttpBackend`] transport trait and request/response types |
//! | [`client`] | [`ApiClient`], one async method per remote operation |
//! | `http` | [`ReqwestBackend`], the real transport |
//! | `memory` | [`MemoryBackend`], an in-process emulation of the API for tests |
//!
//! ## Error contract
//!
//! Every operation returns `Result<T, ApiError>`. A `success: false` envelope is
//! [`ApiError::Rejected`] carrying the server message, whatever the HTTP status.

pub mod backend;
pub mod client;
pub mod envelope;
mod error;
mod http;
mod memory;
pub mod models;

pub use backend::{ApiRequest, ApiResponse, FormPart, HttpBackend, Method, RequestBody};
pub use client::ApiClient;
pub use error::{ApiError, GENERIC_FAILURE_MESSAGE};
pub use http::ReqwestBackend;
pub use memory::{Failure, MemoryBackend};
pub use models::{
    Category, ClientDue, Credentials, ImageUpload, MonthlyClientCount, PaymentCounts, Product,
    ProductDraft, Role, User,
};
