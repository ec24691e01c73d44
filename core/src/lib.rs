//! Client for the MyVariant.info variant-annotation API.
//!
//! # Overview
//! Fetches the field dictionary, single and batched variant records, and
//! free-text or batch query results, optionally converting the JSON into
//! CSV/TSV with nested objects flattened into dotted columns.
//!
//! # Design
//! - `VariantClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network (host-does-IO pattern).
//! - `Transport` executes requests; `UreqTransport` is the blocking default.
//! - `MyVariant` chains build, execute and parse for one-call use.
//! - Every operation takes its key plus one `QueryOptions`.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod http;
pub mod transport;
pub mod types;

pub use api::MyVariant;
pub use client::VariantClient;
pub use config::{ClientConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{Fields, IdList, Output, OutputFormat, QueryOptions};
