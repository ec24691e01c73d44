//! One-call facade: build, execute, parse.
//!
//! `MyVariant` pairs a `VariantClient` with a `Transport` so callers that
//! don't need the request/response split get a single method per service
//! endpoint. Every call is independent; the struct holds only
//! configuration.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::client::VariantClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{IdList, Output, QueryOptions};

#[derive(Debug, Clone)]
pub struct MyVariant<T = UreqTransport> {
    client: VariantClient,
    transport: T,
}

impl MyVariant<UreqTransport> {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl Default for MyVariant<UreqTransport> {
    fn default() -> Self {
        Self::new(&ClientConfig::from_env())
    }
}

impl<T: Transport> MyVariant<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            client: VariantClient::from_config(config),
            transport,
        }
    }

    pub fn client(&self) -> &VariantClient {
        &self.client
    }

    /// Field metadata, optionally filtered to keys containing `search`.
    pub fn get_fields(&self, search: Option<&str>) -> Result<Map<String, Value>, ApiError> {
        let response = self.send(self.client.build_get_fields())?;
        self.client.parse_get_fields(response, search)
    }

    pub fn get_variant(&self, id: &str, opts: &QueryOptions) -> Result<Output, ApiError> {
        let req = rejecting("get_variant", self.client.build_get_variant(id, opts))?;
        self.client.parse_variants(self.send(req)?, opts.format)
    }

    /// Accepts `"id1,id2"`, `["id1", "id2"]` or a `Vec<String>`. One id
    /// yields a single object, several yield an array in input order.
    pub fn get_variants(&self, ids: impl Into<IdList>, opts: &QueryOptions) -> Result<Output, ApiError> {
        let ids = ids.into();
        let req = rejecting("get_variants", self.client.build_get_variants(&ids, opts))?;
        self.client.parse_variants(self.send(req)?, opts.format)
    }

    pub fn query(&self, term: &str, opts: &QueryOptions) -> Result<Output, ApiError> {
        let req = rejecting("query", self.client.build_query(term, opts))?;
        self.client.parse_query(self.send(req)?, opts.format)
    }

    /// Batch query; `opts.scopes` names the fields the terms are matched
    /// against.
    pub fn query_many(&self, terms: impl Into<IdList>, opts: &QueryOptions) -> Result<Output, ApiError> {
        let terms = terms.into();
        let req = rejecting("query_many", self.client.build_query_many(&terms, opts))?;
        self.client.parse_query_many(self.send(req)?, opts.format)
    }

    /// GET a pre-built URL under the configured base URL, returning the raw
    /// JSON.
    pub fn passthru(&self, url: &str) -> Result<Value, ApiError> {
        let req = rejecting("passthru", self.client.build_passthru(url))?;
        self.client.parse_passthru(self.send(req)?)
    }

    fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = ?req.method, url = %req.path, "sending request");
        let response = self.transport.execute(&req)?;
        debug!(status = response.status, bytes = response.body.len(), "received response");
        Ok(response)
    }
}

fn rejecting(op: &str, built: Result<HttpRequest, ApiError>) -> Result<HttpRequest, ApiError> {
    if let Err(e) = &built {
        warn!(op, error = %e, "request rejected before sending");
    }
    built
}
