//! Stateless HTTP request builder and response parser for the MyVariant API.
//!
//! # Design
//! `VariantClient` holds only a `base_url` and a user agent, and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that validates its input and produces an `HttpRequest`, and a
//! `parse_*` method that consumes an `HttpResponse` and applies the
//! requested output format. The caller (or `MyVariant`) executes the
//! round-trip in between.

use serde_json::{Map, Value};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::export;
use crate::http::{encode_pairs, HttpRequest, HttpResponse};
use crate::types::{IdList, OutputFormat, Output, QueryOptions};

/// Synchronous, stateless client for the MyVariant API.
#[derive(Debug, Clone)]
pub struct VariantClient {
    base_url: String,
    user_agent: String,
}

impl VariantClient {
    pub fn new(base_url: &str) -> Self {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn with_agent(&self, mut req: HttpRequest) -> HttpRequest {
        req.headers.push(("user-agent".to_string(), self.user_agent.clone()));
        req
    }

    // -----------------------------------------------------------------------
    // Build
    // -----------------------------------------------------------------------

    pub fn build_get_fields(&self) -> HttpRequest {
        self.with_agent(HttpRequest::get(self.url("metadata/fields")))
    }

    pub fn build_get_variant(&self, id: &str, opts: &QueryOptions) -> Result<HttpRequest, ApiError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ApiError::MissingId);
        }
        opts.validate()?;

        let query = encode_pairs(&[
            ("fields", opts.fields.to_param()),
            ("size", opts.size.to_string()),
            ("from", opts.from.to_string()),
        ]);
        let url = format!("{}?{query}", self.url(&format!("variant/{}", urlencoding::encode(id))));
        Ok(self.with_agent(HttpRequest::get(url)))
    }

    /// A single id produces the same GET as `build_get_variant`; several ids
    /// produce a form POST that keeps their order.
    pub fn build_get_variants(&self, ids: &IdList, opts: &QueryOptions) -> Result<HttpRequest, ApiError> {
        match ids.as_slice() {
            [] => Err(ApiError::MissingId),
            [single] => self.build_get_variant(single, opts),
            _ => {
                opts.validate()?;
                Ok(self.with_agent(HttpRequest::post_form(
                    self.url("variant"),
                    &[("ids", ids.joined()), ("fields", opts.fields.to_param())],
                )))
            }
        }
    }

    pub fn build_query(&self, term: &str, opts: &QueryOptions) -> Result<HttpRequest, ApiError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(ApiError::MissingQuery);
        }
        opts.validate()?;

        let query = encode_pairs(&[
            ("q", term.to_string()),
            ("fields", opts.fields.to_param()),
            ("size", opts.size.to_string()),
            ("from", opts.from.to_string()),
        ]);
        Ok(self.with_agent(HttpRequest::get(format!("{}?{query}", self.url("query")))))
    }

    pub fn build_query_many(&self, terms: &IdList, opts: &QueryOptions) -> Result<HttpRequest, ApiError> {
        if terms.is_empty() {
            return Err(ApiError::MissingQuery);
        }
        opts.validate()?;

        let mut pairs = vec![("q", terms.joined())];
        let scopes = opts
            .scopes
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        if !scopes.is_empty() {
            pairs.push(("scopes", scopes));
        }
        pairs.push(("fields", opts.fields.to_param()));
        pairs.push(("size", opts.size.to_string()));
        pairs.push(("from", opts.from.to_string()));
        Ok(self.with_agent(HttpRequest::post_form(self.url("query"), &pairs)))
    }

    /// GET an already-built URL. It must live under this client's base URL.
    pub fn build_passthru(&self, url: &str) -> Result<HttpRequest, ApiError> {
        let url = url.trim();
        let under_base = url
            .strip_prefix(self.base_url.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'));
        if url.is_empty() || !under_base {
            return Err(ApiError::InvalidUrl);
        }
        Ok(self.with_agent(HttpRequest::get(url.to_string())))
    }

    // -----------------------------------------------------------------------
    // Parse
    // -----------------------------------------------------------------------

    /// Field metadata, optionally restricted to keys containing `search`
    /// (case-insensitive).
    pub fn parse_get_fields(
        &self,
        response: HttpResponse,
        search: Option<&str>,
    ) -> Result<Map<String, Value>, ApiError> {
        let fields = match parse_json(response)? {
            Value::Object(map) => map,
            other => {
                return Err(ApiError::InvalidResponse(format!(
                    "expected an object of field metadata, got {}",
                    json_kind(&other)
                )))
            }
        };
        match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(needle) => {
                let needle = needle.to_lowercase();
                Ok(fields
                    .into_iter()
                    .filter(|(k, _)| k.to_lowercase().contains(&needle))
                    .collect())
            }
            None => Ok(fields),
        }
    }

    /// Response of `build_get_variant` or `build_get_variants`.
    pub fn parse_variants(&self, response: HttpResponse, format: OutputFormat) -> Result<Output, ApiError> {
        let body = parse_json(response)?;
        convert(body, format, export::rows_of)
    }

    /// Response of `build_query`; tabular formats export the `hits` array.
    pub fn parse_query(&self, response: HttpResponse, format: OutputFormat) -> Result<Output, ApiError> {
        let body = parse_json(response)?;
        convert(body, format, hits_of)
    }

    /// Response of `build_query_many`; tabular formats export one row per
    /// returned record.
    pub fn parse_query_many(&self, response: HttpResponse, format: OutputFormat) -> Result<Output, ApiError> {
        let body = parse_json(response)?;
        convert(body, format, |body| {
            if body.get("hits").is_some() {
                hits_of(body)
            } else {
                export::rows_of(body)
            }
        })
    }

    pub fn parse_passthru(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(response)
    }
}

fn convert(body: Value, format: OutputFormat, rows: impl FnOnce(Value) -> Vec<Value>) -> Result<Output, ApiError> {
    match format.delimiter() {
        None => Ok(Output::Json(body)),
        Some(delimiter) => export::to_delimited(&rows(body), delimiter).map(Output::Text),
    }
}

fn hits_of(body: Value) -> Vec<Value> {
    match body {
        Value::Object(mut map) => map.remove("hits").map(export::rows_of).unwrap_or_default(),
        other => export::rows_of(other),
    }
}

fn parse_json(response: HttpResponse) -> Result<Value, ApiError> {
    check_status(&response, 200)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
