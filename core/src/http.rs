//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! `VariantClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network; a `Transport` (see `transport.rs`)
//! executes them. Query strings are already encoded into `path`, and POST
//! bodies are already form-encoded, so a transport only has to move bytes.

/// Content type of every POST body the client produces.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP method for a request. The service only needs two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
///
/// `path` is the absolute URL including any query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub(crate) fn get(url: String) -> Self {
        HttpRequest {
            method: HttpMethod::Get,
            path: url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn post_form(url: String, pairs: &[(&str, String)]) -> Self {
        HttpRequest {
            method: HttpMethod::Post,
            path: url,
            headers: vec![("content-type".to_string(), FORM_CONTENT_TYPE.to_string())],
            body: Some(encode_pairs(pairs)),
        }
    }

    /// Value of the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Percent-encode `key=value` pairs joined by `&`.
///
/// Used for both query strings and `application/x-www-form-urlencoded`
/// bodies; spaces become `%20`, which form decoders accept.
pub(crate) fn encode_pairs(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
