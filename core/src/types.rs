//! Option and result types shared by every client operation.
//!
//! # Design
//! Every operation takes its key (id, ids, term, terms) plus one
//! `&QueryOptions`, so validation lives in a single place
//! (`QueryOptions::validate`). Strings coming from users (CLI arguments,
//! comma-joined id lists) are parsed into these types through `FromStr` /
//! `From` so malformed input is rejected before a request is built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Default page size sent with every request.
pub const DEFAULT_SIZE: u64 = 10_000;

/// Field selection for a request: everything, or a list of dot-paths such as
/// `dbnsfp.genename`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Fields {
    #[default]
    All,
    Named(Vec<String>),
}

impl Fields {
    /// Build a selection from a list of field paths. Blank entries are
    /// dropped; an empty result is rejected.
    pub fn from_list<I, S>(fields: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let named: Vec<String> = fields
            .into_iter()
            .map(|f| f.as_ref().trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();
        if named.is_empty() {
            return Err(ApiError::InvalidOptions("no fields supplied".to_string()));
        }
        if named.len() == 1 && named[0] == "all" {
            return Ok(Fields::All);
        }
        Ok(Fields::Named(named))
    }

    /// Comma-joined wire representation.
    pub fn to_param(&self) -> String {
        match self {
            Fields::All => "all".to_string(),
            Fields::Named(names) => names.join(","),
        }
    }
}

impl FromStr for Fields {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fields::from_list(s.split(','))
    }
}

/// Output shape requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Tsv,
    Table,
    Flat,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Json,
        OutputFormat::Csv,
        OutputFormat::Tsv,
        OutputFormat::Table,
        OutputFormat::Flat,
    ];

    /// Field delimiter for tabular formats, `None` for JSON.
    pub fn delimiter(self) -> Option<u8> {
        match self {
            OutputFormat::Json => None,
            OutputFormat::Csv => Some(b','),
            OutputFormat::Tsv | OutputFormat::Table | OutputFormat::Flat => Some(b'\t'),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Table => "table",
            OutputFormat::Flat => "flat",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| {
                ApiError::InvalidOptions(format!(
                    "unknown format '{s}', expected one of json, csv, tsv, table, flat"
                ))
            })
    }
}

/// Options accepted by every request-building operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    pub fields: Fields,
    pub size: u64,
    pub from: u64,
    pub format: OutputFormat,
    /// Field paths batch query terms are matched against. Only sent by
    /// `query_many`; omitted from the request when empty.
    pub scopes: Vec<String>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        QueryOptions {
            fields: Fields::All,
            size: DEFAULT_SIZE,
            from: 0,
            format: OutputFormat::Json,
            scopes: Vec::new(),
        }
    }
}

impl QueryOptions {
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_from(mut self, from: u64) -> Self {
        self.from = from;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Reject options the service would misinterpret.
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Fields::Named(names) = &self.fields {
            if names.is_empty() || names.iter().any(|n| n.trim().is_empty()) {
                return Err(ApiError::InvalidOptions(
                    "fields must be 'all' or a list of field names".to_string(),
                ));
            }
        }
        if self.size == 0 {
            return Err(ApiError::InvalidOptions("size must be greater than zero".to_string()));
        }
        Ok(())
    }
}

/// An ordered list of variant ids or batch query terms.
///
/// Built from either a comma-joined string or a list; entries are trimmed
/// and blank entries dropped, so `"a, b,"` holds `["a", "b"]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdList(Vec<String>);

impl IdList {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn joined(&self) -> String {
        self.0.join(",")
    }

    fn collect<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        IdList(
            items
                .into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

impl From<&str> for IdList {
    fn from(s: &str) -> Self {
        IdList::collect(s.split(','))
    }
}

impl From<String> for IdList {
    fn from(s: String) -> Self {
        IdList::from(s.as_str())
    }
}

impl From<Vec<String>> for IdList {
    fn from(v: Vec<String>) -> Self {
        IdList::collect(v)
    }
}

impl From<&[&str]> for IdList {
    fn from(v: &[&str]) -> Self {
        IdList::collect(v)
    }
}

impl<const N: usize> From<[&str; N]> for IdList {
    fn from(v: [&str; N]) -> Self {
        IdList::collect(v)
    }
}

/// Result of an operation after format conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// The service's JSON, untouched.
    Json(Value),
    /// A CSV/TSV rendering of the flattened rows.
    Text(String),
}

impl Output {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Output::Json(v) => Some(v),
            Output::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Output::Json(_) => None,
            Output::Text(s) => Some(s.as_str()),
        }
    }

    /// Render as a string suitable for writing to a file.
    pub fn to_body(&self) -> Result<String, ApiError> {
        match self {
            Output::Json(v) => serde_json::to_string_pretty(v)
                .map_err(|e| ApiError::Export(e.to_string())),
            Output::Text(s) => Ok(s.clone()),
        }
    }
}
