//! In-memory imitation of the MyVariant.info v1 endpoints the client uses.
//!
//! Routes are mounted under `/v1`, matching the public service's layout, so
//! a client pointed at `http://{addr}/v1` behaves as it would against the
//! real base URL.

pub mod fixtures;

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

pub const API_PREFIX: &str = "/v1";

#[derive(Debug)]
struct Dataset {
    variants: Vec<Value>,
    fields: Value,
}

impl Default for Dataset {
    fn default() -> Self {
        Dataset {
            variants: fixtures::variants(),
            fields: fixtures::fields(),
        }
    }
}

impl Dataset {
    fn find(&self, id: &str) -> Option<&Value> {
        self.variants.iter().find(|v| v["_id"] == id)
    }
}

type Db = Arc<Dataset>;

#[derive(Debug, Deserialize)]
pub struct VariantParams {
    pub fields: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VariantBatch {
    pub ids: String,
    pub fields: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub fields: Option<String>,
    pub size: Option<usize>,
    pub from: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct BatchSearch {
    pub q: String,
    pub scopes: Option<String>,
    pub fields: Option<String>,
}

pub fn app() -> Router {
    let db: Db = Arc::new(Dataset::default());
    let api = Router::new()
        .route("/metadata/fields", get(get_fields))
        .route("/variant", get(missing_id).post(post_variants))
        .route("/variant/{id}", get(get_variant))
        .route("/query", get(query).post(query_many))
        .with_state(db);
    Router::new().nest(API_PREFIX, api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn get_fields(State(db): State<Db>) -> Json<Value> {
    Json(db.fields.clone())
}

async fn missing_id() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"success": false, "error": "Missing required parameter: ids"})),
    )
}

async fn get_variant(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<VariantParams>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let record = db.find(&id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "error": format!("ID '{id}' not found")})),
        )
    })?;
    Ok(Json(project(record, params.fields.as_deref())))
}

async fn post_variants(State(db): State<Db>, Form(batch): Form<VariantBatch>) -> Json<Vec<Value>> {
    let results = split_list(&batch.ids)
        .map(|id| match db.find(id) {
            Some(record) => with_query(project(record, batch.fields.as_deref()), id),
            None => json!({"query": id, "notfound": true}),
        })
        .collect();
    Json(results)
}

async fn query(State(db): State<Db>, Query(params): Query<SearchParams>) -> Json<Value> {
    let matches: Vec<&Value> = db.variants.iter().filter(|v| matches_query(v, &params.q)).collect();
    let from = params.from.unwrap_or(0);
    let size = params.size.unwrap_or(10);
    let hits: Vec<Value> = matches
        .iter()
        .skip(from)
        .take(size)
        .map(|v| {
            let mut hit = project(v, params.fields.as_deref());
            if let Value::Object(map) = &mut hit {
                map.insert("_score".to_string(), json!(1.0));
            }
            hit
        })
        .collect();
    let max_score = if matches.is_empty() { Value::Null } else { json!(1.0) };
    Json(json!({
        "took": 1,
        "total": matches.len(),
        "max_score": max_score,
        "hits": hits,
    }))
}

async fn query_many(State(db): State<Db>, Form(batch): Form<BatchSearch>) -> Json<Vec<Value>> {
    let scopes: Vec<&str> = match batch.scopes.as_deref() {
        Some(s) if !s.trim().is_empty() => split_list(s).collect(),
        _ => vec!["_id"],
    };
    let mut results = Vec::new();
    for term in split_list(&batch.q) {
        let hits: Vec<&Value> = db
            .variants
            .iter()
            .filter(|v| scopes.iter().any(|scope| equals_ignore_case(lookup(v, scope), term)))
            .collect();
        if hits.is_empty() {
            results.push(json!({"query": term, "notfound": true}));
        }
        for record in hits {
            results.push(with_query(project(record, batch.fields.as_deref()), term));
        }
    }
    Json(results)
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn with_query(mut record: Value, term: &str) -> Value {
    if let Value::Object(map) = &mut record {
        map.insert("query".to_string(), json!(term));
    }
    record
}

/// Value at a dot-path. Arrays are searched element-wise, returning the
/// first element that has the remaining path.
fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };
    match value {
        Value::Array(items) => items.iter().find_map(|item| lookup(item, path)),
        Value::Object(map) => {
            let child = map.get(head)?;
            match rest {
                Some(rest) => lookup(child, rest),
                None => Some(child),
            }
        }
        _ => None,
    }
}

fn equals_ignore_case(found: Option<&Value>, term: &str) -> bool {
    match found {
        Some(Value::String(s)) => s.eq_ignore_ascii_case(term),
        Some(Value::Array(items)) => items.iter().any(|i| equals_ignore_case(Some(i), term)),
        Some(other @ (Value::Number(_) | Value::Bool(_))) => other.to_string() == term,
        _ => false,
    }
}

/// `path:value` clauses joined by `AND`; `_exists_:path` tests presence; a
/// bare term matches `_id` substrings.
fn matches_query(record: &Value, q: &str) -> bool {
    q.split(" AND ")
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .all(|clause| match clause.split_once(':') {
            Some(("_exists_", path)) => lookup(record, path).is_some(),
            Some((path, value)) if !is_chromosome(path) => {
                equals_ignore_case(lookup(record, path), value)
            }
            _ => record["_id"]
                .as_str()
                .is_some_and(|id| id.to_lowercase().contains(&clause.to_lowercase())),
        })
}

/// `chr9`, `chrX`, `chrMT`: the left side of an HGVS id or a region, not a
/// field path.
fn is_chromosome(s: &str) -> bool {
    s.strip_prefix("chr").is_some_and(|name| {
        !name.is_empty() && (name.bytes().all(|b| b.is_ascii_digit()) || matches!(name, "X" | "Y" | "M" | "MT"))
    })
}

/// Keep only the requested dot-paths (plus `_id`); `all` or no selection
/// keeps everything.
fn project(record: &Value, fields: Option<&str>) -> Value {
    let selected: Vec<&str> = match fields {
        None => return record.clone(),
        Some(f) if f.trim() == "all" => return record.clone(),
        Some(f) => split_list(f).collect(),
    };
    let mut out = Map::new();
    out.insert("_id".to_string(), record["_id"].clone());
    for path in selected {
        if let Some(value) = lookup(record, path) {
            insert_path(&mut out, path, value.clone());
        }
    }
    Value::Object(out)
}

fn insert_path(map: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            map.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let child = map
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(child) = child {
                insert_path(child, rest, value);
            }
        }
    }
}
