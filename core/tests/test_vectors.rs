//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. JSON results are compared as parsed values
//! (not raw strings) so key order cannot cause false negatives; tabular
//! results are compared as exact text.

use myvariant_core::{
    ApiError, HttpMethod, HttpRequest, HttpResponse, IdList, Output, OutputFormat, QueryOptions, VariantClient,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000/v1";

fn client() -> VariantClient {
    VariantClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_options(v: &Value) -> QueryOptions {
    let scopes: Vec<String> = v["scopes"]
        .as_array()
        .map(|a| a.iter().map(|s| s.as_str().unwrap().to_string()).collect())
        .unwrap_or_default();
    QueryOptions::default()
        .with_fields(v["fields"].as_str().unwrap().parse().unwrap())
        .with_size(v["size"].as_u64().unwrap())
        .with_from(v["from"].as_u64().unwrap())
        .with_format(serde_json::from_value::<OutputFormat>(v["format"].clone()).unwrap())
        .with_scopes(scopes)
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");
    assert_eq!(req.header("content-type"), expected["content_type"].as_str(), "{name}: content-type");
    assert_eq!(req.body.as_deref(), expected["body"].as_str(), "{name}: body");
}

fn check_error(name: &str, err: ApiError, expected: &str) {
    match expected {
        "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound, got {err}"),
        "HttpError" => assert!(matches!(err, ApiError::HttpError { .. }), "{name}: expected HttpError, got {err}"),
        "InvalidResponse" => {
            assert!(matches!(err, ApiError::InvalidResponse(_)), "{name}: expected InvalidResponse, got {err}")
        }
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

/// Compare a converted result with `expected_result` (JSON) or
/// `expected_text` (CSV/TSV), or an error with `expected_error`.
fn check_output(name: &str, case: &Value, result: Result<Output, ApiError>) {
    if let Some(expected_error) = case.get("expected_error") {
        check_error(name, result.unwrap_err(), expected_error.as_str().unwrap());
        return;
    }
    match result.unwrap() {
        Output::Json(value) => assert_eq!(value, case["expected_result"], "{name}: parsed result"),
        Output::Text(text) => assert_eq!(text, case["expected_text"].as_str().unwrap(), "{name}: text"),
    }
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

#[test]
fn fields_test_vectors() {
    let raw = include_str!("../../test-vectors/fields.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c.build_get_fields();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_get_fields(simulated(case), case["search"].as_str());
        if let Some(expected_error) = case.get("expected_error") {
            check_error(name, result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            let fields = Value::Object(result.unwrap());
            assert_eq!(fields, case["expected_result"], "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Single variant
// ---------------------------------------------------------------------------

#[test]
fn get_variant_test_vectors() {
    let raw = include_str!("../../test-vectors/get_variant.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let opts = parse_options(&case["options"]);

        let req = c.build_get_variant(case["id"].as_str().unwrap(), &opts).unwrap();
        check_request(name, &req, &case["expected_request"]);

        check_output(name, case, c.parse_variants(simulated(case), opts.format));
    }
}

// ---------------------------------------------------------------------------
// Batch variants
// ---------------------------------------------------------------------------

#[test]
fn get_variants_test_vectors() {
    let raw = include_str!("../../test-vectors/get_variants.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let opts = parse_options(&case["options"]);
        let ids = IdList::from(case["ids"].as_str().unwrap());

        let req = c.build_get_variants(&ids, &opts).unwrap();
        check_request(name, &req, &case["expected_request"]);

        check_output(name, case, c.parse_variants(simulated(case), opts.format));
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

#[test]
fn query_test_vectors() {
    let raw = include_str!("../../test-vectors/query.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let opts = parse_options(&case["options"]);

        let req = c.build_query(case["term"].as_str().unwrap(), &opts).unwrap();
        check_request(name, &req, &case["expected_request"]);

        check_output(name, case, c.parse_query(simulated(case), opts.format));
    }
}

// ---------------------------------------------------------------------------
// Batch query
// ---------------------------------------------------------------------------

#[test]
fn query_many_test_vectors() {
    let raw = include_str!("../../test-vectors/query_many.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let opts = parse_options(&case["options"]);
        let terms = IdList::from(case["terms"].as_str().unwrap());

        let req = c.build_query_many(&terms, &opts).unwrap();
        check_request(name, &req, &case["expected_request"]);

        check_output(name, case, c.parse_query_many(simulated(case), opts.format));
    }
}
