use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, fixtures};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string())
        .unwrap()
}

// --- fields ---

#[tokio::test]
async fn fields_returns_metadata_object() {
    let resp = app().oneshot(get("/v1/metadata/fields")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let fields = body_json(resp).await;
    assert!(fields.as_object().unwrap().contains_key("dbnsfp.genename"));
}

// --- single variant ---

#[tokio::test]
async fn get_variant_full_record() {
    let resp = app()
        .oneshot(get("/v1/variant/chr9%3Ag.107620835G%3EA"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let record = body_json(resp).await;
    assert_eq!(record["_id"], fixtures::CHR9_ABCA1);
    assert!(record.get("snpeff").is_some());
}

#[tokio::test]
async fn get_variant_projects_fields() {
    let resp = app()
        .oneshot(get("/v1/variant/chr9%3Ag.107620835G%3EA?fields=cadd.alt&size=10&from=0"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let record = body_json(resp).await;
    assert_eq!(record["cadd"]["alt"], "A");
    assert!(record["cadd"].get("anc").is_none());
    assert!(record.get("dbnsfp").is_none());
}

#[tokio::test]
async fn get_variant_not_found() {
    let resp = app().oneshot(get("/v1/variant/chrX%3Ag.1A%3EG")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn variant_root_without_ids_is_bad_request() {
    let resp = app().oneshot(get("/v1/variant")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- batch variants ---

#[tokio::test]
async fn post_variants_preserves_order_and_flags_missing() {
    let resp = app()
        .oneshot(form_request(
            "/v1/variant",
            "ids=chr1%3Ag.69635G%3EC%2CchrX%3Ag.1A%3EG%2Cchr1%3Ag.866422C%3ET&fields=dbnsfp.genename",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["_id"], fixtures::CHR1_OR4F5);
    assert_eq!(records[0]["query"], fixtures::CHR1_OR4F5);
    assert_eq!(records[1]["notfound"], true);
    assert_eq!(records[2]["dbnsfp"]["genename"], "SAMD11");
}

#[tokio::test]
async fn post_variants_without_ids_is_rejected() {
    let resp = app().oneshot(form_request("/v1/variant", "fields=all")).await.unwrap();
    assert!(resp.status().is_client_error());
    let body = body_bytes(resp).await;
    assert!(!body.is_empty());
}

// --- query ---

#[tokio::test]
async fn query_fielded_term_returns_hits() {
    let resp = app()
        .oneshot(get("/v1/query?q=dbnsfp.genename%3ASAMD11&fields=all&size=10&from=0"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["hits"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn query_paginates() {
    let resp = app()
        .oneshot(get("/v1/query?q=chrom%3A1&size=1&from=1"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["total"], 3);
    let hits = body["hits"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["_id"], fixtures::CHR1_SAMD11_B);
}

#[tokio::test]
async fn query_unknown_gene_returns_no_hits() {
    let resp = app()
        .oneshot(get("/v1/query?q=dbnsfp.genename%3ACDK777"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["total"], 0);
    assert!(body["hits"].as_array().unwrap().is_empty());
}

// --- batch query ---

#[tokio::test]
async fn query_many_matches_scoped_terms() {
    let resp = app()
        .oneshot(form_request(
            "/v1/query",
            "q=rs58991260%2Crs2500%2Crs0&scopes=dbsnp.rsid&fields=dbsnp.rsid",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["_id"], fixtures::CHR9_ABCA1);
    assert_eq!(results[0]["query"], "rs58991260");
    assert_eq!(results[1]["_id"], fixtures::CHR1_SAMD11_A);
    assert_eq!(results[2]["notfound"], true);
}
