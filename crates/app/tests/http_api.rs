//! Integration tests driving the real router over HTTP with a fake
//! vector index behind the retrieval stage.

use async_trait::async_trait;
use policy_rag_api::{build_router, AppState};
use policy_rag_core::{
    RetrievalError, RetrievalOptions, RetrievalStage, VectorSearchIndex, VectorSearchRequest,
    MAX_UPLOAD_BYTES,
};
use serde_json::{json, Value};
use std::sync::Arc;

struct FakeIndex {
    documents: Vec<Value>,
}

#[async_trait]
impl VectorSearchIndex for FakeIndex {
    async fn vector_search(
        &self,
        request: &VectorSearchRequest,
    ) -> Result<Vec<Value>, RetrievalError> {
        Ok(self.documents.iter().take(request.limit).cloned().collect())
    }
}

async fn spawn_app(documents: Vec<Value>) -> String {
    let state = AppState {
        retrieval: RetrievalStage::new(
            Arc::new(FakeIndex { documents }),
            RetrievalOptions::default(),
        ),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, build_router(state))
            .await
            .expect("server");
    });

    format!("http://{addr}")
}

/// The upload scenario document: two pages, policy title on page 1 and
/// the premium line on page 2.
fn policy_pdf() -> Vec<u8> {
    policy_rag_core::test_support::two_page_pdf("Term Life Policy", "Premium: $50/month")
}

fn textless_pdf() -> Vec<u8> {
    policy_rag_core::test_support::pdf_without_text()
}

fn pdf_form(bytes: Vec<u8>, file_name: &str, mime: &str) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime)
        .expect("valid mime");
    reqwest::multipart::Form::new().part("file", part)
}

async fn upload(base: &str, form: reqwest::multipart::Form) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base}/api/parse_pdf"))
        .multipart(form)
        .send()
        .await
        .expect("request")
}

#[tokio::test]
async fn parse_pdf_returns_text_in_page_order() {
    let base = spawn_app(Vec::new()).await;
    let pdf = policy_pdf();
    let size = pdf.len();

    let response = upload(&base, pdf_form(pdf, "policy.pdf", "application/pdf")).await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["file_name"], "policy.pdf");
    assert_eq!(body["mime_type"], "application/pdf");
    assert_eq!(body["size"], size);

    let text = body["textContent"].as_str().expect("textContent string");
    let first = text.find("Term Life Policy").expect("page 1 text");
    let second = text.find("Premium: $50/month").expect("page 2 text");
    assert!(first < second);
}

#[tokio::test]
async fn parse_pdf_preserves_run_order_within_a_page() {
    let base = spawn_app(Vec::new()).await;
    let pdf = policy_rag_core::test_support::pdf_with_text("Coverage: $250,000", "Deductible: $500");

    let response = upload(&base, pdf_form(pdf, "policy.pdf", "application/pdf")).await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("json body");
    let text = body["textContent"].as_str().expect("textContent string");
    let first = text.find("Coverage: $250,000").expect("first run");
    let second = text.find("Deductible: $500").expect("second run");
    assert!(first < second);
}

#[tokio::test]
async fn parse_pdf_without_file_field_is_400() {
    let base = spawn_app(Vec::new()).await;
    let form = reqwest::multipart::Form::new().text("comment", "no file here");

    let response = upload(&base, form).await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["error"], "No file uploaded.");
}

#[tokio::test]
async fn parse_pdf_rejects_non_pdf_uploads() {
    let base = spawn_app(Vec::new()).await;
    let form = pdf_form(b"plain words".to_vec(), "notes.txt", "text/plain");

    let response = upload(&base, form).await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["error"], "Uploaded file must be a PDF.");
}

#[tokio::test]
async fn parse_pdf_rejects_oversized_uploads_with_413() {
    let base = spawn_app(Vec::new()).await;
    let form = pdf_form(
        vec![0u8; MAX_UPLOAD_BYTES + 1],
        "huge.pdf",
        "application/pdf",
    );

    let response = upload(&base, form).await;
    assert_eq!(response.status(), 413);

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["error"], "PDF too large. Max 10 MB.");
}

#[tokio::test]
async fn parse_pdf_reports_textless_pdfs_as_422() {
    let base = spawn_app(Vec::new()).await;
    let form = pdf_form(textless_pdf(), "image_scan.pdf", "application/pdf");

    let response = upload(&base, form).await;
    assert_eq!(response.status(), 422);

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["error"], "Failed to extract text from PDF.");
}

#[tokio::test]
async fn parse_pdf_surfaces_renamed_non_pdf_as_4xx_not_500() {
    let base = spawn_app(Vec::new()).await;
    let form = pdf_form(
        b"PK\x03\x04 this was a docx once".to_vec(),
        "report.pdf",
        "application/pdf",
    );

    let response = upload(&base, form).await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn vector_search_returns_ranked_matches() {
    let documents: Vec<Value> = (0..5)
        .map(|i| json!({ "title": format!("policy-{i}"), "similarity_rank": i }))
        .collect();
    let base = spawn_app(documents).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/vector_search"))
        .json(&json!({ "embedding": [0.1, 0.2, 0.3] }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("json body");
    let matches = body["matches"].as_array().expect("matches array");
    assert!(matches.len() <= 5);
    for (position, hit) in matches.iter().enumerate() {
        assert_eq!(hit["rank"], position);
        assert_eq!(hit["document"]["similarity_rank"], position);
    }
}

#[tokio::test]
async fn vector_search_rejects_non_array_embedding() {
    let base = spawn_app(Vec::new()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/vector_search"))
        .json(&json!({ "embedding": "not-an-array" }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["error"], "Missing or invalid embedding array");
}

#[tokio::test]
async fn vector_search_rejects_missing_embedding() {
    let base = spawn_app(Vec::new()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/vector_search"))
        .json(&json!({}))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn wrong_method_gets_405_with_allow_header() {
    let base = spawn_app(Vec::new()).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/api/vector_search"))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 405);

    let allow = response
        .headers()
        .get("allow")
        .and_then(|value| value.to_str().ok())
        .expect("allow header");
    assert!(allow.contains("POST"));
}

#[tokio::test]
async fn health_reports_ok() {
    let base = spawn_app(Vec::new()).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/health"))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["status"], "ok");
}
