//! HTTP boundary for the ingestion and retrieval stages.
//!
//! Two POST endpoints mirror the two pipeline stages, plus a health check:
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/parse_pdf` | Multipart PDF upload, returns extracted text |
//! | `POST` | `/api/vector_search` | Embedding vector in, ranked matches out |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! Non-POST requests on the API routes get axum's `405` with an `Allow`
//! header. Classified failures answer with a specific status and a short
//! client-safe message; full detail is logged server-side only.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use policy_rag_core::{
    digest_bytes, ingest_document, EmbeddingQuery, IngestError, RetrievalError, RetrievalStage,
    UploadedDocument, MAX_UPLOAD_BYTES,
};
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, info, warn};

/// Slack on top of the upload ceiling for multipart boundaries and
/// headers, so a file of exactly the ceiling still fits in the body.
const UPLOAD_OVERHEAD_BYTES: usize = 64 * 1024;

/// Shared state handed to every handler. Cloning is cheap: the retrieval
/// stage holds an `Arc` to the store handle.
#[derive(Clone)]
pub struct AppState {
    pub retrieval: RetrievalStage,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/parse_pdf", post(handle_parse_pdf))
        .route("/api/vector_search", post(handle_vector_search))
        .route("/health", get(handle_health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + UPLOAD_OVERHEAD_BYTES))
        .layer(cors)
        .with_state(state)
}

// ============ Error response ============

/// JSON error body with a short client-safe message; full detail stays
/// in the server logs.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Maps an ingestion failure to its HTTP status and client-safe message.
/// Every variant is a client-input error, so all of them answer 4xx.
fn ingest_error_response(error: IngestError) -> Response {
    warn!(%error, "rejected pdf upload");

    match error {
        IngestError::MissingFile => error_response(StatusCode::BAD_REQUEST, "No file uploaded."),
        IngestError::UnsupportedType { .. } => {
            error_response(StatusCode::BAD_REQUEST, "Uploaded file must be a PDF.")
        }
        IngestError::PayloadTooLarge { .. } => {
            error_response(StatusCode::PAYLOAD_TOO_LARGE, "PDF too large. Max 10 MB.")
        }
        IngestError::ParseFailure(_) => {
            error_response(StatusCode::BAD_REQUEST, "Uploaded file is not a valid PDF.")
        }
        IngestError::EmptyExtraction => error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Failed to extract text from PDF.",
        ),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /api/parse_pdf ============

#[derive(Serialize)]
struct ParsePdfResponse {
    file_name: Option<String>,
    mime_type: String,
    size: usize,
    #[serde(rename = "textContent")]
    text_content: String,
}

async fn handle_parse_pdf(headers: HeaderMap, mut multipart: Multipart) -> Response {
    // Pre-flight size check: reject from the declared length before
    // buffering anything, when the client sends one.
    if let Some(declared) = declared_content_length(&headers) {
        if declared > MAX_UPLOAD_BYTES + UPLOAD_OVERHEAD_BYTES {
            return ingest_error_response(IngestError::PayloadTooLarge {
                size: declared,
                limit: MAX_UPLOAD_BYTES,
            });
        }
    }

    let upload = match read_file_field(&mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => return ingest_error_response(IngestError::MissingFile),
        Err(response) => return response,
    };

    match ingest_document(&upload) {
        Ok(text) => {
            info!(
                file_name = upload.original_name.as_deref().unwrap_or("<unnamed>"),
                size = upload.size(),
                checksum = %digest_bytes(&upload.raw_bytes),
                chars = text.content.len(),
                "pdf ingested"
            );

            (
                StatusCode::OK,
                Json(ParsePdfResponse {
                    file_name: upload.original_name.clone(),
                    mime_type: upload
                        .declared_mime_type
                        .clone()
                        .unwrap_or_else(|| "application/pdf".to_string()),
                    size: upload.size(),
                    text_content: text.content,
                }),
            )
                .into_response()
        }
        Err(error) => ingest_error_response(error),
    }
}

fn declared_content_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Chunked uploads carry no pre-flight length signal; a body-limit
/// overrun only shows up while reading and still has to answer 413.
fn multipart_error_response(error: axum::extract::multipart::MultipartError) -> Response {
    warn!(%error, "unreadable multipart body");
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        error_response(StatusCode::PAYLOAD_TOO_LARGE, "PDF too large. Max 10 MB.")
    } else {
        error_response(StatusCode::BAD_REQUEST, "Malformed upload request.")
    }
}

/// Reads the first `file` part of the multipart body into an in-memory
/// [`UploadedDocument`]. The buffer is owned by the request scope and
/// freed on every exit path; nothing is staged on disk.
async fn read_file_field(
    multipart: &mut Multipart,
) -> Result<Option<UploadedDocument>, Response> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(error) => return Err(multipart_error_response(error)),
        };

        if field.name() != Some("file") {
            continue;
        }

        let declared_mime_type = field.content_type().map(str::to_string);
        let original_name = field.file_name().map(str::to_string);
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(error) => return Err(multipart_error_response(error)),
        };

        return Ok(Some(UploadedDocument::new(
            bytes.to_vec(),
            declared_mime_type,
            original_name,
        )));
    }
}

// ============ POST /api/vector_search ============

async fn handle_vector_search(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let query = match EmbeddingQuery::from_value(body.get("embedding")) {
        Ok(query) => query,
        Err(error) => {
            warn!(%error, "rejected vector search request");
            return error_response(
                StatusCode::BAD_REQUEST,
                "Missing or invalid embedding array",
            );
        }
    };

    debug!(dimensions = query.vector.len(), "running vector search");

    match state.retrieval.retrieve(&query).await {
        Ok(matches) => (
            StatusCode::OK,
            Json(serde_json::json!({ "matches": matches })),
        )
            .into_response(),
        Err(RetrievalError::InvalidQuery(error)) => {
            warn!(%error, "rejected vector search request");
            error_response(
                StatusCode::BAD_REQUEST,
                "Missing or invalid embedding array",
            )
        }
        Err(error) => {
            error!(%error, "vector search failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}
