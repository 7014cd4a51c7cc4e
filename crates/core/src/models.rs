use crate::error::RetrievalError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One uploaded policy document, alive for the duration of a single
/// ingestion call. Dropping it releases the only copy of the bytes; no
/// on-disk staging is ever created.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub raw_bytes: Vec<u8>,
    /// Client-declared content type. Advisory only, never trusted alone.
    pub declared_mime_type: Option<String>,
    /// Client-supplied filename, used for display and audit logging only.
    pub original_name: Option<String>,
}

impl UploadedDocument {
    pub fn new(
        raw_bytes: Vec<u8>,
        declared_mime_type: Option<String>,
        original_name: Option<String>,
    ) -> Self {
        Self {
            raw_bytes,
            declared_mime_type,
            original_name,
        }
    }

    pub fn size(&self) -> usize {
        self.raw_bytes.len()
    }
}

/// Linearized text of a whole document, page order preserved.
/// Guaranteed non-empty and not whitespace-only on construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedText {
    pub content: String,
}

/// Text of a single page as read from the document, in document order.
#[derive(Debug, Clone)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

/// A query embedding produced by the external embedding service.
/// Dimensionality is validated by the index, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingQuery {
    pub vector: Vec<f32>,
}

impl EmbeddingQuery {
    pub fn new(vector: Vec<f32>) -> Self {
        Self { vector }
    }

    /// Parses the `embedding` member of a loosely-typed JSON request body.
    /// Fails closed: anything other than a flat array of numbers is
    /// rejected here, before any store traffic.
    pub fn from_value(value: Option<&Value>) -> Result<Self, RetrievalError> {
        let array = value
            .and_then(Value::as_array)
            .ok_or_else(|| RetrievalError::InvalidQuery("embedding must be an array".to_string()))?;

        let mut vector = Vec::with_capacity(array.len());
        for element in array {
            let number = element.as_f64().ok_or_else(|| {
                RetrievalError::InvalidQuery("embedding must contain only numbers".to_string())
            })?;
            vector.push(number as f32);
        }

        Ok(Self { vector })
    }
}

/// Tunable knobs of a single retrieval call.
///
/// `num_candidates` is the breadth of the approximate search inside the
/// index (recall vs. latency trade-off); `limit` is how many ranked
/// matches the caller actually receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrievalOptions {
    pub num_candidates: usize,
    pub limit: usize,
}

pub const DEFAULT_NUM_CANDIDATES: usize = 100;
pub const DEFAULT_LIMIT: usize = 5;

impl Default for RetrievalOptions {
    fn default() -> Self {
        Self {
            num_candidates: DEFAULT_NUM_CANDIDATES,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl RetrievalOptions {
    /// Result limit, clamped so it never exceeds the candidate pool.
    pub fn effective_limit(&self) -> usize {
        self.limit.min(self.num_candidates)
    }
}

/// Fully shaped nearest-neighbor request handed to the vector index.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorSearchRequest {
    pub embedding: Vec<f32>,
    pub num_candidates: usize,
    pub limit: usize,
}

/// One ranked hit from the index. `document` is the stored payload,
/// passed through verbatim; `rank` is the 0-based similarity position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalMatch {
    pub rank: usize,
    pub document: Value,
}
