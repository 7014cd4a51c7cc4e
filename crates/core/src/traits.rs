use crate::error::RetrievalError;
use crate::models::VectorSearchRequest;
use async_trait::async_trait;
use serde_json::Value;

/// Seam to the external document store's approximate nearest-neighbor
/// capability. Implementations return stored payloads ranked by the
/// index's own similarity metric, most similar first; this crate never
/// re-ranks them.
#[async_trait]
pub trait VectorSearchIndex {
    async fn vector_search(
        &self,
        request: &VectorSearchRequest,
    ) -> Result<Vec<Value>, RetrievalError>;
}
