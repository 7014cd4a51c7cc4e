use crate::error::RetrievalError;
use crate::models::{EmbeddingQuery, RetrievalMatch, RetrievalOptions, VectorSearchRequest};
use crate::traits::VectorSearchIndex;
use std::sync::Arc;

/// The retrieval stage: shapes a nearest-neighbor request and passes the
/// index's ranked answer through verbatim.
///
/// The store handle is injected at construction; the stage holds no
/// ambient state and a clone is cheap, so one stage can serve concurrent
/// calls without coordination.
#[derive(Clone)]
pub struct RetrievalStage {
    index: Arc<dyn VectorSearchIndex + Send + Sync>,
    options: RetrievalOptions,
}

impl RetrievalStage {
    pub fn new(index: Arc<dyn VectorSearchIndex + Send + Sync>, options: RetrievalOptions) -> Self {
        Self { index, options }
    }

    pub fn options(&self) -> RetrievalOptions {
        self.options
    }

    /// Runs one similarity search. Returns at most the configured limit of
    /// matches, in the index's descending-similarity order, each tagged
    /// with its 0-based rank.
    pub async fn retrieve(
        &self,
        query: &EmbeddingQuery,
    ) -> Result<Vec<RetrievalMatch>, RetrievalError> {
        if query.vector.is_empty() {
            return Err(RetrievalError::InvalidQuery(
                "embedding must not be empty".to_string(),
            ));
        }

        let limit = self.options.effective_limit();
        let request = VectorSearchRequest {
            embedding: query.vector.clone(),
            num_candidates: self.options.num_candidates,
            limit,
        };

        let documents = self.index.vector_search(&request).await?;

        Ok(documents
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(rank, document)| RetrievalMatch { rank, document })
            .collect())
    }
}
