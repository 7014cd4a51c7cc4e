use crate::error::RetrievalError;
use crate::models::VectorSearchRequest;
use crate::traits::VectorSearchIndex;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use url::Url;

/// MongoDB Atlas Data API backend for vector retrieval.
///
/// Talks plain HTTP JSON: one `action/aggregate` call per search, carrying
/// a single-stage `$vectorSearch` pipeline against the configured search
/// index and vector-bearing field.
pub struct AtlasVectorStore {
    endpoint: Url,
    api_key: String,
    data_source: String,
    database: String,
    collection: String,
    index_name: String,
    vector_field: String,
    client: Client,
}

impl AtlasVectorStore {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        endpoint: &str,
        api_key: impl Into<String>,
        data_source: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
        index_name: impl Into<String>,
        vector_field: impl Into<String>,
    ) -> Result<Self, RetrievalError> {
        // Trailing slash so join() appends instead of replacing the last
        // path segment.
        let normalized = if endpoint.ends_with('/') {
            endpoint.to_string()
        } else {
            format!("{endpoint}/")
        };

        Ok(Self {
            endpoint: Url::parse(&normalized)?,
            api_key: api_key.into(),
            data_source: data_source.into(),
            database: database.into(),
            collection: collection.into(),
            index_name: index_name.into(),
            vector_field: vector_field.into(),
            client: Client::new(),
        })
    }

    fn aggregate_body(&self, request: &VectorSearchRequest) -> Value {
        json!({
            "dataSource": self.data_source,
            "database": self.database,
            "collection": self.collection,
            "pipeline": [vector_search_stage(
                &self.index_name,
                &self.vector_field,
                request,
            )],
        })
    }
}

/// The `$vectorSearch` aggregation stage for one shaped request.
pub fn vector_search_stage(index_name: &str, vector_field: &str, request: &VectorSearchRequest) -> Value {
    json!({
        "$vectorSearch": {
            "index": index_name,
            "path": vector_field,
            "queryVector": request.embedding,
            "numCandidates": request.num_candidates,
            "limit": request.limit,
        }
    })
}

#[async_trait]
impl VectorSearchIndex for AtlasVectorStore {
    async fn vector_search(
        &self,
        request: &VectorSearchRequest,
    ) -> Result<Vec<Value>, RetrievalError> {
        let url = self.endpoint.join("action/aggregate")?;

        let response = self
            .client
            .post(url)
            .header("api-key", &self.api_key)
            .json(&self.aggregate_body(request))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RetrievalError::BackendResponse {
                backend: "atlas".to_string(),
                details: response.status().to_string(),
            });
        }

        let parsed: Value = response.json().await?;
        let documents = parsed
            .pointer("/documents")
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| RetrievalError::BackendResponse {
                backend: "atlas".to_string(),
                details: "response has no documents array".to_string(),
            })?;

        Ok(documents)
    }
}
