pub mod error;
pub mod extractor;
pub mod ingest;
pub mod models;
pub mod retrieval;
pub mod stores;
#[doc(hidden)]
pub mod test_support;
pub mod traits;

pub use error::{IngestError, RetrievalError};
pub use extractor::{extract_text, LopdfExtractor, PdfExtractor};
pub use ingest::{digest_bytes, ingest_document, validate_upload, MAX_UPLOAD_BYTES};
pub use models::{
    EmbeddingQuery, ExtractedText, PageText, RetrievalMatch, RetrievalOptions, UploadedDocument,
    VectorSearchRequest, DEFAULT_LIMIT, DEFAULT_NUM_CANDIDATES,
};
pub use retrieval::RetrievalStage;
pub use stores::AtlasVectorStore;
pub use traits::VectorSearchIndex;
