use thiserror::Error;

/// Failures of the ingestion stage, ordered roughly by when they can occur:
/// request-shape errors first, then document-content errors.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("no file part in upload")]
    MissingFile,

    #[error("uploaded file is not a pdf (mime: {mime:?}, name: {name:?})")]
    UnsupportedType {
        mime: Option<String>,
        name: Option<String>,
    },

    #[error("upload of {size} bytes exceeds the {limit} byte ceiling")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("pdf parse error: {0}")]
    ParseFailure(String),

    #[error("pdf contains no extractable text")]
    EmptyExtraction,
}

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("invalid response from {backend}: {details}")]
    BackendResponse { backend: String, details: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;
