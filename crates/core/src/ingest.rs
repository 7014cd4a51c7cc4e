use crate::error::IngestError;
use crate::extractor::extract_text;
use crate::models::{ExtractedText, UploadedDocument};
use sha2::{Digest, Sha256};

/// Hard ceiling on uploaded file size. Caps memory use and parse time for
/// a synchronous per-request operation.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Runs the full ingestion stage on one uploaded document: validation in
/// a fixed order (type, then size), then text extraction.
///
/// The presence check (`MissingFile`) belongs to the transport, which is
/// the only layer that can see whether a `file` part existed at all.
pub fn ingest_document(upload: &UploadedDocument) -> Result<ExtractedText, IngestError> {
    validate_upload(upload)?;
    extract_text(&upload.raw_bytes)
}

/// Type and size checks, in that order, before any parsing work.
///
/// The declared MIME type and the filename are both advisory; either one
/// looking like a PDF is sufficient, which tolerates clients that set the
/// content type wrong but name the file correctly.
pub fn validate_upload(upload: &UploadedDocument) -> Result<(), IngestError> {
    let mime_is_pdf = upload
        .declared_mime_type
        .as_deref()
        .is_some_and(|mime| mime.to_ascii_lowercase().contains("pdf"));
    let name_is_pdf = upload
        .original_name
        .as_deref()
        .is_some_and(|name| name.to_ascii_lowercase().ends_with(".pdf"));

    if !mime_is_pdf && !name_is_pdf {
        return Err(IngestError::UnsupportedType {
            mime: upload.declared_mime_type.clone(),
            name: upload.original_name.clone(),
        });
    }

    if upload.size() > MAX_UPLOAD_BYTES {
        return Err(IngestError::PayloadTooLarge {
            size: upload.size(),
            limit: MAX_UPLOAD_BYTES,
        });
    }

    Ok(())
}

/// Hex SHA-256 of the uploaded bytes, for audit logging.
pub fn digest_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
