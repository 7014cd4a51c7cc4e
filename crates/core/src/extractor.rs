use crate::error::IngestError;
use crate::models::{ExtractedText, PageText};
use lopdf::Document;

pub trait PdfExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageText>, IngestError>;
}

/// lopdf-backed extractor. Walks the document's pages in order and pulls
/// each page's text runs in the order the content streams define them.
/// Best-effort linearization: no column, table, or reading-order
/// reconstruction.
#[derive(Default)]
pub struct LopdfExtractor;

impl PdfExtractor for LopdfExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageText>, IngestError> {
        let document =
            Document::load_mem(bytes).map_err(|error| IngestError::ParseFailure(error.to_string()))?;

        let mut pages = Vec::new();
        for (page_no, _page_id) in document.get_pages() {
            let text = document
                .extract_text(&[page_no])
                .map_err(|error| IngestError::ParseFailure(error.to_string()))?;

            pages.push(PageText {
                number: page_no,
                text,
            });
        }

        Ok(pages)
    }
}

/// Extracts the full linear text of a PDF held in memory.
///
/// Malformed structure fails with [`IngestError::ParseFailure`]. A
/// structurally valid PDF whose pages carry no non-whitespace text (a
/// scanned image with no text layer, for instance) fails with
/// [`IngestError::EmptyExtraction`] instead, so the caller can report the
/// two cases differently.
pub fn extract_text(bytes: &[u8]) -> Result<ExtractedText, IngestError> {
    let pages = LopdfExtractor::default().extract_pages(bytes)?;

    let content = pages
        .iter()
        .map(|page| page.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    if content.trim().is_empty() {
        return Err(IngestError::EmptyExtraction);
    }

    Ok(ExtractedText { content })
}
