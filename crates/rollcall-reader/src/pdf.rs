//! PDF text extraction
//!
//! Text comes from each page's text layer, in page order, joined with
//! newlines. Image-only pages contribute nothing.

use crate::ReaderError;
use lopdf::Document;
use std::path::Path;
use tracing::{debug, warn};

/// Extract the text layer of a PDF file
pub fn extract_pdf(path: &Path) -> Result<String, ReaderError> {
    extract_pdf_as(path, path)
}

/// Extract a PDF stored at `file`, reporting errors against `origin`
///
/// Used when the PDF is an intermediate copy of something the caller asked
/// for, such as the preview embedded in a Pages archive.
pub(crate) fn extract_pdf_as(file: &Path, origin: &Path) -> Result<String, ReaderError> {
    let data = std::fs::read(file).map_err(|e| ReaderError::io(origin, e))?;
    extract_pdf_bytes(&data, origin)
}

/// Extract the text layer of an in-memory PDF
pub fn extract_pdf_bytes(data: &[u8], origin: &Path) -> Result<String, ReaderError> {
    let doc = Document::load_mem(data)
        .map_err(|e| ReaderError::extraction(origin, format!("Failed to load PDF: {}", e)))?;

    let pages = doc.get_pages();
    debug!("{} has {} page(s)", origin.display(), pages.len());

    let mut texts = Vec::with_capacity(pages.len());
    let mut failed = 0usize;

    for page_number in pages.keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(text) => texts.push(text.trim_end().to_string()),
            Err(e) => {
                warn!(
                    "Could not extract page {} of {}: {}",
                    page_number,
                    origin.display(),
                    e
                );
                failed += 1;
            }
        }
    }

    if !pages.is_empty() && failed == pages.len() {
        return Err(ReaderError::extraction(
            origin,
            "No page has a readable text layer",
        ));
    }

    Ok(texts.join("\n"))
}
