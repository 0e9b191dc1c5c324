//! Pages archive text extraction
//!
//! A `.pages` document is a zip archive whose proprietary body we do not
//! parse. Instead the QuickLook PDF preview stored inside it is copied to a
//! temporary file and read as a PDF.

use crate::pdf::extract_pdf_as;
use crate::ReaderError;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

const PREVIEW_DIR: &str = "QuickLook/";
const PREFERRED_PREVIEW: &str = "QuickLook/Preview.pdf";

/// Extract text from a `.pages` archive via its embedded PDF preview
pub fn extract_pages(path: &Path) -> Result<String, ReaderError> {
    let file = File::open(path).map_err(|e| ReaderError::io(path, e))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| ReaderError::extraction(path, format!("Not a valid Pages archive: {}", e)))?;

    let preview = find_preview(archive.file_names())
        .ok_or_else(|| ReaderError::extraction(path, format!("No {}*.pdf preview in archive", PREVIEW_DIR)))?;
    debug!("Using preview {} from {}", preview, path.display());

    let mut member = archive
        .by_name(&preview)
        .map_err(|e| ReaderError::extraction(path, format!("Cannot open {}: {}", preview, e)))?;

    let mut temp = tempfile::Builder::new()
        .prefix("rollcall-preview-")
        .suffix(".pdf")
        .tempfile()
        .map_err(|e| ReaderError::io(path, e))?;
    io::copy(&mut member, &mut temp).map_err(|e| ReaderError::io(path, e))?;
    temp.flush().map_err(|e| ReaderError::io(path, e))?;

    extract_pdf_as(temp.path(), path)
}

/// Pick the preview member: `QuickLook/Preview.pdf` if present, otherwise
/// the first PDF under `QuickLook/` in archive order
fn find_preview<'a>(names: impl Iterator<Item = &'a str>) -> Option<String> {
    let candidates: Vec<&str> = names
        .filter(|name| name.starts_with(PREVIEW_DIR) && name.to_ascii_lowercase().ends_with(".pdf"))
        .collect();

    candidates
        .iter()
        .find(|name| **name == PREFERRED_PREVIEW)
        .or_else(|| candidates.first())
        .map(|name| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{pdf_with_pages, write_zip};

    #[test]
    fn test_find_preview_prefers_standard_name() {
        let names = ["Index/Document.iwa", "QuickLook/Thumbnail.pdf", "QuickLook/Preview.pdf"];
        assert_eq!(
            find_preview(names.into_iter()).as_deref(),
            Some("QuickLook/Preview.pdf")
        );
    }

    #[test]
    fn test_find_preview_falls_back_to_first_pdf() {
        let names = ["QuickLook/Thumbnail.jpg", "QuickLook/Other.PDF"];
        assert_eq!(find_preview(names.into_iter()).as_deref(), Some("QuickLook/Other.PDF"));
        assert_eq!(find_preview(["Data/x.pdf"].into_iter()), None);
    }

    #[test]
    fn test_extract_pages_via_preview() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.pages");
        let preview = pdf_with_pages(&["Lee likes chess"]);
        write_zip(
            &path,
            &[
                ("Index/Document.iwa", b"\x00\x01binary".as_slice()),
                ("QuickLook/Preview.pdf", preview.as_slice()),
            ],
        );

        let text = extract_pages(&path).unwrap();

        assert!(text.contains("Lee likes chess"));
    }

    #[test]
    fn test_missing_preview() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nopreview.pages");
        write_zip(&path, &[("Index/Document.iwa", b"data".as_slice())]);

        let err = extract_pages(&path).unwrap_err();

        match err {
            ReaderError::Extraction { path: failed, reason } => {
                assert_eq!(failed, path);
                assert!(reason.contains("preview"));
            }
            other => panic!("Expected Extraction error, got {:?}", other),
        }
    }

    #[test]
    fn test_corrupt_preview_reports_archive_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pages");
        write_zip(&path, &[("QuickLook/Preview.pdf", b"not a pdf".as_slice())]);

        let err = extract_pages(&path).unwrap_err();

        assert_eq!(err.path(), Some(path.as_path()));
    }
}
