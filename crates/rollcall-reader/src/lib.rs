//! Rollcall Reader
//!
//! Turns input documents into plain text for the completion step.
//!
//! # Supported formats
//!
//! | Tag     | Decoder                                              |
//! |---------|------------------------------------------------------|
//! | `docx`  | paragraph text from `word/document.xml`              |
//! | `pdf`   | per-page text layer, joined with newlines            |
//! | `pages` | embedded QuickLook PDF preview, read as a PDF        |
//! | `txt`   | file contents verbatim (lossy if not valid UTF-8)    |
//!
//! Any other tag fails with [`ReaderError::UnsupportedFormat`] before the
//! file is touched.
//!
//! # Example
//!
//! ```no_run
//! use rollcall_reader::extract;
//! use std::path::Path;
//!
//! let text = extract(Path::new("people.docx"), "docx")?;
//! println!("{}", text);
//! # Ok::<(), rollcall_reader::ReaderError>(())
//! ```

#![warn(missing_docs)]

mod docx;
mod error;
mod format;
mod pages;
mod pdf;

pub use docx::extract_docx;
pub use error::ReaderError;
pub use format::DocumentFormat;
pub use pages::extract_pages;
pub use pdf::{extract_pdf, extract_pdf_bytes};

use std::path::Path;
use tracing::{debug, warn};

/// Extract text from `path`, decoding it as `format_tag`
///
/// The tag is validated before any I/O, so an unsupported tag has no side
/// effects.
pub fn extract(path: &Path, format_tag: &str) -> Result<String, ReaderError> {
    let format = DocumentFormat::from_tag(format_tag)?;
    extract_as(path, format)
}

/// Extract text from `path`, choosing the decoder from its extension
pub fn extract_path(path: &Path) -> Result<String, ReaderError> {
    let format = DocumentFormat::from_path(path)?;
    extract_as(path, format)
}

/// Extract text from `path` with an already-resolved format
pub fn extract_as(path: &Path, format: DocumentFormat) -> Result<String, ReaderError> {
    if !path.is_file() {
        return Err(ReaderError::NotFound(path.to_path_buf()));
    }

    debug!("Extracting {} as {}", path.display(), format);

    let text = match format {
        DocumentFormat::Docx => extract_docx(path)?,
        DocumentFormat::Pdf => extract_pdf(path)?,
        DocumentFormat::Pages => extract_pages(path)?,
        DocumentFormat::Text => read_text(path)?,
    };

    debug!("Extracted {} chars from {}", text.chars().count(), path.display());
    Ok(text)
}

fn read_text(path: &Path) -> Result<String, ReaderError> {
    let bytes = std::fs::read(path).map_err(|e| ReaderError::io(path, e))?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!("{} is not valid UTF-8, replacing invalid bytes", path.display());
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};
    use std::io::Write;
    use std::path::Path;
    use zip::write::SimpleFileOptions;

    /// Write a zip archive containing `members` to `path`
    pub(crate) fn write_zip(path: &Path, members: &[(&str, &[u8])]) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, data) in members {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }

    /// Build a PDF with one page of Courier text per entry
    pub(crate) fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }
}
