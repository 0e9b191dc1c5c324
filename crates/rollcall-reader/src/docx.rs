//! DOCX text extraction
//!
//! A `.docx` file is a zip archive; the body lives in `word/document.xml`.
//! Text runs (`<w:t>`) are concatenated per paragraph (`<w:p>`), and
//! non-empty paragraphs are joined with a blank line.

use crate::ReaderError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BODY_PART: &str = "word/document.xml";

/// Extract paragraph text from a `.docx` file
pub fn extract_docx(path: &Path) -> Result<String, ReaderError> {
    let file = File::open(path).map_err(|e| ReaderError::io(path, e))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| ReaderError::extraction(path, format!("Not a valid DOCX archive: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name(BODY_PART)
        .map_err(|e| ReaderError::extraction(path, format!("Missing {}: {}", BODY_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| ReaderError::io(path, e))?;

    paragraphs_from_xml(&xml)
        .map(|paragraphs| paragraphs.join("\n\n"))
        .map_err(|reason| ReaderError::extraction(path, reason))
}

/// Collect the non-empty paragraphs of a WordprocessingML body, in order
pub(crate) fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>, String> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"r" => in_run = true,
                b"t" if in_run => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) if in_run => match e.local_name().as_ref() {
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| format!("Invalid text at byte {}: {}", reader.buffer_position(), e))?;
                current.push_str(&text);
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"r" => in_run = false,
                b"p" => {
                    if !current.trim().is_empty() {
                        paragraphs.push(current.trim_end().to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "Malformed XML at byte {}: {}",
                    reader.buffer_position(),
                    e
                ))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}
