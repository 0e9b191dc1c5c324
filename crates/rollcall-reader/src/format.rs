//! Supported document formats

use crate::ReaderError;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A document format we know how to turn into plain text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Office Open XML word-processor document (`.docx`)
    Docx,
    /// Portable Document Format (`.pdf`)
    Pdf,
    /// Apple Pages archive with an embedded PDF preview (`.pages`)
    Pages,
    /// Plain UTF-8 text (`.txt`)
    Text,
}

impl DocumentFormat {
    /// Every supported format
    pub const ALL: [DocumentFormat; 4] = [
        DocumentFormat::Docx,
        DocumentFormat::Pdf,
        DocumentFormat::Pages,
        DocumentFormat::Text,
    ];

    /// File extension for this format, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Docx => "docx",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Pages => "pages",
            DocumentFormat::Text => "txt",
        }
    }

    /// Parse a format tag such as `"pdf"`, `".PDF"` or `"docx"`
    ///
    /// # Examples
    ///
    /// ```
    /// use rollcall_reader::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::from_tag(".PDF").unwrap(), DocumentFormat::Pdf);
    /// assert!(DocumentFormat::from_tag(".exe").is_err());
    /// ```
    pub fn from_tag(tag: &str) -> Result<Self, ReaderError> {
        let normalized = tag.trim().trim_start_matches('.').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == normalized)
            .ok_or_else(|| ReaderError::UnsupportedFormat(tag.to_string()))
    }

    /// Detect the format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self, ReaderError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ReaderError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_tag(extension)
    }
}

impl FromStr for DocumentFormat {
    type Err = ReaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_variants() {
        assert_eq!(DocumentFormat::from_tag("docx").unwrap(), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_tag(".Pages").unwrap(), DocumentFormat::Pages);
        assert_eq!(DocumentFormat::from_tag(" txt ").unwrap(), DocumentFormat::Text);
    }

    #[test]
    fn test_from_tag_rejects_unknown() {
        for tag in [".exe", "", "doc", "md"] {
            assert!(matches!(
                DocumentFormat::from_tag(tag),
                Err(ReaderError::UnsupportedFormat(_))
            ));
        }
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("notes/Report.PDF")).unwrap(),
            DocumentFormat::Pdf
        );
        assert!(DocumentFormat::from_path(Path::new("README")).is_err());
        assert!(DocumentFormat::from_path(Path::new("setup.exe")).is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for format in DocumentFormat::ALL {
            assert_eq!(format.to_string().parse::<DocumentFormat>().unwrap(), format);
        }
    }
}
