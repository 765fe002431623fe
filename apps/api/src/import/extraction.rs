//! Text extraction adapter: uploaded bytes → plain text for the parser.
//!
//! Supported: `.docx`, `.pdf`, plain text (`.txt`, `.text`, `.md`, `text/plain`).
//! Legacy binary `.doc` is rejected with a user-facing message.

use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::import::docx;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const LEGACY_DOC_MIME: &str = "application/msword";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("{0}")]
    UnsupportedFormat(String),

    #[error("no text extracted")]
    EmptyExtraction,

    #[error("{0}")]
    Corrupt(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Docx,
    Pdf,
}

impl DocumentFormat {
    /// Picks the format from the file extension, falling back to the content type.
    pub fn detect(file_name: &str, content_type: Option<&str>) -> Result<Self, ExtractionError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "docx" => return Ok(DocumentFormat::Docx),
            "pdf" => return Ok(DocumentFormat::Pdf),
            "txt" | "text" | "md" => return Ok(DocumentFormat::PlainText),
            "doc" => return Err(legacy_doc()),
            _ => {}
        }

        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_lowercase())
            .unwrap_or_default();

        match mime.as_str() {
            DOCX_MIME => Ok(DocumentFormat::Docx),
            "application/pdf" => Ok(DocumentFormat::Pdf),
            "text/plain" | "text/markdown" => Ok(DocumentFormat::PlainText),
            LEGACY_DOC_MIME => Err(legacy_doc()),
            _ => Err(ExtractionError::UnsupportedFormat(format!(
                "Unsupported file type '{file_name}'. Upload a .docx, .pdf or .txt file"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentFormat::PlainText => "text",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Pdf => "pdf",
        }
    }
}

fn legacy_doc() -> ExtractionError {
    ExtractionError::UnsupportedFormat(
        "Legacy .doc files are not supported. Save the résumé as .docx and try again".to_string(),
    )
}

/// Extracts the document text. Whitespace-only output is an error.
pub fn extract_text(format: DocumentFormat, bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = match format {
        DocumentFormat::PlainText => plain_text(bytes),
        DocumentFormat::Docx => docx::extract_docx_text(bytes)?,
        DocumentFormat::Pdf => pdf_text(bytes)?,
    };

    if text.trim().is_empty() {
        warn!("Extraction produced no text ({})", format.as_str());
        return Err(ExtractionError::EmptyExtraction);
    }

    info!(
        "Extracted {} characters from {} document",
        text.chars().count(),
        format.as_str()
    );
    Ok(text)
}

fn plain_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&text).to_string()
}

fn pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::Corrupt(format!("failed to read PDF: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(DocumentFormat::detect("cv.DOCX", None).unwrap(), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::detect("cv.pdf", None).unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::detect("cv.txt", None).unwrap(), DocumentFormat::PlainText);
        assert_eq!(DocumentFormat::detect("cv.md", None).unwrap(), DocumentFormat::PlainText);
    }

    #[test]
    fn test_detect_falls_back_to_content_type() {
        assert_eq!(
            DocumentFormat::detect("upload", Some("text/plain; charset=utf-8")).unwrap(),
            DocumentFormat::PlainText
        );
        assert_eq!(
            DocumentFormat::detect("blob", Some(DOCX_MIME)).unwrap(),
            DocumentFormat::Docx
        );
    }

    #[test]
    fn test_legacy_doc_rejected() {
        let err = DocumentFormat::detect("resume.doc", None).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(ref m) if m.contains(".docx")));
        assert!(DocumentFormat::detect("blob", Some(LEGACY_DOC_MIME)).is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(matches!(
            DocumentFormat::detect("photo.png", Some("image/png")),
            Err(ExtractionError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_plain_text_strips_bom_and_tolerates_bad_utf8() {
        let text = extract_text(DocumentFormat::PlainText, b"\xEF\xBB\xBFJane Doe\n\xFFEngineer").unwrap();
        assert!(text.starts_with("Jane Doe"));
        assert!(text.contains("Engineer"));
    }

    #[test]
    fn test_whitespace_only_is_empty_extraction() {
        assert!(matches!(
            extract_text(DocumentFormat::PlainText, b"  \n\t\r\n"),
            Err(ExtractionError::EmptyExtraction)
        ));
    }

    #[test]
    fn test_garbage_pdf_is_corrupt() {
        assert!(matches!(
            extract_text(DocumentFormat::Pdf, b"not a pdf"),
            Err(ExtractionError::Corrupt(_))
        ));
    }
}
