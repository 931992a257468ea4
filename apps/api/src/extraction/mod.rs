// Document text extraction: PDF pages and DOCX paragraphs to plain text.
// Unreadable documents degrade to empty text and never fail the pipeline;
// only an unrecognized format is a hard error.
// Parsing is CPU-bound; async callers run it inside tokio::task::spawn_blocking.

pub mod docx;
pub mod document;
pub mod pdf;

use serde::Serialize;
use thiserror::Error;

pub use document::{Document, DocumentFormat};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
}

/// Best-effort plain text pulled out of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub text: String,
    /// Set when all or part of the document could not be read.
    pub degraded: bool,
    pub detail: Option<String>,
}

impl Extraction {
    pub fn complete(text: String) -> Self {
        Self {
            text,
            degraded: false,
            detail: None,
        }
    }

    pub fn degraded(text: String, detail: impl Into<String>) -> Self {
        Self {
            text,
            degraded: true,
            detail: Some(detail.into()),
        }
    }
}

/// Extracts text from an already-classified document.
pub fn extract_text(document: &Document) -> Extraction {
    match document.format {
        DocumentFormat::Pdf => pdf::extract_pdf_text(&document.bytes),
        DocumentFormat::Docx => docx::extract_docx_text(&document.bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_upload_is_rejected() {
        let result = Document::classify(
            bytes::Bytes::from_static(b"\x89PNG\r\n"),
            Some("image/png"),
            Some("resume.png"),
        );
        assert_eq!(
            result.unwrap_err(),
            ExtractionError::UnsupportedFormat("image/png".to_string())
        );
    }

    #[test]
    fn test_garbage_pdf_degrades_to_empty_text() {
        let document = Document::classify(
            bytes::Bytes::from_static(b"definitely not a pdf"),
            Some("application/pdf"),
            None,
        )
        .unwrap();
        let extraction = extract_text(&document);
        assert!(extraction.degraded);
        assert!(extraction.text.is_empty());
    }
}
