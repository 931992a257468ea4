use bytes::Bytes;
use serde::Serialize;

use crate::extraction::ExtractionError;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// The two résumé formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Maps a declared MIME type (parameters ignored) to a format.
    pub fn from_mime(mime: &str) -> Result<Self, ExtractionError> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            PDF_MIME => Ok(DocumentFormat::Pdf),
            DOCX_MIME => Ok(DocumentFormat::Docx),
            _ => Err(ExtractionError::UnsupportedFormat(mime.trim().to_string())),
        }
    }

    /// Decides the format from the declared content type, falling back to the
    /// file extension when the client sent no type or a generic binary one.
    pub fn detect(
        content_type: Option<&str>,
        file_name: Option<&str>,
    ) -> Result<Self, ExtractionError> {
        let declared = content_type.map(str::trim).filter(|ct| !ct.is_empty());

        match declared {
            Some(ct) if !ct.eq_ignore_ascii_case("application/octet-stream") => {
                Self::from_mime(ct)
            }
            _ => {
                let extension = file_name
                    .and_then(|name| name.rsplit_once('.'))
                    .map(|(_, ext)| ext.to_ascii_lowercase());
                match extension.as_deref() {
                    Some("pdf") => Ok(DocumentFormat::Pdf),
                    Some("docx") => Ok(DocumentFormat::Docx),
                    _ => Err(ExtractionError::UnsupportedFormat(
                        declared
                            .or(file_name)
                            .unwrap_or("unknown")
                            .to_string(),
                    )),
                }
            }
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => PDF_MIME,
            DocumentFormat::Docx => DOCX_MIME,
        }
    }
}

/// An uploaded résumé whose format has been recognized.
#[derive(Debug, Clone)]
pub struct Document {
    pub format: DocumentFormat,
    pub bytes: Bytes,
    pub file_name: Option<String>,
}

impl Document {
    pub fn new(format: DocumentFormat, bytes: Bytes) -> Self {
        Self {
            format,
            bytes,
            file_name: None,
        }
    }

    pub fn classify(
        bytes: Bytes,
        content_type: Option<&str>,
        file_name: Option<&str>,
    ) -> Result<Self, ExtractionError> {
        let format = DocumentFormat::detect(content_type, file_name)?;
        Ok(Self {
            file_name: file_name.map(String::from),
            ..Self::new(format, bytes)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime_recognizes_both_formats() {
        assert_eq!(
            DocumentFormat::from_mime("application/pdf").unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_mime(DOCX_MIME).unwrap(),
            DocumentFormat::Docx
        );
    }

    #[test]
    fn test_from_mime_ignores_parameters_and_case() {
        assert_eq!(
            DocumentFormat::from_mime("Application/PDF; charset=binary").unwrap(),
            DocumentFormat::Pdf
        );
    }

    #[test]
    fn test_image_is_unsupported() {
        let err = DocumentFormat::from_mime("image/png").unwrap_err();
        assert_eq!(err, ExtractionError::UnsupportedFormat("image/png".to_string()));
    }

    #[test]
    fn test_octet_stream_falls_back_to_extension() {
        assert_eq!(
            DocumentFormat::detect(Some("application/octet-stream"), Some("CV.DOCX")).unwrap(),
            DocumentFormat::Docx
        );
        assert_eq!(
            DocumentFormat::detect(None, Some("resume.pdf")).unwrap(),
            DocumentFormat::Pdf
        );
    }

    #[test]
    fn test_declared_type_wins_over_extension() {
        let err = DocumentFormat::detect(Some("text/plain"), Some("resume.pdf")).unwrap_err();
        assert_eq!(err, ExtractionError::UnsupportedFormat("text/plain".to_string()));
    }

    #[test]
    fn test_unknown_extension_without_type_is_unsupported() {
        let err = DocumentFormat::detect(None, Some("resume.odt")).unwrap_err();
        assert_eq!(err, ExtractionError::UnsupportedFormat("resume.odt".to_string()));
        let err = DocumentFormat::detect(None, None).unwrap_err();
        assert_eq!(err, ExtractionError::UnsupportedFormat("unknown".to_string()));
    }
}
