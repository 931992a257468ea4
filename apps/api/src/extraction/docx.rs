//! DOCX text extraction: unzip `word/document.xml` and walk its paragraphs.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::warn;
use zip::ZipArchive;

use crate::extraction::Extraction;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extracts paragraph text in document order, a line break after each one.
///
/// If the XML breaks part-way through, the paragraphs read up to that point
/// are kept and the extraction is marked degraded.
pub fn extract_docx_text(bytes: &[u8]) -> Extraction {
    let xml = match read_document_part(bytes) {
        Ok(xml) => xml,
        Err(reason) => {
            warn!("Error reading DOCX, continuing with empty text: {reason}");
            return Extraction::degraded(String::new(), reason);
        }
    };

    let (paragraphs, failure) = collect_paragraphs(&xml);

    let mut text = String::new();
    for paragraph in &paragraphs {
        text.push_str(paragraph);
        text.push('\n');
    }

    match failure {
        None => Extraction::complete(text),
        Some(reason) => {
            warn!(
                "DOCX partially unreadable after {} paragraphs: {reason}",
                paragraphs.len()
            );
            Extraction::degraded(text, reason)
        }
    }
}

fn read_document_part(bytes: &[u8]) -> Result<String, String> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| format!("not a DOCX archive: {e}"))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| format!("missing {DOCUMENT_PART}: {e}"))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| format!("unreadable {DOCUMENT_PART}: {e}"))?;
    Ok(xml)
}

/// Returns the paragraphs read plus the reason reading stopped early, if it did.
fn collect_paragraphs(xml: &str) -> (Vec<String>, Option<String>) {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    // Text boxes nest paragraphs inside paragraphs.
    let mut open: Vec<String> = Vec::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => open.push(String::new()),
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:p" => paragraphs.push(String::new()),
                b"w:tab" => push_char(&mut open, '\t'),
                b"w:br" | b"w:cr" => push_char(&mut open, '\n'),
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:p" => {
                    if let Some(paragraph) = open.pop() {
                        paragraphs.push(paragraph);
                    }
                }
                b"w:t" => in_text_run = false,
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => match t.unescape() {
                Ok(s) => {
                    if let Some(paragraph) = open.last_mut() {
                        paragraph.push_str(&s);
                    }
                }
                Err(e) => {
                    return (
                        paragraphs,
                        Some(format!("bad text escape at byte {}: {e}", reader.buffer_position())),
                    )
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return (
                    paragraphs,
                    Some(format!(
                        "malformed document XML at byte {}: {e}",
                        reader.buffer_position()
                    )),
                )
            }
            _ => {}
        }
    }

    (paragraphs, None)
}

fn push_char(open: &mut [String], c: char) {
    if let Some(paragraph) = open.last_mut() {
        paragraph.push(c);
    }
}

/// Minimal DOCX archive with one `w:p` per entry, for tests elsewhere in the crate.
#[cfg(test)]
pub(crate) fn docx_fixture(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    docx_archive(&wordprocessing_document(&body))
}

/// Wraps body markup in a `w:document` element.
#[cfg(test)]
fn wordprocessing_document(body: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<w:document xmlns:w=""#,
            "http://schemas.openxmlformats.org/wordprocessingml/2006/main",
            r#"">"#,
            "<w:body>{}</w:body></w:document>"
        ),
        body
    )
}

/// Stores `document_xml` as the main part of an otherwise empty archive.
#[cfg(test)]
fn docx_archive(document_xml: &str) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file(
            DOCUMENT_PART,
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
        )
        .unwrap();
    writer.write_all(document_xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}
