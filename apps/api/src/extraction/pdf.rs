use std::panic;

use tracing::{debug, warn};

use crate::extraction::Extraction;

/// Extracts text page by page, with a line break after every page.
///
/// pdf-extract can panic on malformed input, so the call runs under
/// `catch_unwind`; a panic is treated like any other unreadable document.
pub fn extract_pdf_text(bytes: &[u8]) -> Extraction {
    let result = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes));

    match result {
        Ok(Ok(pages)) => {
            debug!("PDF extraction read {} pages", pages.len());
            Extraction::complete(join_pages(&pages))
        }
        Ok(Err(e)) => {
            warn!("Error reading PDF, continuing with empty text: {e:?}");
            Extraction::degraded(String::new(), format!("PDF could not be read: {e:?}"))
        }
        Err(_) => {
            warn!("PDF parser panicked, continuing with empty text");
            Extraction::degraded(String::new(), "PDF parser aborted on malformed input")
        }
    }
}

fn join_pages(pages: &[String]) -> String {
    let mut text = String::with_capacity(pages.iter().map(|p| p.len() + 1).sum());
    for page in pages {
        text.push_str(page);
        text.push('\n');
    }
    text
}
