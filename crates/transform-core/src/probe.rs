//! Opt-in page counting.
//!
//! The split flow works from a page count the user enters. This probe is a
//! separate collaborator for callers that explicitly ask for the real count
//! of a well-formed PDF; it never runs implicitly.

use crate::convert::read_input;
use crate::place::Result;
use std::path::Path;

/// Page count of a PDF in memory, or `None` if it cannot be parsed
pub fn probe_page_count(bytes: &[u8]) -> Option<u32> {
    match lopdf::Document::load_mem(bytes) {
        Ok(doc) => Some(doc.get_pages().len() as u32),
        Err(e) => {
            tracing::debug!("Page count probe failed: {}", e);
            None
        }
    }
}

/// Page count of the PDF at `path`; I/O errors propagate, parse errors are `None`
pub fn probe_page_count_file(path: &Path) -> Result<Option<u32>> {
    let bytes = read_input(path)?;
    Ok(probe_page_count(&bytes))
}
