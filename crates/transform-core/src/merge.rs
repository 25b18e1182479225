//! PDF merge
//!
//! Each source is embedded whole on its own wrapper page, in input order.
//! This is a re-render, not an object-level merge: how many pages of a
//! multi-page source survive is up to the renderer.

use crate::convert::read_input;
use crate::error::TransformError;
use crate::html;
use crate::place::{render_to, Result};
use crate::renderer::{HtmlRenderer, RenderRequest};
use std::path::Path;

/// Merge `pdfs` into `dest`, one wrapper page per source
pub fn merge_pdfs<P: AsRef<Path>>(
    renderer: &dyn HtmlRenderer,
    pdfs: &[P],
    dest: &Path,
) -> Result<()> {
    if pdfs.is_empty() {
        return Err(TransformError::NoInputs);
    }

    let mut uris = Vec::with_capacity(pdfs.len());
    for pdf in pdfs {
        let bytes = read_input(pdf.as_ref())?;
        uris.push(html::pdf_data_uri(&bytes));
    }

    render_to(renderer, &RenderRequest::new(html::merge_page(&uris)), dest)?;
    tracing::info!("Merged {} document(s) into {}", pdfs.len(), dest.display());
    Ok(())
}
