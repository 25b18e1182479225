//! Re-render a PDF onto a smaller page box.
//!
//! Any size reduction comes from the renderer; the three presets only
//! choose the page box.

use crate::convert::read_input;
use crate::error::TransformError;
use crate::html;
use crate::place::{render_to, Result};
use crate::renderer::{HtmlRenderer, RenderRequest};
use shared_types::{CompressionQuality, CompressionStats};
use std::fs;
use std::path::Path;

/// Re-render `src` at `quality` into `dest` and report both sizes
pub fn compress_pdf(
    renderer: &dyn HtmlRenderer,
    src: &Path,
    quality: CompressionQuality,
    dest: &Path,
) -> Result<CompressionStats> {
    let bytes = read_input(src)?;
    let size = quality.page_size();

    let page = html::resized_page(&html::pdf_data_uri(&bytes), size);
    let request = RenderRequest::new(page).with_page_size(size);
    render_to(renderer, &request, dest)?;

    let compressed_size = fs::metadata(dest)
        .map_err(TransformError::io(format!("stat {}", dest.display())))?
        .len();
    let stats = CompressionStats {
        original_size: bytes.len() as u64,
        compressed_size,
    };

    tracing::info!(
        "Compressed {} at {} quality: {} -> {} bytes ({}% saved)",
        src.display(),
        quality,
        stats.original_size,
        stats.compressed_size,
        stats.saved_percent()
    );
    Ok(stats)
}
