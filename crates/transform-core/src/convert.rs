//! Image to PDF conversion and signed cover pages.

use crate::error::TransformError;
use crate::html;
use crate::place::{render_to, Result};
use crate::renderer::{HtmlRenderer, RenderRequest};
use std::fs;
use std::path::Path;

pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(TransformError::io(format!("read {}", path.display())))
}

/// Render one page per image, in input order, into `dest`
pub fn images_to_pdf<P: AsRef<Path>>(
    renderer: &dyn HtmlRenderer,
    images: &[P],
    dest: &Path,
) -> Result<()> {
    if images.is_empty() {
        return Err(TransformError::NoInputs);
    }

    let mut uris = Vec::with_capacity(images.len());
    for image in images {
        let image = image.as_ref();
        let bytes = read_input(image)?;
        uris.push(html::data_uri(html::image_mime(image), &bytes));
    }

    render_to(renderer, &RenderRequest::new(html::images_page(&uris)), dest)?;
    tracing::info!("Converted {} image(s) into {}", images.len(), dest.display());
    Ok(())
}

/// Render a "Signed Document" page showing the signature under the name of
/// the document it was applied to
pub fn sign_pdf(
    renderer: &dyn HtmlRenderer,
    original_name: &str,
    signature_data: &str,
    dest: &Path,
) -> Result<()> {
    let signature = signature_data.trim();
    if signature.is_empty() {
        return Err(TransformError::MissingSignature);
    }

    let request = RenderRequest::new(html::signed_page(original_name, signature));
    render_to(renderer, &request, dest)?;
    tracing::info!("Signed {} into {}", original_name, dest.display());
    Ok(())
}
