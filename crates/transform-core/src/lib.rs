//! Document transforms
//!
//! Every transform composes an HTML wrapper around its inputs, hands it to
//! an [`HtmlRenderer`], and moves the rendered file into place. Outputs are
//! either complete at their destination or absent.
//!
//! - [`images_to_pdf`]: one page per image
//! - [`merge_pdfs`]: one wrapper page per source PDF
//! - [`split_by_ranges`] / [`split_by_range_input`]: one file per page range
//! - [`extract_pages`]: selected pages into one file
//! - [`compress_pdf`]: re-render onto a smaller page box
//! - [`sign_pdf`]: signature cover page

pub mod compress;
pub mod convert;
pub mod error;
pub mod html;
pub mod merge;
pub mod place;
pub mod probe;
pub mod ranges;
pub mod renderer;
pub mod split;

#[cfg(test)]
mod test_support;

pub use compress::compress_pdf;
pub use convert::{images_to_pdf, sign_pdf};
pub use error::{RenderError, TransformError};
pub use merge::merge_pdfs;
pub use place::move_into_place;
pub use probe::{probe_page_count, probe_page_count_file};
pub use ranges::{normalize_pages, parse_page_ranges, DEFAULT_PAGE_COUNT};
pub use renderer::{CommandRenderer, HtmlRenderer, PassthroughRenderer, RenderRequest};
pub use split::{extract_pages, split_by_range_input, split_by_ranges};
