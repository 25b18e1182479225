//! PDF split and page extraction
//!
//! Like merge, these embed the whole source and caption each wrapper with
//! the pages it stands for. Nothing is written when the request selects no
//! pages.

use crate::convert::read_input;
use crate::error::TransformError;
use crate::html;
use crate::place::{render_to, Result};
use crate::ranges::{normalize_pages, parse_page_ranges};
use crate::renderer::{HtmlRenderer, RenderRequest};
use chrono::Utc;
use shared_types::{OutputKind, PageRange};
use std::fs;
use std::path::{Path, PathBuf};

/// First timestamp at or after `start` for which none of the `count` split
/// names exist in `dir` yet
pub(crate) fn free_split_stamp(dir: &Path, count: usize, start: i64) -> i64 {
    let mut stamp = start;
    while (1..=count).any(|i| dir.join(OutputKind::Split(i).file_name(stamp)).exists()) {
        stamp += 1;
    }
    stamp
}

/// Write one file per range into `dest_dir`.
///
/// Ranges that are not 1-based or are reversed are dropped; with none left
/// the call fails before anything is read. Files are named
/// `split_<i>_<timestamp>.pdf` with a 1-based `i` and one timestamp shared
/// by the whole call. If any range fails, files already written by this
/// call are removed again. Returns the paths in range order.
pub fn split_by_ranges(
    renderer: &dyn HtmlRenderer,
    src: &Path,
    ranges: &[PageRange],
    dest_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let ranges: Vec<PageRange> = ranges
        .iter()
        .copied()
        .filter(PageRange::is_well_formed)
        .collect();
    if ranges.is_empty() {
        return Err(TransformError::NoValidRanges);
    }

    let bytes = read_input(src)?;
    let uri = html::pdf_data_uri(&bytes);
    let timestamp = free_split_stamp(dest_dir, ranges.len(), Utc::now().timestamp_millis());

    let mut written = Vec::with_capacity(ranges.len());
    for (i, range) in ranges.iter().enumerate() {
        let dest = dest_dir.join(OutputKind::Split(i + 1).file_name(timestamp));
        let request = RenderRequest::new(html::range_page(&uri, *range));
        if let Err(e) = render_to(renderer, &request, &dest) {
            tracing::warn!(
                "Split of {} failed at range {}, removing {} earlier output(s)",
                src.display(),
                range,
                written.len()
            );
            for path in &written {
                let _ = fs::remove_file(path);
            }
            return Err(e);
        }
        tracing::debug!("Wrote pages {} to {}", range, dest.display());
        written.push(dest);
    }

    tracing::info!("Split {} into {} file(s)", src.display(), written.len());
    Ok(written)
}

/// Parse `input` against `page_count` and split by the surviving ranges
pub fn split_by_range_input(
    renderer: &dyn HtmlRenderer,
    src: &Path,
    input: &str,
    page_count: u32,
    dest_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let ranges = parse_page_ranges(input, page_count);
    if ranges.is_empty() {
        return Err(TransformError::NoValidRanges);
    }
    split_by_ranges(renderer, src, &ranges, dest_dir)
}

/// Extract `pages` into `dest`, in ascending order regardless of selection order
pub fn extract_pages(
    renderer: &dyn HtmlRenderer,
    src: &Path,
    pages: &[u32],
    dest: &Path,
) -> Result<()> {
    let pages = normalize_pages(pages);
    if pages.is_empty() {
        return Err(TransformError::NoPagesSelected);
    }

    let bytes = read_input(src)?;
    let request = RenderRequest::new(html::pages_page(&html::pdf_data_uri(&bytes), &pages));
    render_to(renderer, &request, dest)?;

    tracing::info!(
        "Extracted {} page(s) from {} into {}",
        pages.len(),
        src.display(),
        dest.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingRenderer, RecordingRenderer};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn source(tmp: &TempDir) -> PathBuf {
        let src = tmp.path().join("source.pdf");
        fs::write(&src, b"%PDF-1.7 source").unwrap();
        src
    }

    fn file_names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_split_one_file_per_range() {
        let tmp = TempDir::new().unwrap();
        let src = source(&tmp);
        let out = tmp.path().join("out");
        let renderer = RecordingRenderer::new(tmp.path().join("scratch"));

        let ranges = [PageRange::new(1, 2), PageRange::single(4), PageRange::new(3, 5)];
        let paths = split_by_ranges(&renderer, &src, &ranges, &out).unwrap();

        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| p.exists() && p.parent() == Some(out.as_path())));

        let names = file_names(&paths);
        let stamp = names[0]
            .trim_start_matches("split_1_")
            .trim_end_matches(".pdf")
            .to_string();
        assert_eq!(
            names,
            vec![
                format!("split_1_{}.pdf", stamp),
                format!("split_2_{}.pdf", stamp),
                format!("split_3_{}.pdf", stamp),
            ]
        );

        let second = fs::read_to_string(&paths[1]).unwrap();
        assert!(second.contains("Pages 4\u{2013}4"));
    }

    #[test]
    fn test_split_no_ranges_touches_nothing() {
        let tmp = TempDir::new().unwrap();
        let src = source(&tmp);
        let out = tmp.path().join("out");
        let renderer = RecordingRenderer::new(tmp.path().join("scratch"));

        let err = split_by_ranges(&renderer, &src, &[], &out).unwrap_err();
        assert!(matches!(err, TransformError::NoValidRanges));
        assert_eq!(renderer.calls(), 0);
        assert!(!out.exists());
    }

    #[test]
    fn test_split_drops_malformed_ranges() {
        let tmp = TempDir::new().unwrap();
        let src = source(&tmp);
        let out = tmp.path().join("out");
        let renderer = RecordingRenderer::new(tmp.path().join("scratch"));

        let ranges = [PageRange::single(0), PageRange::new(2, 3), PageRange::new(5, 3)];
        let paths = split_by_ranges(&renderer, &src, &ranges, &out).unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(renderer.calls(), 1);
        assert!(renderer.requests.borrow()[0].html.contains("Pages 2\u{2013}3"));
    }

    #[test]
    fn test_split_only_malformed_ranges_fails() {
        let tmp = TempDir::new().unwrap();
        let src = source(&tmp);
        let renderer = RecordingRenderer::new(tmp.path().join("scratch"));

        let ranges = [PageRange::single(0), PageRange::new(4, 1)];
        let err = split_by_ranges(&renderer, &src, &ranges, tmp.path()).unwrap_err();
        assert!(matches!(err, TransformError::NoValidRanges));
        assert_eq!(renderer.calls(), 0);
    }

    #[test]
    fn test_free_split_stamp_skips_taken_names() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(free_split_stamp(tmp.path(), 2, 100), 100);

        fs::write(tmp.path().join("split_2_100.pdf"), b"earlier").unwrap();
        fs::write(tmp.path().join("split_1_101.pdf"), b"earlier").unwrap();
        assert_eq!(free_split_stamp(tmp.path(), 2, 100), 102);
        assert_eq!(free_split_stamp(tmp.path(), 1, 100), 100);
    }

    #[test]
    fn test_repeated_split_keeps_earlier_outputs() {
        let tmp = TempDir::new().unwrap();
        let src = source(&tmp);
        let out = tmp.path().join("out");
        let renderer = RecordingRenderer::new(tmp.path().join("scratch"));
        let ranges = [PageRange::single(1), PageRange::single(2)];

        let first = split_by_ranges(&renderer, &src, &ranges, &out).unwrap();
        let second = split_by_ranges(&renderer, &src, &ranges, &out).unwrap();

        assert!(first.iter().all(|p| !second.contains(p)));
        assert_eq!(fs::read_dir(&out).unwrap().count(), 4);
    }

    #[test]
    fn test_split_by_input_drops_out_of_range() {
        let tmp = TempDir::new().unwrap();
        let src = source(&tmp);
        let renderer = RecordingRenderer::new(tmp.path().join("scratch"));

        let paths =
            split_by_range_input(&renderer, &src, "1-3, 5, 10-12", 10, tmp.path()).unwrap();
        assert_eq!(paths.len(), 2);
        let requests = renderer.requests.borrow();
        assert!(requests[0].html.contains("Pages 1\u{2013}3"));
        assert!(requests[1].html.contains("Pages 5\u{2013}5"));
    }

    #[test]
    fn test_split_by_input_no_survivors() {
        let tmp = TempDir::new().unwrap();
        let src = source(&tmp);
        let renderer = RecordingRenderer::new(tmp.path().join("scratch"));

        let err = split_by_range_input(&renderer, &src, "7-9, x", 5, tmp.path()).unwrap_err();
        assert!(matches!(err, TransformError::NoValidRanges));
        assert_eq!(renderer.calls(), 0);
    }

    #[test]
    fn test_split_failure_removes_earlier_outputs() {
        let tmp = TempDir::new().unwrap();
        let src = source(&tmp);
        let out = tmp.path().join("out");
        let renderer = RecordingRenderer::failing_on(tmp.path().join("scratch"), 1);

        let ranges = [PageRange::single(1), PageRange::single(2), PageRange::single(3)];
        let err = split_by_ranges(&renderer, &src, &ranges, &out).unwrap_err();

        assert!(matches!(err, TransformError::Render(_)));
        assert_eq!(renderer.calls(), 2);
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn test_extract_sorts_and_dedups() {
        let tmp = TempDir::new().unwrap();
        let src = source(&tmp);
        let renderer = RecordingRenderer::new(tmp.path().join("scratch"));
        let dest = tmp.path().join("extracted_1.pdf");

        extract_pages(&renderer, &src, &[4, 1, 4, 2], &dest).unwrap();

        let html = fs::read_to_string(&dest).unwrap();
        assert_eq!(html.matches("<embed ").count(), 3);
        let p1 = html.find("Page 1<").unwrap();
        let p2 = html.find("Page 2<").unwrap();
        let p4 = html.find("Page 4<").unwrap();
        assert!(p1 < p2 && p2 < p4);
    }

    #[test]
    fn test_extract_nothing_selected() {
        let tmp = TempDir::new().unwrap();
        let src = source(&tmp);
        let dest = tmp.path().join("extracted_1.pdf");

        for pages in [&[][..], &[0][..]] {
            let err = extract_pages(&FailingRenderer, &src, pages, &dest).unwrap_err();
            assert!(matches!(err, TransformError::NoPagesSelected));
        }
        assert!(!dest.exists());
    }
}
