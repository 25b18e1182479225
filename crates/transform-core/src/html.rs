//! HTML wrappers handed to the renderer.
//!
//! Source PDFs are embedded whole as `data:` URIs. The renderer decides how
//! much of a multi-page embed ends up on paper; these templates make no
//! promise beyond placing each embed on its own page.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use shared_types::{PageRange, PageSize};
use std::fmt::Write;
use std::path::Path;

/// Height of an embedded document, in CSS pixels
const EMBED_HEIGHT_PX: u32 = 800;

const SECTION_STYLE: &str = "\
body { margin: 0; padding: 0; }
.page { page-break-after: always; padding: 20px; }
.page:last-child { page-break-after: auto; }
.page-info { font-family: Arial, sans-serif; color: #64748B; font-size: 12px; }
object, embed { width: 100%; min-height: 800px; }";

/// Escape text for use in element content or a quoted attribute
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// `data:` URI for arbitrary bytes
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// `data:` URI for a PDF
pub fn pdf_data_uri(bytes: &[u8]) -> String {
    data_uri("application/pdf", bytes)
}

/// Mime type for an image, from its extension
pub fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

fn document(style: &str, body: &str) -> String {
    format!(
        "<html>\n<head>\n<meta charset=\"utf-8\" />\n<style>\n{}\n</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        style, body
    )
}

fn embed_tag(pdf_uri: &str) -> String {
    format!(
        "<embed src=\"{}\" type=\"application/pdf\" width=\"100%\" height=\"{}px\" />",
        escape_html(pdf_uri),
        EMBED_HEIGHT_PX
    )
}

fn section(caption: &str, pdf_uri: &str) -> String {
    format!(
        "<div class=\"page\">\n<p class=\"page-info\">{}</p>\n{}\n</div>\n",
        escape_html(caption),
        embed_tag(pdf_uri)
    )
}

/// One full-width image per page, in order
pub fn images_page(image_uris: &[String]) -> String {
    let mut body = String::new();
    for uri in image_uris {
        let _ = writeln!(
            body,
            "<img src=\"{}\" style=\"width:100%;page-break-after:always;display:block;margin:0 auto;\" />",
            escape_html(uri)
        );
    }
    document(
        "body { margin: 0; padding: 0; }\nimg { max-width: 100%; height: auto; }",
        &body,
    )
}

/// One wrapper page per source document, captioned "Document i of n"
pub fn merge_page(pdf_uris: &[String]) -> String {
    let total = pdf_uris.len();
    let body: String = pdf_uris
        .iter()
        .enumerate()
        .map(|(i, uri)| section(&format!("Document {} of {}", i + 1, total), uri))
        .collect();
    document(SECTION_STYLE, &body)
}

/// The source document captioned with one range
pub fn range_page(pdf_uri: &str, range: PageRange) -> String {
    let caption = format!("Pages {}\u{2013}{}", range.start, range.end);
    document(SECTION_STYLE, &section(&caption, pdf_uri))
}

/// One wrapper section per selected page, in the given order
pub fn pages_page(pdf_uri: &str, pages: &[u32]) -> String {
    let body: String = pages
        .iter()
        .map(|page| section(&format!("Page {}", page), pdf_uri))
        .collect();
    document(SECTION_STYLE, &body)
}

/// The source document re-laid out on a fixed page box
pub fn resized_page(pdf_uri: &str, size: PageSize) -> String {
    let style = format!(
        "body {{ margin: 0; padding: 0; }}\nembed {{ width: 100%; min-height: {}px; }}",
        size.height
    );
    let body = format!(
        "<embed src=\"{}\" type=\"application/pdf\" width=\"{}px\" height=\"{}px\" />\n",
        escape_html(pdf_uri),
        size.width,
        size.height
    );
    document(&style, &body)
}

/// Cover page for a signed document: original name plus signature image
pub fn signed_page(original_name: &str, signature_uri: &str) -> String {
    let body = format!(
        "<h3 style=\"color:#1E293B;\">Signed Document</h3>\n\
         <p style=\"color:#64748B;\">Original: {}</p>\n\
         <hr style=\"border-color:#E2E8F0;\" />\n\
         <p style=\"color:#64748B;\">Signature:</p>\n\
         <img src=\"{}\" style=\"max-width:300px;border:2px solid #E2E8F0;border-radius:12px;\" />\n",
        escape_html(original_name),
        escape_html(signature_uri)
    );
    document(
        "body { margin: 0; padding: 20px; background: #F8FAFC; }",
        &body,
    )
}
