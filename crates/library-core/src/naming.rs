//! File-name helpers: sanitizing user input and formatting sizes.

/// Longest name we keep, in characters
const MAX_NAME_CHARS: usize = 200;

/// Whether a base name has a `.pdf` extension (any case)
pub fn is_pdf_name(name: &str) -> bool {
    name.len() >= 4
        && name.is_char_boundary(name.len() - 4)
        && name[name.len() - 4..].eq_ignore_ascii_case(".pdf")
}

/// Cleans a user-typed file name.
///
/// - Replaces path separators and characters rejected by common filesystems with `_`
/// - Removes control characters (including DEL)
/// - Trims whitespace and dots from both ends
/// - Limits length to 200 characters, on a char boundary
///
/// The result may be empty; callers decide whether that is an error.
pub fn sanitize_file_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .filter_map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => Some('_'),
            '\0'..='\x1f' | '\x7f' => None,
            c => Some(c),
        })
        .collect();

    let trimmed = replaced.trim_matches(is_edge_char);

    match trimmed.char_indices().nth(MAX_NAME_CHARS) {
        Some((end, _)) => trimmed[..end].trim_end_matches(is_edge_char).to_string(),
        None => trimmed.to_string(),
    }
}

fn is_edge_char(c: char) -> bool {
    c.is_whitespace() || c == '.'
}

/// Human-readable size: bytes below 1 KB, then one decimal of KB or MB
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * KB;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}
