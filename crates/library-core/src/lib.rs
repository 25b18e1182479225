//! Local PDF library
//!
//! Owns the single managed directory that every generated document is
//! written into. The directory itself is the index: listing reads it fresh
//! each time and nothing else is persisted.

pub mod error;
pub mod library;
pub mod naming;

pub use error::{LibraryError, RenameError};
pub use library::PdfLibrary;
pub use naming::{format_size, is_pdf_name, sanitize_file_name};
