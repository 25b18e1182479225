//! Data model shared by the PocketDoc crates.
//!
//! Everything here is plain data: library entries, saved signatures, page
//! ranges and the presets handed to the renderer. Behavior lives in
//! `library-core`, `signature-store` and `transform-core`.

pub mod output;
pub mod pdf;
pub mod types;

pub use output::OutputKind;
pub use pdf::{CompressionQuality, CompressionStats, PageRange, PageSize, ParseQualityError};
pub use types::{ManagedFile, SavedSignature};
