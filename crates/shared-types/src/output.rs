//! File naming for generated documents.
//!
//! Every generated PDF lands in the same flat directory and is told apart
//! by its prefix: `scan_<ms>.pdf`, `split_<i>_<ms>.pdf`, and so on.

use std::fmt;

/// Which flow produced a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    Scan,
    Converted,
    Signed,
    Merged,
    /// 1-based position of the range within one split request
    Split(usize),
    Extracted,
    Compressed,
}

impl OutputKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            OutputKind::Scan => "scan",
            OutputKind::Converted => "converted",
            OutputKind::Signed => "signed",
            OutputKind::Merged => "merged",
            OutputKind::Split(_) => "split",
            OutputKind::Extracted => "extracted",
            OutputKind::Compressed => "compressed",
        }
    }

    /// File name for an output created at `epoch_millis`
    pub fn file_name(&self, epoch_millis: i64) -> String {
        match self {
            OutputKind::Split(index) => format!("split_{}_{}.pdf", index, epoch_millis),
            other => format!("{}_{}.pdf", other.prefix(), epoch_millis),
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}
