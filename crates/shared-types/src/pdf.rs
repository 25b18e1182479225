//! Page ranges, page boxes and compression presets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Points per millimeter (72 pt per inch, 25.4 mm per inch)
const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// An inclusive, 1-based page interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// A range covering exactly one page
    pub fn single(page: u32) -> Self {
        Self::new(page, page)
    }

    /// 1-based and not reversed
    pub fn is_well_formed(&self) -> bool {
        self.start >= 1 && self.start <= self.end
    }

    /// Whether the range is well-formed for a document of `page_count` pages
    pub fn fits(&self, page_count: u32) -> bool {
        self.is_well_formed() && self.end <= page_count
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Page box handed to the renderer, in PDF points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// US Letter, the renderer's default page
    pub fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
        }
    }

    pub fn width_mm(&self) -> f64 {
        self.width / POINTS_PER_MM
    }

    pub fn height_mm(&self) -> f64 {
        self.height / POINTS_PER_MM
    }
}

/// Re-render presets for compression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionQuality {
    High,
    Medium,
    Low,
}

impl CompressionQuality {
    pub const ALL: [CompressionQuality; 3] = [
        CompressionQuality::High,
        CompressionQuality::Medium,
        CompressionQuality::Low,
    ];

    /// Target page box for this preset
    pub fn page_size(&self) -> PageSize {
        match self {
            CompressionQuality::High => PageSize::letter(),
            CompressionQuality::Medium => PageSize {
                width: 540.0,
                height: 700.0,
            },
            CompressionQuality::Low => PageSize {
                width: 460.0,
                height: 600.0,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionQuality::High => "high",
            CompressionQuality::Medium => "medium",
            CompressionQuality::Low => "low",
        }
    }
}

impl fmt::Display for CompressionQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown compression quality '{0}' (expected high, medium or low)")]
pub struct ParseQualityError(pub String);

impl FromStr for CompressionQuality {
    type Err = ParseQualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(CompressionQuality::High),
            "medium" => Ok(CompressionQuality::Medium),
            "low" => Ok(CompressionQuality::Low),
            _ => Err(ParseQualityError(s.to_string())),
        }
    }
}

/// Byte sizes before and after a compression pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionStats {
    pub original_size: u64,
    pub compressed_size: u64,
}

impl CompressionStats {
    /// Percentage saved, rounded, never negative. Zero for an empty original.
    pub fn saved_percent(&self) -> u32 {
        if self.original_size == 0 {
            return 0;
        }
        let original = self.original_size as f64;
        let saved = (original - self.compressed_size as f64) / original * 100.0;
        saved.round().max(0.0) as u32
    }
}
