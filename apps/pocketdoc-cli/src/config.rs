//! TOML configuration
//!
//! Every field has a default, so an empty or missing file is a valid
//! configuration:
//!
//! ```toml
//! [library]
//! directory = "/home/me/Documents/pdfs"
//!
//! [signatures]
//! directory = "/home/me/.local/share/pocketdoc/store"
//!
//! [renderer]
//! kind = "command"
//! program = "wkhtmltopdf"
//! args = ["--quiet", "{input}", "{output}"]
//! sized_args = ["--page-width", "{width_mm}mm", "--page-height", "{height_mm}mm"]
//!
//! [split]
//! default_page_count = 5
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use transform_core::{CommandRenderer, HtmlRenderer, PassthroughRenderer, DEFAULT_PAGE_COUNT};

/// Environment variable naming the config file when `--config` is absent
pub const CONFIG_ENV: &str = "POCKETDOC_CONFIG";

const APP_DIR: &str = "pocketdoc";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub library: LibraryConfig,
    pub signatures: SignaturesConfig,
    pub renderer: RendererConfig,
    pub split: SplitConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }

    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        tracing::debug!("Loading config from {}", path.display());
        Self::from_file(path)
    }

    /// Load from the explicit path, which must exist. Without one,
    /// `$POCKETDOC_CONFIG` or the platform config directory is tried and a
    /// missing file means defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let fallback = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml")));
        match fallback {
            Some(path) => Self::load_or_default(&path),
            None => Ok(Self::default()),
        }
    }
}

fn data_dir(leaf: &str) -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir().context("No local data directory on this platform")?;
    Ok(base.join(APP_DIR).join(leaf))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Managed PDF directory (default: `<data dir>/pocketdoc/pdfs`)
    pub directory: Option<PathBuf>,
}

impl LibraryConfig {
    pub fn resolve_directory(&self) -> anyhow::Result<PathBuf> {
        match &self.directory {
            Some(dir) => Ok(dir.clone()),
            None => data_dir("pdfs"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignaturesConfig {
    /// Key-value store directory (default: `<data dir>/pocketdoc/store`)
    pub directory: Option<PathBuf>,
}

impl SignaturesConfig {
    pub fn resolve_directory(&self) -> anyhow::Result<PathBuf> {
        match &self.directory {
            Some(dir) => Ok(dir.clone()),
            None => data_dir("store"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Run an external HTML-to-PDF program
    #[default]
    Command,
    /// Write the composed HTML as-is
    Passthrough,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub kind: RendererKind,
    pub program: String,
    pub args: Vec<String>,
    pub sized_args: Vec<String>,
    /// Temporary files; the system temp dir when unset
    pub scratch_dir: Option<PathBuf>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        let wk = CommandRenderer::wkhtmltopdf();
        Self {
            kind: RendererKind::Command,
            program: wk.program,
            args: wk.args,
            sized_args: wk.sized_args,
            scratch_dir: None,
        }
    }
}

impl RendererConfig {
    pub fn build(&self) -> Box<dyn HtmlRenderer> {
        match self.kind {
            RendererKind::Command => Box::new(CommandRenderer {
                program: self.program.clone(),
                args: self.args.clone(),
                sized_args: self.sized_args.clone(),
                scratch_dir: self.scratch_dir.clone(),
            }),
            RendererKind::Passthrough => Box::new(PassthroughRenderer {
                scratch_dir: self.scratch_dir.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Page count assumed by `split` when none is given
    pub default_page_count: u32,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            default_page_count: DEFAULT_PAGE_COUNT,
        }
    }
}
