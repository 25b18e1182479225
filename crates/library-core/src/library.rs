//! The managed PDF directory

use crate::error::{LibraryError, RenameError};
use crate::naming::{is_pdf_name, sanitize_file_name};
use chrono::{DateTime, Utc};
use shared_types::{ManagedFile, OutputKind};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

pub type Result<T> = std::result::Result<T, LibraryError>;

/// A flat directory holding every generated PDF.
///
/// Constructed explicitly with its location; there is no process-wide
/// "current library".
#[derive(Debug, Clone)]
pub struct PdfLibrary {
    dir: PathBuf,
}

impl PdfLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the directory, creating it and any missing parents first
    pub fn ensure_directory(&self) -> Result<PathBuf> {
        if !self.dir.is_dir() {
            tracing::debug!("Creating library directory {}", self.dir.display());
            fs::create_dir_all(&self.dir).map_err(LibraryError::io(format!(
                "create directory {}",
                self.dir.display()
            )))?;
        }
        Ok(self.dir.clone())
    }

    /// Lists every `.pdf` file, most recently modified first.
    ///
    /// The sort is stable, so files with equal timestamps keep directory
    /// order. Entries that disappear between listing and stat are skipped.
    pub fn list_files(&self) -> Result<Vec<ManagedFile>> {
        let dir = self.ensure_directory()?;
        let entries = fs::read_dir(&dir)
            .map_err(LibraryError::io(format!("list directory {}", dir.display())))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(LibraryError::io("read directory entry"))?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::debug!("Skipping non UTF-8 file name {:?}", raw);
                    continue;
                }
            };
            if !is_pdf_name(&name) {
                continue;
            }

            let path = entry.path();
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!("{} vanished while listing", path.display());
                    continue;
                }
                Err(e) => {
                    return Err(LibraryError::Io {
                        context: format!("stat {}", path.display()),
                        source: e,
                    })
                }
            };
            if !metadata.is_file() {
                continue;
            }

            let modified: DateTime<Utc> = metadata.modified().unwrap_or(UNIX_EPOCH).into();
            files.push(ManagedFile {
                name,
                path,
                size: metadata.len(),
                modified,
            });
        }

        files.sort_by(|a, b| b.modified.cmp(&a.modified));
        tracing::debug!("Listed {} PDF files in {}", files.len(), dir.display());
        Ok(files)
    }

    /// Whether `path` names a `.pdf` entry directly inside the library
    pub fn is_managed(&self, path: &Path) -> bool {
        let named_pdf = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_pdf_name);
        if !named_pdf {
            return false;
        }

        let parent = path.parent().unwrap_or_else(|| Path::new(""));
        if parent == self.dir {
            return true;
        }
        match (fs::canonicalize(parent), fs::canonicalize(&self.dir)) {
            (Ok(parent), Ok(dir)) => parent == dir,
            _ => false,
        }
    }

    fn check_managed(&self, path: &Path) -> Result<()> {
        if self.is_managed(path) {
            Ok(())
        } else {
            Err(LibraryError::NotManaged(path.to_path_buf()))
        }
    }

    /// Deletes a library entry. An entry that is already gone counts as
    /// deleted. Paths outside the library are refused.
    pub fn delete_file(&self, path: &Path) -> Result<()> {
        self.check_managed(path)?;
        match fs::remove_file(path) {
            Ok(()) => {
                tracing::info!("Deleted {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("{} already absent", path.display());
                Ok(())
            }
            Err(e) => Err(LibraryError::Io {
                context: format!("delete {}", path.display()),
                source: e,
            }),
        }
    }

    /// Renames a library entry in place and returns the new path.
    ///
    /// `new_name` is sanitized and gets a `.pdf` extension unless it already
    /// has one. The source is left untouched when it is outside the library,
    /// the name sanitizes to nothing or the destination is taken.
    pub fn rename_file(&self, path: &Path, new_name: &str) -> Result<PathBuf> {
        self.check_managed(path)?;
        let sanitized = sanitize_file_name(new_name);
        if sanitized.is_empty() {
            return Err(RenameError::EmptyName.into());
        }

        let file_name = if is_pdf_name(&sanitized) {
            sanitized
        } else {
            format!("{}.pdf", sanitized)
        };
        let parent = path.parent().unwrap_or(self.dir.as_path());
        let dest = parent.join(&file_name);

        if dest == path {
            return Ok(dest);
        }
        if dest.exists() && !is_case_change(parent, path, &file_name) {
            return Err(RenameError::AlreadyExists(dest).into());
        }

        fs::rename(path, &dest).map_err(LibraryError::io(format!(
            "rename {} to {}",
            path.display(),
            file_name
        )))?;
        tracing::info!("Renamed {} to {}", path.display(), dest.display());
        Ok(dest)
    }

    /// Destination for a new output of `kind`, stamped with the current time
    pub fn output_path(&self, kind: OutputKind) -> Result<PathBuf> {
        self.output_path_at(kind, Utc::now().timestamp_millis())
    }

    /// Destination for a new output of `kind` stamped with `epoch_millis`.
    ///
    /// When that name is taken the stamp moves forward to the next free one.
    pub fn output_path_at(&self, kind: OutputKind, epoch_millis: i64) -> Result<PathBuf> {
        let dir = self.ensure_directory()?;
        let mut stamp = epoch_millis;
        let mut path = dir.join(kind.file_name(stamp));
        while path.exists() {
            stamp += 1;
            path = dir.join(kind.file_name(stamp));
        }
        Ok(path)
    }
}

/// `new_name` differs from `path`'s name only by case and the directory has
/// no entry spelled exactly `new_name`, so an existing destination is the
/// source itself on a case-insensitive filesystem.
fn is_case_change(dir: &Path, path: &Path, new_name: &str) -> bool {
    let current = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return false,
    };
    if current == new_name || !current.eq_ignore_ascii_case(new_name) {
        return false;
    }
    match fs::read_dir(dir) {
        Ok(entries) => !entries
            .filter_map(|e| e.ok())
            .any(|e| e.file_name().to_str() == Some(new_name)),
        Err(_) => false,
    }
}
