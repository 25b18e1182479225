//! Render-then-move: outputs only appear at their destination complete.

use crate::error::TransformError;
use crate::renderer::{HtmlRenderer, RenderRequest};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use tempfile::NamedTempFile;

pub type Result<T> = std::result::Result<T, TransformError>;

/// Render `request` and move the result to `dest`.
///
/// The rendered temporary file is removed if it cannot be moved.
pub fn render_to(renderer: &dyn HtmlRenderer, request: &RenderRequest, dest: &Path) -> Result<()> {
    let rendered = renderer.render(request)?;
    let moved = move_into_place(&rendered, dest);
    if moved.is_err() {
        let _ = fs::remove_file(&rendered);
    }
    moved
}

/// Move `from` to `to`. An existing `to` is never replaced.
///
/// Tries a rename first. When that fails (typically because the temporary
/// file lives on another filesystem) the bytes are copied into a temporary
/// file next to `to`, which is then persisted without clobbering, and `from`
/// is removed. `from` stays in place when `to` is taken.
pub fn move_into_place(from: &Path, to: &Path) -> Result<()> {
    let parent = to.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)
        .map_err(TransformError::io(format!("create directory {}", parent.display())))?;

    if to.exists() {
        return Err(TransformError::DestinationExists(to.to_path_buf()));
    }

    match fs::rename(from, to) {
        Ok(()) => return Ok(()),
        Err(e) => tracing::debug!(
            "Rename {} -> {} failed ({}), copying instead",
            from.display(),
            to.display(),
            e
        ),
    }

    match copy_then_persist(from, to, parent) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(TransformError::DestinationExists(to.to_path_buf()))
        }
        Err(e) => {
            let context = format!("move {} to {}", from.display(), to.display());
            return Err(TransformError::io(context)(e));
        }
    }
    let _ = fs::remove_file(from);
    Ok(())
}

fn copy_then_persist(from: &Path, to: &Path, parent: &Path) -> io::Result<()> {
    let mut source = File::open(from)?;
    let mut staged = NamedTempFile::new_in(parent)?;
    io::copy(&mut source, staged.as_file_mut())?;
    staged.as_file().sync_all()?;
    staged.persist_noclobber(to).map_err(|e| e.error)?;
    Ok(())
}
