//! The HTML-to-PDF renderer seam
//!
//! Rendering is an external service: it receives an HTML document and
//! leaves a file at a temporary location. The transforms move that file
//! into place themselves.

use crate::error::RenderError;
use shared_types::PageSize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What to render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub html: String,
    /// Page box in points; `None` leaves the renderer's default
    pub page_size: Option<PageSize>,
}

impl RenderRequest {
    pub fn new(html: String) -> Self {
        Self {
            html,
            page_size: None,
        }
    }

    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_size = Some(size);
        self
    }
}

/// An HTML-to-PDF service.
///
/// Returns the path of a freshly written temporary file that the caller now
/// owns (moves or deletes).
pub trait HtmlRenderer {
    fn render(&self, request: &RenderRequest) -> Result<PathBuf, RenderError>;
}

fn temp_output(dir: &Path, suffix: &str) -> Result<PathBuf, RenderError> {
    let path = tempfile::Builder::new()
        .prefix("pocketdoc-")
        .suffix(suffix)
        .tempfile_in(dir)?
        .into_temp_path()
        .keep()
        .map_err(|e| RenderError::Io(e.error))?;
    Ok(path)
}

/// Runs an external program such as `wkhtmltopdf`.
///
/// Each argument is a template. `{input}` and `{output}` expand to the
/// temporary HTML and PDF paths. When a page size is requested,
/// `sized_args` are placed before `args` with `{width_pt}`, `{height_pt}`,
/// `{width_mm}` and `{height_mm}` expanded.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    pub program: String,
    pub args: Vec<String>,
    pub sized_args: Vec<String>,
    /// Where temporary files go; the system temp dir when `None`
    pub scratch_dir: Option<PathBuf>,
}

impl CommandRenderer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            sized_args: Vec::new(),
            scratch_dir: None,
        }
    }

    /// `wkhtmltopdf --quiet [--page-width Wmm --page-height Hmm] input output`
    pub fn wkhtmltopdf() -> Self {
        Self {
            program: "wkhtmltopdf".to_string(),
            args: vec!["--quiet".into(), "{input}".into(), "{output}".into()],
            sized_args: vec![
                "--page-width".into(),
                "{width_mm}mm".into(),
                "--page-height".into(),
                "{height_mm}mm".into(),
            ],
            scratch_dir: None,
        }
    }

    fn scratch(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Expanded argument list for one render
    pub fn expand_args(&self, input: &Path, output: &Path, size: Option<PageSize>) -> Vec<String> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();
        let expand = |template: &String| {
            let mut arg = template
                .replace("{input}", &input)
                .replace("{output}", &output);
            if let Some(size) = size {
                arg = arg
                    .replace("{width_pt}", &format!("{:.2}", size.width))
                    .replace("{height_pt}", &format!("{:.2}", size.height))
                    .replace("{width_mm}", &format!("{:.2}", size.width_mm()))
                    .replace("{height_mm}", &format!("{:.2}", size.height_mm()));
            }
            arg
        };

        let sized = size.map(|_| self.sized_args.as_slice()).unwrap_or(&[]);
        sized.iter().chain(self.args.iter()).map(expand).collect()
    }
}

impl HtmlRenderer for CommandRenderer {
    fn render(&self, request: &RenderRequest) -> Result<PathBuf, RenderError> {
        let scratch = self.scratch();
        fs::create_dir_all(&scratch)?;

        let mut input = tempfile::Builder::new()
            .prefix("pocketdoc-")
            .suffix(".html")
            .tempfile_in(&scratch)?;
        input.write_all(request.html.as_bytes())?;
        input.flush()?;

        let output = temp_output(&scratch, ".pdf")?;
        let args = self.expand_args(input.path(), &output, request.page_size);
        tracing::debug!("Running {} {:?}", self.program, args);

        let result = Command::new(&self.program).args(&args).output();
        let outcome = match result {
            Err(source) => Err(RenderError::Spawn {
                program: self.program.clone(),
                source,
            }),
            Ok(out) if !out.status.success() => Err(RenderError::Failed {
                program: self.program.clone(),
                status: out.status.to_string(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            }),
            Ok(_) => match fs::metadata(&output) {
                Ok(meta) if meta.len() > 0 => Ok(()),
                _ => Err(RenderError::NoOutput),
            },
        };

        match outcome {
            Ok(()) => Ok(output),
            Err(e) => {
                let _ = fs::remove_file(&output);
                Err(e)
            }
        }
    }
}

/// Writes the composed HTML itself as the output.
///
/// No PDF is produced; this is for inspecting templates and for tests that
/// need a renderer without an external program.
#[derive(Debug, Clone, Default)]
pub struct PassthroughRenderer {
    pub scratch_dir: Option<PathBuf>,
}

impl PassthroughRenderer {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: Some(dir.into()),
        }
    }
}

impl HtmlRenderer for PassthroughRenderer {
    fn render(&self, request: &RenderRequest) -> Result<PathBuf, RenderError> {
        let scratch = self
            .scratch_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        fs::create_dir_all(&scratch)?;
        let output = temp_output(&scratch, ".html")?;
        fs::write(&output, request.html.as_bytes())?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_expand_args_without_size() {
        let renderer = CommandRenderer::wkhtmltopdf();
        let args = renderer.expand_args(Path::new("/t/in.html"), Path::new("/t/out.pdf"), None);
        assert_eq!(args, vec!["--quiet", "/t/in.html", "/t/out.pdf"]);
    }

    #[test]
    fn test_expand_args_with_size() {
        let renderer = CommandRenderer::wkhtmltopdf();
        let args = renderer.expand_args(
            Path::new("in.html"),
            Path::new("out.pdf"),
            Some(PageSize::letter()),
        );
        assert_eq!(
            args,
            vec![
                "--page-width",
                "215.90mm",
                "--page-height",
                "279.40mm",
                "--quiet",
                "in.html",
                "out.pdf"
            ]
        );
    }

    #[test]
    fn test_expand_points() {
        let renderer = CommandRenderer {
            sized_args: vec!["{width_pt}x{height_pt}".into()],
            ..CommandRenderer::new("tool", vec![])
        };
        let args = renderer.expand_args(
            Path::new("i"),
            Path::new("o"),
            Some(PageSize {
                width: 540.0,
                height: 700.0,
            }),
        );
        assert_eq!(args, vec!["540.00x700.00"]);
    }

    #[test]
    fn test_passthrough_writes_html() {
        let tmp = TempDir::new().unwrap();
        let renderer = PassthroughRenderer::in_dir(tmp.path());
        let out = renderer
            .render(&RenderRequest::new("<html>hi</html>".into()))
            .unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "<html>hi</html>");
        assert!(out.starts_with(tmp.path()));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let tmp = TempDir::new().unwrap();
        let renderer = CommandRenderer {
            scratch_dir: Some(tmp.path().to_path_buf()),
            ..CommandRenderer::new("pocketdoc-no-such-renderer", vec!["{input}".into()])
        };
        let err = renderer
            .render(&RenderRequest::new("<html></html>".into()))
            .unwrap_err();
        assert!(matches!(err, RenderError::Spawn { .. }));
        // Only the input temp file could have existed, and it is cleaned up
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_command_renderer_copies_output() {
        let tmp = TempDir::new().unwrap();
        let renderer = CommandRenderer {
            scratch_dir: Some(tmp.path().to_path_buf()),
            ..CommandRenderer::new(
                "sh",
                vec![
                    "-c".into(),
                    "cat \"$0\" > \"$1\"".into(),
                    "{input}".into(),
                    "{output}".into(),
                ],
            )
        };
        let out = renderer
            .render(&RenderRequest::new("<p>rendered</p>".into()))
            .unwrap();
        assert_eq!(fs::read_to_string(out).unwrap(), "<p>rendered</p>");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_renderer_failure_reports_stderr() {
        let tmp = TempDir::new().unwrap();
        let renderer = CommandRenderer {
            scratch_dir: Some(tmp.path().to_path_buf()),
            ..CommandRenderer::new("sh", vec!["-c".into(), "echo boom >&2; exit 3".into()])
        };
        let err = renderer
            .render(&RenderRequest::new("<p></p>".into()))
            .unwrap_err();
        match err {
            RenderError::Failed { stderr, .. } => assert_eq!(stderr, "boom"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_command_renderer_empty_output() {
        let tmp = TempDir::new().unwrap();
        let renderer = CommandRenderer {
            scratch_dir: Some(tmp.path().to_path_buf()),
            ..CommandRenderer::new("sh", vec!["-c".into(), "true".into()])
        };
        let err = renderer
            .render(&RenderRequest::new("<p></p>".into()))
            .unwrap_err();
        assert!(matches!(err, RenderError::NoOutput));
    }
}
