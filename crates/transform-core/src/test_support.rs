//! Renderers used by unit tests

use crate::error::RenderError;
use crate::renderer::{HtmlRenderer, PassthroughRenderer, RenderRequest};
use std::cell::RefCell;
use std::path::PathBuf;

/// Always fails, as if the external program crashed
pub struct FailingRenderer;

impl HtmlRenderer for FailingRenderer {
    fn render(&self, _request: &RenderRequest) -> Result<PathBuf, RenderError> {
        Err(RenderError::Failed {
            program: "failing".into(),
            status: "exit status: 1".into(),
            stderr: "simulated failure".into(),
        })
    }
}

/// Passes HTML through and remembers every request
pub struct RecordingRenderer {
    inner: PassthroughRenderer,
    pub requests: RefCell<Vec<RenderRequest>>,
    /// Fail on the n-th call (0-based)
    pub fail_on: Option<usize>,
}

impl RecordingRenderer {
    pub fn new(scratch: impl Into<PathBuf>) -> Self {
        Self {
            inner: PassthroughRenderer::in_dir(scratch),
            requests: RefCell::new(Vec::new()),
            fail_on: None,
        }
    }

    pub fn failing_on(scratch: impl Into<PathBuf>, call: usize) -> Self {
        Self {
            fail_on: Some(call),
            ..Self::new(scratch)
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl HtmlRenderer for RecordingRenderer {
    fn render(&self, request: &RenderRequest) -> Result<PathBuf, RenderError> {
        let call = self.calls();
        self.requests.borrow_mut().push(request.clone());
        if self.fail_on == Some(call) {
            return FailingRenderer.render(request);
        }
        self.inner.render(request)
    }
}
