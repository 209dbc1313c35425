//! # Diagram Pipeline
//!
//! Turns a textual diagram description into a rendered [`Fragment`], or into
//! an error message when the description is malformed. The actual drawing is
//! delegated to a [`DiagramRenderer`]; the pipeline only sequences
//! validate → render and converts failures into display state.
//!
//! - [`sequence`] - bundled renderer for sequence diagrams
//! - [`visualize`] - builds a sequence diagram description from the history

pub mod sequence;
pub mod visualize;

use thiserror::Error;

pub use sequence::SequenceRenderer;
pub use visualize::history_diagram;

/// Title shown above a diagram error
pub const RENDER_ERROR_TITLE: &str = "Unable to render";

/// Why a diagram could not be produced
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramError {
    /// The description is not valid diagram syntax.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The description parsed but could not be laid out.
    #[error("Render error: {message}")]
    Render { message: String },
}

impl DiagramError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }
}

/// A rendered diagram: text lines addressed by `id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub id: String,
    pub lines: Vec<String>,
}

impl Fragment {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Widest line, in characters.
    pub fn width(&self) -> usize {
        self.lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// Diagram drawing capability
pub trait DiagramRenderer {
    /// Check the description's syntax without drawing it.
    fn validate(&self, source: &str) -> Result<(), DiagramError>;

    /// Draw the description into a fragment addressed by `id`.
    fn render(&self, id: &str, source: &str) -> Result<Fragment, DiagramError>;
}

/// Current output of a diagram: either a fragment or an error, never both.
#[derive(Debug)]
pub struct DiagramPipeline<R> {
    renderer: R,
    fragment: Option<Fragment>,
    error: Option<String>,
}

impl<R: DiagramRenderer> DiagramPipeline<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            fragment: None,
            error: None,
        }
    }

    /// Validate and render `source`. The previous output is discarded first;
    /// on failure only the error message remains.
    pub fn render(&mut self, id: &str, source: &str) {
        self.clear();

        let result = self
            .renderer
            .validate(source)
            .and_then(|()| self.renderer.render(id, source));

        match result {
            Ok(fragment) => {
                tracing::debug!("Rendered diagram {} ({} lines)", id, fragment.lines.len());
                self.fragment = Some(fragment);
            }
            Err(e) => {
                tracing::warn!("Diagram {} failed: {}", id, e);
                self.error = Some(e.to_string());
            }
        }
    }

    /// Drop both fragment and error.
    pub fn clear(&mut self) {
        self.fragment = None;
        self.error = None;
    }

    pub fn fragment(&self) -> Option<&Fragment> {
        self.fragment.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
