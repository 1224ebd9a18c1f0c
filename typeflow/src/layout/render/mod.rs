//! Renderer interface and adapters
//!
//! A renderer is the sink the engine drives: a stream of text, whitespace,
//! newline, and annotation push/pop operations, observed in the order the
//! engine commits them. Push/pop events are balanced across a successful
//! render, so a renderer may maintain its own annotation stack.

mod map;
mod plain;

pub use map::MapAnnotations;
pub use plain::PlainText;

use crate::layout::error::LayoutError;
use crate::layout::types::block::RowSink;

/// The five-operation sink a render drives.
///
/// The engine never calls `white_space` with an amount of zero. Errors
/// returned from any operation propagate out of the render unchanged; the
/// engine does not retry and does not roll back output already emitted.
pub trait Renderer<A> {
    /// Emits a contiguous run of text containing no newline.
    fn text(&mut self, text: &str) -> Result<(), LayoutError>;

    /// Emits a line terminator.
    fn new_line(&mut self) -> Result<(), LayoutError>;

    /// Emits `amount` spaces; `amount` is always positive.
    fn white_space(&mut self, amount: usize) -> Result<(), LayoutError>;

    /// Opens an annotated region carrying `annotation`.
    fn push_annotation(&mut self, annotation: &A) -> Result<(), LayoutError>;

    /// Closes the innermost open annotated region.
    fn pop_annotation(&mut self) -> Result<(), LayoutError>;
}

impl<A, R: Renderer<A> + ?Sized> Renderer<A> for &mut R {
    fn text(&mut self, text: &str) -> Result<(), LayoutError> {
        (**self).text(text)
    }

    fn new_line(&mut self) -> Result<(), LayoutError> {
        (**self).new_line()
    }

    fn white_space(&mut self, amount: usize) -> Result<(), LayoutError> {
        (**self).white_space(amount)
    }

    fn push_annotation(&mut self, annotation: &A) -> Result<(), LayoutError> {
        (**self).push_annotation(annotation)
    }

    fn pop_annotation(&mut self) -> Result<(), LayoutError> {
        (**self).pop_annotation()
    }
}

/// Presents a renderer as the narrow [`RowSink`] surface a block row
/// renders into.
pub(crate) struct RowSinkAdapter<'r, A, R: ?Sized> {
    renderer: &'r mut R,
    _annotation: std::marker::PhantomData<fn(&A)>,
}

impl<'r, A, R: Renderer<A> + ?Sized> RowSinkAdapter<'r, A, R> {
    pub(crate) fn new(renderer: &'r mut R) -> Self {
        RowSinkAdapter {
            renderer,
            _annotation: std::marker::PhantomData,
        }
    }
}

impl<A, R: Renderer<A> + ?Sized> RowSink for RowSinkAdapter<'_, A, R> {
    fn text(&mut self, text: &str) -> Result<(), LayoutError> {
        self.renderer.text(text)
    }

    fn white_space(&mut self, amount: usize) -> Result<(), LayoutError> {
        if amount == 0 {
            return Ok(());
        }
        self.renderer.white_space(amount)
    }
}
