//! Render entry points
//!
//! [`render`] drives a renderer with the instruction stream for one layout
//! of the document, picked according to the configured mode;
//! [`render_to_string`] is the synchronous convenience over an in-memory
//! plain-text renderer.

pub(crate) mod machine;
pub(crate) mod simple;

use crate::layout::cancel::CancelToken;
use crate::layout::error::LayoutError;
use crate::layout::options::{LayoutMode, LayoutOptions};
use crate::layout::render::{PlainText, Renderer};
use crate::layout::types::doc::Doc;

use machine::Machine;

/// Lays out `doc` and drives `renderer` with the result.
///
/// At every choice the engine takes the first branch unless it would
/// overflow the current line. Renderer errors propagate unchanged; output
/// already emitted is the caller's to clean up. Cancelling `cancel` stops
/// the render within one renderer call.
///
/// ```
/// use typeflow::{render, text, CancelToken, Doc, LayoutOptions, PlainText};
///
/// let doc: Doc = text("hello");
/// let mut renderer = PlainText::new(String::new());
/// render(&doc, &mut renderer, &LayoutOptions::default(), &CancelToken::new())?;
/// assert_eq!(renderer.into_inner(), "hello");
/// # Ok::<(), typeflow::LayoutError>(())
/// ```
pub fn render<A, R>(
    doc: &Doc<A>,
    renderer: &mut R,
    options: &LayoutOptions,
    cancel: &CancelToken,
) -> Result<(), LayoutError>
where
    A: Clone,
    R: Renderer<A> + ?Sized,
{
    options.validate()?;
    match options.layout_mode {
        LayoutMode::Simple => simple::render_simple(doc, renderer, cancel),
        LayoutMode::Default => Machine::new(renderer, options, cancel, false).run(doc),
        LayoutMode::Smart => Machine::new(renderer, options, cancel, true).run(doc),
    }
}

/// Renders `doc` into a fresh `String`.
///
/// # Panics
///
/// Panics when the options are invalid or an internal invariant of the
/// engine is violated; writing to a string cannot itself fail and there is
/// no cancellation on this path. Use [`render`] to handle errors instead.
pub fn render_to_string<A: Clone>(doc: &Doc<A>, options: &LayoutOptions) -> String {
    let mut renderer = PlainText::new(String::new());
    match render(doc, &mut renderer, options, &CancelToken::new()) {
        Ok(()) => renderer.into_inner(),
        Err(error) => panic!("rendering to a string failed: {error}"),
    }
}
