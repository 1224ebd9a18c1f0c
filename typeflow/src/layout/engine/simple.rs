//! The simple layout interpreter
//!
//! A direct tree walk with no choice resolution, no indentation and no
//! buffering: alternatives render their default branch, choices their
//! laid-out branch. Suited to machine-readable output where page width is
//! irrelevant.

use crate::layout::cancel::CancelToken;
use crate::layout::error::LayoutError;
use crate::layout::render::{Renderer, RowSinkAdapter};
use crate::layout::types::doc::{Doc, DocKind};

pub(crate) fn render_simple<A, R>(
    doc: &Doc<A>,
    renderer: &mut R,
    cancel: &CancelToken,
) -> Result<(), LayoutError>
where
    R: Renderer<A> + ?Sized,
{
    if cancel.is_canceled() {
        return Err(LayoutError::Canceled);
    }
    match doc.kind() {
        DocKind::Empty => Ok(()),
        DocKind::HardLine => renderer.new_line(),
        DocKind::WhiteSpace(amount) => {
            if *amount > 0 {
                renderer.white_space(*amount)
            } else {
                Ok(())
            }
        }
        DocKind::Text(span) => renderer.text(span.as_str()),
        DocKind::Block(block) => {
            if block.width() == 0 || block.height() == 0 {
                return Ok(());
            }
            for row in 0..block.height() {
                if cancel.is_canceled() {
                    return Err(LayoutError::Canceled);
                }
                if row > 0 {
                    renderer.new_line()?;
                }
                let mut sink = RowSinkAdapter::new(&mut *renderer);
                block.render_row(row, &mut sink)?;
            }
            Ok(())
        }
        DocKind::Append(left, right) => {
            render_simple(left, renderer, cancel)?;
            render_simple(right, renderer, cancel)
        }
        DocKind::Alternative { default, .. } => render_simple(default, renderer, cancel),
        DocKind::Choice { second, .. } => render_simple(second, renderer, cancel),
        DocKind::Flattened(inner) | DocKind::Nested(_, inner) | DocKind::Aligned(inner) => {
            render_simple(inner, renderer, cancel)
        }
        DocKind::Annotated(value, inner) => {
            renderer.push_annotation(value)?;
            render_simple(inner, renderer, cancel)?;
            renderer.pop_annotation()
        }
    }
}
