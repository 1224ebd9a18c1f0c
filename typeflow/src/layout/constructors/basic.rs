//! Basic document constructors
//!
//! The primitive building blocks: the empty document, hard line breaks,
//! whitespace runs, text, and embedded blocks. Everything else in the
//! algebra is built from these plus the control constructors.

use std::rc::Rc;

use crate::layout::constructors::control::line_break;
use crate::layout::constructors::joining::append;
use crate::layout::types::block::Block;
use crate::layout::types::doc::{Doc, DocKind, Span};

/// The empty document: no text, no effect, the identity of
/// [`append`](crate::append).
pub fn empty<A>() -> Doc<A> {
    Doc::from_kind(DocKind::Empty)
}

/// A mandatory line break. It defeats any enclosing flatten, so a group
/// containing one never collapses onto a single line.
pub fn hard_line<A>() -> Doc<A> {
    Doc::from_kind(DocKind::HardLine)
}

/// `amount` horizontal spaces.
///
/// Unlike spaces inside [`text`], a whitespace run is subject to
/// trailing-whitespace stripping when nothing follows it on its line.
pub fn white_space<A>(amount: usize) -> Doc<A> {
    if amount == 0 {
        empty()
    } else {
        Doc::from_kind(DocKind::WhiteSpace(amount))
    }
}

/// A document containing the given text.
///
/// The source is split on `'\n'` and the pieces are re-joined with
/// [`line_break`](crate::line_break), so line breaks present in the source
/// are flattenable:
///
/// ```
/// use typeflow::{grouped, render_to_string, text, Doc, LayoutOptions};
///
/// let doc: Doc = text("lorem\nipsum");
/// assert_eq!(render_to_string(&doc, &LayoutOptions::default()), "lorem\nipsum");
/// assert_eq!(
///     render_to_string(&grouped(doc), &LayoutOptions::default()),
///     "lorem ipsum",
/// );
/// ```
pub fn text<A>(source: impl AsRef<str>) -> Doc<A> {
    let source = source.as_ref();
    if source.is_empty() {
        return empty();
    }
    let backing: Rc<str> = Rc::from(source);
    if !source.contains('\n') {
        let end = backing.len();
        return Doc::from_kind(DocKind::Text(Span::new(backing, 0, end)));
    }
    let mut result = empty();
    let mut start = 0;
    let mut first = true;
    let bounds = source
        .match_indices('\n')
        .map(|(at, _)| at)
        .chain(std::iter::once(source.len()));
    for end in bounds {
        if !first {
            result = append(result, line_break());
        }
        if end > start {
            result = append(
                result,
                Doc::from_kind(DocKind::Text(Span::new(Rc::clone(&backing), start, end))),
            );
        }
        start = end + 1;
        first = false;
    }
    result
}

/// Like [`text`], but skips the `'\n'` scan. The caller guarantees the
/// source contains no newline.
pub fn text_unchecked<A>(source: impl AsRef<str>) -> Doc<A> {
    let source = source.as_ref();
    debug_assert!(!source.contains('\n'));
    if source.is_empty() {
        return empty();
    }
    let backing: Rc<str> = Rc::from(source);
    let end = backing.len();
    Doc::from_kind(DocKind::Text(Span::new(backing, 0, end)))
}

/// Embeds a pre-measured two-dimensional [`Block`]. The engine lays the
/// block out as an aligned region and delegates its contents row by row.
pub fn embed<A>(block: impl Block + 'static) -> Doc<A> {
    Doc::from_kind(DocKind::Block(Rc::new(block)))
}

impl<A> From<&str> for Doc<A> {
    fn from(source: &str) -> Doc<A> {
        text(source)
    }
}

impl<A> From<String> for Doc<A> {
    fn from(source: String) -> Doc<A> {
        text(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(doc: &Doc) -> String {
        format!("{doc:?}")
    }

    #[test]
    fn text_without_newlines_is_a_single_run() {
        assert_eq!(show(&text("abc")), "(Text \"abc\")");
    }

    #[test]
    fn text_splits_on_newlines_into_flattenable_breaks() {
        assert_eq!(
            show(&text("ab\ncd")),
            "(Append (Append (Text \"ab\") (Alternative HardLine (Text \" \"))) (Text \"cd\"))"
        );
    }

    #[test]
    fn consecutive_newlines_leave_no_empty_runs() {
        assert_eq!(
            show(&text("a\n\nb")),
            "(Append (Append (Append (Text \"a\") (Alternative HardLine (Text \" \"))) \
             (Alternative HardLine (Text \" \"))) (Text \"b\"))"
        );
    }

    #[test]
    fn empty_text_and_zero_whitespace_collapse_to_empty() {
        assert_eq!(show(&text("")), "Empty");
        assert_eq!(show(&white_space(0)), "Empty");
    }
}
