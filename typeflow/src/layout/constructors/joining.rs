//! Joining constructors
//!
//! Sequential composition and the iterator-based helpers built on it.

use std::rc::Rc;

use crate::layout::constructors::basic::empty;
use crate::layout::constructors::control::line_break_hint;
use crate::layout::types::doc::{Doc, DocKind, Span};

/// Sequential composition. An empty operand is dropped rather than
/// wrapped, so `append` is also the cheapest way to build documents up
/// incrementally; `+` on documents is the same operation.
pub fn append<A>(left: Doc<A>, right: Doc<A>) -> Doc<A> {
    if matches!(left.kind(), DocKind::Empty) {
        return right;
    }
    if matches!(right.kind(), DocKind::Empty) {
        return left;
    }
    Doc::from_kind(DocKind::Append(left, right))
}

/// Appends every document in order.
pub fn concat<A>(docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    docs.into_iter().fold(empty(), append)
}

/// Intersperses `separator` between the documents.
pub fn separated<A>(separator: Doc<A>, docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    let mut result = empty();
    let mut first = true;
    for doc in docs {
        if !first {
            result = append(result, separator.clone());
        }
        result = append(result, doc);
        first = false;
    }
    result
}

/// Intersperses `separator` between the documents and appends it once more
/// at the end.
pub fn separated_and_terminated<A>(
    separator: Doc<A>,
    docs: impl IntoIterator<Item = Doc<A>>,
) -> Doc<A> {
    let mut result = empty();
    for doc in docs {
        result = append(append(result, doc), separator.clone());
    }
    result
}

/// Splits the source on whitespace and re-joins the words with
/// [`line_break_hint`](crate::line_break_hint), producing a paragraph that
/// fills each line before breaking:
///
/// ```
/// use typeflow::{reflow, render_to_string, Doc, LayoutOptions};
///
/// let doc: Doc = reflow("hello here are some words");
/// assert_eq!(
///     render_to_string(&doc, &LayoutOptions::with_width(18)),
///     "hello here are\nsome words",
/// );
/// ```
pub fn reflow<A>(source: impl AsRef<str>) -> Doc<A> {
    let source = source.as_ref();
    let backing: Rc<str> = Rc::from(source);
    let base = source.as_ptr() as usize;
    let mut result = empty();
    let mut first = true;
    for word in source.split_whitespace() {
        if !first {
            result = append(result, line_break_hint());
        }
        let start = word.as_ptr() as usize - base;
        result = append(
            result,
            Doc::from_kind(DocKind::Text(Span::new(
                Rc::clone(&backing),
                start,
                start + word.len(),
            ))),
        );
        first = false;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::constructors::basic::text;

    fn show(doc: &Doc) -> String {
        format!("{doc:?}")
    }

    #[test]
    fn append_drops_empty_operands() {
        assert_eq!(show(&append(empty(), text("x"))), "(Text \"x\")");
        assert_eq!(show(&append(text("x"), empty())), "(Text \"x\")");
        assert_eq!(show(&concat::<()>([])), "Empty");
    }

    #[test]
    fn separated_places_the_separator_between_items() {
        let doc = separated(text(", "), [text("a"), text("b"), text("c")]);
        assert_eq!(
            show(&doc),
            "(Append (Append (Append (Append (Text \"a\") (Text \", \")) (Text \"b\")) \
             (Text \", \")) (Text \"c\"))"
        );
    }

    #[test]
    fn separated_and_terminated_also_ends_with_the_separator() {
        let doc = separated_and_terminated(text(";"), [text("a"), text("b")]);
        assert_eq!(
            show(&doc),
            "(Append (Append (Append (Text \"a\") (Text \";\")) (Text \"b\")) (Text \";\"))"
        );
    }

    #[test]
    fn reflow_splits_words_and_interleaves_hints() {
        assert_eq!(
            show(&reflow("two  words")),
            "(Append (Append (Text \"two\") (Choice (Text \" \") HardLine)) (Text \"words\"))"
        );
        assert_eq!(show(&reflow("   ")), "Empty");
    }
}
