//! Control constructors
//!
//! Constructors that shape how the engine chooses between layouts:
//! alternatives, choices, flattening, grouping, indentation and alignment,
//! plus the line-break shorthands derived from them.

use crate::layout::constructors::basic::{empty, hard_line, text, white_space};
use crate::layout::constructors::joining::append;
use crate::layout::types::doc::{Doc, DocKind};

/// Renders `default`, or `flattened` when an enclosing flatten is active.
///
/// The two branches are free to have different widths; the flattened-width
/// bookkeeping follows the `flattened` branch.
pub fn alternative<A>(default: Doc<A>, flattened: Doc<A>) -> Doc<A> {
    Doc::from_kind(DocKind::Alternative { default, flattened })
}

/// Tries `first`; if it would overflow the current line, renders `second`
/// instead.
///
/// The two branches should carry the same content in different shapes —
/// the engine picks purely on fit. Lookahead is one line: a choice stays
/// revisable until the line it started on is committed.
pub fn choice<A>(first: Doc<A>, second: Doc<A>) -> Doc<A> {
    Doc::from_kind(DocKind::Choice { first, second })
}

/// Renders `doc` with the flatten flag set, replacing every flattenable
/// line break inside with its flattened alternative.
pub fn flattened<A>(doc: Doc<A>) -> Doc<A> {
    Doc::from_kind(DocKind::Flattened(doc))
}

/// Increases the indentation of every line break inside `doc` by `amount`.
pub fn nest<A>(amount: usize, doc: Doc<A>) -> Doc<A> {
    Doc::from_kind(DocKind::Nested(Some(amount), doc))
}

/// Like [`nest`], with the amount taken from
/// [`LayoutOptions::default_nesting`](crate::LayoutOptions::default_nesting)
/// at render time.
pub fn nest_default<A>(doc: Doc<A>) -> Doc<A> {
    Doc::from_kind(DocKind::Nested(None, doc))
}

/// Sets the indentation level to the column at which `doc` begins, so its
/// later lines line up under its first character.
pub fn aligned<A>(doc: Doc<A>) -> Doc<A> {
    Doc::from_kind(DocKind::Aligned(doc))
}

/// Wraps `doc` in a balanced pair of push/pop annotation events carrying
/// `value`.
///
/// ```
/// use typeflow::{annotated, render_to_string, text, LayoutOptions};
///
/// let doc = annotated(1u8, text("plain renderers ignore annotations"));
/// assert_eq!(
///     render_to_string(&doc, &LayoutOptions::default()),
///     "plain renderers ignore annotations",
/// );
/// ```
pub fn annotated<A>(value: A, doc: Doc<A>) -> Doc<A> {
    Doc::from_kind(DocKind::Annotated(value, doc))
}

/// A line break that renders as `flattened_text` when flattened.
pub fn line_or<A>(flattened_text: &str) -> Doc<A> {
    alternative(hard_line(), text(flattened_text))
}

/// A line break that flattens to a single space.
pub fn line_break<A>() -> Doc<A> {
    line_or(" ")
}

/// A line break that flattens to nothing.
pub fn zero_width_line_break<A>() -> Doc<A> {
    line_or("")
}

/// A space that becomes a line break when the line would otherwise
/// overflow.
pub fn line_break_hint<A>() -> Doc<A> {
    choice(text(" "), hard_line())
}

/// Nothing, unless the line would otherwise overflow, in which case a line
/// break.
pub fn zero_width_line_break_hint<A>() -> Doc<A> {
    choice(empty(), hard_line())
}

/// The group combinator: tries to render `doc` flattened onto the current
/// line, falling back to the laid-out form when it does not fit.
///
/// ```
/// use typeflow::{grouped, line_break, render_to_string, text, Doc, LayoutOptions};
///
/// let doc: Doc = grouped(text("one") + line_break() + text("two"));
/// assert_eq!(render_to_string(&doc, &LayoutOptions::with_width(10)), "one two");
/// assert_eq!(render_to_string(&doc, &LayoutOptions::with_width(5)), "one\ntwo");
/// ```
pub fn grouped<A>(doc: Doc<A>) -> Doc<A> {
    choice(flattened(doc.clone()), doc)
}

/// Indents `doc` by `amount` spaces and aligns its later lines under the
/// indented column.
pub fn indented<A>(amount: usize, doc: Doc<A>) -> Doc<A> {
    append(white_space(amount), aligned(doc))
}

/// Hanging indentation: later lines of `doc` sit `amount` spaces to the
/// right of the column where it began.
pub fn hanging<A>(amount: usize, doc: Doc<A>) -> Doc<A> {
    aligned(nest(amount, doc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(doc: &Doc) -> String {
        format!("{doc:?}")
    }

    #[test]
    fn shorthands_expand_to_the_documented_shapes() {
        assert_eq!(show(&line_break()), "(Alternative HardLine (Text \" \"))");
        assert_eq!(show(&zero_width_line_break()), "(Alternative HardLine Empty)");
        assert_eq!(show(&line_break_hint()), "(Choice (Text \" \") HardLine)");
        assert_eq!(show(&zero_width_line_break_hint()), "(Choice Empty HardLine)");
    }

    #[test]
    fn grouped_shares_the_subject_between_branches() {
        assert_eq!(
            show(&grouped(text("hi"))),
            "(Choice (Flattened (Text \"hi\")) (Text \"hi\"))"
        );
    }

    #[test]
    fn indented_is_whitespace_then_alignment() {
        assert_eq!(
            show(&indented(2, text("x"))),
            "(Append (WhiteSpace 2) (Aligned (Text \"x\")))"
        );
        assert_eq!(show(&hanging(2, text("x"))), "(Aligned (Nested 2 (Text \"x\")))");
    }
}
