//! Postfix wrappers
//!
//! Method and operator forms of the free constructors, for building
//! documents in pipeline style: `(text("a") + line_break() + text("b")).nested(2)`.

use std::ops::Add;

use crate::layout::constructors::control;
use crate::layout::constructors::joining;
use crate::layout::types::doc::Doc;

impl<A> Doc<A> {
    /// Postfix [`append`](crate::append).
    pub fn append(self, other: Doc<A>) -> Doc<A> {
        joining::append(self, other)
    }

    /// Postfix [`nest`](crate::nest).
    pub fn nested(self, amount: usize) -> Doc<A> {
        control::nest(amount, self)
    }

    /// Postfix [`nest_default`](crate::nest_default).
    pub fn nested_default(self) -> Doc<A> {
        control::nest_default(self)
    }

    /// Postfix [`aligned`](crate::aligned).
    pub fn aligned(self) -> Doc<A> {
        control::aligned(self)
    }

    /// Postfix [`flattened`](crate::flattened).
    pub fn flattened(self) -> Doc<A> {
        control::flattened(self)
    }

    /// Postfix [`grouped`](crate::grouped).
    pub fn grouped(self) -> Doc<A> {
        control::grouped(self)
    }

    /// Postfix [`annotated`](crate::annotated).
    pub fn annotated(self, value: A) -> Doc<A> {
        control::annotated(value, self)
    }

    /// Postfix [`indented`](crate::indented).
    pub fn indented(self, amount: usize) -> Doc<A> {
        control::indented(amount, self)
    }

    /// Postfix [`hanging`](crate::hanging).
    pub fn hanging(self, amount: usize) -> Doc<A> {
        control::hanging(amount, self)
    }
}

impl<A> Add for Doc<A> {
    type Output = Doc<A>;

    fn add(self, rhs: Doc<A>) -> Doc<A> {
        joining::append(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::constructors::basic::text;
    use crate::layout::constructors::control::line_break;
    use crate::layout::types::doc::Doc;

    #[test]
    fn operator_and_method_forms_match_the_free_functions() {
        let via_ops: Doc = (text("a") + line_break() + text("b")).nested(2);
        assert_eq!(
            format!("{via_ops:?}"),
            "(Nested 2 (Append (Append (Text \"a\") (Alternative HardLine (Text \" \"))) \
             (Text \"b\")))"
        );
    }
}
