//! The default and smart layout interpreter
//!
//! A stack-driven interpreter with one-line lookahead: documents are
//! dispatched off a work stack, render instructions accumulate in a line
//! buffer, and every general choice leaves a restorable snapshot on the
//! stack until the line it started on is committed. Smart mode widens the
//! lookahead across aligned blocks by deferring the commit until the
//! block's indentation is released.

use std::rc::Rc;

use tracing::trace;

use crate::layout::cancel::CancelToken;
use crate::layout::constructors::basic::empty;
use crate::layout::error::LayoutError;
use crate::layout::options::LayoutOptions;
use crate::layout::render::{Renderer, RowSinkAdapter};
use crate::layout::types::block::Block;
use crate::layout::types::doc::{Doc, DocKind};
use crate::layout::types::instruction::Instruction;

#[derive(Clone, Copy)]
struct Page {
    width: usize,
    ribbon: usize,
}

enum StackItem<A> {
    Doc(Doc<A>),
    SetNestingLevel(usize),
    PopAnnotation,
    EndFlatten,
    ChoicePoint(Box<ChoicePoint<A>>),
}

impl<A> Clone for StackItem<A> {
    fn clone(&self) -> Self {
        match self {
            StackItem::Doc(doc) => StackItem::Doc(doc.clone()),
            StackItem::SetNestingLevel(level) => StackItem::SetNestingLevel(*level),
            StackItem::PopAnnotation => StackItem::PopAnnotation,
            StackItem::EndFlatten => StackItem::EndFlatten,
            StackItem::ChoicePoint(cp) => StackItem::ChoicePoint(cp.clone()),
        }
    }
}

/// Snapshot that lets the engine revert to the state at a choice and take
/// the fallback branch instead.
struct ChoicePoint<A> {
    fallback: Doc<A>,
    nesting: usize,
    indent_written: usize,
    line_buffer_len: usize,
    line_text_len: usize,
    flatten: bool,
    prior_can_backtrack: bool,
    buffer_until_deindent: Option<usize>,
    /// Stack slot holding the next pending continuation item; walks toward
    /// the bottom of the stack as the continuation is consumed.
    resume_at: isize,
}

impl<A> Clone for ChoicePoint<A> {
    fn clone(&self) -> Self {
        ChoicePoint {
            fallback: self.fallback.clone(),
            nesting: self.nesting,
            indent_written: self.indent_written,
            line_buffer_len: self.line_buffer_len,
            line_text_len: self.line_text_len,
            flatten: self.flatten,
            prior_can_backtrack: self.prior_can_backtrack,
            buffer_until_deindent: self.buffer_until_deindent,
            resume_at: self.resume_at,
        }
    }
}

pub(crate) struct Machine<'a, A, R: ?Sized> {
    renderer: &'a mut R,
    cancel: &'a CancelToken,
    page: Option<Page>,
    default_nesting: usize,
    strip_trailing: bool,
    smart: bool,

    flatten: bool,
    nesting: usize,
    indent_written: usize,
    line_text_len: usize,
    line_buffer: Vec<Instruction<A>>,
    stack: Vec<StackItem<A>>,
    can_backtrack: bool,
    buffer_until_deindent: Option<usize>,
    pool: Vec<Box<ChoicePoint<A>>>,
}

impl<'a, A: Clone, R: Renderer<A> + ?Sized> Machine<'a, A, R> {
    pub(crate) fn new(
        renderer: &'a mut R,
        options: &LayoutOptions,
        cancel: &'a CancelToken,
        smart: bool,
    ) -> Machine<'a, A, R> {
        let page = options.page_width.map(|page_width| Page {
            width: page_width.width,
            ribbon: (page_width.width as f64 * page_width.ribbon_ratio).floor() as usize,
        });
        Machine {
            renderer,
            cancel,
            page,
            default_nesting: options.default_nesting,
            strip_trailing: options.strip_trailing_whitespace,
            smart,
            flatten: false,
            nesting: 0,
            indent_written: 0,
            line_text_len: 0,
            line_buffer: Vec::new(),
            stack: Vec::new(),
            can_backtrack: false,
            buffer_until_deindent: None,
            pool: Vec::new(),
        }
    }

    pub(crate) fn run(&mut self, root: &Doc<A>) -> Result<(), LayoutError> {
        self.stack.push(StackItem::Doc(root.clone()));
        while let Some(item) = self.stack.pop() {
            if self.cancel.is_canceled() {
                return Err(LayoutError::Canceled);
            }
            match item {
                StackItem::Doc(doc) => self.dispatch(doc)?,
                StackItem::SetNestingLevel(level) => self.set_nesting(level),
                StackItem::PopAnnotation => self.line_buffer.push(Instruction::PopAnnotation),
                StackItem::EndFlatten => self.flatten = false,
                StackItem::ChoicePoint(cp) => {
                    if self.resume(cp)? {
                        break;
                    }
                }
            }
        }
        // Final flush; nothing on the stack matters any more.
        self.emit(self.strip_trailing)?;
        self.line_buffer.clear();
        Ok(())
    }

    fn dispatch(&mut self, doc: Doc<A>) -> Result<(), LayoutError> {
        match doc.kind() {
            DocKind::Empty => Ok(()),
            DocKind::HardLine => self.hard_line(),
            DocKind::WhiteSpace(amount) => {
                let amount = *amount;
                self.line_buffer.push(Instruction::WhiteSpace(amount));
                self.line_text_len += amount;
                self.overflow_check()
            }
            DocKind::Text(span) => {
                let width = doc.flat_width().unwrap_or(0);
                self.line_buffer.push(Instruction::Text(span.clone()));
                self.line_text_len += width;
                self.overflow_check()
            }
            DocKind::Block(block) => self.block(Rc::clone(block)),
            DocKind::Append(left, right) => {
                self.stack.push(StackItem::Doc(right.clone()));
                self.stack.push(StackItem::Doc(left.clone()));
                Ok(())
            }
            DocKind::Alternative { default, flattened } => {
                let taken = if self.flatten { flattened } else { default };
                self.stack.push(StackItem::Doc(taken.clone()));
                Ok(())
            }
            DocKind::Choice { first, second } => self.choose(first, second),
            DocKind::Flattened(inner) => {
                if !self.flatten {
                    self.flatten = true;
                    self.stack.push(StackItem::EndFlatten);
                }
                self.stack.push(StackItem::Doc(inner.clone()));
                Ok(())
            }
            DocKind::Nested(amount, inner) => {
                self.stack.push(StackItem::SetNestingLevel(self.nesting));
                self.nesting += amount.unwrap_or(self.default_nesting);
                self.stack.push(StackItem::Doc(inner.clone()));
                Ok(())
            }
            DocKind::Aligned(inner) => {
                if self.smart && self.can_backtrack && self.buffer_until_deindent.is_none() {
                    let column = self.indent_written + self.line_text_len;
                    if column > 0 {
                        trace!(column, "arming extended lookahead");
                        self.buffer_until_deindent = Some(column);
                    }
                }
                self.stack.push(StackItem::SetNestingLevel(self.nesting));
                self.stack.push(StackItem::Doc(inner.clone()));
                self.stack.push(StackItem::SetNestingLevel(
                    self.indent_written + self.line_text_len,
                ));
                Ok(())
            }
            DocKind::Annotated(value, inner) => {
                self.line_buffer
                    .push(Instruction::PushAnnotation(value.clone()));
                self.stack.push(StackItem::PopAnnotation);
                self.stack.push(StackItem::Doc(inner.clone()));
                Ok(())
            }
        }
    }

    /// Page fit for the current line extended by `extra` characters.
    fn fits(&self, extra: usize) -> bool {
        match self.page {
            None => true,
            Some(page) => {
                self.indent_written + self.line_text_len + extra <= page.width
                    && self.line_text_len + extra <= page.ribbon
            }
        }
    }

    fn overflow_check(&mut self) -> Result<(), LayoutError> {
        if self.can_backtrack && !self.fits(0) {
            self.backtrack()
        } else {
            Ok(())
        }
    }

    fn hard_line(&mut self) -> Result<(), LayoutError> {
        if self.flatten {
            return self.backtrack();
        }
        self.line_buffer.push(Instruction::NewLine);
        if self.buffer_until_deindent.is_none() {
            self.commit(self.strip_trailing)?;
        }
        self.line_text_len = 0;
        if self.nesting > 0 {
            self.line_buffer.push(Instruction::WhiteSpace(self.nesting));
        }
        self.indent_written = self.nesting;
        Ok(())
    }

    fn choose(&mut self, first: &Doc<A>, second: &Doc<A>) -> Result<(), LayoutError> {
        if matches!(first.kind(), DocKind::Flattened(_)) {
            // Group fast path: the branch is picked on measured width alone
            // and leaves nothing to revisit.
            let taken = if first.flat_width().is_some_and(|width| self.fits(width)) {
                first
            } else {
                second
            };
            self.stack.push(StackItem::Doc(taken.clone()));
            return Ok(());
        }
        if self.flatten && second.flat_width().is_none() {
            // Inside a flatten the fallback would begin with a mandatory
            // break it cannot render; offering it would strand a later
            // backtrack, so the choice is not revisable here.
            self.stack.push(StackItem::Doc(first.clone()));
            return Ok(());
        }
        let resume_at = self.locate(self.stack.len() as isize - 1);
        let mut cp = self.pool.pop().unwrap_or_else(|| {
            Box::new(ChoicePoint {
                fallback: empty(),
                nesting: 0,
                indent_written: 0,
                line_buffer_len: 0,
                line_text_len: 0,
                flatten: false,
                prior_can_backtrack: false,
                buffer_until_deindent: None,
                resume_at: -1,
            })
        });
        cp.fallback = second.clone();
        cp.nesting = self.nesting;
        cp.indent_written = self.indent_written;
        cp.line_buffer_len = self.line_buffer.len();
        cp.line_text_len = self.line_text_len;
        cp.flatten = self.flatten;
        cp.prior_can_backtrack = self.can_backtrack;
        cp.buffer_until_deindent = self.buffer_until_deindent;
        cp.resume_at = resume_at;
        self.stack.push(StackItem::ChoicePoint(cp));
        self.can_backtrack = true;
        self.stack.push(StackItem::Doc(first.clone()));
        Ok(())
    }

    /// Strips `index` past any chain of choice points so that nested
    /// choices share a single continuation slot.
    fn locate(&self, mut index: isize) -> isize {
        while index >= 0 {
            match &self.stack[index as usize] {
                StackItem::ChoicePoint(cp) => index = cp.resume_at,
                _ => break,
            }
        }
        index
    }

    /// A choice point has surfaced: its first branch succeeded up to here.
    /// Feed it the next pending continuation item, keeping the snapshot
    /// live underneath so the rest of the line can still revisit the
    /// choice. Returns `true` when the whole document has been consumed.
    fn resume(&mut self, mut cp: Box<ChoicePoint<A>>) -> Result<bool, LayoutError> {
        if cp.resume_at < 0 {
            return Ok(true);
        }
        let index = cp.resume_at as usize;
        let Some(item) = self.stack.get(index) else {
            return Err(LayoutError::Invariant(
                "choice point resumed past the end of the stack",
            ));
        };
        let item = item.clone();
        cp.resume_at -= 1;
        self.stack.push(StackItem::ChoicePoint(cp));
        self.stack.push(item);
        Ok(false)
    }

    fn backtrack(&mut self) -> Result<(), LayoutError> {
        while let Some(item) = self.stack.pop() {
            let StackItem::ChoicePoint(mut cp) = item else {
                continue;
            };
            trace!(
                buffered = self.line_buffer.len() - cp.line_buffer_len,
                "overflow; reverting to the fallback branch"
            );
            self.nesting = cp.nesting;
            self.indent_written = cp.indent_written;
            self.line_text_len = cp.line_text_len;
            self.flatten = cp.flatten;
            self.can_backtrack = cp.prior_can_backtrack;
            self.buffer_until_deindent = cp.buffer_until_deindent;
            self.line_buffer.truncate(cp.line_buffer_len);
            let fallback = std::mem::replace(&mut cp.fallback, empty());
            self.pool.push(cp);
            self.stack.push(StackItem::Doc(fallback));
            return Ok(());
        }
        Err(LayoutError::Invariant(
            "backtracked with no live choice point",
        ))
    }

    /// Commits the line buffer: choices that produced this line can no
    /// longer be revisited, then the buffered instructions reach the
    /// renderer.
    fn commit(&mut self, trim: bool) -> Result<(), LayoutError> {
        if self.can_backtrack {
            self.retire_choice_points();
        }
        self.emit(trim)?;
        self.line_buffer.clear();
        Ok(())
    }

    /// Neutralises every choice point on the stack along with the already
    /// consumed continuation slots it guards, returning the records to the
    /// pool with their fallback documents scrubbed.
    fn retire_choice_points(&mut self) {
        trace!("line committed; retiring choice points");
        for index in 0..self.stack.len() {
            if !matches!(self.stack[index], StackItem::ChoicePoint(_)) {
                continue;
            }
            let item = std::mem::replace(&mut self.stack[index], StackItem::Doc(empty()));
            let StackItem::ChoicePoint(mut cp) = item else {
                continue;
            };
            let low = (cp.resume_at + 1).max(0) as usize;
            for slot in low..index {
                self.stack[slot] = StackItem::Doc(empty());
            }
            cp.fallback = empty();
            self.pool.push(cp);
        }
        self.can_backtrack = false;
    }

    fn emit(&mut self, trim: bool) -> Result<(), LayoutError> {
        for index in 0..self.line_buffer.len() {
            if self.cancel.is_canceled() {
                return Err(LayoutError::Canceled);
            }
            match &self.line_buffer[index] {
                Instruction::Text(span) => self.renderer.text(span.as_str())?,
                Instruction::WhiteSpace(amount) => {
                    if *amount == 0 {
                        continue;
                    }
                    if trim && !self.text_follows(index + 1) {
                        continue;
                    }
                    self.renderer.white_space(*amount)?;
                }
                Instruction::NewLine => self.renderer.new_line()?,
                Instruction::PushAnnotation(value) => self.renderer.push_annotation(value)?,
                Instruction::PopAnnotation => self.renderer.pop_annotation()?,
            }
        }
        Ok(())
    }

    /// Whether a text run follows `from` in the buffer before the next
    /// line break. Spaces inside text runs count as text, not whitespace.
    fn text_follows(&self, from: usize) -> bool {
        for instruction in &self.line_buffer[from..] {
            match instruction {
                Instruction::Text(_) => return true,
                Instruction::NewLine => return false,
                _ => {}
            }
        }
        false
    }

    fn set_nesting(&mut self, level: usize) {
        if let Some(column) = self.buffer_until_deindent {
            if level < column {
                trace!(level, column, "left the aligned region; disarming lookahead");
                self.buffer_until_deindent = None;
            }
        }
        self.nesting = level;
    }

    fn block(&mut self, block: Rc<dyn Block>) -> Result<(), LayoutError> {
        let width = block.width();
        let height = block.height();
        if width == 0 || height == 0 {
            return Ok(());
        }
        if self.flatten && height > 1 {
            return self.backtrack();
        }
        if self.can_backtrack && !self.fits(width) {
            return self.backtrack();
        }
        let saved_nesting = self.nesting;
        self.nesting = self.indent_written + self.line_text_len;
        // The block bypasses the line buffer; trailing-whitespace stripping
        // is disabled around block flushes.
        self.commit(false)?;
        for row in 0..height {
            if self.cancel.is_canceled() {
                return Err(LayoutError::Canceled);
            }
            if row > 0 {
                self.renderer.new_line()?;
                if self.nesting > 0 {
                    self.renderer.white_space(self.nesting)?;
                }
            }
            let mut sink = RowSinkAdapter::new(&mut *self.renderer);
            block.render_row(row, &mut sink)?;
        }
        self.indent_written = self.nesting;
        self.line_text_len = width;
        self.nesting = saved_nesting;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::cancel::CancelToken;
    use crate::layout::constructors::{
        annotated, choice, empty, grouped, hard_line, line_break, line_break_hint, text,
        white_space,
    };
    use crate::layout::engine::render;
    use crate::layout::options::LayoutOptions;
    use crate::layout::render::PlainText;
    use crate::layout::types::doc::Doc;

    fn rendered(doc: &Doc, width: usize) -> String {
        let mut renderer = PlainText::new(String::new());
        render(
            doc,
            &mut renderer,
            &LayoutOptions::with_width(width),
            &CancelToken::new(),
        )
        .unwrap();
        renderer.into_inner()
    }

    #[test]
    fn an_overflow_after_a_resolved_inner_choice_revisits_the_outer_one() {
        // The outer choice has already fed its continuation through the
        // stack when "cccc" overflows; reverting must replay it.
        let doc: Doc = choice(
            text("aaaa") + choice(text("bbbb"), text("b")),
            text("a"),
        ) + text("cccc");
        assert_eq!(rendered(&doc, 6), "acccc");
        assert_eq!(rendered(&doc, 9), "aaaabcccc");
        assert_eq!(rendered(&doc, 12), "aaaabbbbcccc");
    }

    #[test]
    fn groups_resolve_on_measured_width_without_choice_points() {
        let doc: Doc = grouped(text("abc") + line_break() + text("def"));
        assert_eq!(rendered(&doc, 7), "abc def");
        assert_eq!(rendered(&doc, 5), "abc\ndef");
    }

    #[test]
    fn annotation_events_do_not_rescue_trailing_whitespace() {
        let doc: Doc = text("x") + white_space(1) + annotated((), empty()) + hard_line() + text("y");
        assert_eq!(rendered(&doc, 80), "x\ny");
    }

    #[test]
    fn a_hint_taken_as_a_break_discards_its_buffered_space() {
        let doc: Doc = text("aaaa") + line_break_hint() + text("bbbb");
        assert_eq!(rendered(&doc, 8), "aaaa\nbbbb");
        assert_eq!(rendered(&doc, 9), "aaaa bbbb");
    }
}
