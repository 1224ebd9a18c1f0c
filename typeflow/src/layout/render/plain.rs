use std::fmt;

use crate::layout::error::LayoutError;
use crate::layout::render::Renderer;

/// 128 spaces; small whitespace runs slice this instead of allocating.
const SPACES: &str = "                                                                                                                                ";

/// The default renderer: writes plain characters to any [`fmt::Write`]
/// sink and discards annotations.
pub struct PlainText<W> {
    sink: W,
}

impl<W> PlainText<W> {
    pub fn new(sink: W) -> PlainText<W> {
        PlainText { sink }
    }

    /// Returns the wrapped sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<A, W: fmt::Write> Renderer<A> for PlainText<W> {
    fn text(&mut self, text: &str) -> Result<(), LayoutError> {
        self.sink.write_str(text).map_err(LayoutError::renderer)
    }

    fn new_line(&mut self) -> Result<(), LayoutError> {
        self.sink.write_str("\n").map_err(LayoutError::renderer)
    }

    fn white_space(&mut self, mut amount: usize) -> Result<(), LayoutError> {
        while amount > 0 {
            let run = amount.min(SPACES.len());
            self.sink
                .write_str(&SPACES[..run])
                .map_err(LayoutError::renderer)?;
            amount -= run;
        }
        Ok(())
    }

    fn push_annotation(&mut self, _annotation: &A) -> Result<(), LayoutError> {
        Ok(())
    }

    fn pop_annotation(&mut self) -> Result<(), LayoutError> {
        Ok(())
    }
}
