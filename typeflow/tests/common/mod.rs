#![allow(dead_code)]

use typeflow::{Block, LayoutError, Renderer, RowSink};

/// One renderer operation, as observed by [`Recording`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Text(String),
    WhiteSpace(usize),
    NewLine,
    Push(i32),
    Pop,
}

/// A renderer that records the operation stream it observes.
#[derive(Default)]
pub struct Recording {
    pub events: Vec<Event>,
}

impl Renderer<i32> for Recording {
    fn text(&mut self, text: &str) -> Result<(), LayoutError> {
        self.events.push(Event::Text(text.to_owned()));
        Ok(())
    }

    fn new_line(&mut self) -> Result<(), LayoutError> {
        self.events.push(Event::NewLine);
        Ok(())
    }

    fn white_space(&mut self, amount: usize) -> Result<(), LayoutError> {
        self.events.push(Event::WhiteSpace(amount));
        Ok(())
    }

    fn push_annotation(&mut self, annotation: &i32) -> Result<(), LayoutError> {
        self.events.push(Event::Push(*annotation));
        Ok(())
    }

    fn pop_annotation(&mut self) -> Result<(), LayoutError> {
        self.events.push(Event::Pop);
        Ok(())
    }
}

/// A rectangular block of pre-rendered rows.
pub struct Grid {
    pub rows: Vec<&'static str>,
}

impl Block for Grid {
    fn width(&self) -> usize {
        self.rows.iter().map(|row| row.chars().count()).max().unwrap_or(0)
    }

    fn height(&self) -> usize {
        self.rows.len()
    }

    fn render_row(&self, row: usize, sink: &mut dyn RowSink) -> Result<(), LayoutError> {
        sink.text(self.rows[row])
    }
}
