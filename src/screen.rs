//! What the engine needs from a terminal: cells to draw on and keys to read.

use crate::geometry::{Cell, Direction};

pub type TermInt = u16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Turn(Direction),
    /// Ctrl+C; ends the run without the end-of-game pause.
    Interrupt,
    Other,
}

pub trait Screen {
    /// `(rows, cols)` of the whole display.
    fn size(&self) -> (TermInt, TermInt);

    fn draw_glyph(&mut self, cell: Cell, glyph: char) -> std::io::Result<()>;

    fn clear_glyph(&mut self, cell: Cell) -> std::io::Result<()> {
        self.draw_glyph(cell, ' ')
    }

    /// Overwrites display row `row` with `text`, padding out the rest.
    fn draw_status(&mut self, row: TermInt, text: &str) -> std::io::Result<()>;

    /// Centered multi-line message box.
    fn show_message(&mut self, lines: &[&str]) -> std::io::Result<()>;

    fn hide_message(&mut self) -> std::io::Result<()>;

    /// Non-blocking: `None` if nothing is buffered.
    fn poll_key(&mut self) -> std::io::Result<Option<Key>>;

    fn wait_key(&mut self) -> std::io::Result<Key>;

    fn flush(&mut self) -> std::io::Result<()>;

    /// Gives the terminal back to the shell.
    fn shutdown(&mut self) -> std::io::Result<()>;
}
