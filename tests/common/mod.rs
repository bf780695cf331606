#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::io;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use trophy_snake::geometry::{Cell, Direction};
use trophy_snake::screen::{Key, Screen, TermInt};
use trophy_snake::snake::Snake;
use trophy_snake::{Config, SnakeGame};

/// In-memory screen fed from a script of keys, one entry per poll.
#[derive(Debug, Default)]
pub struct ScriptedScreen {
    pub rows: TermInt,
    pub cols: TermInt,
    pub cells: HashMap<Cell, char>,
    pub status: String,
    pub polls: VecDeque<Option<Key>>,
    pub start_key: Option<Key>,
    pub messages: Vec<Vec<String>>,
    pub message_up: bool,
    pub shut_down: bool,
}

impl ScriptedScreen {
    pub fn new(rows: TermInt, cols: TermInt) -> Self {
        ScriptedScreen { rows, cols, ..Default::default() }
    }

    pub fn with_polls<I: IntoIterator<Item = Option<Key>>>(mut self, polls: I) -> Self {
        self.polls = polls.into_iter().collect();
        self
    }

    pub fn with_start_key(mut self, key: Key) -> Self {
        self.start_key = Some(key);
        self
    }

    pub fn glyph(&self, cell: Cell) -> char {
        self.cells.get(&cell).copied().unwrap_or(' ')
    }
}

impl Screen for ScriptedScreen {
    fn size(&self) -> (TermInt, TermInt) {
        (self.rows, self.cols)
    }

    fn draw_glyph(&mut self, cell: Cell, glyph: char) -> io::Result<()> {
        self.cells.insert(cell, glyph);
        Ok(())
    }

    fn draw_status(&mut self, _row: TermInt, text: &str) -> io::Result<()> {
        self.status = text.to_string();
        Ok(())
    }

    fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        self.messages.push(lines.iter().map(|l| l.to_string()).collect());
        self.message_up = true;
        Ok(())
    }

    fn hide_message(&mut self) -> io::Result<()> {
        self.message_up = false;
        Ok(())
    }

    fn poll_key(&mut self) -> io::Result<Option<Key>> {
        Ok(self.polls.pop_front().flatten())
    }

    fn wait_key(&mut self) -> io::Result<Key> {
        Ok(self.start_key.unwrap_or(Key::Other))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn shutdown(&mut self) -> io::Result<()> {
        self.shut_down = true;
        Ok(())
    }
}

/// No sleeping, and the snake only moves when a key forces it.
pub fn still_config() -> Config {
    Config {
        poll_interval_us: 0,
        end_pause_ms: 0,
        base_time_unit: 10_000,
        min_time_unit: 10_000,
        polls_per_trophy_tick: 10_000,
        ..Config::default()
    }
}

pub fn game(screen: ScriptedScreen, config: Config, seed: u64) -> SnakeGame<ScriptedScreen, ChaCha8Rng> {
    SnakeGame::with_rng(screen, config, ChaCha8Rng::seed_from_u64(seed)).unwrap()
}

/// A snake laid out in a line behind `head`.
pub fn straight(head: Cell, length: usize, direction: Direction) -> Snake {
    let back = -direction;
    let cells = std::iter::successors(Some(head), |c| Some(*c + back)).take(length);
    Snake::from_cells(cells, direction).unwrap()
}
