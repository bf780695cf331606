use std::thread::sleep;
use std::time::Duration;

use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info, trace};

use crate::clock::Clock;
use crate::collision::{self, GameResult};
use crate::config::Config;
use crate::error::{GameError, Result};
use crate::geometry::{Border, Cell, Direction};
use crate::screen::{Key, Screen, TermInt};
use crate::snake::{Snake, Step};
use crate::trophy::{Trophy, TrophyManager, TrophyTick};

const SNAKE_BODY_CHAR: char = '#';
const DEAD_SNAKE_CHAR: char = 'X';
const BORDER_HORIZONTAL_CHAR: char = '-';
const BORDER_VERTICAL_CHAR: char = '|';

/// Display row left free above the border for status text.
const STATUS_ROW: TermInt = 0;

/// Smallest display that still leaves one interior cell: status row, two
/// border rows and two border columns around it.
const MIN_ROWS: TermInt = 4;
const MIN_COLS: TermInt = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingStart,
    Running,
    Ended(GameResult),
}

/// One game, from the welcome message to the final banner.
pub struct SnakeGame<S, R = ThreadRng> {
    screen: S,
    config: Config,
    border: Border,
    win_length: usize,
    snake: Snake,
    trophies: TrophyManager<R>,
    clock: Clock,
    phase: Phase,
}

impl<S: Screen> SnakeGame<S, ThreadRng> {
    pub fn new(screen: S, config: Config) -> Result<Self> {
        SnakeGame::with_rng(screen, config, rand::thread_rng())
    }
}

impl<S: Screen, R: Rng> SnakeGame<S, R> {
    pub fn with_rng(screen: S, config: Config, rng: R) -> Result<Self> {
        let (rows, cols) = screen.size();
        if rows < MIN_ROWS || cols < MIN_COLS {
            return Err(GameError::ScreenTooSmall { rows, cols });
        }

        let border = Border::from_display_size(rows, cols);
        let win_length = border.win_length();
        let mut trophies = TrophyManager::with_rng(rng);
        let direction = Direction::random(trophies.rng_mut());
        let snake = Snake::new(border.center(), config.initial_length, direction);
        let mut clock = Clock::new(config.base_time_unit, config.min_time_unit, config.polls_per_trophy_tick);
        clock.update_time_unit(snake.len());

        Ok(SnakeGame { screen, config, border, win_length, snake, trophies, clock, phase: Phase::AwaitingStart })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn border(&self) -> &Border {
        &self.border
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn trophy(&self) -> Option<&Trophy> {
        self.trophies.current()
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    /// Swaps in a different snake, e.g. to set up a position by hand.
    pub fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
        self.clock.update_time_unit(self.snake.len());
    }

    /// Puts `trophy` on the board in place of the current one.
    pub fn place_trophy(&mut self, trophy: Trophy) -> Result<()> {
        if let Some(old) = self.trophies.current().copied() {
            self.screen.clear_glyph(old.position)?;
        }
        self.trophies.place(trophy);
        self.screen.draw_glyph(trophy.position, trophy.glyph())?;
        Ok(())
    }

    /// Plays a whole game and releases the screen. The result is never
    /// `InProgress`.
    pub fn run(&mut self) -> Result<GameResult> {
        let mut result = self.start()?;
        while !result.is_terminal() {
            result = self.poll_once()?;
        }

        self.finish(result)?;
        Ok(result)
    }

    /// Shows the welcome message and waits for a key. Anything but an
    /// interrupt starts the game.
    pub fn start(&mut self) -> Result<GameResult> {
        if self.phase != Phase::AwaitingStart {
            return Ok(self.result());
        }

        let lines = &[
            "Welcome to our snake game!",
            "",
            "Arrow keys or WASD to move",
            "Never turn back on yourself",
            "CTRL+C to quit",
            "",
            "Press any key to begin",
        ];
        self.screen.show_message(lines)?;

        if self.screen.wait_key()? == Key::Interrupt {
            return Ok(self.end(GameResult::Interrupted));
        }

        self.screen.hide_message()?;
        self.phase = Phase::Running;

        info!(
            rows = self.border.rows(),
            cols = self.border.cols(),
            win_length = self.win_length,
            direction = ?self.snake.direction(),
            "game started"
        );

        self.draw_borders()?;
        self.print_snake()?;
        if let Some(trophy) = self.trophies.current().copied() {
            self.screen.draw_glyph(trophy.position, trophy.glyph())?;
        } else if let Some(result) = self.spawn_trophy()? {
            return Ok(result);
        }
        self.draw_status()?;
        self.screen.flush()?;

        Ok(GameResult::InProgress)
    }

    /// One poll cycle: sleep, read at most one key, then let the clock decide
    /// whether the trophy counts down and whether the snake moves.
    pub fn poll_once(&mut self) -> Result<GameResult> {
        if self.phase != Phase::Running {
            return Ok(self.result());
        }

        let interval = self.config.poll_interval();
        if interval > Duration::ZERO {
            sleep(interval);
        }

        let mut turned = false;
        match self.screen.poll_key()? {
            Some(Key::Interrupt) => return Ok(self.end(GameResult::Interrupted)),
            Some(Key::Turn(dir)) => {
                if let Err(rejected) = self.snake.set_direction(dir) {
                    debug!(%rejected, "reversal attempted");
                    return Ok(self.end(GameResult::LostByReversal));
                }
                turned = true;
            }
            Some(Key::Other) | None => {}
        }

        let tick = self.clock.poll(turned);

        if tick.trophy_tick {
            if let Some(result) = self.trophy_tick()? {
                return Ok(result);
            }
        }

        if tick.step {
            return self.step();
        }

        Ok(GameResult::InProgress)
    }

    /// Move, eat, then check border, self and win, in that order.
    pub fn step(&mut self) -> Result<GameResult> {
        if self.phase != Phase::Running {
            return Ok(self.result());
        }

        self.clock.update_time_unit(self.snake.len());

        let step = self.snake.advance();
        trace!(head = %step.new_head, len = self.snake.len(), "step");

        let eaten = self.trophies.consume_if_at_head(step.new_head);
        if let Some(value) = eaten {
            self.snake.grow(usize::from(value));
            self.clock.update_time_unit(self.snake.len());
        }

        self.print_snake_update(&step)?;

        let result = collision::evaluate(&self.snake, &self.border, self.win_length);
        if result.is_terminal() {
            self.screen.flush()?;
            return Ok(self.end(result));
        }

        if eaten.is_some() {
            if let Some(result) = self.spawn_trophy()? {
                return Ok(result);
            }
        }

        self.draw_status()?;
        self.screen.flush()?;
        Ok(GameResult::InProgress)
    }

    /// Shows the outcome for the configured pause, then hands the terminal back.
    pub fn finish(&mut self, result: GameResult) -> Result<()> {
        if let Some(msg) = result.message() {
            if result != GameResult::Won {
                let body: Vec<Cell> = self.snake.body().copied().collect();
                for pos in body {
                    self.screen.draw_glyph(pos, DEAD_SNAKE_CHAR)?;
                }
            }

            let length = format!("Length: {}", self.snake.len());
            self.screen.show_message(&[msg, length.as_str()])?;
            self.screen.flush()?;

            let pause = self.config.end_pause();
            if pause > Duration::ZERO {
                sleep(pause);
            }
        }

        self.screen.shutdown()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn result(&self) -> GameResult {
        match self.phase {
            Phase::Ended(result) => result,
            Phase::AwaitingStart | Phase::Running => GameResult::InProgress,
        }
    }

    fn end(&mut self, result: GameResult) -> GameResult {
        info!(?result, length = self.snake.len(), "game over");
        self.phase = Phase::Ended(result);
        result
    }

    fn trophy_tick(&mut self) -> Result<Option<GameResult>> {
        match self.trophies.tick() {
            TrophyTick::Expired(pos) => {
                self.screen.clear_glyph(pos)?;
                if let Some(result) = self.spawn_trophy()? {
                    return Ok(Some(result));
                }
            }
            TrophyTick::Alive(_) | TrophyTick::Absent => {}
        }

        self.draw_status()?;
        self.screen.flush()?;
        Ok(None)
    }

    /// Places the next trophy. A board with no free cell left counts as a win.
    fn spawn_trophy(&mut self) -> Result<Option<GameResult>> {
        match self.trophies.spawn(&self.border, &self.snake) {
            Ok(trophy) => {
                self.screen.draw_glyph(trophy.position, trophy.glyph())?;
                Ok(None)
            }
            Err(GameError::NoFreeCell) => Ok(Some(self.end(GameResult::Won))),
            Err(e) => Err(e),
        }
    }

    fn draw_borders(&mut self) -> Result<()> {
        let border = self.border;
        for cell in border.cells() {
            let ch = if cell.row == border.min_row() || cell.row == border.max_row() {
                BORDER_HORIZONTAL_CHAR
            } else {
                BORDER_VERTICAL_CHAR
            };
            self.screen.draw_glyph(cell, ch)?;
        }
        Ok(())
    }

    fn draw_status(&mut self) -> Result<()> {
        let trophy = match self.trophies.current() {
            Some(t) => format!("Trophy: {} ({}s)", t.value, t.ticks_remaining),
            None => "Trophy: -".to_string(),
        };
        let text = format!("Length: {}/{}  {}  CTRL+C to quit", self.snake.len(), self.win_length, trophy);
        self.screen.draw_status(STATUS_ROW, &text)?;
        Ok(())
    }

    fn print_snake(&mut self) -> Result<()> {
        let head = self.snake.head();
        let body: Vec<Cell> = self.snake.body().skip(1).copied().filter(|c| *c != head).collect();
        for pos in body {
            self.screen.draw_glyph(pos, SNAKE_BODY_CHAR)?;
        }
        self.screen.draw_glyph(head, self.snake.head_char())?;
        Ok(())
    }

    fn print_snake_update(&mut self, step: &Step) -> Result<()> {
        if let Some(old_tail) = step.old_tail {
            self.screen.clear_glyph(old_tail)?;
        }
        if self.snake.len() > 1 {
            self.screen.draw_glyph(step.old_head, SNAKE_BODY_CHAR)?;
        }
        self.screen.draw_glyph(step.new_head, self.snake.head_char())?;
        Ok(())
    }
}
