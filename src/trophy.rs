//! The single food item on the board and its countdown.

use std::collections::HashSet;

use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::debug;

use crate::error::{GameError, Result};
use crate::geometry::{Border, Cell};
use crate::snake::Snake;

/// Values and lifetimes are both drawn from `1..=MAX_TROPHY_ROLL`.
pub const MAX_TROPHY_ROLL: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trophy {
    pub position: Cell,
    /// Segments gained when eaten.
    pub value: u8,
    /// Real-time seconds left before it disappears.
    pub ticks_remaining: u8,
}

impl Trophy {
    pub fn glyph(&self) -> char {
        char::from_digit(u32::from(self.value), 10).unwrap_or('*')
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrophyTick {
    /// Still on the board with this many ticks left.
    Alive(u8),
    /// Ran out at this cell; a new one must be spawned.
    Expired(Cell),
    /// Nothing on the board to count down.
    Absent,
}

/// Owns the live trophy, if any, and the randomness used to place the next one.
#[derive(Debug)]
pub struct TrophyManager<R = ThreadRng> {
    rng: R,
    current: Option<Trophy>,
}

impl<R: Rng> TrophyManager<R> {
    pub fn with_rng(rng: R) -> Self {
        TrophyManager { rng, current: None }
    }

    pub fn current(&self) -> Option<&Trophy> {
        self.current.as_ref()
    }

    /// Replaces whatever is on the board with `trophy`.
    pub fn place(&mut self, trophy: Trophy) {
        self.current = Some(trophy);
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Places a fresh trophy on a free interior cell, avoiding the cell the
    /// previous one occupied whenever another free cell exists.
    pub fn spawn(&mut self, border: &Border, snake: &Snake) -> Result<Trophy> {
        let previous = self.current.take().map(|t| t.position);
        let trophy = spawn(&mut self.rng, border, snake, previous)?;
        debug!(position = %trophy.position, value = trophy.value, ttl = trophy.ticks_remaining, "trophy spawned");
        self.current = Some(trophy);
        Ok(trophy)
    }

    /// Counts down one real-time second.
    pub fn tick(&mut self) -> TrophyTick {
        let Some(trophy) = self.current.as_mut() else {
            return TrophyTick::Absent;
        };

        trophy.ticks_remaining = trophy.ticks_remaining.saturating_sub(1);
        if trophy.ticks_remaining > 0 {
            return TrophyTick::Alive(trophy.ticks_remaining);
        }

        let position = trophy.position;
        // Keep the position around so the respawn can avoid it
        debug!(%position, "trophy expired");
        TrophyTick::Expired(position)
    }

    /// Eats the trophy if it sits under `head`, returning its value.
    pub fn consume_if_at_head(&mut self, head: Cell) -> Option<u8> {
        match self.current {
            Some(trophy) if trophy.position == head && trophy.ticks_remaining > 0 => {
                self.current = None;
                debug!(position = %head, value = trophy.value, "trophy consumed");
                Some(trophy.value)
            }
            _ => None,
        }
    }
}

/// Rejection-samples a trophy position inside `border` that is not on the
/// snake (and not on `avoid` unless that is the only free cell).
pub fn spawn<R: Rng>(rng: &mut R, border: &Border, snake: &Snake, avoid: Option<Cell>) -> Result<Trophy> {
    let covered: HashSet<Cell> = snake.body().copied().filter(|c| border.is_interior(*c)).collect();
    let free = border.interior_area().saturating_sub(covered.len());
    if free == 0 {
        return Err(GameError::NoFreeCell);
    }

    let avoid = avoid.filter(|cell| free > 1 && border.is_interior(*cell) && !covered.contains(cell));

    let position = loop {
        let cell = border.random_interior_cell(rng);
        if border.is_border(cell) || covered.contains(&cell) || Some(cell) == avoid {
            continue;
        }
        break cell;
    };

    Ok(Trophy {
        position,
        value: rng.gen_range(1..=MAX_TROPHY_ROLL),
        ticks_remaining: rng.gen_range(1..=MAX_TROPHY_ROLL),
    })
}
