//! Poll-driven game clock.
//!
//! Every input poll is one tick. Simulation steps fire every `time_unit`
//! ticks, where the unit shrinks as the snake grows. Trophy countdown runs on
//! its own fixed cadence of ticks, independent of the snake's speed.

use tracing::debug;

/// What a single poll of the clock asks the game to do, in this order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tick {
    pub trophy_tick: bool,
    pub step: bool,
}

#[derive(Debug, Clone)]
pub struct Clock {
    ticks: u32,
    time_unit: u32,
    trophy_ticks: u32,
    base_time_unit: u32,
    min_time_unit: u32,
    polls_per_trophy_tick: u32,
}

impl Clock {
    pub fn new(base_time_unit: u32, min_time_unit: u32, polls_per_trophy_tick: u32) -> Self {
        let min_time_unit = min_time_unit.max(1);
        Clock {
            ticks: 0,
            time_unit: base_time_unit.max(min_time_unit),
            trophy_ticks: 0,
            base_time_unit,
            min_time_unit,
            polls_per_trophy_tick: polls_per_trophy_tick.max(1),
        }
    }

    pub fn time_unit(&self) -> u32 {
        self.time_unit
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// `base - length`, never below the floor.
    pub fn time_unit_for(&self, snake_length: usize) -> u32 {
        let length = u32::try_from(snake_length).unwrap_or(u32::MAX);
        self.base_time_unit.saturating_sub(length).max(self.min_time_unit)
    }

    pub fn update_time_unit(&mut self, snake_length: usize) {
        let unit = self.time_unit_for(snake_length);
        if unit != self.time_unit {
            debug!(from = self.time_unit, to = unit, snake_length, "time unit changed");
            self.time_unit = unit;
        }
    }

    /// Advances one poll. `turned` is true when the poll delivered a direction
    /// key, which forces a step right away.
    pub fn poll(&mut self, turned: bool) -> Tick {
        let mut tick = Tick::default();

        self.trophy_ticks += 1;
        if self.trophy_ticks >= self.polls_per_trophy_tick {
            self.trophy_ticks = 0;
            tick.trophy_tick = true;
        }

        if turned {
            self.ticks = 0;
            tick.step = true;
        } else {
            self.ticks += 1;
            if self.ticks % self.time_unit == 0 {
                self.ticks = 0;
                tick.step = true;
            }
        }

        tick
    }
}
