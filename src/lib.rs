//! Terminal Snake with an expiring trophy.
//!
//! The engine here is display-agnostic: [`game::SnakeGame`] drives a
//! [`screen::Screen`] implementation one input poll at a time.

pub mod clock;
pub mod collision;
pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod screen;
pub mod snake;
pub mod trophy;

pub use collision::GameResult;
pub use config::Config;
pub use error::{GameError, Result};
pub use game::SnakeGame;
