use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::Direction;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
    #[error("screen of {rows}x{cols} is too small for a playfield")]
    ScreenTooSmall { rows: u16, cols: u16 },
    #[error("no free interior cell left to place a trophy")]
    NoFreeCell,
    #[error("failed to load config from {}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;

/// A turn straight back into the snake's own neck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot reverse from {current:?} to {requested:?}")]
pub struct RejectedReversal {
    pub current: Direction,
    pub requested: Direction,
}
