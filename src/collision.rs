use crate::geometry::Border;
use crate::snake::Snake;

/// Every run ends with status 1, win or lose.
pub const EXIT_STATUS: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    LostByBorder,
    LostBySelfCollision,
    LostByReversal,
    Won,
    /// Player asked to quit mid-game.
    Interrupted,
}

impl GameResult {
    pub fn is_terminal(self) -> bool {
        self != GameResult::InProgress
    }

    pub fn exit_code(self) -> i32 {
        EXIT_STATUS
    }

    /// End-of-game banner, if the outcome gets one.
    pub fn message(self) -> Option<&'static str> {
        match self {
            GameResult::InProgress | GameResult::Interrupted => None,
            GameResult::LostByBorder => Some("You hit the wall!"),
            GameResult::LostBySelfCollision => Some("You ran into yourself!"),
            GameResult::LostByReversal => Some("You can't turn back on yourself!"),
            GameResult::Won => Some("You won!"),
        }
    }
}

/// Post-move checks, in order: border, self, win.
pub fn evaluate(snake: &Snake, border: &Border, win_length: usize) -> GameResult {
    let head = snake.head();

    if border.is_border(head) {
        GameResult::LostByBorder
    } else if snake.occupies_excluding_head(head) {
        GameResult::LostBySelfCollision
    } else if snake.len() >= win_length {
        GameResult::Won
    } else {
        GameResult::InProgress
    }
}
