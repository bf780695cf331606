use std::collections::VecDeque;

use crate::error::RejectedReversal;
use crate::geometry::{Cell, Direction::{self, *}};

/// What one call to [`Snake::advance`] changed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub new_head: Cell,
    pub old_head: Cell,
    /// The cell the tail left, if no other segment still covers it.
    pub old_tail: Option<Cell>,
}

/// Head-to-tail sequence of occupied cells. The front of the deque is the head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
}

impl Snake {
    /// A single segment at `center` grown to `length`. The grown segments all
    /// sit on the center cell and unfold as the snake moves.
    pub fn new(center: Cell, length: usize, direction: Direction) -> Self {
        let mut snake = Snake { body: VecDeque::from(vec![center]), direction };
        snake.grow(length.saturating_sub(1));
        snake
    }

    /// Builds a snake from explicit cells, head first. `None` when `cells` is empty.
    pub fn from_cells<I>(cells: I, direction: Direction) -> Option<Self>
    where
        I: IntoIterator<Item = Cell>,
    {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Snake { body, direction })
    }

    pub fn body(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Appends `n` segments on top of the current tail.
    pub fn grow(&mut self, n: usize) {
        let tail = self.tail();
        self.body.extend(std::iter::repeat(tail).take(n));
    }

    /// Moves the head one cell along the current direction; every other
    /// segment takes the place its head-ward neighbour held before the step.
    pub fn advance(&mut self) -> Step {
        let old_head = self.head();
        let new_head = old_head + self.direction;

        self.body.push_front(new_head);
        let old_tail = self.body.pop_back().filter(|vacated| !self.body.contains(vacated));

        Step { new_head, old_head, old_tail }
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn occupies_excluding_head(&self, cell: Cell) -> bool {
        self.body.iter().skip(1).any(|seg| *seg == cell)
    }

    pub fn set_direction(&mut self, requested: Direction) -> Result<(), RejectedReversal> {
        if requested == -self.direction {
            return Err(RejectedReversal { current: self.direction, requested });
        }

        self.direction = requested;
        Ok(())
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn straight(head: Cell, length: usize, direction: Direction) -> Snake {
        let back = -direction;
        let cells = std::iter::successors(Some(head), |c| Some(*c + back)).take(length);
        Snake::from_cells(cells, direction).unwrap()
    }

    #[test]
    fn new_snake_is_stacked_on_center() {
        let snake = Snake::new(Cell::new(10, 10), 5, Right);
        assert_eq!(snake.len(), 5);
        assert!(snake.body().all(|c| *c == Cell::new(10, 10)));
    }

    #[test]
    fn stacked_snake_unfolds_over_moves() {
        let mut snake = Snake::new(Cell::new(10, 10), 5, Right);

        for _ in 0..3 {
            assert_eq!(snake.advance().old_tail, None);
        }
        let step = snake.advance();
        assert_eq!(step.old_tail, None);
        assert_eq!(snake.tail(), Cell::new(10, 10));

        let step = snake.advance();
        assert_eq!(step.old_tail, Some(Cell::new(10, 10)));
        let cells: Vec<Cell> = snake.body().copied().collect();
        assert_eq!(cells, (11..=15).rev().map(|col| Cell::new(10, col)).collect::<Vec<_>>());
    }

    #[test]
    fn advance_moves_head_and_frees_tail() {
        let mut snake = straight(Cell::new(10, 10), 5, Right);
        let old_tail = snake.tail();
        assert_eq!(old_tail, Cell::new(10, 6));

        let step = snake.advance();

        assert_eq!(step.old_head, Cell::new(10, 10));
        assert_eq!(step.new_head, Cell::new(10, 11));
        assert_eq!(snake.head(), Cell::new(10, 11));
        assert_eq!(step.old_tail, Some(old_tail));
        assert!(!snake.occupies(old_tail));
        assert_eq!(snake.len(), 5);
    }

    #[test]
    fn grown_segments_hide_under_tail_until_next_move() {
        let mut snake = straight(Cell::new(5, 5), 3, Down);
        let tail = snake.tail();

        snake.grow(2);
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.body().filter(|c| **c == tail).count(), 3);

        let step = snake.advance();
        assert_eq!(step.old_tail, None);
        assert!(snake.occupies(tail));
    }

    #[test]
    fn grow_zero_is_noop() {
        let mut snake = straight(Cell::new(5, 5), 3, Down);
        let before = snake.clone();
        snake.grow(0);
        assert_eq!(snake, before);
    }

    #[test]
    fn head_can_follow_its_tail() {
        // 2x2 loop: head at (2,1) going up into the cell the tail leaves
        let mut snake = Snake::from_cells(
            [Cell::new(2, 1), Cell::new(2, 2), Cell::new(1, 2), Cell::new(1, 1)],
            Up,
        )
        .unwrap();

        let step = snake.advance();
        assert_eq!(step.new_head, Cell::new(1, 1));
        assert_eq!(step.old_tail, None);
        assert!(!snake.occupies_excluding_head(snake.head()));
    }

    #[test]
    fn occupies_excluding_head_skips_head() {
        let snake = straight(Cell::new(3, 3), 3, Left);
        assert!(!snake.occupies_excluding_head(Cell::new(3, 3)));
        assert!(snake.occupies_excluding_head(Cell::new(3, 4)));
        assert!(snake.occupies(Cell::new(3, 3)));
    }

    #[test]
    fn reversal_leaves_direction_untouched() {
        let mut snake = straight(Cell::new(3, 3), 3, Right);
        let err = snake.set_direction(Left).unwrap_err();
        assert_eq!(err, RejectedReversal { current: Right, requested: Left });
        assert_eq!(snake.direction(), Right);
    }

    fn any_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(Up), Just(Down), Just(Left), Just(Right)]
    }

    proptest! {
        #[test]
        fn set_direction_rejects_only_the_opposite(
            current in any_direction(),
            requested in any_direction(),
        ) {
            let mut snake = Snake::new(Cell::new(10, 10), 5, current);
            let res = snake.set_direction(requested);
            if requested == current.opposite() {
                prop_assert!(res.is_err());
                prop_assert_eq!(snake.direction(), current);
            } else {
                prop_assert!(res.is_ok());
                prop_assert_eq!(snake.direction(), requested);
            }
        }

        #[test]
        fn grow_adds_exactly_n(n in 0usize..50) {
            let mut snake = straight(Cell::new(10, 10), 4, Down);
            let tail = snake.tail();
            snake.grow(n);
            prop_assert_eq!(snake.len(), 4 + n);
            prop_assert!(snake.body().skip(4).all(|c| *c == tail));
        }

        #[test]
        fn advance_shifts_every_segment(
            length in 2usize..12,
            turns in proptest::collection::vec(any_direction(), 1..20),
        ) {
            let mut snake = straight(Cell::new(50, 50), length, Right);
            for dir in turns {
                let _ = snake.set_direction(dir);
                let before: Vec<Cell> = snake.body().copied().collect();

                let step = snake.advance();
                let after: Vec<Cell> = snake.body().copied().collect();

                prop_assert_eq!(after.len(), before.len());
                prop_assert_eq!(after[0], before[0] + snake.direction());
                prop_assert_eq!(&after[1..], &before[..before.len() - 1]);
                if let Some(vacated) = step.old_tail {
                    prop_assert_eq!(vacated, before[before.len() - 1]);
                    prop_assert!(!after.contains(&vacated));
                }
            }
        }
    }
}
