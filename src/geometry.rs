use std::fmt;
use std::ops::{Add, Neg};

use rand::Rng;

use Direction::*;

pub type Coord = i32;

/// One playfield position, addressed as `(row, col)` like the terminal does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: Coord,
    pub col: Coord,
}

impl Cell {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Cell { row, col }
    }
}

impl Add<Direction> for Cell {
    type Output = Cell;

    fn add(self, dir: Direction) -> Cell {
        let (dy, dx) = dir.delta();
        Cell::new(self.row + dy, self.col + dx)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    /// `(dy, dx)` step for this direction.
    pub fn delta(self) -> (Coord, Coord) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Direction {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Direction {
        self.opposite()
    }
}

/// Fixed rectangle of border cells. Everything strictly inside it is playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    min_row: Coord,
    max_row: Coord,
    min_col: Coord,
    max_col: Coord,
}

impl Border {
    pub fn new(min_row: Coord, max_row: Coord, min_col: Coord, max_col: Coord) -> Self {
        Border { min_row, max_row, min_col, max_col }
    }

    /// Lays the border out over a `rows` x `cols` display. Row 0 is kept for
    /// the status line, so the top border sits on row 1.
    pub fn from_display_size(rows: u16, cols: u16) -> Self {
        let rows = Coord::from(rows);
        let cols = Coord::from(cols);
        Border::new(1, rows - 1, 0, cols - 1)
    }

    pub fn min_row(&self) -> Coord {
        self.min_row
    }

    pub fn max_row(&self) -> Coord {
        self.max_row
    }

    pub fn min_col(&self) -> Coord {
        self.min_col
    }

    pub fn max_col(&self) -> Coord {
        self.max_col
    }

    /// Number of rows spanned, border rows included.
    pub fn rows(&self) -> Coord {
        self.max_row - self.min_row + 1
    }

    /// Number of columns spanned, border columns included.
    pub fn cols(&self) -> Coord {
        self.max_col - self.min_col + 1
    }

    /// Snake length needed to win: half the perimeter.
    pub fn win_length(&self) -> usize {
        (self.rows() + self.cols()).max(0) as usize
    }

    pub fn is_border(&self, cell: Cell) -> bool {
        cell.row == self.min_row
            || cell.row == self.max_row
            || cell.col == self.min_col
            || cell.col == self.max_col
    }

    /// True for cells strictly inside the border.
    pub fn is_interior(&self, cell: Cell) -> bool {
        cell.row > self.min_row && cell.row < self.max_row && cell.col > self.min_col && cell.col < self.max_col
    }

    pub fn interior_area(&self) -> usize {
        let h = (self.rows() - 2).max(0) as usize;
        let w = (self.cols() - 2).max(0) as usize;
        h * w
    }

    pub fn center(&self) -> Cell {
        Cell::new((self.min_row + self.max_row + 1) / 2, (self.min_col + self.max_col + 1) / 2)
    }

    /// Uniform pick over the interior. Callers must make sure the interior is non-empty.
    pub fn random_interior_cell<R: Rng>(&self, rng: &mut R) -> Cell {
        let row = rng.gen_range(self.min_row + 1..self.max_row);
        let col = rng.gen_range(self.min_col + 1..self.max_col);
        Cell::new(row, col)
    }

    /// Every border cell, for drawing.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let horizontal = (self.min_col..=self.max_col)
            .flat_map(move |col| [Cell::new(self.min_row, col), Cell::new(self.max_row, col)]);
        let vertical = (self.min_row + 1..self.max_row)
            .flat_map(move |row| [Cell::new(row, self.min_col), Cell::new(row, self.max_col)]);
        horizontal.chain(vertical)
    }
}
