use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::OptionsError;

/// The color of a player's stones.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Plays first, rendered as `X` by the engine.
    Black,
    /// Rendered as `O` by the engine.
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// The lower-case name the engine uses in its arguments and prompts.
    pub fn as_str(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("black") {
            Ok(Color::Black)
        } else if s.eq_ignore_ascii_case("white") {
            Ok(Color::White)
        } else {
            Err(OptionsError::InvalidColor(String::from(s)))
        }
    }
}

/// The content of a single intersection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// Interprets one character of the engine's ASCII board.
    ///
    /// Anything that is not a stone (`.`, the `+` star points) is empty.
    pub fn from_render_char(c: char) -> Cell {
        match c {
            'X' => Cell::Black,
            'O' => Cell::White,
            _ => Cell::Empty,
        }
    }

    pub fn render_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Black => 'X',
            Cell::White => 'O',
        }
    }
}

/// The stones on the board at one point in time.
///
/// Row 0 is the top row of the engine's rendering, i.e. the highest rank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    size: usize,
    /// Row-major, `size * size` entries.
    cells: Vec<Cell>,
}

impl BoardSnapshot {
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Builds a snapshot from parsed rows.
    ///
    /// Returns `None` unless there are as many rows as columns in every row.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.size.max(1))
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == Cell::Empty)
    }

    /// Returns a copy with one intersection changed.
    pub fn with_cell(&self, row: usize, col: usize, cell: Cell) -> Self {
        let mut cells = self.cells.clone();
        cells[row * self.size + col] = cell;
        Self {
            size: self.size,
            cells,
        }
    }
}
