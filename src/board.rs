use std::fmt;

/// Width and height of the board.
pub const SIZE: usize = 3;

type Line = [(usize, usize); SIZE];

const DIAGONALS: [Line; 2] = [[(0, 0), (1, 1), (2, 2)], [(0, 2), (1, 1), (2, 0)]];

const COLUMNS: [Line; SIZE] = [
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
];

const ROWS: [Line; SIZE] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
];

// Scanned in this order; a later group's win replaces an earlier one.
const LINE_GROUPS: [&[Line]; 3] = [&DIAGONALS, &COLUMNS, &ROWS];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn swap(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A 3x3 grid of squares in row-major order. `None` is an empty square.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Mark>; SIZE]; SIZE],
}

impl Board {
    pub fn new() -> Self {
        let squares = [[None; SIZE]; SIZE];
        Self { squares }
    }

    pub fn from_rows(squares: [[Option<Mark>; SIZE]; SIZE]) -> Self {
        Self { squares }
    }

    /// Contents of the square at `(row, col)`, or `None` when the
    /// coordinates are off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Option<Mark>> {
        self.squares.get(row)?.get(col).copied()
    }

    pub fn in_bounds(row: usize, col: usize) -> bool {
        row < SIZE && col < SIZE
    }

    pub fn is_valid_move(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// Returns a copy of the board with `mark` placed at `(row, col)`.
    ///
    /// Callers are expected to check [`Board::is_valid_move`] first; this
    /// overwrites whatever is in the square.
    pub fn mark(&self, row: usize, col: usize, mark: Mark) -> Board {
        let mut new_board = *self;
        new_board.squares[row][col] = Some(mark);
        new_board
    }

    pub fn is_full(&self) -> bool {
        self.squares.iter().flatten().all(Option::is_some)
    }

    /// Every line that can win, in scan order: diagonals, columns, rows.
    pub fn lines(&self) -> impl Iterator<Item = [Option<Mark>; SIZE]> + '_ {
        LINE_GROUPS
            .iter()
            .flat_map(|group| group.iter())
            .map(|line| line.map(|(row, col)| self.squares[row][col]))
    }

    /// Scans the whole board for a completed line.
    ///
    /// Diagonals, columns and rows are each searched for their first
    /// complete line. All three groups are always searched, and a win found
    /// in a later group replaces one found earlier, so a complete row takes
    /// precedence over a complete column or diagonal.
    pub fn get_winner(&self) -> Option<Mark> {
        LINE_GROUPS.iter().fold(None, |winner, group| {
            group
                .iter()
                .find_map(|line| self.line_winner(line))
                .or(winner)
        })
    }

    fn line_winner(&self, line: &Line) -> Option<Mark> {
        let (row, col) = line[0];
        let first = self.squares[row][col]?;
        line.iter()
            .all(|&(row, col)| self.squares[row][col] == Some(first))
            .then_some(first)
    }

    pub(crate) fn display_squares(&self) -> [[&'static str; SIZE]; SIZE] {
        self.squares
            .map(|row| row.map(|square| square.map_or("", |mark| mark.symbol())))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.display_squares().iter().enumerate() {
            if index > 0 {
                f.write_str("---+---+---\n")?;
            }
            let [a, b, c] = row.map(|s| if s.is_empty() { " " } else { s });
            writeln!(f, " {} | {} | {}", a, b, c)?;
        }
        Ok(())
    }
}
