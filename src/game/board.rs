use super::Piece;

/// A `(column, row)` board coordinate. Row 0 is the bottom.
pub type Position = (usize, usize);

/// The four undirected line directions, as `(d_column, d_row)` steps.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// A `width x height` grid of pieces, stored column-major.
///
/// Pieces only ever enter through [`Board::place`], which puts them at the
/// lowest empty row, so every column's occupied cells form a prefix starting
/// at row 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Piece>,
    /// Number of occupied cells in each column.
    heights: Vec<usize>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Board {
            width,
            height,
            cells: vec![Piece::Empty; width * height],
            heights: vec![0; width],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the piece at a position, or `None` if it is off the board.
    pub fn get(&self, column: usize, row: usize) -> Option<Piece> {
        if column < self.width && row < self.height {
            Some(self.cells[column * self.height + row])
        } else {
            None
        }
    }

    /// Signed lookup used by line scans; off-board cells read as `Empty`.
    fn piece_at(&self, column: isize, row: isize) -> Piece {
        if column < 0 || row < 0 {
            return Piece::Empty;
        }
        self.get(column as usize, row as usize).unwrap_or(Piece::Empty)
    }

    /// Check if a column is full. Columns off the board count as full.
    pub fn is_column_full(&self, column: usize) -> bool {
        self.drop_row(column).is_none()
    }

    /// Lowest empty row in a column, `None` if the column is full or off the board.
    pub fn drop_row(&self, column: usize) -> Option<usize> {
        let filled = *self.heights.get(column)?;
        (filled < self.height).then_some(filled)
    }

    /// Place a piece at the lowest empty row of `column` and return that row.
    /// Callers validate the column beforehand.
    pub(crate) fn place(&mut self, column: usize, piece: Piece) -> Option<usize> {
        let row = self.drop_row(column)?;
        self.cells[column * self.height + row] = piece;
        self.heights[column] += 1;
        Some(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h >= self.height)
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Piece::Empty);
        self.heights.fill(0);
    }

    /// Look for a run of at least `run_length` pieces through `(column, row)`.
    ///
    /// Every window of `run_length` cells containing the position is tried in
    /// each direction. The first window made entirely of the piece at
    /// `(column, row)` is extended outward while cells keep matching, and the
    /// whole run is returned ordered from one end to the other.
    pub fn winning_line(&self, column: usize, row: usize, run_length: usize) -> Option<Vec<Position>> {
        let piece = self.get(column, row)?;
        if !piece.is_player() || run_length == 0 {
            return None;
        }

        let (px, py) = (column as isize, row as isize);
        let n = run_length as isize;

        for (dx, dy) in DIRECTIONS {
            for offset in 0..n {
                let start = (px - offset * dx, py - offset * dy);
                let filled = (0..n).all(|i| self.piece_at(start.0 + i * dx, start.1 + i * dy) == piece);
                if filled {
                    return Some(self.extend_run(piece, start, (dx, dy), n));
                }
            }
        }

        None
    }

    /// Grow a matched window of length `n` beginning at `start` in both directions.
    fn extend_run(&self, piece: Piece, start: (isize, isize), dir: (isize, isize), n: isize) -> Vec<Position> {
        let (sx, sy) = start;
        let (dx, dy) = dir;

        let mut first = 0;
        while self.piece_at(sx + (first - 1) * dx, sy + (first - 1) * dy) == piece {
            first -= 1;
        }
        let mut last = n;
        while self.piece_at(sx + last * dx, sy + last * dy) == piece {
            last += 1;
        }

        (first..last)
            .map(|i| ((sx + i * dx) as usize, (sy + i * dy) as usize))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(7, 6)
    }
}
