//! The bead grid: one cell per resampled pixel.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use super::Colour;

/// A single bead position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Background; no bead is placed here.
    #[default]
    Transparent,
    /// A bead of a palette colour.
    Bead(Colour),
}

impl Cell {
    pub fn colour(self) -> Option<Colour> {
        match self {
            Cell::Transparent => None,
            Cell::Bead(c) => Some(c),
        }
    }

    pub fn is_transparent(self) -> bool {
        matches!(self, Cell::Transparent)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.colour().serialize(serializer)
    }
}

/// Number of cells holding each colour. Transparent cells are not counted.
pub type ColourCounts = BTreeMap<Colour, usize>;

/// A `rows x cols` grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl ColorGrid {
    /// A grid with every cell transparent.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Transparent; rows * cols],
        }
    }

    /// Build a grid from nested rows. Rows shorter than the first are padded
    /// with transparent cells; longer rows are truncated.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let cols = rows.first().map_or(0, |r| r.len());
        let mut grid = Self::new(rows.len(), cols);
        for (y, row) in rows.into_iter().enumerate() {
            for (x, cell) in row.into_iter().take(cols).enumerate() {
                grid.cells[y * cols + x] = cell;
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get a cell; `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Set a cell. Out-of-range coordinates are ignored and return `false`.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks(0) panics; an empty grid has no rows anyway
        self.cells.chunks(self.cols.max(1)).take(self.rows)
    }

    /// Iterate `(row, col, cell)` in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i / cols, i % cols, cell))
    }

    /// Count beads per colour, recomputed from scratch.
    pub fn colour_counts(&self) -> ColourCounts {
        let mut counts = ColourCounts::new();
        for colour in self.cells.iter().filter_map(|c| c.colour()) {
            *counts.entry(colour).or_insert(0) += 1;
        }
        counts
    }

    /// Total number of non-transparent cells.
    pub fn bead_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_transparent()).count()
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }
}

impl Serialize for ColorGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter_rows())
    }
}

/// Text dump: one line per row, cells separated by spaces, `.` for
/// transparent cells.
impl fmt::Display for ColorGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            let line: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Cell::Transparent => ".".to_string(),
                    Cell::Bead(c) => c.to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Colour = Colour::rgb(255, 0, 0);
    const BLUE: Colour = Colour::rgb(0, 0, 255);

    #[test]
    fn test_new_is_transparent() {
        let grid = ColorGrid::new(2, 3);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert!(grid.cells().iter().all(|c| c.is_transparent()));
        assert!(grid.colour_counts().is_empty());
    }

    #[test]
    fn test_set_out_of_bounds_is_ignored() {
        let mut grid = ColorGrid::new(2, 2);
        assert!(!grid.set(2, 0, Cell::Bead(RED)));
        assert!(!grid.set(0, 2, Cell::Bead(RED)));
        assert_eq!(grid, ColorGrid::new(2, 2));
        assert!(grid.set(1, 1, Cell::Bead(RED)));
        assert_eq!(grid.get(1, 1), Some(Cell::Bead(RED)));
        assert_eq!(grid.get(5, 5), None);
    }

    #[test]
    fn test_colour_counts() {
        let grid = ColorGrid::from_rows(vec![
            vec![Cell::Bead(RED), Cell::Bead(BLUE)],
            vec![Cell::Bead(RED), Cell::Transparent],
        ]);
        let counts = grid.colour_counts();
        assert_eq!(counts.get(&RED), Some(&2));
        assert_eq!(counts.get(&BLUE), Some(&1));
        assert_eq!(counts.len(), 2);
        assert_eq!(grid.bead_count(), 3);
    }

    #[test]
    fn test_from_rows_pads_ragged_rows() {
        let grid = ColorGrid::from_rows(vec![
            vec![Cell::Bead(RED), Cell::Bead(RED)],
            vec![Cell::Bead(BLUE)],
        ]);
        assert_eq!(grid.get(1, 1), Some(Cell::Transparent));
    }

    #[test]
    fn test_display() {
        let grid = ColorGrid::from_rows(vec![vec![Cell::Bead(RED), Cell::Transparent]]);
        assert_eq!(grid.to_string(), "#FF0000 .\n");
    }

    #[test]
    fn test_serialize() {
        let grid = ColorGrid::from_rows(vec![vec![Cell::Bead(BLUE), Cell::Transparent]]);
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r##"[["#0000FF",null]]"##);

        let counts = serde_json::to_string(&grid.colour_counts()).unwrap();
        assert_eq!(counts, r##"{"#0000FF":1}"##);
    }

    #[test]
    fn test_iter_cells_row_major() {
        let grid = ColorGrid::new(2, 2);
        let coords: Vec<_> = grid.iter_cells().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(coords, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }
}
