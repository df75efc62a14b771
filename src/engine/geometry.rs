use crate::consts::CELL_SIZE;
use rand::Rng;

/// A position in viewport units.  Cells produced by the engine always have
/// coordinates that are multiples of [`CELL_SIZE`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Cell {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Cell {
    pub(crate) const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    /// Returns true if `other` lies within one cell's width of `self` on both
    /// axes
    pub(crate) fn touches(self, other: Cell) -> bool {
        self.x.abs_diff(other.x) < CELL_SIZE.unsigned_abs()
            && self.y.abs_diff(other.y) < CELL_SIZE.unsigned_abs()
    }
}

/// The size of the drawable surface, in viewport units
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Viewport {
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl Viewport {
    pub(crate) const fn new(width: u32, height: u32) -> Viewport {
        Viewport { width, height }
    }
}

/// The discrete grid of cells covering a viewport.  A `Grid` always has at
/// least one column and one row.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    cols: i32,
    rows: i32,
}

impl Grid {
    /// Divide `viewport` into whole cells.  Returns `None` if the viewport is
    /// too small to hold a single cell, in which case the geometry is not
    /// ready yet.
    pub(crate) fn from_viewport(viewport: Viewport) -> Option<Grid> {
        let width = i32::try_from(viewport.width).unwrap_or(i32::MAX);
        let height = i32::try_from(viewport.height).unwrap_or(i32::MAX);
        let cols = width / CELL_SIZE;
        let rows = height / CELL_SIZE;
        (cols > 0 && rows > 0).then_some(Grid { cols, rows })
    }

    pub(crate) fn cols(self) -> i32 {
        self.cols
    }

    pub(crate) fn rows(self) -> i32 {
        self.rows
    }

    /// Width of the grid in viewport units
    pub(crate) fn width(self) -> i32 {
        self.cols * CELL_SIZE
    }

    /// Height of the grid in viewport units
    pub(crate) fn height(self) -> i32 {
        self.rows * CELL_SIZE
    }

    /// Returns true if `cell` lies inside the grid
    pub(crate) fn contains(self, cell: Cell) -> bool {
        (0..self.width()).contains(&cell.x) && (0..self.height()).contains(&cell.y)
    }

    /// Draw a cell uniformly at random from the grid
    pub(crate) fn random_cell<R: Rng>(self, rng: &mut R) -> Cell {
        Cell {
            x: rng.random_range(0..self.cols) * CELL_SIZE,
            y: rng.random_range(0..self.rows) * CELL_SIZE,
        }
    }
}
