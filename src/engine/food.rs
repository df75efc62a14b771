use super::geometry::{Cell, Grid};
use crate::consts;
use rand::Rng;

/// Pick a cell for the next piece of food.
///
/// Cells are drawn uniformly from `grid`, and a draw is only rejected if it
/// lands exactly on `head`; the rest of the body is not excluded.  After
/// [`MAX_FOOD_ATTEMPTS`][consts::MAX_FOOD_ATTEMPTS] draws the last one is used
/// regardless.  Without a grid, [`DEFAULT_FOOD`][consts::DEFAULT_FOOD] is
/// returned.
pub(crate) fn spawn<R: Rng>(grid: Option<Grid>, head: Cell, rng: &mut R) -> Cell {
    let Some(grid) = grid else {
        return consts::DEFAULT_FOOD;
    };
    let mut cell = grid.random_cell(rng);
    for _ in 1..consts::MAX_FOOD_ATTEMPTS {
        if cell != head {
            break;
        }
        cell = grid.random_cell(rng);
    }
    cell
}
