//! Mapping of taps & key presses onto snake directions
use crate::engine::{Cell, Direction, Viewport};
use serde::Deserialize;

/// How player input is turned into a new direction for the snake
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum InputMapping {
    /// The snake can only turn 90 degrees.  While it moves vertically, a tap
    /// on the left or right half of the screen turns it left or right; while
    /// it moves horizontally, a tap on the top or bottom half turns it up or
    /// down.  Requests to keep going along the current axis are ignored.
    #[default]
    Turn,

    /// The screen is split into four triangles by its diagonals, and a tap in
    /// one of them points the snake in that direction, reversals included.
    Quadrant,
}

impl InputMapping {
    /// Returns true if the snake may switch from `current` to `requested`
    pub(crate) fn permits(self, current: Direction, requested: Direction) -> bool {
        match self {
            InputMapping::Turn => current.is_vertical() != requested.is_vertical(),
            InputMapping::Quadrant => true,
        }
    }

    /// Work out the direction requested by a tap at `tap` on a surface of size
    /// `area` while the snake is heading in `current`
    pub(crate) fn resolve_tap(self, current: Direction, tap: Cell, area: Viewport) -> Direction {
        // Doubling the tap coordinates compares them against the center
        // without rounding.
        let dx = i64::from(tap.x) * 2 - i64::from(area.width);
        let dy = i64::from(tap.y) * 2 - i64::from(area.height);
        match self {
            InputMapping::Turn if current.is_vertical() => {
                if dx < 0 {
                    Direction::Left
                } else {
                    Direction::Right
                }
            }
            InputMapping::Turn => {
                if dy < 0 {
                    Direction::Up
                } else {
                    Direction::Down
                }
            }
            InputMapping::Quadrant => {
                let horizontal =
                    i128::from(dx.abs()) * i128::from(area.height)
                        >= i128::from(dy.abs()) * i128::from(area.width);
                match (horizontal, dx < 0, dy < 0) {
                    (true, true, _) => Direction::Left,
                    (true, false, _) => Direction::Right,
                    (false, _, true) => Direction::Up,
                    (false, _, false) => Direction::Down,
                }
            }
        }
    }
}
