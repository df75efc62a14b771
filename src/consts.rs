//! Assorted constants & hard-coded configuration
use crate::engine::Cell;
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Time between movements of the snake
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(200);

/// Time between increments of the elapsed-time counter
pub(crate) const CLOCK_PERIOD: Duration = Duration::from_millis(1000);

/// Width & height of a single grid cell, in viewport units
pub(crate) const CELL_SIZE: i32 = 50;

/// The snake's body at the start of every session, head first
pub(crate) const START_BODY: [Cell; 4] = [
    Cell::new(100, 100),
    Cell::new(150, 100),
    Cell::new(200, 100),
    Cell::new(250, 100),
];

/// Where food is placed while the grid geometry is not yet known
pub(crate) const DEFAULT_FOOD: Cell = Cell::new(100, 100);

/// Maximum number of random draws made when placing food before settling for
/// whatever was drawn last
pub(crate) const MAX_FOOD_ATTEMPTS: usize = 1000;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Maximum number of rows shown on the ranking screen
pub(crate) const RANKING_ROWS: usize = 15;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the snake's head once the game is over
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the title on the main menu
pub(crate) const TITLE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the header row of the ranking table
pub(crate) const TABLE_HEADER_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
