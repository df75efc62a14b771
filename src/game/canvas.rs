use crate::consts;
use crate::engine::Cell;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    widgets::Widget,
};

/// Drawing surface for the level, addressed in terminal cells relative to the
/// top-left corner of `area`
#[derive(Debug, Eq, PartialEq)]
pub(super) struct Canvas<'a> {
    pub(super) area: Rect,
    pub(super) buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_char(&mut self, pos: Position, symbol: char) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.set_char(symbol);
        }
    }

    /// Draw `symbol` at the terminal cell covering grid cell `cell`.  Cells
    /// outside the canvas are skipped.
    pub(super) fn draw_cell(&mut self, cell: Cell, symbol: char, style: Style) {
        let Some(pos) = to_position(cell) else {
            return;
        };
        if let Some(c) = self.cell_mut(pos) {
            c.set_char(symbol);
            c.set_style(Style::reset().patch(style));
        }
    }

    fn cell_mut(&mut self, pos: Position) -> Option<&mut ratatui::buffer::Cell> {
        if pos.x >= self.area.width || pos.y >= self.area.height {
            return None;
        }
        let x = self.area.x.checked_add(pos.x)?;
        let y = self.area.y.checked_add(pos.y)?;
        self.buf.cell_mut((x, y))
    }
}

fn to_position(cell: Cell) -> Option<Position> {
    let x = u16::try_from(cell.x.div_euclid(consts::CELL_SIZE)).ok()?;
    let y = u16::try_from(cell.y.div_euclid(consts::CELL_SIZE)).ok()?;
    Some(Position::new(x, y))
}

/// Border drawn around levels whose edges wrap around
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let size = area.as_size();
        let max_x = size.width.saturating_sub(1);
        let max_y = size.height.saturating_sub(1);
        let mut canvas = Canvas { area, buf };
        canvas.draw_char(Position::ORIGIN, '·');
        canvas.draw_char(Position::new(max_x, 0), '·');
        canvas.draw_char(Position::new(max_x, max_y), '·');
        canvas.draw_char(Position::new(0, max_y), '·');
        for x in 1..max_x {
            canvas.draw_char(Position::new(x, 0), '⋯');
            canvas.draw_char(Position::new(x, max_y), '⋯');
        }
        for y in 1..max_y {
            canvas.draw_char(Position::new(0, y), '⋮');
            canvas.draw_char(Position::new(max_x, y), '⋮');
        }
    }
}
