use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Widget,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    const TITLE: &'static str = "G R I D   S N A K E";
    const SNAKE_BODY_LENGTH: u16 = 8;
    const SNAKE_FOOD_GUTTER: u16 = 2;
    pub(super) const HEIGHT: u16 = 3;
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [title_area, diagram_area] = Layout::vertical([1, 1])
            .flex(Flex::Start)
            .spacing(1)
            .areas(area);
        Line::from(Span::styled(Self::TITLE, consts::TITLE_STYLE))
            .centered()
            .render(title_area, buf);
        let [body_area, head_area, _, food_area] = Layout::horizontal([
            Constraint::Length(Self::SNAKE_BODY_LENGTH),
            Constraint::Length(1),
            Constraint::Length(Self::SNAKE_FOOD_GUTTER),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(diagram_area);
        for p in body_area.positions() {
            if let Some(cell) = buf.cell_mut(p) {
                cell.set_char(consts::SNAKE_BODY_SYMBOL);
                cell.set_style(consts::SNAKE_STYLE);
            }
        }
        for p in head_area.positions() {
            if let Some(cell) = buf.cell_mut(p) {
                cell.set_char(consts::SNAKE_HEAD_RIGHT_SYMBOL);
                cell.set_style(consts::SNAKE_STYLE);
            }
        }
        for p in food_area.positions() {
            if let Some(cell) = buf.cell_mut(p) {
                cell.set_char(consts::FOOD_SYMBOL);
                cell.set_style(consts::FOOD_STYLE);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 7;
    pub(super) const WIDTH: u16 = 21;

    fn keys(prefix: &'static str, keys: [&'static str; 4]) -> Line<'static> {
        let mut spans = vec![Span::raw(prefix)];
        for (i, k) in keys.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(k, consts::KEY_STYLE));
        }
        Line::from(spans)
    }
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter([
            Line::from("Steer the snake with:"),
            Instructions::keys("        ", ["←", "↓", "↑", "→"]),
            Instructions::keys("    or: ", ["h", "j", "k", "l"]),
            Instructions::keys("    or: ", ["a", "s", "w", "d"]),
            Instructions::keys("    or: ", ["4", "2", "8", "6"]),
            Line::from("or click the board."),
            Line::from("Eat food to grow!"),
        ]);
        debug_assert_eq!(
            text.height(),
            usize::from(Self::HEIGHT),
            "Instructions::HEIGHT is wrong"
        );
        debug_assert_eq!(
            text.width(),
            usize::from(Self::WIDTH),
            "Instructions::WIDTH is wrong"
        );
        text.render(area, buf);
    }
}
