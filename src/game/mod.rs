mod canvas;
use self::canvas::{Canvas, DottedBorder};
use crate::app::Screen;
use crate::command::Command;
use crate::config::Config;
use crate::consts;
use crate::engine::{Cell, Direction, Phase, Snapshot, TickEngine, Viewport, Walls};
use crate::menu::MainMenu;
use crate::util::{get_display_area, Globals};
use crossterm::event::{poll, read, Event, MouseButton, MouseEvent, MouseEventKind};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::time::Instant;

/// The screen on which a session is played
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameScreen<R = rand::rngs::ThreadRng> {
    engine: TickEngine<R>,
    /// Where the level was last drawn, in terminal cells
    level_area: Rect,
}

impl GameScreen<rand::rngs::ThreadRng> {
    pub(crate) fn new(config: &Config) -> Self {
        GameScreen::new_with_rng(config, rand::rng())
    }
}

impl<R: Rng> GameScreen<R> {
    pub(crate) fn new_with_rng(config: &Config, rng: R) -> GameScreen<R> {
        GameScreen {
            engine: TickEngine::new_with_rng(config.rules, config.input.mapping, rng),
            level_area: Rect::default(),
        }
    }

    /// Lay the screen out for a terminal of size `area` and tell the engine
    /// how large the level is
    pub(crate) fn resize(&mut self, area: Rect) {
        self.level_area = level_area(area);
        self.engine
            .set_viewport(viewport(self.level_area), Instant::now());
    }

    pub(crate) fn process_input(&mut self, globals: &mut Globals) -> std::io::Result<Option<Screen>> {
        if let Some(when) = self.engine.next_deadline() {
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.advance(Instant::now(), globals);
                return Ok(None);
            }
        }
        Ok(self.handle_event(read()?))
    }

    /// Run the engine up to `now`, recording the session if it ends
    fn advance(&mut self, now: Instant, globals: &mut Globals) {
        if let Some(outcome) = self.engine.advance(now) {
            globals.record(outcome);
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        if let Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) = event
        {
            self.click(Position::new(column, row));
            return None;
        }
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        if self.engine.phase() == Phase::Terminal {
            match cmd {
                Command::R => self.engine.restart(Instant::now()),
                Command::M => return Some(Screen::Main(MainMenu::new())),
                Command::Quit | Command::Q => return Some(Screen::Quit),
                _ => (),
            }
        } else {
            let direction = match cmd {
                Command::Quit => return Some(Screen::Quit),
                Command::Up => Direction::Up,
                Command::Down => Direction::Down,
                Command::Left => Direction::Left,
                Command::Right => Direction::Right,
                _ => return None,
            };
            self.engine.set_direction(direction);
        }
        None
    }
}

impl<R> GameScreen<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// Treat a click at terminal position `pos` as a tap on the level
    fn click(&mut self, pos: Position) {
        if !self.level_area.contains(pos) {
            return;
        }
        let half = consts::CELL_SIZE / 2;
        let tap = Cell::new(
            i32::from(pos.x - self.level_area.x) * consts::CELL_SIZE + half,
            i32::from(pos.y - self.level_area.y) * consts::CELL_SIZE + half,
        );
        self.engine.tap(tap, viewport(self.level_area));
    }
}

impl<R> Widget for &GameScreen<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Scene {
            snapshot: &self.engine.snapshot(),
            walls: self.engine.rules().walls,
        }
        .render(area, buf);
    }
}

/// A session's state laid out on the screen
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Scene<'a> {
    snapshot: &'a Snapshot,
    walls: Walls,
}

impl Widget for Scene<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [score_area, block_area, msg1_area, msg2_area] = layout(area);
        let snap = self.snapshot;
        Line::styled(format!(" Score: {}", snap.score), consts::SCORE_BAR_STYLE)
            .render(score_area, buf);
        Line::styled(
            format!("Time: {} seconds ", snap.elapsed_seconds),
            consts::SCORE_BAR_STYLE,
        )
        .right_aligned()
        .render(score_area, buf);

        if self.walls == Walls::Wrap {
            DottedBorder.render(block_area, buf);
        } else {
            Block::bordered().render(block_area, buf);
        }

        let mut level = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        let Some((&head, body)) = snap.snake.split_first() else {
            return;
        };
        for &c in body {
            level.draw_cell(c, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        level.draw_cell(snap.food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if snap.terminal() {
            level.draw_cell(head, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        } else {
            level.draw_cell(head, head_symbol(snap.direction), consts::SNAKE_STYLE);
        }

        if snap.terminal() {
            Span::from(" — GAME OVER —").render(msg1_area, buf);
            Line::from_iter([
                Span::raw(" Choose One: Play Again ("),
                Span::styled("r", consts::KEY_STYLE),
                Span::raw(") — Back to Home ("),
                Span::styled("m", consts::KEY_STYLE),
                Span::raw(") — Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ])
            .render(msg2_area, buf);
        }
    }
}

fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    }
}

/// Split the display into the score bar, the bordered level, and two message
/// lines
fn layout(area: Rect) -> [Rect; 4] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(get_display_area(area))
}

fn level_area(area: Rect) -> Rect {
    let [_, block_area, _, _] = layout(area);
    block_area.inner(Margin::new(1, 1))
}

/// The size of the playing surface shown in `level`, one grid cell per
/// terminal cell
fn viewport(level: Rect) -> Viewport {
    let unit = consts::CELL_SIZE.unsigned_abs();
    Viewport::new(
        u32::from(level.width).saturating_mul(unit),
        u32::from(level.height).saturating_mul(unit),
    )
}
