use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::menu::MainMenu;
use crate::ranking::{KeyValueStore, Ranking, RankingItem};
use crate::util::{center_rect, get_display_area, Globals};
use crossterm::event::{read, Event};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect, Size},
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
    Frame,
};

/// The screen listing past sessions, best first
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RankingScreen {
    items: Vec<RankingItem>,
}

impl RankingScreen {
    const TEXT_WIDTH: u16 = 21;
    #[allow(clippy::cast_possible_truncation)]
    const HEIGHT: u16 = consts::RANKING_ROWS as u16 + 3 /* for header and border */;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4 /* for border and padding */;

    pub(crate) fn new<S: KeyValueStore>(ranking: &Ranking<S>) -> RankingScreen {
        RankingScreen {
            items: ranking.competition(),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self, globals: &mut Globals) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?, globals))
    }

    fn handle_event(&mut self, event: Event, globals: &mut Globals) -> Option<Screen> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit | Command::Q => Some(Screen::Quit),
            Command::M | Command::Esc => Some(Screen::Main(MainMenu::new())),
            Command::C => {
                globals.clear_ranking();
                self.items = globals.ranking.competition();
                None
            }
            _ => None,
        }
    }
}

impl Widget for &RankingScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [table_area, keys_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .spacing(1)
            .areas(display);
        let block_area = center_rect(
            table_area,
            Size {
                width: RankingScreen::WIDTH,
                height: RankingScreen::HEIGHT,
            },
        );
        let block = Block::bordered()
            .title(" Ranking ")
            .padding(Padding::horizontal(1));
        let inner = block.inner(block_area);
        block.render(block_area, buf);

        let mut rows = inner.rows();
        if let Some(row) = rows.next() {
            Span::styled(
                format!("{:>4}  {:>5}  {:>8}", "Rank", "Score", "Time"),
                consts::TABLE_HEADER_STYLE,
            )
            .render(row, buf);
        }
        if self.items.is_empty() {
            if let Some(row) = rows.next() {
                Span::from("No games played yet.").render(row, buf);
            }
        }
        for (item, row) in self.items.iter().take(consts::RANKING_ROWS).zip(rows) {
            let RankingItem {
                rank,
                score,
                duration,
            } = item;
            Span::from(format!("{rank:>4}  {score:>5}  {duration:>7}s")).render(row, buf);
        }

        Line::from_iter([
            Span::raw(" Back ("),
            Span::styled("m", consts::KEY_STYLE),
            Span::raw(") — Clear ("),
            Span::styled("c", consts::KEY_STYLE),
            Span::raw(") — Quit ("),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .render(keys_area, buf);
    }
}
