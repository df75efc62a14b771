mod widgets;
use self::widgets::{Instructions, Logo};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::game::GameScreen;
use crate::leaderboard::RankingScreen;
use crate::util::{get_display_area, EnumExt, Globals};
use crossterm::event::{read, Event};
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
    Frame,
};

/// The home screen
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MainMenu {
    selection: Selection,
}

impl MainMenu {
    pub(crate) fn new() -> Self {
        MainMenu::default()
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self, globals: &Globals) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?, globals))
    }

    fn handle_event(&mut self, event: Event, globals: &Globals) -> Option<Screen> {
        match (
            self.selection,
            Command::from_key_event(event.as_key_press_event()?)?,
        ) {
            (_, Command::Quit | Command::Q) | (Selection::Quit, Command::Enter) => {
                return Some(Screen::Quit)
            }
            (Selection::Play, Command::Enter) | (_, Command::P) => {
                return Some(Screen::Game(GameScreen::new(&globals.config)))
            }
            (Selection::Ranking, Command::Enter) | (_, Command::R) => {
                return Some(Screen::Ranking(RankingScreen::new(&globals.ranking)))
            }
            (_, Command::Home) => self.selection = Selection::min(),
            (_, Command::End) => self.selection = Selection::max(),
            (_, Command::Up) => {
                if let Some(sel) = self.selection.prev() {
                    self.selection = sel;
                }
            }
            (_, Command::Down) => {
                if let Some(sel) = self.selection.next() {
                    self.selection = sel;
                }
            }
            (_, Command::Next) => {
                self.selection = self.selection.next().unwrap_or_else(Selection::min);
            }
            (_, Command::Prev) => {
                self.selection = self.selection.prev().unwrap_or_else(Selection::max);
            }
            _ => (),
        }
        None
    }
}

impl Widget for &MainMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, instructions_area, play_area, ranking_area, quit_area] =
            Layout::vertical([Logo::HEIGHT, Instructions::HEIGHT, 1, 1, 1])
                .flex(Flex::Start)
                .spacing(1)
                .areas(display);

        Logo.render(logo_area, buf);

        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);

        for (sel, label, key, button_area) in [
            (Selection::Play, "Play", "p", play_area),
            (Selection::Ranking, "Ranking", "r", ranking_area),
            (Selection::Quit, "Quit", "q", quit_area),
        ] {
            let style = if self.selection == sel {
                consts::MENU_SELECTION_STYLE
            } else {
                Style::new()
            };
            Line::from_iter([
                Span::styled(format!("[{label} ("), style),
                Span::styled(key, consts::KEY_STYLE.patch(style)),
                Span::styled(")]", style),
            ])
            .centered()
            .render(button_area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Enum, Eq, PartialEq)]
enum Selection {
    #[default]
    Play,
    Ranking,
    Quit,
}
