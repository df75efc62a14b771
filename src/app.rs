use crate::command::Command;
use crate::game::GameScreen;
use crate::leaderboard::RankingScreen;
use crate::menu::MainMenu;
use crate::util::{get_display_area, Globals};
use crate::warning::WarningOutcome;
use crossterm::event::{read, Event};
use ratatui::{
    backend::Backend,
    layout::{Position, Rect},
    Terminal,
};
use std::io;

#[derive(Debug)]
pub(crate) struct App {
    screen: Screen,
    globals: Globals,
}

impl App {
    pub(crate) fn new(globals: Globals) -> App {
        App {
            screen: Screen::Main(MainMenu::new()),
            globals,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.resize(Rect::from((Position::ORIGIN, terminal.size()?)));
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn resize(&mut self, area: Rect) {
        if let Screen::Game(ref mut game) = self.screen {
            game.resize(area);
        }
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| {
            match self.screen {
                Screen::Main(ref menu) => menu.draw(frame),
                Screen::Game(ref game) => game.draw(frame),
                Screen::Ranking(ref ranking) => ranking.draw(frame),
                Screen::Quit => (),
            }
            if let Some(ref warning) = self.globals.warning {
                frame.render_widget(warning, get_display_area(frame.area()));
            }
        })?;
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        if self.globals.warning.is_some() {
            let event = read()?;
            self.handle_warning_event(event);
            return Ok(());
        }
        let next = match self.screen {
            Screen::Main(ref mut menu) => menu.process_input(&self.globals)?,
            Screen::Game(ref mut game) => game.process_input(&mut self.globals)?,
            Screen::Ranking(ref mut ranking) => ranking.process_input(&mut self.globals)?,
            Screen::Quit => None,
        };
        if let Some(screen) = next {
            self.screen = screen;
        }
        Ok(())
    }

    fn handle_warning_event(&mut self, event: Event) {
        let Some(warning) = self.globals.warning.as_ref() else {
            return;
        };
        let Some(cmd) = event
            .as_key_press_event()
            .and_then(Command::from_key_event)
        else {
            return;
        };
        match warning.handle_command(cmd) {
            Some(WarningOutcome::Dismissed) => self.globals.warning = None,
            Some(WarningOutcome::Quit) => self.screen = Screen::Quit,
            None => (),
        }
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Screen {
    Main(MainMenu),
    Game(GameScreen),
    Ranking(RankingScreen),
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::ranking::JsonFileStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn failing_globals(tmp: &tempfile::TempDir) -> Globals {
        let blocker = tmp.path().join("blocker");
        fs_err::write(&blocker, "").unwrap();
        let store = JsonFileStore::open(&blocker.join("ranking.json")).unwrap();
        Globals::new(Config::default(), Box::new(store))
    }

    #[test]
    fn warning_dismissed() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = App::new(failing_globals(&tmp));
        app.globals.clear_ranking();
        assert!(app.globals.warning.is_some());
        app.handle_warning_event(Event::Key(KeyCode::Char('x').into()));
        assert!(app.globals.warning.is_some());
        app.handle_warning_event(Event::Key(KeyCode::Enter.into()));
        assert_eq!(app.globals.warning, None);
        assert!(!app.quitting());
    }

    #[test]
    fn warning_quit() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = App::new(failing_globals(&tmp));
        app.globals.clear_ranking();
        app.handle_warning_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.quitting());
    }
}
