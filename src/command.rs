use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Home,
    End,
    Next,
    Prev,
    C,
    M,
    P,
    Q,
    R,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if (ev.modifiers, ev.code) == (KeyModifiers::CONTROL, KeyCode::Char('c')) {
            return Some(Command::Quit);
        }
        if !normal_modifiers.contains(ev.modifiers) {
            return None;
        }
        match ev.code {
            KeyCode::Char('w' | 'k' | '8') | KeyCode::Up => Some(Command::Up),
            KeyCode::Char('s' | 'j' | '2') | KeyCode::Down => Some(Command::Down),
            KeyCode::Char('a' | 'h' | '4') | KeyCode::Left => Some(Command::Left),
            KeyCode::Char('d' | 'l' | '6') | KeyCode::Right => Some(Command::Right),
            KeyCode::Enter => Some(Command::Enter),
            KeyCode::Esc => Some(Command::Esc),
            KeyCode::Home => Some(Command::Home),
            KeyCode::End => Some(Command::End),
            KeyCode::Tab => Some(Command::Next),
            KeyCode::BackTab => Some(Command::Prev),
            KeyCode::Char('c') => Some(Command::C),
            KeyCode::Char('m') => Some(Command::M),
            KeyCode::Char('p') => Some(Command::P),
            KeyCode::Char('q') => Some(Command::Q),
            KeyCode::Char('r') => Some(Command::R),
            _ => None,
        }
    }
}
