use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    TogglePause,
    Reset,          // r: clear data, markers and start time
    ZoomIn,
    ZoomOut,
    ZoomReset,      // 0: fit all history, resume auto-scroll
    PanLeft,
    PanRight,
    JumpLive,       // End: back to the live edge, keep zoom
    CycleDrive,     // d: next mounted volume
    CycleContainer, // c: next running container matching the filter
    CycleTheme,
    ShowHelp,
    Back,
    None,
}

pub fn handle_key(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char('p'), _) | (KeyCode::Char(' '), _) => Action::TogglePause,
        (KeyCode::Char('r'), _) => Action::Reset,

        (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) => Action::ZoomIn,
        (KeyCode::Char('-'), _) => Action::ZoomOut,
        (KeyCode::Char('0'), _) => Action::ZoomReset,

        // Navigation: arrow keys and vim h/l
        (KeyCode::Left,  _) | (KeyCode::Char('h'), _) => Action::PanLeft,
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => Action::PanRight,
        (KeyCode::End, _) => Action::JumpLive,

        (KeyCode::Char('d'), _) => Action::CycleDrive,
        (KeyCode::Char('c'), _) => Action::CycleContainer,
        (KeyCode::Char('t'), _) => Action::CycleTheme,

        (KeyCode::Char('?'), _)
        | (KeyCode::F(1), _) => Action::ShowHelp,
        (KeyCode::Esc, _)    => Action::Back,

        _ => Action::None,
    }
}
