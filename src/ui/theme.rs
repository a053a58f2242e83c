use crate::models::sample::Channel;
use ratatui::style::{Color, Modifier, Style};

// ── Helper: build an Rgb Color from a hex literal ──────────────────────

const fn rgb(hex: u32) -> Color {
    Color::Rgb(
        ((hex >> 16) & 0xFF) as u8,
        ((hex >>  8) & 0xFF) as u8,
        ( hex        & 0xFF) as u8,
    )
}

// ── Theme variant selector ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeVariant {
    Default,
    Dracula,
    Gruvbox,
    Nord,
}

impl ThemeVariant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Dracula => "Dracula",
            Self::Gruvbox => "Gruvbox",
            Self::Nord    => "Nord",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Default => Self::Dracula,
            Self::Dracula => Self::Gruvbox,
            Self::Gruvbox => Self::Nord,
            Self::Nord    => Self::Default,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dracula" => Self::Dracula,
            "gruvbox" => Self::Gruvbox,
            "nord"    => Self::Nord,
            _         => Self::Default,
        }
    }
}

// ── Theme struct ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct Theme {
    pub border:        Style,
    pub title:         Style,
    pub text:          Style,
    pub text_dim:      Style,
    pub header:        Style,
    pub ok:            Style,
    pub warn:          Style,
    pub system_line:   Style,
    pub docker_line:   Style,
    pub capacity_line: Style,
    pub cursor:        Style,
    pub tooltip:       Style,
    /// One color per marker slot, T1..T5
    pub markers:       [Style; 5],
    pub footer_bg:     Style,
    pub footer_key:    Style,
    pub footer_text:   Style,
}

impl Theme {
    pub fn for_variant(v: ThemeVariant) -> Self {
        match v {
            ThemeVariant::Default => Self::default(),
            ThemeVariant::Dracula => Self::dracula(),
            ThemeVariant::Gruvbox => Self::gruvbox(),
            ThemeVariant::Nord    => Self::nord(),
        }
    }

    pub fn default() -> Self {
        Self {
            border:        Style::default().fg(Color::DarkGray),
            title:         Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            text:          Style::default().fg(Color::White),
            text_dim:      Style::default().fg(Color::DarkGray),
            header:        Style::default().fg(Color::Black).bg(Color::Blue).add_modifier(Modifier::BOLD),
            ok:            Style::default().fg(Color::Green),
            warn:          Style::default().fg(Color::Yellow),
            system_line:   Style::default().fg(Color::Blue),
            docker_line:   Style::default().fg(Color::Red),
            capacity_line: Style::default().fg(Color::LightRed).add_modifier(Modifier::DIM),
            cursor:        Style::default().fg(Color::Gray),
            tooltip:       Style::default().fg(Color::Black).bg(Color::White),
            markers: [
                Style::default().fg(Color::Cyan),
                Style::default().fg(Color::Yellow),
                Style::default().fg(Color::Magenta),
                Style::default().fg(Color::LightGreen),
                Style::default().fg(Color::LightRed),
            ],
            footer_bg:     Style::default().bg(Color::DarkGray).fg(Color::White),
            footer_key:    Style::default().bg(Color::DarkGray).fg(Color::Cyan).add_modifier(Modifier::BOLD),
            footer_text:   Style::default().bg(Color::DarkGray).fg(Color::Gray),
        }
    }

    fn dracula() -> Self {
        // https://draculatheme.com/: purple/pink dark theme
        // bg: #282a36  current-line: #44475a  comment: #6272a4
        // fg: #f8f8f2  cyan: #8be9fd  green: #50fa7b  yellow: #f1fa8c
        // orange: #ffb86c  pink: #ff79c6  purple: #bd93f9  red: #ff5555
        Self {
            border:        Style::default().fg(rgb(0x6272a4)),
            title:         Style::default().fg(rgb(0xf8f8f2)).add_modifier(Modifier::BOLD),
            text:          Style::default().fg(rgb(0xf8f8f2)),
            text_dim:      Style::default().fg(rgb(0x6272a4)),
            header:        Style::default().fg(rgb(0xf8f8f2)).bg(rgb(0x44475a)).add_modifier(Modifier::BOLD),
            ok:            Style::default().fg(rgb(0x50fa7b)),
            warn:          Style::default().fg(rgb(0xf1fa8c)),
            system_line:   Style::default().fg(rgb(0x8be9fd)),
            docker_line:   Style::default().fg(rgb(0xff5555)),
            capacity_line: Style::default().fg(rgb(0xff79c6)),
            cursor:        Style::default().fg(rgb(0x6272a4)),
            tooltip:       Style::default().fg(rgb(0x282a36)).bg(rgb(0xf8f8f2)),
            markers: [
                Style::default().fg(rgb(0xbd93f9)),
                Style::default().fg(rgb(0xf1fa8c)),
                Style::default().fg(rgb(0x50fa7b)),
                Style::default().fg(rgb(0xffb86c)),
                Style::default().fg(rgb(0xff79c6)),
            ],
            footer_bg:     Style::default().bg(rgb(0x44475a)).fg(rgb(0xf8f8f2)),
            footer_key:    Style::default().bg(rgb(0x44475a)).fg(rgb(0xbd93f9)).add_modifier(Modifier::BOLD),
            footer_text:   Style::default().bg(rgb(0x44475a)).fg(rgb(0x6272a4)),
        }
    }

    fn gruvbox() -> Self {
        // https://github.com/morhetz/gruvbox: warm retro dark theme
        // bg0: #282828  bg1: #3c3836  bg3/medium: #665c54
        // fg1: #ebdbb2  fg4: #a89984
        // red: #fb4934  green: #b8bb26  yellow: #fabd2f
        // blue/aqua: #83a598  orange: #fe8019
        Self {
            border:        Style::default().fg(rgb(0x504945)),
            title:         Style::default().fg(rgb(0xebdbb2)).add_modifier(Modifier::BOLD),
            text:          Style::default().fg(rgb(0xebdbb2)),
            text_dim:      Style::default().fg(rgb(0xa89984)),
            header:        Style::default().fg(rgb(0xebdbb2)).bg(rgb(0x504945)).add_modifier(Modifier::BOLD),
            ok:            Style::default().fg(rgb(0xb8bb26)),
            warn:          Style::default().fg(rgb(0xfabd2f)),
            system_line:   Style::default().fg(rgb(0x83a598)),
            docker_line:   Style::default().fg(rgb(0xfb4934)),
            capacity_line: Style::default().fg(rgb(0xfe8019)),
            cursor:        Style::default().fg(rgb(0xa89984)),
            tooltip:       Style::default().fg(rgb(0x282828)).bg(rgb(0xebdbb2)),
            markers: [
                Style::default().fg(rgb(0x8ec07c)),
                Style::default().fg(rgb(0xfabd2f)),
                Style::default().fg(rgb(0xd3869b)),
                Style::default().fg(rgb(0xb8bb26)),
                Style::default().fg(rgb(0xfe8019)),
            ],
            footer_bg:     Style::default().bg(rgb(0x3c3836)).fg(rgb(0xebdbb2)),
            footer_key:    Style::default().bg(rgb(0x3c3836)).fg(rgb(0x83a598)).add_modifier(Modifier::BOLD),
            footer_text:   Style::default().bg(rgb(0x3c3836)).fg(rgb(0xa89984)),
        }
    }

    fn nord() -> Self {
        // https://www.nordtheme.com/: Arctic, north-bluish clean theme
        // Polar Night: #2e3440 #3b4252 #434c5e #4c566a
        // Snow Storm:  #d8dee9 #e5e9f0 #eceff4
        // Frost:       #8fbcbb #88c0d0 #81a1c1 #5e81ac
        // Aurora:      #bf616a #d08770 #ebcb8b #a3be8c #b48ead
        Self {
            border:        Style::default().fg(rgb(0x4c566a)),
            title:         Style::default().fg(rgb(0xeceff4)).add_modifier(Modifier::BOLD),
            text:          Style::default().fg(rgb(0xe5e9f0)),
            text_dim:      Style::default().fg(rgb(0x4c566a)),
            header:        Style::default().fg(rgb(0xeceff4)).bg(rgb(0x3b4252)).add_modifier(Modifier::BOLD),
            ok:            Style::default().fg(rgb(0xa3be8c)),
            warn:          Style::default().fg(rgb(0xebcb8b)),
            system_line:   Style::default().fg(rgb(0x88c0d0)),
            docker_line:   Style::default().fg(rgb(0xbf616a)),
            capacity_line: Style::default().fg(rgb(0xd08770)),
            cursor:        Style::default().fg(rgb(0x4c566a)),
            tooltip:       Style::default().fg(rgb(0x2e3440)).bg(rgb(0xd8dee9)),
            markers: [
                Style::default().fg(rgb(0x8fbcbb)),
                Style::default().fg(rgb(0xebcb8b)),
                Style::default().fg(rgb(0xb48ead)),
                Style::default().fg(rgb(0xa3be8c)),
                Style::default().fg(rgb(0xd08770)),
            ],
            footer_bg:     Style::default().bg(rgb(0x3b4252)).fg(rgb(0xd8dee9)),
            footer_key:    Style::default().bg(rgb(0x3b4252)).fg(rgb(0x88c0d0)).add_modifier(Modifier::BOLD),
            footer_text:   Style::default().bg(rgb(0x3b4252)).fg(rgb(0x4c566a)),
        }
    }

    pub fn series_style(&self, channel: Channel) -> Style {
        match channel {
            Channel::System => self.system_line,
            Channel::Docker => self.docker_line,
        }
    }

    /// Marker color for label `T{index}` (1-based).
    pub fn marker_style(&self, index: usize) -> Style {
        self.markers[index.saturating_sub(1) % self.markers.len()]
    }
}
