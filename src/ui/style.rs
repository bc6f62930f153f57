//! Theming and color definitions.
//!
//! Two palettes, picked with `--theme`. The header controls use a
//! background difference to mark the active mode; everything else uses
//! ANSI colors so the terminal palette still applies.

use ratatui::style::{Color, Modifier, Style};

#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Header row behind the inactive control.
    pub fn header(self) -> Style {
        match self {
            Self::Dark => Style::new().bg(Color::Rgb(31, 41, 55)).fg(Color::Gray),
            Self::Light => Style::new().bg(Color::Rgb(229, 231, 235)).fg(Color::DarkGray),
        }
    }

    /// The control for the current mode.
    pub fn active_control(self) -> Style {
        let (r, g, b) = self.content_rgb();
        match self {
            Self::Dark => Style::new()
                .bg(Color::Rgb(r, g, b))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            Self::Light => Style::new()
                .bg(Color::Rgb(r, g, b))
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        }
    }

    pub fn inactive_control(self) -> Style {
        self.header().add_modifier(Modifier::BOLD)
    }

    /// Background color of the content area, shared with the active control.
    pub const fn content_rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Dark => (17, 24, 39),
            Self::Light => (255, 255, 255),
        }
    }

    /// CSS form of [`Self::content_rgb`] for the static render.
    pub fn content_hex(self) -> String {
        let (r, g, b) = self.content_rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn heading(self, level: u8) -> Style {
        let color = match (self, level) {
            (Self::Dark, 1) => Color::Cyan,
            (Self::Dark, 2) => Color::Green,
            (Self::Dark, 3) => Color::Yellow,
            (Self::Dark, _) => Color::Blue,
            (Self::Light, 1) => Color::Indexed(24),
            (Self::Light, 2) => Color::Indexed(22),
            (Self::Light, 3) => Color::Indexed(58),
            (Self::Light, _) => Color::Indexed(54),
        };
        let style = Style::new().fg(color).add_modifier(Modifier::BOLD);
        if level == 1 {
            style.add_modifier(Modifier::UNDERLINED)
        } else {
            style
        }
    }

    pub fn link(self) -> Style {
        match self {
            Self::Dark => Style::new().fg(Color::LightBlue).add_modifier(Modifier::UNDERLINED),
            Self::Light => Style::new().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
        }
    }

    pub fn code(self) -> Style {
        match self {
            Self::Dark => Style::new().fg(Color::LightYellow),
            Self::Light => Style::new().fg(Color::Indexed(130)),
        }
    }

    /// Quote bars, list markers, rules and link targets.
    pub fn decoration(self) -> Style {
        match self {
            Self::Dark => Style::new().fg(Color::DarkGray),
            Self::Light => Style::new().fg(Color::Gray),
        }
    }

    pub fn quote(self) -> Style {
        Style::new().add_modifier(Modifier::ITALIC)
    }

    pub fn gutter(self) -> Style {
        self.decoration()
    }

    pub fn cursor(self) -> Style {
        match self {
            Self::Dark => Style::new().bg(Color::White).fg(Color::Black),
            Self::Light => Style::new().bg(Color::Black).fg(Color::White),
        }
    }
}
