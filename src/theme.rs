//! Colour theme, passed down explicitly through the render context

use crate::table::Tone;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    pub fn toggled(self) -> Self {
        match self {
            ThemeName::Dark => ThemeName::Light,
            ThemeName::Light => ThemeName::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Dark => "dark",
            ThemeName::Light => "light",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: ThemeName,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub positive: Color,
    pub warning: Color,
    pub negative: Color,
    pub border: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub skeleton: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: ThemeName::Dark,
            text: Color::White,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            positive: Color::Green,
            warning: Color::Yellow,
            negative: Color::Red,
            border: Color::DarkGray,
            highlight_bg: Color::Blue,
            highlight_fg: Color::White,
            skeleton: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Self {
            name: ThemeName::Light,
            text: Color::Black,
            muted: Color::Gray,
            accent: Color::Blue,
            positive: Color::Green,
            warning: Color::Magenta,
            negative: Color::Red,
            border: Color::Gray,
            highlight_bg: Color::LightBlue,
            highlight_fg: Color::Black,
            skeleton: Color::Gray,
        }
    }

    pub fn for_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    pub fn tone(&self, tone: Tone) -> Style {
        let fg = match tone {
            Tone::Default => self.text,
            Tone::Muted => self.muted,
            Tone::Accent => self.accent,
            Tone::Positive => self.positive,
            Tone::Warning => self.warning,
            Tone::Negative => self.negative,
        };
        Style::default().fg(fg)
    }

    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .fg(self.highlight_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_hint(&self, color: Color) -> Style {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle_round_trip() {
        assert_eq!(ThemeName::Dark.toggled(), ThemeName::Light);
        assert_eq!(ThemeName::Dark.toggled().toggled(), ThemeName::Dark);
        assert_eq!(Theme::for_name(ThemeName::Light).name, ThemeName::Light);
    }

    #[test]
    fn test_tones_map_to_theme_colours() {
        let theme = Theme::dark();
        assert_eq!(theme.tone(Tone::Negative).fg, Some(Color::Red));
        assert_eq!(theme.tone(Tone::Muted).fg, Some(theme.muted));
    }
}
