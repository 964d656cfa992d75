//! Color helpers shared by the built-ins and the UI.
//!
//! A [`Palette`] either paints with ANSI colors or passes text through
//! untouched (`color = false` / `NO_COLOR`).

use nu_ansi_term::{Color, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn paint(&self, style: Style, text: &str) -> String {
        if self.enabled {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn red(&self, text: &str) -> String {
        self.paint(Color::LightRed.normal(), text)
    }

    pub fn green(&self, text: &str) -> String {
        self.paint(Color::LightGreen.normal(), text)
    }

    pub fn yellow(&self, text: &str) -> String {
        self.paint(Color::LightYellow.normal(), text)
    }

    pub fn blue(&self, text: &str) -> String {
        self.paint(Color::LightBlue.normal(), text)
    }

    pub fn cyan(&self, text: &str) -> String {
        self.paint(Color::LightCyan.normal(), text)
    }

    pub fn magenta(&self, text: &str) -> String {
        self.paint(Color::LightPurple.normal(), text)
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(Style::new().bold(), text)
    }

    pub fn heading(&self, text: &str) -> String {
        self.paint(Color::LightBlue.bold(), text)
    }

    /// Selected entries in the file manager.
    pub fn selected(&self, text: &str) -> String {
        self.paint(Style::new().on(Color::Green), text)
    }
}
