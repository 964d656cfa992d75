//! Welcome banner and farewell line.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use nu_ansi_term::Color;
use strata_core::Palette;

pub const WELCOME_TITLE: &str = "Welcome to the Strata Shell";
pub const FAREWELL: &str = "Thank you for using the Strata Shell. Goodbye!";

/// Boxed title spanning `width` columns.
pub fn welcome(palette: &Palette, width: usize) -> Vec<String> {
    let inner = width.max(WELCOME_TITLE.chars().count() + 4) - 2;
    let frame = |text: String| palette.paint(Color::LightBlue.bold(), &text);
    vec![
        frame(format!("╔{}╗", "═".repeat(inner))),
        frame(format!("║{}║", " ".repeat(inner))),
        format!(
            "{}{}{}",
            frame("║".to_string()),
            palette.paint(Color::LightGreen.bold(), &center(WELCOME_TITLE, inner)),
            frame("║".to_string())
        ),
        frame(format!("║{}║", " ".repeat(inner))),
        frame(format!("╚{}╝", "═".repeat(inner))),
    ]
}

pub fn hint(palette: &Palette) -> String {
    palette.cyan("Type 'help' for a list of commands.")
}

/// The farewell, centered in `width` columns.
pub fn farewell(palette: &Palette, width: usize) -> String {
    palette.green(center(FAREWELL, width).trim_end())
}

/// Pad `text` on both sides to `width` columns; never truncates.
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Write `text` one character at a time, then a newline.
pub fn typewriter<W: Write>(out: &mut W, text: &str, delay: Duration) -> io::Result<()> {
    if delay.is_zero() {
        return writeln!(out, "{text}");
    }
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        out.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
        out.flush()?;
        thread::sleep(delay);
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_fills_the_width() {
        let lines = welcome(&Palette::plain(), 40);
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.chars().count() == 40));
        assert!(lines[2].contains(WELCOME_TITLE));
    }

    #[test]
    fn narrow_terminal_still_fits_the_title() {
        let lines = welcome(&Palette::plain(), 10);
        assert!(lines[2].contains(WELCOME_TITLE));
    }

    #[test]
    fn centering() {
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(center("abc", 2), "abc");
        assert_eq!(farewell(&Palette::plain(), 10), FAREWELL);
    }

    #[test]
    fn typewriter_writes_everything() {
        let mut out = Vec::new();
        typewriter(&mut out, "héllo", Duration::from_millis(0)).unwrap();
        typewriter(&mut out, "ok", Duration::from_millis(1)).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "héllo\nok\n");
    }
}
