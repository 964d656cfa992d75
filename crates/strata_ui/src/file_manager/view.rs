//! Text rendering of the file manager screen.

use std::time::SystemTime;

use chrono::{DateTime, Local};
use nu_ansi_term::{Color, Style};
use strata_core::Palette;
use strata_hal::EntryInfo;

use super::state::{FileManagerState, ViewMode};
use crate::banner::center;

pub const NAME_WIDTH: usize = 30;
pub const TILE_WIDTH: usize = 17;
const TILE_STRIDE: usize = 20;

pub const HELP_LINES: &[&str] = &[
    "File Manager Help:",
    "  cd <dir>     - Change directory",
    "  p            - Go to parent directory",
    "  v            - Toggle view mode (list/grid)",
    "  s <option>   - Change sort (name/size/date)",
    "  r            - Reverse sort order",
    "  sel <item>   - Select/deselect item",
    "  copy         - Copy selected items",
    "  move         - Move selected items",
    "  delete       - Delete selected items",
    "  q            - Quit file manager",
    "  help         - Show this help",
];

pub fn header(state: &FileManagerState, palette: &Palette, width: usize) -> Vec<String> {
    vec![
        palette.paint(Color::White.on(Color::Blue).bold(), &center("File Manager", width)),
        palette.yellow(&format!("Current Directory: {}", state.current_dir.display())),
        palette.cyan(&state.sort_label()),
        rule(width),
    ]
}

pub fn footer(palette: &Palette, width: usize) -> Vec<String> {
    vec![
        rule(width),
        palette.green("Commands: cd <dir>, p (parent), v (toggle view), s <name|size|date>, r (reverse sort)"),
        palette.green("sel <item> (select), copy, move, delete, q (quit), help"),
    ]
}

pub fn rule(width: usize) -> String {
    "─".repeat(width)
}

/// Entry rows in the state's current view mode.
pub fn entries(state: &FileManagerState, items: &[EntryInfo], palette: &Palette, width: usize) -> Vec<String> {
    match state.view_mode {
        ViewMode::List => items.iter().map(|item| list_row(state, item, palette)).collect(),
        ViewMode::Grid => grid_rows(state, items, palette, width),
    }
}

fn list_row(state: &FileManagerState, item: &EntryInfo, palette: &Palette) -> String {
    let size = if item.is_dir { "-".to_string() } else { item.size.to_string() };
    let name = styled(state, item, &format!("{:<width$}", item.name, width = NAME_WIDTH), palette);
    format!("{} {:>10} {:>20}", name, size, format_mtime(item.modified))
}

fn grid_rows(state: &FileManagerState, items: &[EntryInfo], palette: &Palette, width: usize) -> Vec<String> {
    let per_row = (width / TILE_STRIDE).max(1);
    items
        .chunks(per_row)
        .map(|row| {
            row.iter()
                .map(|item| {
                    let short: String = item.name.chars().take(TILE_WIDTH).collect();
                    format!("{}  ", styled(state, item, &format!("{short:<width$}", width = TILE_WIDTH), palette))
                })
                .collect::<String>()
        })
        .collect()
}

/// Directories blue, selection on green. Without colors a selected entry
/// gets a `* ` marker instead.
fn styled(state: &FileManagerState, item: &EntryInfo, text: &str, palette: &Palette) -> String {
    let selected = state.selection.contains(&item.name);
    if !palette.enabled() {
        return if selected { format!("* {text}") } else { text.to_string() };
    }
    let mut style = if item.is_dir { Color::LightBlue.normal() } else { Style::new() };
    if selected {
        style = style.on(Color::Green);
    }
    palette.paint(style, text)
}

pub fn format_mtime(modified: Option<SystemTime>) -> String {
    match modified {
        Some(time) => DateTime::<Local>::from(time).format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}
