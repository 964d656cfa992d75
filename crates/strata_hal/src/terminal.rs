//! Terminal metadata queries.

/// Width used when the output is not a terminal.
pub const DEFAULT_WIDTH: usize = 80;
pub const DEFAULT_HEIGHT: usize = 24;

/// Columns of the controlling terminal, or [`DEFAULT_WIDTH`].
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .filter(|w| *w > 0)
        .unwrap_or(DEFAULT_WIDTH)
}

pub fn terminal_height() -> usize {
    terminal_size::terminal_size()
        .map(|(_, h)| h.0 as usize)
        .filter(|h| *h > 0)
        .unwrap_or(DEFAULT_HEIGHT)
}
