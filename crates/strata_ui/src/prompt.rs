//! Two-line prompt showing the working directory.

use std::path::Path;

use nu_ansi_term::Color;
use strata_core::Palette;

pub fn render(cwd: &Path, palette: &Palette) -> String {
    let style = Color::LightBlue.bold();
    format!(
        "{}\n{}",
        palette.paint(style, &format!("┌─[{}]", cwd.display())),
        palette.paint(style, "└─▶ ")
    )
}
