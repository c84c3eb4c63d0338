//! Header component renderer.

use crate::ui::helpers::{position_cursor, print_padded, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the tab title and the subtitle line under it.
///
/// Returns the next available row (row + 2).
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = truncate(&header.title, cols);
    let title_len = title.chars().count();
    let padding = cols.saturating_sub(title_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", " ".repeat(padding));
    print_padded(&title, cols.saturating_sub(padding));
    print!("{}", Theme::reset());

    let subtitle = truncate(&header.subtitle, cols.saturating_sub(2));
    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!(" ");
    print_padded(&subtitle, cols.saturating_sub(1));
    print!("{}", Theme::reset());

    row + 2
}
