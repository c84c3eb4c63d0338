//! Footer and status line renderers.

use crate::ui::helpers::{position_cursor, print_padded, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, StatusLine};

/// Renders the centered keybinding hints. Returns row + 1.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = truncate(&footer.keybindings, cols);
    let text_len = help_text.chars().count();
    let padding = cols.saturating_sub(text_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print_padded(&help_text, cols.saturating_sub(padding));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the status line, or blanks it. Returns row + 1.
pub fn render_status(row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    match status {
        Some(status) => {
            let color = if status.is_error {
                &theme.colors.error_fg
            } else {
                &theme.colors.accent_fg
            };
            print!("{}", Theme::fg(color));
            print!(" ");
            print_padded(&truncate(&status.text, cols.saturating_sub(2)), cols.saturating_sub(1));
            print!("{}", Theme::reset());
        }
        None => print!("{}", " ".repeat(cols)),
    }
    row + 1
}
