//! Expanded paper detail pane.

use crate::ui::helpers::{position_cursor, print_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

/// Renders title, byline, tags and body lines. Returns the next free row.
pub fn render_detail(row: usize, detail: &DetailInfo, theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(2);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("  ");
    print_padded(&detail.title, width);
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("  ");
    print_padded(&detail.byline, width);

    position_cursor(row + 2, 1);
    print!("{}", Theme::fg(&theme.colors.accent_fg));
    print!("  ");
    print_padded(&detail.tags, width);
    print!("{}", Theme::reset());

    let mut current_row = row + 3;
    print!("{}", Theme::fg(&theme.colors.text_normal));
    for line in &detail.lines {
        position_cursor(current_row, 1);
        print!("  ");
        print_padded(line, width);
        current_row += 1;
    }
    print!("{}", Theme::reset());
    current_row
}
