//! Filter picker overlay: a query box over a checkbox list.

use super::input::render_input_box;
use crate::ui::helpers::{self, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PickerInfo;

/// Renders the picker starting at `row`. Returns the row after the list.
pub fn render_picker(row: usize, picker: &PickerInfo, theme: &Theme, cols: usize) -> usize {
    let mut current_row = render_input_box(row, &picker.input, theme, cols);

    if picker.options.is_empty() {
        position_cursor(current_row, 1);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("   No matching options");
        print!("{}", Theme::reset());
        return current_row + 1;
    }

    for option in &picker.options {
        position_cursor(current_row, 1);
        if option.is_cursor {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }

        print!(" {} ", if option.is_checked { "[x]" } else { "[ ]" });
        let label = truncate(&option.label, cols.saturating_sub(6));
        helpers::render_highlighted_text(&label, &option.highlight_ranges, theme, option.is_cursor);
        print!("{}", " ".repeat(cols.saturating_sub(5 + label.chars().count())));
        print!("{}", Theme::reset());
        current_row += 1;
    }

    if picker.all_selected {
        position_cursor(current_row, 1);
        print!("{}", Theme::fg(&theme.colors.accent_fg));
        print!("   All selected");
        print!("{}", Theme::reset());
        current_row += 1;
    }
    current_row
}
