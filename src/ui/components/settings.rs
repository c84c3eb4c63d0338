//! Preferences screen renderer.

use crate::ui::helpers::{position_cursor, print_padded, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{SettingsLine, SettingsView};

const LABEL_WIDTH: usize = 48;

/// Renders section headings and item rows. Returns the next free row.
pub fn render_settings(row: usize, view: &SettingsView, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;

    for line in &view.lines {
        position_cursor(current_row, 1);
        match line {
            SettingsLine::Section(title) => {
                print!("{}", Theme::bold());
                print!("{}", Theme::fg(&theme.colors.header_fg));
                print!(" ");
                print_padded(title, cols.saturating_sub(1));
            }
            SettingsLine::Item {
                label,
                value,
                is_cursor,
            } => {
                if *is_cursor {
                    print!("{}", Theme::fg(&theme.colors.selection_fg));
                    print!("{}", Theme::bg(&theme.colors.selection_bg));
                } else {
                    print!("{}", Theme::fg(&theme.colors.text_normal));
                }
                let label_width = LABEL_WIDTH.min(cols.saturating_sub(12));
                print!("   ");
                print_padded(&truncate(label, label_width), label_width);
                print!(" ");
                print_padded(value, cols.saturating_sub(label_width + 4));
            }
        }
        print!("{}", Theme::reset());
        current_row += 1;
    }

    if view.can_save {
        position_cursor(current_row + 1, 1);
        print!("{}", Theme::fg(&theme.colors.accent_fg));
        print!("   Press s to save your changes");
        print!("{}", Theme::reset());
        current_row += 2;
    }
    current_row
}
