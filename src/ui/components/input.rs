//! Bordered single-line input box.
//!
//! Used for the picker query and the custom date entry.

use crate::ui::helpers::{position_cursor, print_padded, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::InputBoxInfo;

/// Horizontal margin for the box (spaces on left and right).
const INPUT_BOX_MARGIN: usize = 5;

/// Renders a 3-line box reading ` {label}: {text}▏`. Returns row + 3.
///
/// ```text
/// [margin] ┌─────────────────┐ [margin]
/// [margin] │ Journals: neuro▏ │ [margin]
/// [margin] └─────────────────┘ [margin]
/// ```
pub fn render_input_box(row: usize, input: &InputBoxInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(INPUT_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);

    position_cursor(row, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.input_border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let text = truncate(&format!(" {}: {}▏", input.label, input.text), inner_width);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.input_border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print_padded(&text, inner_width);
    print!("{}", Theme::fg(&theme.colors.input_border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.input_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
