//! Paper table renderer.
//!
//! Four columns: favorite marker, title, journal and publication date. The
//! title column takes whatever width the fixed columns leave.

use crate::ui::helpers::{position_cursor, print_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaperItem;

const MARKER_WIDTH: usize = 2;
const JOURNAL_WIDTH: usize = 22;
const DATE_WIDTH: usize = 10;

fn title_width(cols: usize) -> usize {
    cols.saturating_sub(MARKER_WIDTH + JOURNAL_WIDTH + DATE_WIDTH + 4)
}

/// Renders the column headers. Returns row + 1.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", " ".repeat(MARKER_WIDTH));
    print_padded("TITLE", title_width(cols) + 2);
    print_padded("JOURNAL", JOURNAL_WIDTH + 2);
    print_padded("DATE", DATE_WIDTH);
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every row in `items`. Returns the row after the last one.
pub fn render_table_rows(row: usize, items: &[PaperItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

fn render_table_row(row: usize, item: &PaperItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let (base_fg, dim_fg) = if item.is_selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        (&theme.colors.selection_fg, &theme.colors.selection_fg)
    } else {
        (&theme.colors.text_normal, &theme.colors.text_dim)
    };

    if item.is_favorite {
        print!("{}★ ", Theme::fg(&theme.colors.favorite_fg));
    } else {
        print!("  ");
    }

    print!("{}", Theme::fg(base_fg));
    print_padded(&item.title, title_width(cols) + 2);

    print!("{}", Theme::fg(dim_fg));
    print_padded(&item.journal, JOURNAL_WIDTH + 2);
    print_padded(&item.date, DATE_WIDTH);

    let used = MARKER_WIDTH + title_width(cols) + 2 + JOURNAL_WIDTH + 2 + DATE_WIDTH;
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
    row + 1
}
