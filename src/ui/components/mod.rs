//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: tab title and filter summary
//! - [`footer`]: keybinding hints and the status line
//! - [`input`]: bordered text box for picker queries and dates
//! - [`table`]: paper list
//! - [`detail`]: expanded paper pane
//! - [`picker`]: filter picker overlay
//! - [`pager`]: pagination bar
//! - [`settings`]: preferences screen
//! - [`empty`]: empty state message
//!
//! # Layout
//!
//! ```text
//! row 1          [blank]
//! row 2          Header tabs
//! row 3          Subtitle
//! row 4          Border
//! row 5..        Body (date box, table, detail / picker / settings)
//! rows - 4       Pagination
//! rows - 3       Status line
//! rows - 2       Border
//! rows - 1       Footer
//! ```

mod detail;
mod empty;
mod footer;
mod header;
mod input;
mod pager;
mod picker;
mod settings;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, FeedView, UIViewModel};

use detail::render_detail;
use empty::render_empty_state;
use footer::{render_footer, render_status};
use header::render_header;
use input::render_input_box;
use pager::render_pagination;
use picker::render_picker;
use settings::render_settings;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line. Returns row + 1.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders a complete frame.
pub fn render_frame(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let footer_row = rows.saturating_sub(1);
    let status_row = footer_row.saturating_sub(2);

    match &vm.body {
        Body::Feed(feed) => {
            render_feed(current_row, feed, theme, cols);
            render_pagination(
                status_row.saturating_sub(1),
                &feed.pagination,
                feed.current_page,
                theme,
                cols,
            );
        }
        Body::Settings(settings) => {
            render_settings(current_row, settings, theme, cols);
        }
    }

    render_status(status_row, vm.status.as_ref(), theme, cols);
    render_border(footer_row.saturating_sub(1), &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}

fn render_feed(row: usize, feed: &FeedView, theme: &Theme, cols: usize) {
    if let Some(picker) = &feed.picker {
        render_picker(row, picker, theme, cols);
        return;
    }

    let mut current_row = row;
    if let Some(input) = &feed.input_box {
        current_row = render_input_box(current_row, input, theme, cols);
    }

    current_row = render_table_headers(current_row, theme, cols);
    if let Some(empty) = &feed.empty_state {
        render_empty_state(current_row, empty, theme, cols);
        return;
    }
    current_row = render_table_rows(current_row, &feed.rows, theme, cols);

    if let Some(detail) = &feed.detail {
        current_row = render_border(current_row, &theme.colors.border, cols);
        render_detail(current_row, detail, theme, cols);
    }
}
