//! Pagination bar.

use crate::pagination::PageToken;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

/// Renders `‹ 1 … 9 [10] 11 … 20 ›`, centered. Returns row + 1.
pub fn render_pagination(
    row: usize,
    tokens: &[PageToken],
    current: u32,
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(row, 1);
    if tokens.len() <= 1 {
        print!("{}", " ".repeat(cols));
        return row + 1;
    }

    let labels: Vec<(String, bool)> = tokens
        .iter()
        .map(|token| match token {
            PageToken::Page(n) if *n == current => (format!("[{n}]"), true),
            other => (other.to_string(), false),
        })
        .collect();
    let width = labels.iter().map(|(l, _)| l.chars().count() + 1).sum::<usize>() + 3;
    let padding = cols.saturating_sub(width) / 2;

    print!("{}", " ".repeat(padding));
    print!("{}‹ ", Theme::fg(&theme.colors.text_dim));
    for (label, is_current) in &labels {
        if *is_current {
            print!("{}{}{label}{}", Theme::bold(), Theme::fg(&theme.colors.accent_fg), Theme::reset());
            print!("{} ", Theme::fg(&theme.colors.text_dim));
        } else {
            print!("{label} ");
        }
    }
    print!("›");
    print!("{}", " ".repeat(cols.saturating_sub(padding + width)));
    print!("{}", Theme::reset());
    row + 1
}
