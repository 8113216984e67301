//! Plain-text rendering of a table page.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::actions::ActionKind;
use crate::column::{Alignment, ColumnSpec, TableRow};
use crate::page::Page;
use crate::sort::SortState;
use crate::view::TabularView;

/// Gap between columns.
const COLUMN_GAP: &str = "  ";

/// Render the view's current page: header, rows and a page footer.
pub fn render_page<T: TableRow>(view: &TabularView<T>) -> String {
    let columns = view.columns();
    let sort = view.sort();
    let page = view.page();
    render(&columns, &sort, &page)
}

/// Render a page snapshot with explicit columns and sort state.
pub fn render<T>(columns: &[ColumnSpec<T>], sort: &SortState, page: &Page<T>) -> String {
    let mut lines = Vec::with_capacity(page.len() + 3);
    lines.push(render_header(columns, sort));
    lines.push(render_rule(columns));
    if page.is_empty() {
        lines.push("No rows".to_string());
    }
    for row in page.rows() {
        lines.push(render_row(columns, row));
    }
    lines.push(render_footer(page));
    lines.join("\n")
}

/// Header line with a sort indicator on the sorted column.
///
/// The indicator goes on the side that does not shift the header text:
/// right of left-aligned headers, left of right-aligned ones.
pub fn render_header<T>(columns: &[ColumnSpec<T>], sort: &SortState) -> String {
    let cells: Vec<String> = columns
        .iter()
        .map(|col| {
            let text = match sort.direction_for(&col.id) {
                Some(direction) => match col.align {
                    Alignment::Right => format!("{} {}", direction.indicator(), col.header),
                    Alignment::Left | Alignment::Center => {
                        format!("{} {}", col.header, direction.indicator())
                    }
                },
                None => col.header.clone(),
            };
            fit(&text, col.width, col.align)
        })
        .collect();
    cells.join(COLUMN_GAP).trim_end().to_string()
}

fn render_rule<T>(columns: &[ColumnSpec<T>]) -> String {
    columns
        .iter()
        .map(|col| "─".repeat(col.width as usize))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
}

/// One row, each cell fitted to its column width.
pub fn render_row<T>(columns: &[ColumnSpec<T>], row: &T) -> String {
    let cells: Vec<String> = columns
        .iter()
        .map(|col| {
            let value = col.value(row);
            fit(&col.display_value(&value, row), col.width, col.align)
        })
        .collect();
    cells.join(COLUMN_GAP).trim_end().to_string()
}

/// Footer, e.g. `Page 1 of 2 (12 rows)`.
pub fn render_footer<T>(page: &Page<T>) -> String {
    let mut footer = format!(
        "Page {} of {} ({} rows",
        if page.page_count() == 0 { 0 } else { page.index() + 1 },
        page.page_count(),
        page.filtered_count()
    );
    if page.filtered_count() != page.total_count() {
        footer.push_str(&format!(", {} total", page.total_count()));
    }
    footer.push(')');
    footer
}

/// Menu entries for an open row menu, one per line.
pub fn render_menu(actions: &[ActionKind]) -> String {
    let width = actions
        .iter()
        .map(|a| a.label().width())
        .max()
        .unwrap_or(0);
    actions
        .iter()
        .map(|a| format!("│ {} │", fit(a.label(), width as u16, Alignment::Left)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pad or truncate text to exactly `width` display columns.
///
/// Truncated text ends with `…`.
pub fn fit(text: &str, width: u16, align: Alignment) -> String {
    let width = width as usize;
    let text = text.replace(['\n', '\r', '\t'], " ");
    let text = if text.width() > width {
        truncate(&text, width)
    } else {
        text
    };
    let pad = width.saturating_sub(text.width());
    match align {
        Alignment::Left => format!("{}{}", text, " ".repeat(pad)),
        Alignment::Right => format!("{}{}", " ".repeat(pad), text),
        Alignment::Center => {
            let left = pad / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let budget = width - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_pads_and_aligns() {
        assert_eq!(fit("ab", 4, Alignment::Left), "ab  ");
        assert_eq!(fit("ab", 4, Alignment::Right), "  ab");
        assert_eq!(fit("ab", 5, Alignment::Center), " ab  ");
    }

    #[test]
    fn test_fit_truncates_with_ellipsis() {
        assert_eq!(fit("Summer sale", 6, Alignment::Left), "Summe…");
        assert_eq!(fit("abc", 0, Alignment::Left), "");
    }

    #[test]
    fn test_fit_wide_chars() {
        // Each CJK char is two columns wide.
        let out = fit("夏季促销", 5, Alignment::Left);
        assert_eq!(out.width(), 5);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn test_render_menu() {
        let menu = render_menu(&[ActionKind::View, ActionKind::Delete]);
        assert_eq!(menu, "│ View   │\n│ Delete │");
    }
}
