//! Plain-text tables sized to the terminal.

use crate::ui;

/// Columns never shrink below this, so headers stay readable.
const MIN_COLUMN_WIDTH: usize = 6;
/// Spaces between columns.
const COLUMN_GAP: usize = 2;

/// Rendering knobs, resolved from [`ui::prefs`] for real output and set
/// directly in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct TableOptions {
    /// Cap on the rendered width; the widest columns shrink to fit.
    pub max_width: Option<usize>,
    /// Apply ANSI colors to status cells.
    pub color: bool,
}

impl TableOptions {
    /// Options matching the detected terminal.
    #[must_use]
    pub fn from_ui() -> Self {
        let prefs = ui::prefs();
        Self {
            max_width: prefs.term_width,
            color: prefs.table_color,
        }
    }
}

/// Render `rows` under `headers` as an aligned table. Rows shorter than
/// the header list are padded with empty cells; numeric cells are
/// right-aligned.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: &TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate().take(widths.len()) {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }
    if let Some(max_width) = options.max_width {
        fit_widths(&mut widths, max_width);
    }

    let header_cells: Vec<String> = headers.iter().map(|header| (*header).to_owned()).collect();
    let separator: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(&header_cells, &widths, false));
    lines.push(format_row(&separator, &widths, false));
    for row in rows {
        lines.push(format_row(row, &widths, options.color));
    }
    lines.join("\n")
}

fn format_row(cells: &[String], widths: &[usize], color: bool) -> String {
    let mut line = String::new();
    for (index, width) in widths.iter().enumerate() {
        let width = *width;
        let raw = cells.get(index).map_or("", String::as_str);
        let text = truncated(raw, width);
        let padded = if is_numeric(raw) {
            format!("{text:>width$}")
        } else {
            format!("{text:<width$}")
        };
        if color {
            line.push_str(&colorize_status(&padded));
        } else {
            line.push_str(&padded);
        }
        if index + 1 < widths.len() {
            line.push_str(&" ".repeat(COLUMN_GAP));
        }
    }
    line.trim_end().to_owned()
}

/// Shrink the widest column one character at a time until the table fits,
/// stopping at the per-column floor.
fn fit_widths(widths: &mut [usize], max_width: usize) {
    let rendered_width =
        |widths: &[usize]| widths.iter().sum::<usize>() + COLUMN_GAP * widths.len().saturating_sub(1);

    while rendered_width(widths) > max_width {
        let Some(widest) = widths
            .iter()
            .enumerate()
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index)
        else {
            return;
        };
        if widths[widest] <= MIN_COLUMN_WIDTH {
            return;
        }
        widths[widest] -= 1;
    }
}

fn truncated(cell: &str, width: usize) -> String {
    if cell.chars().count() <= width {
        return cell.to_owned();
    }
    let mut text: String = cell.chars().take(width.saturating_sub(1)).collect();
    text.push('…');
    text
}

fn is_numeric(cell: &str) -> bool {
    !cell.is_empty() && cell.parse::<f64>().is_ok()
}

fn colorize_status(cell: &str) -> String {
    let code = match cell.trim() {
        "active" => "\x1b[32m",
        "inactive" => "\x1b[33m",
        "decommissioned" => "\x1b[31m",
        _ => return cell.to_owned(),
    };
    format!("{code}{cell}\x1b[0m")
}
