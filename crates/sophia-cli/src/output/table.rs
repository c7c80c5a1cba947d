//! Plain-text table layout for `--format table`.

const GAP: &str = "  ";
const MIN_COLUMN: usize = 4;
const ELLIPSIS: char = '…';
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

#[derive(Clone, Copy, Debug, Default)]
pub struct Layout {
    /// Total width to fit into; `None` never truncates.
    pub width: Option<usize>,
    /// Bold the header row.
    pub color: bool,
}

/// Render rows under the given headers, one line per row.
///
/// Cells are flattened to a single line. When a width is set, the widest
/// columns give up space first until the table fits or every column is at
/// its floor.
#[must_use]
pub fn render(headers: &[String], rows: &[Vec<String>], layout: Layout) -> String {
    let rows = rows
        .iter()
        .map(|row| row.iter().map(|cell| single_line(cell)).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    if let Some(max) = layout.width {
        shrink(&mut widths, headers, max);
    }

    let mut out = Vec::with_capacity(rows.len() + 2);
    let header = join_cells(headers.iter().map(String::as_str), &widths);
    let rule = "-".repeat(header.trim_end().chars().count());
    out.push(if layout.color {
        format!("{BOLD}{}{RESET}", header.trim_end())
    } else {
        header.trim_end().to_string()
    });
    out.push(rule);
    for row in &rows {
        out.push(join_cells(row.iter().map(String::as_str), &widths).trim_end().to_string());
    }
    out.join("\n")
}

fn join_cells<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| pad(&fit(cell, *width), *width))
        .collect::<Vec<_>>()
        .join(GAP)
}

fn shrink(widths: &mut [usize], headers: &[String], max: usize) {
    let total = |w: &[usize]| w.iter().sum::<usize>() + GAP.len() * w.len().saturating_sub(1);
    let floors = headers
        .iter()
        .map(|h| h.chars().count().max(MIN_COLUMN))
        .collect::<Vec<_>>();

    while total(&*widths) > max {
        let widest = widths
            .iter()
            .zip(&floors)
            .enumerate()
            .filter(|(_, (w, floor))| w > floor)
            .max_by_key(|(_, (w, _))| **w)
            .map(|(i, _)| i);
        let Some(i) = widest else { break };
        widths[i] -= 1;
    }
}

fn single_line(cell: &str) -> String {
    let mut lines = cell.lines().filter(|l| !l.trim().is_empty());
    match (lines.next(), lines.next()) {
        (None, _) => String::new(),
        (Some(first), None) => first.trim().to_string(),
        (Some(first), Some(_)) => format!("{} {ELLIPSIS}", first.trim()),
    }
}

fn fit(cell: &str, width: usize) -> String {
    if cell.chars().count() <= width {
        return cell.to_string();
    }
    let mut out = cell.chars().take(width.saturating_sub(1)).collect::<String>();
    out.push(ELLIPSIS);
    out
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{cell}{}", " ".repeat(width.saturating_sub(len)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn columns_align_to_widest_cell() {
        let out = render(
            &headers(&["id", "title"]),
            &[row(&["snp-1", "Two Sum"]), row(&["snp-22", "BFS"])],
            Layout::default(),
        );
        assert_eq!(
            out,
            "id      title\n-------------\nsnp-1   Two Sum\nsnp-22  BFS"
        );
    }

    #[test]
    fn multiline_cells_show_first_line() {
        let out = render(
            &headers(&["code"]),
            &[row(&["\ndef f():\n    return 1\n"])],
            Layout::default(),
        );
        assert_eq!(out.lines().nth(2), Some("def f(): …"));
    }

    #[test]
    fn narrow_layout_truncates_widest_column() {
        let out = render(
            &headers(&["id", "title"]),
            &[row(&["snp-1", "a rather long snippet title"])],
            Layout {
                width: Some(20),
                color: false,
            },
        );
        for line in out.lines() {
            assert!(line.chars().count() <= 20, "{line}");
        }
        assert!(out.contains(ELLIPSIS));
        assert!(out.contains("snp-1"));
    }

    #[test]
    fn color_bolds_header_only() {
        let out = render(
            &headers(&["id"]),
            &[row(&["x"])],
            Layout {
                width: None,
                color: true,
            },
        );
        assert!(out.starts_with(BOLD));
        assert_eq!(out.matches(BOLD).count(), 1);
    }
}
