use crate::core::JarOverview;

const BAR_CELLS: usize = 10;
const COLUMN_GAP: &str = "  ";

/// Formats an integer amount with comma digit groups: `Rp 1,250,000`.
pub fn money(symbol: &str, amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if symbol.is_empty() {
        grouped
    } else {
        format!("{} {}", symbol, grouped)
    }
}

/// Ten-cell bar followed by the percentage: `[█████     ] 50%`.
pub fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) / BAR_CELLS;
    format!(
        "[{}{}] {}%",
        "█".repeat(filled),
        " ".repeat(BAR_CELLS - filled),
        percent
    )
}

pub fn status_glyph(complete: bool) -> &'static str {
    if complete {
        "✅"
    } else {
        "⏳"
    }
}

pub fn display_timestamp(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Renders rows as plain aligned columns, header first.
pub fn table(headers: &[(&str, Align)], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers
        .iter()
        .map(|(title, _)| title.chars().count())
        .collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(widths.len()) {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let render = |cells: Vec<&str>| -> String {
        let parts: Vec<String> = cells
            .iter()
            .zip(headers.iter())
            .zip(widths.iter())
            .map(|((cell, (_, align)), width)| {
                let pad = width.saturating_sub(cell.chars().count());
                match align {
                    Align::Left => format!("{}{}", cell, " ".repeat(pad)),
                    Align::Right => format!("{}{}", " ".repeat(pad), cell),
                }
            })
            .collect();
        parts.join(COLUMN_GAP).trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render(headers.iter().map(|(title, _)| *title).collect()));
    let total = widths.iter().sum::<usize>()
        + COLUMN_GAP.len() * widths.len().saturating_sub(1);
    lines.push("-".repeat(total));
    for row in rows {
        lines.push(render(row.iter().map(String::as_str).collect()));
    }
    lines
}

/// Table lines for the jar listing.
pub fn overview_table(symbol: &str, rows: &[JarOverview]) -> Vec<String> {
    let headers = [
        ("No", Align::Right),
        ("Name", Align::Left),
        ("Saved", Align::Right),
        ("Target", Align::Right),
        ("Status", Align::Left),
        ("Progress", Align::Left),
        ("Created", Align::Left),
        ("Updated", Align::Left),
        ("Days to goal", Align::Left),
    ];
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.index.to_string(),
                row.jar.name.clone(),
                money(symbol, row.jar.current),
                money(symbol, row.jar.target),
                status_glyph(row.complete).to_string(),
                progress_bar(row.percent),
                display_timestamp(&row.jar.created_at).to_string(),
                display_timestamp(&row.jar.updated_at).to_string(),
                row.completion.to_string(),
            ]
        })
        .collect();
    table(&headers, &cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money("Rp", 0), "Rp 0");
        assert_eq!(money("Rp", 999), "Rp 999");
        assert_eq!(money("Rp", 1_000), "Rp 1,000");
        assert_eq!(money("Rp", 1_100_000), "Rp 1,100,000");
        assert_eq!(money("", 12_345), "12,345");
    }

    #[test]
    fn progress_bar_fills_per_ten_percent() {
        assert_eq!(progress_bar(0), "[          ] 0%");
        assert_eq!(progress_bar(50), "[█████     ] 50%");
        assert_eq!(progress_bar(59), "[█████     ] 59%");
        assert_eq!(progress_bar(100), "[██████████] 100%");
    }

    #[test]
    fn table_aligns_columns() {
        let lines = table(
            &[("No", Align::Right), ("Name", Align::Left)],
            &[
                vec!["1".into(), "Laptop".into()],
                vec!["10".into(), "Go".into()],
            ],
        );
        assert_eq!(lines[0], "No  Name");
        assert_eq!(lines[1], "----------");
        assert_eq!(lines[2], " 1  Laptop");
        assert_eq!(lines[3], "10  Go");
    }

    #[test]
    fn blank_timestamp_renders_dash() {
        assert_eq!(display_timestamp(""), "-");
        assert_eq!(display_timestamp("2025-08-01 10:00:00"), "2025-08-01 10:00:00");
    }
}
