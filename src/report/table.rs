//! Markdown table layout

/// Render a markdown table with a left-aligned first column and centered rest
///
/// No rows renders as an empty string rather than a header-only table.
///
/// # Examples
///
/// ```
/// use size_report::report::markdown_table;
///
/// let table = markdown_table(&["File", "Size"], &[vec!["a.js".to_string(), "1 kB".to_string()]]);
/// assert_eq!(table, "| File | Size |\n| :--- | :---: |\n| a.js | 1 kB |");
///
/// assert_eq!(markdown_table(&["File", "Size"], &[]), "");
/// ```
pub fn markdown_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let alignments: Vec<&str> = (0..headers.len())
        .map(|i| if i == 0 { ":---" } else { ":---:" })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(table_row(headers.iter().copied()));
    lines.push(table_row(alignments.iter().copied()));
    lines.extend(rows.iter().map(|row| table_row(row.iter().map(String::as_str))));
    lines.join("\n")
}

fn table_row<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    format!("| {} |", cells.collect::<Vec<_>>().join(" | "))
}
