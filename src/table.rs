// src/table.rs
use crate::data::{Column, PriceRecord, PriceTable};

/// Records → table, order and text untouched.
pub fn format(records: Vec<PriceRecord>) -> PriceTable {
    PriceTable::new(records)
}

/// Fixed-width text table, right-aligned, no row indices.
/// Columns are padded to the wider of header and longest value.
pub fn render(rows: &[PriceRecord], columns: &[Column]) -> String {
    let widths: Vec<usize> = columns
        .iter()
        .map(|&c| {
            rows.iter()
                .map(|r| r.get(c).chars().count())
                .fold(c.header().chars().count(), usize::max)
        })
        .collect();

    let mut out = s!();
    push_line(&mut out, columns.iter().map(|c| c.header()), &widths);
    for r in rows {
        push_line(&mut out, columns.iter().map(|&c| r.get(c)), &widths);
    }
    out
}

pub fn render_table(table: &PriceTable) -> String {
    render(table.rows(), &Column::ALL)
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &w)| format!("{:>w$}", cell, w = w))
        .collect();
    out.push_str(&line.join(" "));
    out.push('\n');
}
