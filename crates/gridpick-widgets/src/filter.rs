//! Case-insensitive substring filtering across every column's rendered value.

use crate::data::{Column, Row};

/// Indices of the rows that match `query`, in input order.
///
/// A blank (empty or all-whitespace) query keeps every row.  Otherwise a row
/// is kept when any column's rendered value, lowercased, contains the
/// lowercased query.  The query itself is not trimmed, so `"ada "` only
/// matches text with a space after "ada".
pub fn filter_indices(rows: &[Row], columns: &[Column], query: &str) -> Vec<usize> {
    if query.trim().is_empty() {
        return (0..rows.len()).collect();
    }
    let needle = query.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            columns
                .iter()
                .any(|col| col.render(row).to_lowercase().contains(&needle))
        })
        .map(|(i, _)| i)
        .collect()
}

/// The rows that match `query`, in input order. See [`filter_indices`].
pub fn filter_rows<'a>(rows: &'a [Row], columns: &[Column], query: &str) -> Vec<&'a Row> {
    filter_indices(rows, columns, query)
        .into_iter()
        .map(|i| &rows[i])
        .collect()
}
