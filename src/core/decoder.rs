//! Turns a hole matrix into text.

use std::fmt::Write;

use crate::core::format::CardFormat;
use crate::core::sampler::HoleMatrix;
use crate::core::stencil::TranslationTable;

const HOLE: char = '0';
const BLANK: char = '.';

/// Decode each column through `table`; one character per column.
pub fn word_from_matrix(matrix: &HoleMatrix, table: &TranslationTable) -> String {
    matrix.columns().map(|column| table.decode(column)).collect()
}

/// Fixed-width card picture: top border, the decoded word, one line per row
/// (`0` for a hole, `.` otherwise) and a bottom border.
///
/// ```text
///   ________
/// / HELLO•••|
/// | 0.......|
/// ...
/// `---------
/// ```
pub fn diagram_from_matrix(matrix: &HoleMatrix, format: &CardFormat, word: &str) -> String {
    let columns = format.columns;
    let mut out = String::new();

    writeln!(&mut out, "  {}", "_".repeat(columns)).ok();

    let mut label: String = word.chars().take(columns).collect();
    let shown = label.chars().count();
    label.extend(std::iter::repeat_n(' ', columns - shown));
    writeln!(&mut out, "/ {label}|").ok();

    for row in 0..format.rows {
        out.push_str("| ");
        for col in 0..columns {
            out.push(if matrix.get(col, row) { HOLE } else { BLANK });
        }
        out.push_str("|\n");
    }

    write!(&mut out, "`-{}", "-".repeat(columns)).ok();
    out
}

/// One `1`/`0` string per row. Rows read left to right unless the format
/// asks for reversed export.
pub fn row_bits(matrix: &HoleMatrix, format: &CardFormat) -> Vec<String> {
    (0..format.rows)
        .map(|row| {
            let bits = (0..format.columns).map(|col| if matrix.get(col, row) { '1' } else { '0' });
            if format.is_reversed() {
                bits.rev().collect()
            } else {
                bits.collect()
            }
        })
        .collect()
}
