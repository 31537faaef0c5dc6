use std::collections::HashMap;
use std::sync::OnceLock;

use crate::core::error::ScanError;

/// Placeholder emitted for column patterns the table does not know.
pub const SENTINEL: char = '•';

/// Number of punch rows on the keypunch stencil: 12, 11, 0..9.
pub const KEYPUNCH_ROWS: usize = 12;

/// First text column of the stencil that carries a character.
/// Columns before it hold the row labels and the clipped corner.
const FIRST_COLUMN: usize = 5;

const PUNCH_MARK: char = 'O';

/// IBM model 029 keypunch stencil. The header lists the characters; each row
/// line marks with `O` the characters that need a hole in that row.
pub const IBM_029_STENCIL: &str = r##"
    /&-0123456789ABCDEFGHIJKLMNOPQR/STUVWXYZ:#@'="`.<(+|!$*);^~,%_>? |
12 / O           OOOOOOOOO                        OOOOOO             |
11|   O                   OOOOOOOOO                     OOOOOO       |
 0|    O                           OOOOOOOOO                  OOOOOO |
 1|     O        O        O        O                                 |
 2|      O        O        O        O       O     O     O     O      |
 3|       O        O        O        O       O     O     O     O     |
 4|        O        O        O        O       O     O     O     O    |
 5|         O        O        O        O       O     O     O     O   |
 6|          O        O        O        O       O     O     O     O  |
 7|           O        O        O        O       O     O     O     O |
 8|            O        O        O        O OOOOOOOOOOOOOOOOOOOOOOOO |
 9|             O        O        O        O                         |
  |__________________________________________________________________|"##;

/// Lookup from a per-column hole pattern (rows top to bottom) to a character.
#[derive(Debug, Clone)]
pub struct TranslationTable {
    rows: usize,
    by_pattern: HashMap<Vec<bool>, char>,
    by_char: HashMap<char, Vec<bool>>,
}

impl TranslationTable {
    /// Transpose a stencil into a pattern table.
    ///
    /// The stencil is one header line followed by [`KEYPUNCH_ROWS`] row lines;
    /// anything after them (the bottom frame) is ignored. Leading blank lines
    /// are skipped. Blank header positions are frame gutters, not characters.
    pub fn from_stencil(stencil: &str) -> Result<Self, ScanError> {
        let mut lines = stencil.lines().skip_while(|line| line.trim().is_empty());
        let header: Vec<char> = lines
            .next()
            .ok_or_else(|| ScanError::Stencil("missing header line".to_string()))?
            .trim_end()
            .chars()
            .collect();
        let width = header.len();
        if width <= FIRST_COLUMN + 1 {
            return Err(ScanError::Stencil(format!(
                "header is only {width} columns wide"
            )));
        }

        let mut rows: Vec<Vec<char>> = Vec::with_capacity(KEYPUNCH_ROWS);
        for index in 0..KEYPUNCH_ROWS {
            let line = lines.next().ok_or_else(|| {
                ScanError::Stencil(format!(
                    "expected {KEYPUNCH_ROWS} row lines, found {index}"
                ))
            })?;
            let row: Vec<char> = line.trim_end().chars().collect();
            if row.len() != width {
                return Err(ScanError::Stencil(format!(
                    "row line {} is {} columns wide, header is {}",
                    index + 1,
                    row.len(),
                    width
                )));
            }
            rows.push(row);
        }

        let mut by_pattern = HashMap::new();
        let mut by_char = HashMap::new();
        // The last column is the right-hand frame.
        for col in FIRST_COLUMN..width - 1 {
            let ch = header[col];
            if ch.is_whitespace() {
                continue;
            }
            let mut pattern = Vec::with_capacity(KEYPUNCH_ROWS);
            for row in &rows {
                match row[col] {
                    PUNCH_MARK => pattern.push(true),
                    ' ' => pattern.push(false),
                    other => {
                        return Err(ScanError::Stencil(format!(
                            "unexpected mark '{other}' under '{ch}'"
                        )));
                    }
                }
            }
            if let Some(previous) = by_pattern.insert(pattern.clone(), ch) {
                return Err(ScanError::Stencil(format!(
                    "'{previous}' and '{ch}' share the same punch pattern"
                )));
            }
            by_char.insert(ch, pattern);
        }

        Ok(Self {
            rows: KEYPUNCH_ROWS,
            by_pattern,
            by_char,
        })
    }

    /// Shared table built from [`IBM_029_STENCIL`] on first use.
    pub fn keypunch029() -> &'static TranslationTable {
        static TABLE: OnceLock<TranslationTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            TranslationTable::from_stencil(IBM_029_STENCIL)
                .expect("built-in IBM 029 stencil must be well formed")
        })
    }

    /// Number of rows every pattern in the table has.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.by_pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pattern.is_empty()
    }

    /// Resolve a column pattern, falling back to [`SENTINEL`].
    pub fn decode(&self, pattern: &[bool]) -> char {
        self.by_pattern.get(pattern).copied().unwrap_or(SENTINEL)
    }

    /// Punch pattern for a character; lowercase letters use their uppercase form.
    pub fn encode(&self, ch: char) -> Option<&[bool]> {
        self.by_char
            .get(&ch.to_ascii_uppercase())
            .map(Vec::as_slice)
    }
}
