//! Source positions attached to tokens and diagnostics.

use std::fmt::{Display, Formatter, Result};

/// Position of a token in the source: line plus the column span it covers.
/// The column counter is reset whenever a line break is consumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub line: u32,
    pub start_column: u32,
    pub end_column: u32,
}

impl Position {
    pub fn new(line: u32, start_column: u32, end_column: u32) -> Self {
        Self {
            line,
            start_column,
            end_column,
        }
    }

    /// Extend the span by one column.
    pub fn advance(&mut self) {
        self.end_column += 1;
    }

    /// Move to the start of the next line.
    pub fn newline(&mut self) {
        self.line += 1;
        self.end_column = 1;
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "({}, {}-{})",
            self.line, self.start_column, self.end_column
        )
    }
}
