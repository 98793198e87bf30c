//! Line/column positions in EDIFACT source text

use std::fmt;

/// A position in the input, 1-based in both line and column.
///
/// The column advances once per consumed character; a newline resets it and
/// increments the line, regardless of what the character means to the
/// tokenizer. Positions order naturally for diagnostics, with [`Position::EOF`]
/// sorting after every real position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Sentinel for errors raised at end of input.
    pub const EOF: Position = Position {
        line: u32::MAX,
        column: u32::MAX,
    };

    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    pub fn is_eof(&self) -> bool {
        *self == Position::EOF
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eof() {
            write!(f, "end of input")
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}
