//! Source location tracking for the DsDoc lexer

#![allow(clippy::cast_possible_truncation)] // We intentionally use u32 for positions; batches > 4G lines are unsupported

/// Source location with line and column information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// 1-indexed line number
    pub line: u32,
    /// 1-indexed column number (in characters, not bytes)
    pub column: u32,
}

impl Position {
    /// Create a new position
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Build a position from a 0-indexed line and a byte offset into that line's text
    #[must_use]
    pub fn from_cursor(line_index: usize, text: &str, byte_offset: usize) -> Self {
        let column = text
            .get(..byte_offset)
            .map_or(0, |prefix| prefix.chars().count());
        Self {
            line: (line_index + 1) as u32,
            column: (column + 1) as u32,
        }
    }

    /// Shift this position down by `lines`, used to map a batch-relative
    /// position onto the source file the batch was extracted from
    #[must_use]
    pub const fn offset_lines(self, lines: u32) -> Self {
        Self {
            line: self.line + lines,
            column: self.column,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_from_cursor_counts_chars() {
        assert_eq!(Position::from_cursor(0, "hello", 0), Position::new(1, 1));
        assert_eq!(Position::from_cursor(2, "hello", 3), Position::new(3, 4));
        // 'é' is two bytes but one column
        assert_eq!(Position::from_cursor(0, "é x", 3), Position::new(1, 3));
    }

    #[test]
    fn position_offset_and_display() {
        let pos = Position::new(2, 5).offset_lines(10);
        assert_eq!(pos, Position::new(12, 5));
        assert_eq!(pos.to_string(), "12:5");
    }
}
