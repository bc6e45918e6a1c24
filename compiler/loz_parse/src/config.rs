//! Parser configuration.

/// Default marker rune, U+25CA LOZENGE.
pub const DEFAULT_MARKER: char = '\u{25CA}';

/// Settings shared by the lexer and optimizer for one compilation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserConfig {
    /// Rune that switches from text to code.
    pub marker: char,
    /// Drop whitespace before code blocks and the newline after them.
    pub trim_spaces: bool,
}

impl ParserConfig {
    #[must_use]
    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    #[must_use]
    pub fn with_trim_spaces(mut self, trim_spaces: bool) -> Self {
        self.trim_spaces = trim_spaces;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            marker: DEFAULT_MARKER,
            trim_spaces: false,
        }
    }
}
