//! Line and column computation for source offsets.
//!
//! ## Performance
//!
//! The cursor resolves a position for every token it produces, so it keeps a
//! [`LineOffsetTable`] with pre-computed line starts for O(log L) lookup
//! instead of O(n) scanning.

/// Pre-computed line offset table for efficient line/column lookup.
///
/// # Example
///
/// ```
/// use loz_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "line1\nline2\nline3";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));  // 'l' in line1
/// assert_eq!(table.offset_to_line_col(source, 6), (2, 1));  // 'l' in line2
/// assert_eq!(table.offset_to_line_col(source, 12), (3, 1)); // 'l' in line3
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start (0-indexed lines internally).
    /// offsets[0] = 0 (line 1 starts at byte 0)
    /// offsets[1] = byte after first \n (line 2 start)
    offsets: Vec<usize>,
}

impl LineOffsetTable {
    /// Build a line offset table from source text.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0usize];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                // Next line starts at byte after the newline
                offsets.push(i + 1);
            }
        }
        LineOffsetTable { offsets }
    }

    /// Get 1-based line number from a byte offset using binary search.
    #[inline]
    pub fn line_from_offset(&self, offset: usize) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// Get 1-based (line, column) from a byte offset.
    ///
    /// The column counts characters (not bytes) from the start of the line.
    pub fn offset_to_line_col(&self, source: &str, offset: usize) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self.line_start_offset(line).unwrap_or(0);
        (line, column_between(source, line_start, offset))
    }

    /// Get the byte offset of a line start (1-based line number).
    ///
    /// Returns `None` if the line number is out of range.
    pub fn line_start_offset(&self, line: u32) -> Option<usize> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// Text of a line without its trailing newline (1-based line number).
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> Option<&'a str> {
        let start = self.line_start_offset(line)?;
        let end = self
            .line_start_offset(line + 1)
            .map_or(source.len(), |next| next - 1);
        source.get(start..end)
    }
}

/// 1-based column of `offset`, counting characters from `line_start`.
#[inline]
pub fn column_between(source: &str, line_start: usize, offset: usize) -> u32 {
    let col_text = source
        .get(line_start..offset.min(source.len()))
        .unwrap_or_default();
    u32::try_from(col_text.chars().count()).unwrap_or(u32::MAX - 1) + 1
}
