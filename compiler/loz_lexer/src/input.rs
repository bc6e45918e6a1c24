//! Position-tracking cursor over template source.
//!
//! The cursor walks a [`SourceText`] and keeps the current line and column
//! up to date as it goes. Moving forward only counts the runes stepped over;
//! the line table is consulted when seeking backwards.
//!
//! # Failure Semantics
//!
//! Offsets passed to [`Input::seek`] must come from the cursor itself.
//! Seeking past the end of the source or into the middle of a UTF-8
//! sequence is a programmer error and panics. Content-driven failures are
//! reported as [`ScanFailure`] or [`TemplateError`] values instead.

use std::fmt;

use loz_diagnostic::span_utils::column_between;
use loz_diagnostic::{ErrorCode, Phase, SourceText, TemplateError};
use loz_ir::{Position, Slice};
use regex::Regex;

/// A predicate rejected the input during [`Input::try_read_while`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanFailure {
    /// Where the predicate failed (end of input when it failed on `None`).
    pub position: Position,
    pub message: String,
}

impl fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.position)
    }
}

impl std::error::Error for ScanFailure {}

/// Scan state over one source document.
///
/// Owned by a single compilation; cheap to clone for speculative scans.
#[derive(Clone, Debug)]
pub struct Input<'a> {
    source: &'a SourceText<'a>,
    offset: usize,
    line: u32,
    column: u32,
}

impl<'a> Input<'a> {
    /// Create a cursor at the start of `source`.
    pub fn new(source: &'a SourceText<'a>) -> Self {
        Input {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    #[inline]
    pub fn source(&self) -> &'a SourceText<'a> {
        self.source
    }

    /// Current byte offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Current 1-based line.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Current position.
    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.offset, self.line, self.column)
    }

    /// Returns `true` once every byte has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Unconsumed input.
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.source.text()[self.offset..]
    }

    /// Next rune without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Rune `n` places ahead of the current one (`peek_nth(0) == peek()`).
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Consume one rune.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.seek(self.offset + c.len_utf8());
        Some(c)
    }

    /// Consume `expected` if it is the next rune.
    pub fn consume(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.seek(self.offset + expected.len_utf8());
            true
        } else {
            false
        }
    }

    /// Consume a literal prefix.
    pub fn consume_prefix(&mut self, prefix: &str) -> Option<Slice> {
        if !self.remaining().starts_with(prefix) {
            return None;
        }
        let start = self.offset;
        self.seek(start + prefix.len());
        Some(self.slice(start, self.offset))
    }

    /// Consume the text matched by `pattern` at the current offset.
    ///
    /// A match that starts later in the input does not count.
    pub fn consume_pattern(&mut self, pattern: &Regex) -> Option<Slice> {
        let found = pattern.find(self.remaining())?;
        if found.start() != 0 {
            return None;
        }
        let start = self.offset;
        self.seek(start + found.end());
        Some(self.slice(start, self.offset))
    }

    /// Consume the maximal run of runes satisfying `pred`.
    ///
    /// An empty run is a valid result.
    pub fn read_while(&mut self, mut pred: impl FnMut(char) -> bool) -> Slice {
        let start = self.offset;
        let len = self
            .remaining()
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(self.remaining().len(), |(i, _)| i);
        self.seek(start + len);
        self.slice(start, self.offset)
    }

    /// Consume runes while a fallible predicate accepts them.
    ///
    /// The predicate sees `None` at end of input, so it can reject running
    /// out of text. On failure the cursor rewinds to where the attempt
    /// started and the error carries the position of the rejected rune.
    pub fn try_read_while<F>(&mut self, mut pred: F) -> Result<Slice, ScanFailure>
    where
        F: FnMut(Option<char>) -> Result<bool, String>,
    {
        let start = self.offset;
        loop {
            let next = self.peek();
            match pred(next) {
                Ok(true) => {
                    if self.advance().is_none() {
                        break;
                    }
                }
                Ok(false) => break,
                Err(message) => {
                    let position = self.position();
                    self.seek(start);
                    return Err(ScanFailure { position, message });
                }
            }
        }
        Ok(self.slice(start, self.offset))
    }

    /// Consume a run of literal text: everything up to the next space, tab,
    /// newline or `marker`.
    pub fn read_text_run(&mut self, marker: char) -> Slice {
        let start = self.offset;
        let rest = self.remaining().as_bytes();
        let mut needle = [0u8; 4];
        let marker = marker.encode_utf8(&mut needle).as_bytes();
        // The marker only matters before the first separator
        let run = memchr::memchr3(b' ', b'\t', b'\n', rest).unwrap_or(rest.len());
        let stop = memchr::memmem::find(&rest[..run], marker).unwrap_or(run);
        self.seek(start + stop);
        self.slice(start, self.offset)
    }

    /// Move to an absolute byte offset.
    ///
    /// # Panics
    /// Panics if `offset` is past the end of the source or not on a `char`
    /// boundary.
    pub fn seek(&mut self, offset: usize) {
        let text = self.source.text();
        assert!(
            offset <= text.len(),
            "seek to offset {offset} past end of `{}` ({} bytes)",
            self.source.name(),
            text.len()
        );
        assert!(
            text.is_char_boundary(offset),
            "seek to offset {offset} splits a UTF-8 sequence in `{}`",
            self.source.name()
        );

        if offset >= self.offset {
            let (lines, column) = advance_line_col(&text[self.offset..offset], self.column);
            self.line += lines;
            self.column = column;
        } else {
            let lines = self.source.lines();
            self.line = lines.line_from_offset(offset);
            let line_start = lines.line_start_offset(self.line).unwrap_or(0);
            self.column = column_between(text, line_start, offset);
        }
        self.offset = offset;
    }

    /// Step back over `expected`, which must be the text just consumed.
    ///
    /// # Panics
    /// Panics if the input before the cursor does not end with `expected`.
    pub fn unshift(&mut self, expected: &str) {
        let consumed = &self.source.text()[..self.offset];
        assert!(
            consumed.ends_with(expected),
            "unshift of {expected:?} does not match consumed input at offset {}",
            self.offset
        );
        self.seek(self.offset - expected.len());
    }

    /// Slice of the source between two offsets, text included verbatim.
    pub fn slice(&self, start: usize, end: usize) -> Slice {
        self.slice_with_text(start, end, &self.source.text()[start..end])
    }

    /// Slice spanning `start..end` that carries `text` instead of the
    /// covered source.
    pub fn slice_with_text(&self, start: usize, end: usize, text: impl Into<String>) -> Slice {
        Slice::new(
            self.source.name().clone(),
            text,
            self.position_at(start),
            self.position_at(end),
        )
    }

    /// Resolve an offset to a position.
    ///
    /// Offsets on the cursor's line are resolved relative to the cursor, so
    /// the cost is the distance between them rather than the line length.
    pub fn position_at(&self, offset: usize) -> Position {
        let text = self.source.text();
        if offset >= self.offset {
            let (lines, column) = advance_line_col(&text[self.offset..offset], self.column);
            return Position::new(offset, self.line + lines, column);
        }
        let between = &text[offset..self.offset];
        if memchr::memchr(b'\n', between.as_bytes()).is_none() {
            return Position::new(offset, self.line, self.column - rune_count(between));
        }
        self.source.position_at(offset)
    }

    /// Tokenizer error positioned at `offset`.
    pub fn error_at(
        &self,
        offset: usize,
        code: ErrorCode,
        message: impl Into<String>,
    ) -> TemplateError {
        self.source
            .error(Phase::Tokenizer, code, self.position_at(offset), message)
    }
}

/// Line and column reached by stepping over `stepped` from `column`.
///
/// Returns the number of newlines crossed and the new 1-based column.
fn advance_line_col(stepped: &str, column: u32) -> (u32, u32) {
    let bytes = stepped.as_bytes();
    match memchr::memrchr(b'\n', bytes) {
        None => (0, column + rune_count(stepped)),
        Some(last) => {
            let lines = memchr::memchr_iter(b'\n', bytes).count();
            (
                u32::try_from(lines).unwrap_or(u32::MAX),
                rune_count(&stepped[last + 1..]) + 1,
            )
        }
    }
}

#[inline]
fn rune_count(text: &str) -> u32 {
    u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
