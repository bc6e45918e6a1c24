//! Named source text and the positioned error formatter.

use std::sync::Arc;

use loz_ir::Position;

use crate::span_utils::LineOffsetTable;
use crate::{ErrorCode, Location, Phase, TemplateError};

/// A template source: its name, its full text and its line table.
///
/// Built once per document. The cursor resolves positions through it and
/// every positioned error is rendered from it.
#[derive(Clone, Debug)]
pub struct SourceText<'a> {
    name: Arc<str>,
    text: &'a str,
    lines: LineOffsetTable,
}

impl<'a> SourceText<'a> {
    pub fn new(name: impl Into<Arc<str>>, text: &'a str) -> Self {
        SourceText {
            name: name.into(),
            text,
            lines: LineOffsetTable::build(text),
        }
    }

    #[inline]
    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn lines(&self) -> &LineOffsetTable {
        &self.lines
    }

    /// Resolve a byte offset to a full position.
    pub fn position_at(&self, offset: usize) -> Position {
        let (line, column) = self.lines.offset_to_line_col(self.text, offset);
        Position::new(offset, line, column)
    }

    /// Render the line containing `position` with a caret under its column.
    ///
    /// Tabs before the column are kept in the padding so the caret lines up
    /// with the text when displayed.
    pub fn render_caret(&self, position: Position) -> String {
        let line = self
            .lines
            .line_text(self.text, position.line)
            .unwrap_or_default();
        let mut rendered = String::with_capacity(line.len() * 2 + 2);
        rendered.push_str(line);
        rendered.push('\n');
        for c in line.chars().take(position.column.saturating_sub(1) as usize) {
            rendered.push(if c == '\t' { '\t' } else { ' ' });
        }
        rendered.push('^');
        rendered
    }

    /// Build a positioned error at `position`.
    pub fn error(
        &self,
        phase: Phase,
        code: ErrorCode,
        position: Position,
        message: impl Into<String>,
    ) -> TemplateError {
        let location = Location {
            source: Arc::clone(&self.name),
            position,
        };
        TemplateError::new(phase, code, message).at(location, self.render_caret(position))
    }

    /// Build a positioned error at a byte offset.
    pub fn error_at(
        &self,
        phase: Phase,
        code: ErrorCode,
        offset: usize,
        message: impl Into<String>,
    ) -> TemplateError {
        self.error(phase, code, self.position_at(offset), message)
    }
}

#[cfg(test)]
mod tests;
