//! Source-located substrings.
//!
//! A [`Slice`] is the unit of text handed to a handler: the literal text,
//! the name of the source it came from, and the start and end positions it
//! covers. Text is owned, so slices outlive the input they were cut from.

use std::fmt;
use std::sync::Arc;

use crate::Position;

/// Error when two slices cannot be joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// Slices come from different sources.
    SourceMismatch { first: Arc<str>, second: Arc<str> },
    /// The second slice does not start where the first one ends.
    NotContiguous { end: usize, start: usize },
    /// The second slice starts before the first one ends.
    Overlapping { end: usize, start: usize },
}

impl fmt::Display for JoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinError::SourceMismatch { first, second } => {
                write!(f, "cannot join slices of `{first}` and `{second}`")
            }
            JoinError::NotContiguous { end, start } => write!(
                f,
                "cannot join slices: first ends at byte {end}, second starts at byte {start}"
            ),
            JoinError::Overlapping { end, start } => write!(
                f,
                "cannot join slices: second starts at byte {start}, before first ends at byte {end}"
            ),
        }
    }
}

impl std::error::Error for JoinError {}

/// An immutable, source-located substring.
///
/// # Invariant
///
/// `start.offset <= end.offset`. The text usually equals the covered source
/// range, but marker constructs (code blocks, macro output) carry the
/// extracted code while spanning the whole construct.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slice {
    source: Arc<str>,
    text: String,
    start: Position,
    end: Position,
}

impl Slice {
    /// Create a slice.
    ///
    /// # Panics
    /// Panics if `start.offset > end.offset`.
    pub fn new(source: Arc<str>, text: impl Into<String>, start: Position, end: Position) -> Self {
        assert!(
            start.offset <= end.offset,
            "slice start {} is after slice end {}",
            start.offset,
            end.offset
        );
        Slice {
            source,
            text: text.into(),
            start,
            end,
        }
    }

    /// Name of the source this slice was cut from.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn start(&self) -> Position {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Position {
        self.end
    }

    /// Number of runes in the text.
    #[inline]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Copy of this slice carrying different text over the same span.
    #[must_use]
    pub fn with_text(&self, text: impl Into<String>) -> Slice {
        Slice {
            source: Arc::clone(&self.source),
            text: text.into(),
            start: self.start,
            end: self.end,
        }
    }

    /// Join two contiguous slices of the same source.
    ///
    /// The result spans `self.start..other.end` and its text is the
    /// concatenation of both texts.
    pub fn join(&self, other: &Slice) -> Result<Slice, JoinError> {
        self.check_source(other)?;
        if self.end != other.start {
            return Err(JoinError::NotContiguous {
                end: self.end.offset,
                start: other.start.offset,
            });
        }
        Ok(self.concat(other, ""))
    }

    /// Join two slices of the same source that may have a gap between them.
    ///
    /// `separator` is placed between the two texts. Text inside the gap is
    /// not included.
    pub fn join_with(&self, separator: &str, other: &Slice) -> Result<Slice, JoinError> {
        self.check_source(other)?;
        if self.end.offset > other.start.offset {
            return Err(JoinError::Overlapping {
                end: self.end.offset,
                start: other.start.offset,
            });
        }
        Ok(self.concat(other, separator))
    }

    fn check_source(&self, other: &Slice) -> Result<(), JoinError> {
        if self.source == other.source {
            Ok(())
        } else {
            Err(JoinError::SourceMismatch {
                first: Arc::clone(&self.source),
                second: Arc::clone(&other.source),
            })
        }
    }

    fn concat(&self, other: &Slice, separator: &str) -> Slice {
        let mut text = String::with_capacity(self.text.len() + separator.len() + other.text.len());
        text.push_str(&self.text);
        text.push_str(separator);
        text.push_str(&other.text);
        Slice {
            source: Arc::clone(&self.source),
            text,
            start: self.start,
            end: other.end,
        }
    }
}

impl fmt::Debug for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}@{}:{}..{}",
            self.text, self.source, self.start, self.end
        )
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
