//! The template error type.

use std::fmt;
use std::sync::Arc;

use loz_ir::Position;

use crate::ErrorCode;

/// Pipeline phase that produced an error.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Phase {
    /// Lexing: unbalanced delimiters, missing macro braces.
    Tokenizer,
    /// Parsing: unknown macros, unexpected tokens.
    Parse,
    /// Emitting: handler or formatter failures.
    Emit,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Tokenizer => write!(f, "tokenizer"),
            Phase::Parse => write!(f, "parse"),
            Phase::Emit => write!(f, "emit"),
        }
    }
}

/// Where an error occurred.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Location {
    pub source: Arc<str>,
    pub position: Position,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.position)
    }
}

/// A recoverable compilation failure.
///
/// Aborts the current compilation only. Positioned errors carry a rendered
/// caret snippet of the offending line; see
/// [`SourceText::error`](crate::SourceText::error).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TemplateError {
    phase: Phase,
    code: ErrorCode,
    location: Option<Location>,
    snippet: Option<String>,
    message: String,
}

impl TemplateError {
    /// Create an unpositioned error.
    pub fn new(phase: Phase, code: ErrorCode, message: impl Into<String>) -> Self {
        TemplateError {
            phase,
            code,
            location: None,
            snippet: None,
            message: message.into(),
        }
    }

    /// Attach a location and its rendered snippet.
    #[must_use]
    pub fn at(mut self, location: Location, snippet: impl Into<String>) -> Self {
        self.location = Some(location);
        self.snippet = Some(snippet.into());
        self
    }

    /// Handler failure while producing output.
    pub fn handler(message: impl Into<String>) -> Self {
        Self::new(Phase::Emit, ErrorCode::E2001, message)
    }

    /// Formatter rejected the emitted source.
    pub fn formatter(message: impl Into<String>) -> Self {
        Self::new(Phase::Emit, ErrorCode::E2002, message)
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    #[inline]
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Position of the error, if it has one.
    #[inline]
    pub fn position(&self) -> Option<Position> {
        self.location.as_ref().map(|loc| loc.position)
    }

    /// Caret-pointed rendering of the offending line.
    #[inline]
    pub fn snippet(&self) -> Option<&str> {
        self.snippet.as_deref()
    }

    /// The inner cause message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{location}: ")?;
        }
        write!(
            f,
            "{} error[{}]: {}: {}",
            self.phase,
            self.code,
            self.code.description(),
            self.message
        )?;
        if let Some(snippet) = &self.snippet {
            write!(f, "\n{snippet}")?;
        }
        Ok(())
    }
}

impl std::error::Error for TemplateError {}
