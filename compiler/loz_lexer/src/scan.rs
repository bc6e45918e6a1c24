//! Quote-aware scanning state for embedded code.
//!
//! Delimiters inside string literals and raw spans do not count toward
//! nesting depth. The rules:
//! - `"` opens and closes a quoted span
//! - inside a quoted span, `\` escapes exactly the next rune
//! - `` ` `` opens and closes a raw span, in which quotes and escapes are inert

/// Tracks whether the scanner is inside a quoted or raw span.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct QuoteState {
    in_quote: bool,
    escaped: bool,
    in_raw: bool,
}

impl QuoteState {
    /// Feed one rune.
    ///
    /// Returns `true` when the rune is structural code: outside any quoted
    /// or raw span and not itself a span delimiter.
    pub(crate) fn feed(&mut self, c: char) -> bool {
        if self.in_raw {
            if c == '`' {
                self.in_raw = false;
            }
            return false;
        }
        if self.in_quote {
            if self.escaped {
                self.escaped = false;
            } else if c == '\\' {
                self.escaped = true;
            } else if c == '"' {
                self.in_quote = false;
            }
            return false;
        }
        match c {
            '`' => {
                self.in_raw = true;
                false
            }
            '"' => {
                self.in_quote = true;
                false
            }
            _ => true,
        }
    }

    /// Returns `true` when outside every quoted and raw span.
    #[inline]
    pub(crate) fn is_plain(&self) -> bool {
        !self.in_quote && !self.in_raw
    }
}

/// Depth counter for one open/close delimiter pair.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Balance {
    open: char,
    close: char,
    depth: usize,
    quotes: QuoteState,
    closed: bool,
}

impl Balance {
    pub(crate) fn new(open: char, close: char) -> Self {
        Balance {
            open,
            close,
            depth: 0,
            quotes: QuoteState::default(),
            closed: false,
        }
    }

    /// Predicate for [`Input::try_read_while`](crate::Input::try_read_while):
    /// accepts runes up to and including the delimiter that brings the depth
    /// back to zero, and fails if the input ends first.
    pub(crate) fn step(&mut self, next: Option<char>) -> Result<bool, String> {
        match next {
            _ if self.closed => Ok(false),
            None => Err(format!("missing closing `{}`", self.close)),
            Some(c) => {
                if self.quotes.feed(c) {
                    if c == self.open {
                        self.depth += 1;
                    } else if c == self.close {
                        self.depth = self.depth.saturating_sub(1);
                        self.closed = self.depth == 0;
                    }
                }
                Ok(true)
            }
        }
    }
}

/// Depth counter over every bracket kind, for scanning code whose end is
/// found by a terminator rather than a matching delimiter.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct Nesting {
    depth: usize,
    quotes: QuoteState,
}

impl Nesting {
    /// Returns `true` when outside every bracket and quoted span.
    #[inline]
    pub(crate) fn at_top_level(&self) -> bool {
        self.depth == 0 && self.quotes.is_plain()
    }

    /// Returns `true` inside a quoted or raw span.
    #[inline]
    pub(crate) fn in_quotes(&self) -> bool {
        !self.quotes.is_plain()
    }

    pub(crate) fn feed(&mut self, c: char) {
        if self.quotes.feed(c) {
            match c {
                '(' | '[' | '{' => self.depth += 1,
                ')' | ']' | '}' => self.depth = self.depth.saturating_sub(1),
                _ => {}
            }
        }
    }
}
