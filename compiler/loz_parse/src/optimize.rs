//! Token stream optimizer.
//!
//! One left-to-right pass over the raw lexer output:
//!
//! - whitespace and newlines become content (or are dropped under trim)
//! - adjacent tokens of the same type merge, up to [`MAX_MERGED_LEN`] runes
//! - local expressions never merge; macro and custom tokens pass through
//!
//! Trim-spaces policy is asymmetric. Whitespace directly before a code block
//! is dropped, and so is the first newline directly after one. Macro and
//! custom tokens in between do not count as separating.
//!
//! The output contains no whitespace or newline tokens, so running it
//! through the optimizer again changes nothing.

use loz_ir::{Token, TokenType};
use tracing::trace;

/// Longest text, in runes, a merge may produce. A merge that would exceed
/// it starts a new token instead.
pub const MAX_MERGED_LEN: usize = 60;

/// Optimize a raw token stream.
#[tracing::instrument(level = "debug", skip_all, fields(count = tokens.len(), trim_spaces = trim_spaces))]
pub fn optimize(tokens: Vec<Token>, trim_spaces: bool) -> Vec<Token> {
    let mut optimizer = Optimizer {
        trim_spaces,
        out: Vec::with_capacity(tokens.len()),
        held: Vec::new(),
        after_block: false,
    };
    for token in tokens {
        optimizer.feed(token);
    }
    optimizer.finish()
}

struct Optimizer {
    trim_spaces: bool,
    out: Vec<Token>,
    /// Whitespace whose fate depends on the next significant token, then
    /// any macro or custom tokens seen after it. Only used under trim.
    held: Vec<Token>,
    /// Last significant token was a code block and no newline has been
    /// dropped since.
    after_block: bool,
}

impl Optimizer {
    fn feed(&mut self, token: Token) {
        let kind = token.kind;
        if kind.is_opaque() {
            if self.held.is_empty() {
                self.out.push(token);
            } else {
                self.held.push(token);
            }
            return;
        }

        if self.trim_spaces {
            match kind {
                TokenType::Whitespace => {
                    self.release_held();
                    self.held.push(token);
                    self.after_block = false;
                    return;
                }
                TokenType::Newline if self.after_block => {
                    trace!(at = %token.slice.start(), "dropping newline after block");
                    self.after_block = false;
                    return;
                }
                _ if kind.is_code_block() => self.drop_held_whitespace(),
                _ => self.release_held(),
            }
        }

        self.after_block = kind.is_code_block();
        self.emit(token);
    }

    /// Emit held tokens, whitespace included.
    fn release_held(&mut self) {
        for token in std::mem::take(&mut self.held) {
            if token.kind.is_opaque() {
                self.out.push(token);
            } else {
                self.emit(token);
            }
        }
    }

    /// Discard held whitespace but keep the opaque tokens after it.
    fn drop_held_whitespace(&mut self) {
        let mut held = std::mem::take(&mut self.held).into_iter();
        if let Some(ws) = held.next() {
            trace!(at = %ws.slice.start(), "dropping whitespace before block");
        }
        self.out.extend(held);
    }

    /// Append a significant token, merging into the previous one when
    /// possible.
    fn emit(&mut self, token: Token) {
        let token = match token.kind {
            TokenType::Whitespace | TokenType::Newline => Token {
                kind: TokenType::Content,
                ..token
            },
            _ => token,
        };
        if let Some(last) = self.out.last_mut() {
            if let Some(merged) = merge(last, &token) {
                *last = merged;
                return;
            }
        }
        self.out.push(token);
    }

    fn finish(mut self) -> Vec<Token> {
        self.release_held();
        self.out
    }
}

/// Merge `next` into `prev`, or `None` when they must stay separate.
fn merge(prev: &Token, next: &Token) -> Option<Token> {
    let kind = prev.kind;
    if kind != next.kind
        || kind.is_opaque()
        || kind == TokenType::LocalExpression
        || prev.extension.is_some()
        || next.extension.is_some()
    {
        return None;
    }

    let separator = if kind.is_code_block() && !prev.text().ends_with('\n') {
        "\n"
    } else {
        ""
    };
    let len = prev.slice.char_len() + separator.len() + next.slice.char_len();
    if len > MAX_MERGED_LEN {
        return None;
    }

    let slice = if kind.is_code_block() {
        prev.slice.join_with(separator, &next.slice)
    } else {
        prev.slice.join(&next.slice)
    };
    slice.ok().map(|slice| Token::new(kind, slice))
}
