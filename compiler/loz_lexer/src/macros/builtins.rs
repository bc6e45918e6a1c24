//! Built-in `for` and `if` block macros.
//!
//! Both read a header up to `{◊`, lex the body up to `◊}` and emit local code
//! blocks around the body tokens:
//!
//! ```text
//! ◊.for _, x := range xs {◊ ◊x ◊}
//! ◊.if a {◊ A ◊} else if b {◊ B ◊} else {◊ C ◊}
//! ```

use loz_diagnostic::TemplateError;
use loz_ir::{Slice, Token, TokenType};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::Macro;
use crate::Lexer;

#[allow(clippy::expect_used)]
static ELSE_IF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\}\s*else\s+if\b").expect("valid else-if pattern"));

#[allow(clippy::expect_used)]
static ELSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\}\s*else\s*\{").expect("valid else pattern"));

/// `◊.for <header> {◊ <body> ◊}`
#[derive(Copy, Clone, Debug, Default)]
pub struct ForMacro;

impl Macro for ForMacro {
    fn name(&self) -> &str {
        "for"
    }

    fn next_tokens(&self, lexer: &mut Lexer<'_>, call: &Slice) -> Result<Vec<Token>, TemplateError> {
        let opened_at = call.start().offset;
        let mut out = vec![open_block(lexer, opened_at, call.text())?];
        lexer.read_body(&mut out, opened_at)?;
        let close_at = lexer.input().offset();
        lexer.input_mut().advance();
        out.push(close_block(lexer, close_at));
        Ok(out)
    }
}

/// `◊.if <cond> {◊ <body> ◊}` with any number of `else if` branches and an
/// optional trailing `else`.
#[derive(Copy, Clone, Debug, Default)]
pub struct IfMacro;

impl Macro for IfMacro {
    fn name(&self) -> &str {
        "if"
    }

    fn next_tokens(&self, lexer: &mut Lexer<'_>, call: &Slice) -> Result<Vec<Token>, TemplateError> {
        let opened_at = call.start().offset;
        let mut out = vec![open_block(lexer, opened_at, call.text())?];
        lexer.read_body(&mut out, opened_at)?;

        // Cursor is on the marker of `◊}`
        let mut close_at = lexer.input().offset();
        lexer.input_mut().advance();

        while let Some(head) = lexer.input_mut().consume_pattern(&ELSE_IF) {
            // Not a continuation unless a `{◊` header follows
            let Some(header) = lexer.try_block_header() else {
                lexer.input_mut().unshift(head.text());
                break;
            };
            trace!(offset = close_at, "else-if branch");
            out.push(open_token(lexer, close_at, head.text(), &header));
            lexer.read_body(&mut out, opened_at)?;
            close_at = lexer.input().offset();
            lexer.input_mut().advance();
        }

        if let Some(head) = lexer.input_mut().consume_pattern(&ELSE) {
            let marker = lexer.marker();
            if lexer.input_mut().consume(marker) {
                trace!(offset = close_at, "else branch");
                let end = lexer.input().offset();
                out.push(Token::new(
                    TokenType::LocalCodeBlock,
                    lexer.input().slice_with_text(close_at, end, "} else {"),
                ));
                lexer.read_body(&mut out, opened_at)?;
                close_at = lexer.input().offset();
                lexer.input_mut().advance();
            } else {
                lexer.input_mut().unshift(head.text());
            }
        }

        out.push(close_block(lexer, close_at));
        Ok(out)
    }
}

/// Read a block header and build the opening block `prefix + header + "{"`,
/// spanning from `start` to just past the `{◊`.
fn open_block(lexer: &mut Lexer<'_>, start: usize, prefix: &str) -> Result<Token, TemplateError> {
    let header = lexer.read_block_header()?;
    Ok(open_token(lexer, start, prefix, &header))
}

fn open_token(lexer: &Lexer<'_>, start: usize, prefix: &str, header: &Slice) -> Token {
    let end = lexer.input().offset();
    Token::new(
        TokenType::LocalCodeBlock,
        lexer
            .input()
            .slice_with_text(start, end, format!("{prefix}{}{{", header.text())),
    )
}

/// Consume the `}` after a body's closing marker and build the `"}"` block,
/// spanning from the marker at `close_at`.
fn close_block(lexer: &mut Lexer<'_>, close_at: usize) -> Token {
    let closed = lexer.input_mut().consume('}');
    debug_assert!(closed, "body close must be followed by `}}`");
    let end = lexer.input().offset();
    Token::new(
        TokenType::LocalCodeBlock,
        lexer.input().slice_with_text(close_at, end, "}"),
    )
}
