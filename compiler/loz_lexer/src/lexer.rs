//! Marker-driven template lexer.
//!
//! Outside the marker, input splits into whitespace runs, single newlines
//! and content runs. At the marker, the next rune picks the construct:
//!
//! | Input              | Token                                    |
//! |--------------------|------------------------------------------|
//! | `◊◊`               | content `◊`                              |
//! | `◊{ code }`        | local code block, braces dropped         |
//! | `◊^{ code }`       | global code block, braces dropped        |
//! | `◊(expr)`          | local expression, parens kept            |
//! | `◊.name ...`       | whatever macro `name` produces           |
//! | `◊ident`           | local expression `ident`                 |
//! | anything else      | content `◊`                              |
//!
//! Tokens produced from marker constructs span the whole construct, so the
//! raw token stream covers the input without gaps.

use loz_diagnostic::{ErrorCode, SourceText, TemplateError};
use loz_ir::{Slice, Token, TokenType};
use tracing::{debug, trace};

use crate::macros::MacroRegistry;
use crate::scan::{Balance, Nesting};
use crate::Input;

/// Returns `true` if `c` can start an identifier.
#[inline]
pub fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Returns `true` if `c` can continue an identifier.
#[inline]
pub fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Template lexer over one source document.
pub struct Lexer<'a> {
    input: Input<'a>,
    marker: char,
    macros: &'a MacroRegistry,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a SourceText<'a>, marker: char, macros: &'a MacroRegistry) -> Self {
        Lexer {
            input: Input::new(source),
            marker,
            macros,
        }
    }

    #[inline]
    pub fn input(&self) -> &Input<'a> {
        &self.input
    }

    #[inline]
    pub fn input_mut(&mut self) -> &mut Input<'a> {
        &mut self.input
    }

    #[inline]
    pub fn marker(&self) -> char {
        self.marker
    }

    #[inline]
    pub fn macros(&self) -> &'a MacroRegistry {
        self.macros
    }

    /// Lex the whole input.
    pub fn tokenize(mut self) -> Result<Vec<Token>, TemplateError> {
        let mut tokens = Vec::new();
        while self.next_tokens(&mut tokens)? {}
        debug!(
            source = %self.input.source().name(),
            count = tokens.len(),
            "tokenized"
        );
        Ok(tokens)
    }

    /// Lex the next token onto `out`.
    ///
    /// Pushes exactly one token, or whatever a macro produces. Returns
    /// `false` once the input is exhausted.
    pub fn next_tokens(&mut self, out: &mut Vec<Token>) -> Result<bool, TemplateError> {
        let Some(c) = self.input.peek() else {
            return Ok(false);
        };
        if c == self.marker {
            self.lex_marker(out)?;
            return Ok(true);
        }

        let start = self.input.offset();
        let token = match c {
            ' ' | '\t' => Token::new(
                TokenType::Whitespace,
                self.input.read_while(|c| c == ' ' || c == '\t'),
            ),
            '\n' => {
                self.input.advance();
                Token::new(TokenType::Newline, self.input.slice(start, start + 1))
            }
            _ => Token::new(TokenType::Content, self.input.read_text_run(self.marker)),
        };
        out.push(token);
        Ok(true)
    }

    fn lex_marker(&mut self, out: &mut Vec<Token>) -> Result<(), TemplateError> {
        let start = self.input.offset();
        self.input.advance();
        let after_marker = self.input.offset();

        let token = match self.input.peek() {
            Some(c) if c == self.marker => {
                self.input.advance();
                let text = self.input.slice(start, after_marker).text().to_owned();
                Token::new(
                    TokenType::Content,
                    self.input.slice_with_text(start, self.input.offset(), text),
                )
            }
            Some('{') => {
                let code = self.read_balanced('{', '}', false)?;
                self.code_token(TokenType::LocalCodeBlock, start, code)
            }
            Some('^') if self.input.peek_nth(1) == Some('{') => {
                self.input.advance();
                let code = self.read_balanced('{', '}', false)?;
                self.code_token(TokenType::GlobalCodeBlock, start, code)
            }
            Some('(') => {
                let code = self.read_balanced('(', ')', true)?;
                self.code_token(TokenType::LocalExpression, start, code)
            }
            Some('.') => {
                self.input.advance();
                match self.read_identifier() {
                    Some(name) => return self.invoke_macro(start, &name, out),
                    None => {
                        self.input.seek(after_marker);
                        Token::new(TokenType::Content, self.input.slice(start, after_marker))
                    }
                }
            }
            Some(c) if is_ident_start(c) => {
                let ident = self.read_identifier().map(|s| s.text().to_owned());
                self.code_token(TokenType::LocalExpression, start, ident.unwrap_or_default())
            }
            _ => Token::new(TokenType::Content, self.input.slice(start, after_marker)),
        };
        out.push(token);
        Ok(())
    }

    fn invoke_macro(
        &mut self,
        start: usize,
        name: &Slice,
        out: &mut Vec<Token>,
    ) -> Result<(), TemplateError> {
        let macros = self.macros;
        let Some(expander) = macros.get(name.text()) else {
            debug!(
                name = name.text(),
                offset = start,
                "unknown macro, keeping text"
            );
            let end = self.input.offset();
            out.push(Token::new(TokenType::Content, self.input.slice(start, end)));
            return Ok(());
        };

        trace!(name = name.text(), offset = start, "dispatching macro");
        let call = self
            .input
            .slice_with_text(start, self.input.offset(), name.text());
        let tokens = expander.next_tokens(self, &call)?;
        out.extend(tokens);
        Ok(())
    }

    fn code_token(&self, kind: TokenType, start: usize, code: impl Into<String>) -> Token {
        Token::new(
            kind,
            self.input
                .slice_with_text(start, self.input.offset(), code),
        )
    }

    /// Read a balanced `open`..`close` run starting at the cursor.
    ///
    /// The cursor must be on `open`. With `keep` the delimiters stay in the
    /// returned text. Fails with E0001, positioned at `open`, if the input
    /// ends before the depth returns to zero.
    pub fn read_balanced(
        &mut self,
        open: char,
        close: char,
        keep: bool,
    ) -> Result<String, TemplateError> {
        let start = self.input.offset();
        let mut balance = Balance::new(open, close);
        let slice = self
            .input
            .try_read_while(|c| balance.step(c))
            .map_err(|failure| self.input.error_at(start, ErrorCode::E0001, failure.message))?;

        let text = slice.text();
        if keep {
            Ok(text.to_owned())
        } else {
            Ok(text[open.len_utf8()..text.len() - close.len_utf8()].to_owned())
        }
    }

    /// Read an identifier at the cursor. `None` when no identifier starts
    /// here; that is not an error.
    pub fn read_identifier(&mut self) -> Option<Slice> {
        if !self.input.peek().is_some_and(is_ident_start) {
            return None;
        }
        Some(self.input.read_while(is_ident_continue))
    }

    /// Read a macro header: code up to the first `{` immediately followed by
    /// the marker, outside brackets and quoted spans.
    ///
    /// The `{` and marker are consumed but not part of the returned slice.
    /// Fails with E0002, positioned at the header start, if no such brace
    /// exists before the next unquoted marker.
    pub fn read_block_header(&mut self) -> Result<Slice, TemplateError> {
        let start = self.input.offset();
        self.try_block_header().ok_or_else(|| {
            self.input.error_at(
                start,
                ErrorCode::E0002,
                format!("expected `{{{}` to open the block body", self.marker),
            )
        })
    }

    /// Like [`read_block_header`](Self::read_block_header), but leaves the
    /// cursor untouched and returns `None` when there is no header.
    ///
    /// A header never spans an unquoted marker, so the search stops at the
    /// next marker construct in the template.
    pub fn try_block_header(&mut self) -> Option<Slice> {
        let start = self.input.offset();
        let marker = self.marker;

        let mut nesting = Nesting::default();
        let mut chars = self.input.remaining().char_indices().peekable();
        let len = loop {
            let (i, c) = chars.next()?;
            if c == marker && !nesting.in_quotes() {
                return None;
            }
            if c == '{'
                && nesting.at_top_level()
                && chars.peek().is_some_and(|&(_, next)| next == marker)
            {
                break i;
            }
            nesting.feed(c);
        };

        let header = self.input.slice(start, start + len);
        self.input.seek(start + len + 1 + marker.len_utf8());
        Some(header)
    }

    /// Returns `true` when the cursor is on the marker followed by `}`.
    pub fn at_body_close(&self) -> bool {
        self.input.peek() == Some(self.marker) && self.input.peek_nth(1) == Some('}')
    }

    /// Lex a macro body onto `out`, stopping on the closing marker + `}`.
    ///
    /// The cursor is left on the closing marker. Fails with E0003,
    /// positioned at `opened_at`, if the input ends first.
    pub fn read_body(&mut self, out: &mut Vec<Token>, opened_at: usize) -> Result<(), TemplateError> {
        loop {
            if self.at_body_close() {
                return Ok(());
            }
            if !self.next_tokens(out)? {
                return Err(self.input.error_at(
                    opened_at,
                    ErrorCode::E0003,
                    format!("missing `{}}}` to close the block", self.marker),
                ));
            }
        }
    }
}
