//! Single-pass parser over the optimized token stream.
//!
//! All lookahead happens in the lexer; the parser only dispatches. Macro
//! tokens hand the rest of the stream to the owning macro's parse hook,
//! which returns whatever it did not consume.

use loz_diagnostic::{ErrorCode, Phase, SourceText, TemplateError};
use loz_ir::{Token, TokenType};
use loz_lexer::MacroRegistry;
use tracing::trace;

use crate::Handler;

/// Dispatches tokens to a [`Handler`].
pub struct Parser<'a> {
    source: &'a SourceText<'a>,
    macros: &'a MacroRegistry,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a SourceText<'a>, macros: &'a MacroRegistry) -> Self {
        Parser { source, macros }
    }

    /// Write every token to `handler`, then finish it.
    ///
    /// Stops at the first error; `done` is only called after a clean walk.
    /// `begin` runs first, so a handler reused after a failure starts clean.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(source = %self.source.name(), count = tokens.len())
    )]
    pub fn parse<H: Handler>(&self, tokens: &[Token], handler: &mut H) -> Result<String, TemplateError> {
        handler.begin();
        let mut rest = tokens;
        while let Some((token, tail)) = rest.split_first() {
            rest = self.dispatch(token, tail, handler)?;
        }
        handler.done()
    }

    fn dispatch<'t, H: Handler>(
        &self,
        token: &Token,
        rest: &'t [Token],
        handler: &mut H,
    ) -> Result<&'t [Token], TemplateError> {
        match token.kind {
            TokenType::Content | TokenType::Whitespace | TokenType::Newline => {
                handler.write_text_content(&token.slice);
            }
            TokenType::GlobalCodeBlock => handler.write_code_global_block(&token.slice),
            TokenType::LocalCodeBlock => handler.write_code_local_block(&token.slice),
            TokenType::LocalExpression => handler.write_code_local_expression(&token.slice),
            TokenType::Macro => {
                let name = token.text();
                let Some(expander) = self.macros.get(name) else {
                    return Err(self.error(token, ErrorCode::E1001, format!("no macro named `{name}`")));
                };
                trace!(name, remaining = rest.len(), "macro parse hook");
                return expander.parse(handler, token, rest);
            }
            TokenType::Custom(_) => {
                return Err(self.error(
                    token,
                    ErrorCode::E1002,
                    format!("{} token is not handled by any macro", token.kind),
                ));
            }
        }
        Ok(rest)
    }

    fn error(&self, token: &Token, code: ErrorCode, message: String) -> TemplateError {
        self.source
            .error(Phase::Parse, code, token.slice.start(), message)
    }
}
