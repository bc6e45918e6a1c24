//! Failures surfaced by each phase.

use std::sync::Arc;

use loz_ir::{Sink, Slice, Token, TokenType};
use lozc::{Compiler, ErrorCode, Handler, ListingHandler, Macro, Phase, TemplateError};
use loz_lexer::Lexer;
use pretty_assertions::assert_eq;

use crate::common::compile;

#[test]
fn unbalanced_expression() {
    let err = compile("foo ◊(1 + 2 bar").unwrap_err();
    assert_eq!(
        err.to_string(),
        "page.tpl:1:6: tokenizer error[E0001]: unbalanced delimiter: missing closing `)`\n\
         foo ◊(1 + 2 bar\n     ^"
    );
}

#[test]
fn caret_keeps_tab_indentation() {
    let err = compile("a\nb\n\t◊{ x").unwrap_err();
    assert_eq!(
        err.to_string(),
        "page.tpl:3:3: tokenizer error[E0001]: unbalanced delimiter: missing closing `}`\n\t◊{ x\n\t ^"
    );
}

#[test]
fn unterminated_macro_body() {
    let err = compile("◊.for x {◊ body").unwrap_err();
    assert_eq!(
        err.to_string(),
        "page.tpl:1:1: tokenizer error[E0003]: unterminated macro body: \
         missing `◊}` to close the block\n◊.for x {◊ body\n^"
    );
}

#[test]
fn missing_block_open() {
    let err = compile("line\n◊.if ready\n").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E0002);
    assert_eq!(err.phase(), Phase::Tokenizer);
    let position = err.position().unwrap();
    assert_eq!((position.line, position.column), (2, 5));
    assert_eq!(err.message(), "expected `{◊` to open the block body");
}

/// Emits a macro token for a name nobody registered.
struct Dangling;

impl Macro for Dangling {
    fn name(&self) -> &str {
        "dangling"
    }

    fn next_tokens(&self, _lexer: &mut Lexer<'_>, call: &Slice) -> Result<Vec<Token>, TemplateError> {
        Ok(vec![Token::new(TokenType::Macro, call.with_text("ghost"))])
    }
}

#[test]
fn unknown_macro_token_fails_parse() {
    let compiler = Compiler::default().with_macro(Arc::new(Dangling));
    let err = compiler
        .compile("page.tpl", "x\n ◊.dangling", &mut ListingHandler::new())
        .unwrap_err();
    assert_eq!(err.phase(), Phase::Parse);
    assert_eq!(err.code(), ErrorCode::E1001);
    assert_eq!(
        err.to_string(),
        "page.tpl:2:2: parse error[E1001]: unknown macro: no macro named `ghost`\n ◊.dangling\n ^"
    );
}

#[test]
fn handler_failure_aborts_with_no_output() {
    #[derive(Default)]
    struct Refusing(usize);
    impl Sink for Refusing {
        fn write_text_content(&mut self, _: &Slice) {
            self.0 += 1;
        }
        fn write_code_global_block(&mut self, _: &Slice) {}
        fn write_code_local_block(&mut self, _: &Slice) {}
        fn write_code_local_expression(&mut self, _: &Slice) {}
    }
    impl Handler for Refusing {
        fn done(&mut self) -> Result<String, TemplateError> {
            Err(TemplateError::handler(format!("{} text runs is too many", self.0)))
        }
    }

    let err = Compiler::default()
        .compile("page.tpl", "a b", &mut Refusing::default())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2001);
    assert_eq!(
        err.to_string(),
        "emit error[E2001]: handler failed: 1 text runs is too many"
    );
}
