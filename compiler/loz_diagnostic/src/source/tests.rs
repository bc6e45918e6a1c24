use pretty_assertions::assert_eq;

use super::*;

#[test]
fn position_at_counts_runes() {
    let source = SourceText::new("page.tpl", "foo ◊(1 + 2 bar");
    // '◊' occupies bytes 4..7
    assert_eq!(source.position_at(7), Position::new(7, 1, 6));
}

#[test]
fn render_caret_points_at_column() {
    let source = SourceText::new("page.tpl", "first\nfoo ◊(1 + 2 bar\nlast");
    let position = source.position_at(13);
    assert_eq!(position.line, 2);
    assert_eq!(position.column, 6);
    assert_eq!(source.render_caret(position), "foo ◊(1 + 2 bar\n     ^");
}

#[test]
fn render_caret_keeps_tabs() {
    let source = SourceText::new("t", "\t\tx◊{");
    let position = source.position_at(3);
    assert_eq!(source.render_caret(position), "\t\tx◊{\n\t\t ^");
}

#[test]
fn render_caret_at_end_of_input() {
    let source = SourceText::new("t", "abc");
    assert_eq!(source.render_caret(source.position_at(3)), "abc\n   ^");
}

#[test]
fn error_display_has_location_code_and_snippet() {
    let source = SourceText::new("page.tpl", "foo ◊(1 + 2 bar");
    let err = source.error_at(
        Phase::Tokenizer,
        ErrorCode::E0001,
        7,
        "missing closing `)`",
    );
    assert_eq!(err.position(), Some(Position::new(7, 1, 6)));
    assert_eq!(err.location().map(|l| l.source.as_ref()), Some("page.tpl"));
    assert_eq!(
        err.to_string(),
        "page.tpl:1:6: tokenizer error[E0001]: unbalanced delimiter: missing closing `)`\n\
         foo ◊(1 + 2 bar\n     ^"
    );
}

#[test]
fn unpositioned_error_display() {
    let err = TemplateError::handler("output buffer closed");
    assert_eq!(err.phase(), Phase::Emit);
    assert_eq!(err.code(), ErrorCode::E2001);
    assert_eq!(err.snippet(), None);
    assert_eq!(
        err.to_string(),
        "emit error[E2001]: handler failed: output buffer closed"
    );
}
