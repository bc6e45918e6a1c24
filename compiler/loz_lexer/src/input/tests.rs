use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use regex::Regex;

use super::*;

fn source(text: &str) -> SourceText<'_> {
    SourceText::new("t.tpl", text)
}

// === Navigation ===

#[test]
fn peek_does_not_consume() {
    let src = source("◊x");
    let input = Input::new(&src);
    assert_eq!(input.peek(), Some('◊'));
    assert_eq!(input.peek_nth(1), Some('x'));
    assert_eq!(input.offset(), 0);
}

#[test]
fn advance_steps_one_rune() {
    let src = source("◊x");
    let mut input = Input::new(&src);
    assert_eq!(input.advance(), Some('◊'));
    assert_eq!(input.offset(), 3);
    assert_eq!(input.position(), Position::new(3, 1, 2));
    assert_eq!(input.advance(), Some('x'));
    assert!(input.is_eof());
    assert_eq!(input.advance(), None);
}

#[test]
fn newline_advances_line() {
    let src = source("a\nb");
    let mut input = Input::new(&src);
    input.advance();
    input.advance();
    assert_eq!(input.line(), 2);
    assert_eq!(input.position(), Position::new(2, 2, 1));
}

#[test]
fn consume_matches_exact_rune() {
    let src = source("{x");
    let mut input = Input::new(&src);
    assert!(!input.consume('('));
    assert!(input.consume('{'));
    assert_eq!(input.offset(), 1);
}

#[test]
fn consume_prefix_returns_slice() {
    let src = source("else {");
    let mut input = Input::new(&src);
    assert_eq!(input.consume_prefix("if"), None);
    let slice = input.consume_prefix("else").unwrap();
    assert_eq!(slice.text(), "else");
    assert_eq!(slice.start(), Position::START);
    assert_eq!(slice.end(), Position::new(4, 1, 5));
}

static ELSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\}\s*else").unwrap());
static LATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"else").unwrap());

#[test]
fn consume_pattern_only_matches_at_cursor() {
    let src = source("} else {");
    let mut input = Input::new(&src);
    assert_eq!(input.consume_pattern(&LATE), None);
    assert_eq!(input.offset(), 0);
    assert_eq!(input.consume_pattern(&ELSE).unwrap().text(), "} else");
    assert_eq!(input.offset(), 6);
}

#[test]
fn read_while_takes_maximal_run() {
    let src = source("  \tfoo");
    let mut input = Input::new(&src);
    let ws = input.read_while(|c| c == ' ' || c == '\t');
    assert_eq!(ws.text(), "  \t");
    let none = input.read_while(|c| c == ' ');
    assert!(none.is_empty());
    assert_eq!(input.offset(), 3);
}

#[test]
fn read_text_run_stops_at_space_newline_or_marker() {
    let src = source("foo◊bar baz\nq");
    let mut input = Input::new(&src);
    assert_eq!(input.read_text_run('◊').text(), "foo");
    input.advance();
    assert_eq!(input.read_text_run('◊').text(), "bar");
    input.advance();
    assert_eq!(input.read_text_run('◊').text(), "baz");
    input.advance();
    assert_eq!(input.read_text_run('◊').text(), "q");
    assert!(input.is_eof());
}

#[test]
fn read_text_run_honors_custom_marker() {
    let src = source("a@b◊c");
    let mut input = Input::new(&src);
    assert_eq!(input.read_text_run('@').text(), "a");
}

// === try_read_while ===

#[test]
fn try_read_while_succeeds_until_predicate_stops() {
    let src = source("abc;rest");
    let mut input = Input::new(&src);
    let slice = input
        .try_read_while(|c| Ok(matches!(c, Some(c) if c != ';')))
        .unwrap();
    assert_eq!(slice.text(), "abc");
    assert_eq!(input.offset(), 3);
}

#[test]
fn try_read_while_rewinds_on_failure() {
    let src = source("x\nab!cd");
    let mut input = Input::new(&src);
    input.seek(2);
    let err = input
        .try_read_while(|c| match c {
            Some('!') => Err("bang".to_string()),
            _ => Ok(true),
        })
        .unwrap_err();
    assert_eq!(err.message, "bang");
    assert_eq!(err.position, Position::new(4, 2, 3));
    assert_eq!(input.offset(), 2);
    assert_eq!(input.line(), 2);
}

#[test]
fn try_read_while_sees_end_of_input() {
    let src = source("abc");
    let mut input = Input::new(&src);
    let err = input
        .try_read_while(|c| c.map(|_| true).ok_or_else(|| "ran out".to_string()))
        .unwrap_err();
    assert_eq!(err.position, Position::new(3, 1, 4));
    assert_eq!(input.offset(), 0);
}

// === seek / unshift ===

#[test]
fn seek_recomputes_line_and_column() {
    let src = source("ab\ncd\nef");
    let mut input = Input::new(&src);
    input.seek(7);
    assert_eq!(input.position(), Position::new(7, 3, 2));
    input.seek(1);
    assert_eq!(input.position(), Position::new(1, 1, 2));
}

#[test]
fn position_at_resolves_around_cursor() {
    let src = source("ab\ncdé fg\nh");
    let mut input = Input::new(&src);
    input.seek(7);
    assert_eq!(input.position(), Position::new(7, 2, 4));
    // Same line, behind and ahead of the cursor
    assert_eq!(input.position_at(4), Position::new(4, 2, 2));
    assert_eq!(input.position_at(10), Position::new(10, 2, 7));
    // Across newlines in both directions
    assert_eq!(input.position_at(1), Position::new(1, 1, 2));
    assert_eq!(input.position_at(11), Position::new(11, 3, 1));
}

#[test]
fn read_text_run_on_long_line_tracks_columns() {
    let text = "ab ".repeat(2_000);
    let src = source(&text);
    let mut input = Input::new(&src);
    let mut runs = 0;
    while !input.is_eof() {
        let run = input.read_text_run('◊');
        assert_eq!(run.start().column as usize, run.start().offset + 1);
        input.advance();
        runs += 1;
    }
    assert_eq!(runs, 2_000);
    assert_eq!(input.position(), Position::new(6_000, 1, 6_001));
}

#[test]
#[should_panic(expected = "past end")]
fn seek_past_end_panics() {
    let src = source("ab");
    let mut input = Input::new(&src);
    input.seek(3);
}

#[test]
#[should_panic(expected = "splits a UTF-8 sequence")]
fn seek_inside_rune_panics() {
    let src = source("◊");
    let mut input = Input::new(&src);
    input.seek(1);
}

#[test]
fn unshift_backtracks_over_consumed_text() {
    let src = source("a\n} else {");
    let mut input = Input::new(&src);
    input.seek(2);
    input.consume_pattern(&ELSE).unwrap();
    input.unshift("} else");
    assert_eq!(input.offset(), 2);
    assert_eq!(input.line(), 2);
}

#[test]
#[should_panic(expected = "does not match consumed input")]
fn unshift_mismatch_panics() {
    let src = source("abc");
    let mut input = Input::new(&src);
    input.seek(3);
    input.unshift("xc");
}

// === slices and errors ===

#[test]
fn slice_with_text_spans_covered_range() {
    let src = source("◊{ a }rest");
    let input = Input::new(&src);
    let slice = input.slice_with_text(0, 8, " a ");
    assert_eq!(slice.text(), " a ");
    assert_eq!(slice.start(), Position::START);
    assert_eq!(slice.end(), Position::new(8, 1, 7));
}

#[test]
fn error_at_is_positioned_tokenizer_error() {
    let src = source("foo ◊(1 + 2 bar");
    let input = Input::new(&src);
    let err = input.error_at(7, ErrorCode::E0001, "missing closing `)`");
    assert_eq!(err.phase(), Phase::Tokenizer);
    assert_eq!(err.position(), Some(Position::new(7, 1, 6)));
    assert_eq!(err.snippet(), Some("foo ◊(1 + 2 bar\n     ^"));
}

// === Properties ===

proptest! {
    #[test]
    fn seek_agrees_with_line_table(
        text in "[ab◊é \n]{0,40}",
        picks in prop::collection::vec(any::<usize>(), 1..12),
    ) {
        let src = source(&text);
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let mut input = Input::new(&src);
        for pick in picks {
            let target = boundaries[pick % boundaries.len()];
            prop_assert_eq!(input.position_at(target), src.position_at(target));
            input.seek(target);
            prop_assert_eq!(input.position(), src.position_at(target));
        }
    }
}
