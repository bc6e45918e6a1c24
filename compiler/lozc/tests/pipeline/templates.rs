//! Realistic templates through the whole pipeline.

use pretty_assertions::assert_eq;

use crate::common::{compile, compile_trimmed, listing};

#[test]
fn local_block_then_text() {
    assert_eq!(
        compile("◊{ a := 1 }rest").unwrap(),
        listing(&[r#"1: block " a := 1 ""#, r#"1: text "rest""#])
    );
}

#[test]
fn escaped_marker_is_literal_text() {
    assert_eq!(
        compile("price: ◊◊5").unwrap(),
        listing(&[r#"1: text "price: ◊5""#])
    );
}

#[test]
fn global_blocks_are_hoisted() {
    let text = "Hello ◊name\n◊^{ import \"fmt\" }";
    assert_eq!(
        compile(text).unwrap(),
        listing(&[
            r#"2: global " import \"fmt\" ""#,
            r#"1: text "Hello ""#,
            r#"1: expr "name""#,
            r#"1: text "\n""#,
        ])
    );
}

#[test]
fn loop_template_with_trim() {
    let text = "\
◊^{ import \"strings\" }
<ul>
◊.for _, item := range items {◊
  <li>◊(strings.ToUpper(item))</li>
◊}
</ul>
";
    assert_eq!(
        compile_trimmed(text).unwrap(),
        listing(&[
            r#"1: global " import \"strings\" ""#,
            r#"2: text "<ul>\n""#,
            r#"3: block "for _, item := range items {""#,
            r#"4: text "  <li>""#,
            r#"4: expr "(strings.ToUpper(item))""#,
            r#"4: text "</li>\n""#,
            r#"5: block "}""#,
            r#"6: text "</ul>\n""#,
        ])
    );
}

#[test]
fn conditional_chain_with_trim() {
    let text = "\
◊.if n == 0 {◊
none
◊} else if n == 1 {◊
one
◊} else {◊
many
◊}";
    assert_eq!(
        compile_trimmed(text).unwrap(),
        listing(&[
            r#"1: block "if n == 0 {""#,
            r#"2: text "none\n""#,
            r#"3: block "} else if n == 1 {""#,
            r#"4: text "one\n""#,
            r#"5: block "} else {""#,
            r#"6: text "many\n""#,
            r#"7: block "}""#,
        ])
    );
}

#[test]
fn merged_text_keeps_line_of_first_token() {
    assert_eq!(
        compile("◊{x}\nA\nB").unwrap(),
        listing(&[r#"1: block "x""#, r#"1: text "\nA\nB""#])
    );
}

#[test]
fn consecutive_blocks_join_on_separate_lines() {
    assert_eq!(
        compile_trimmed("◊{ a := 1 }\n◊{ b := 2 }\n").unwrap(),
        listing(&[r#"1: block " a := 1 \n b := 2 ""#])
    );
}

#[test]
fn long_text_is_split() {
    let text = "lorem ipsum ".repeat(8);
    let out = compile(&text).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|line| line.starts_with("1: text ")));
}

#[test]
fn unknown_macro_stays_text() {
    assert_eq!(
        compile("see ◊.footnote here").unwrap(),
        listing(&[r#"1: text "see ◊.footnote here""#])
    );
}

#[test]
fn prose_after_if_stays_text() {
    assert_eq!(
        compile("◊.if a {◊x◊} else if you like.\n◊.if b {◊y◊}").unwrap(),
        listing(&[
            r#"1: block "if a {""#,
            r#"1: text "x""#,
            r#"1: block "}""#,
            r#"1: text " else if you like.\n""#,
            r#"2: block "if b {""#,
            r#"2: text "y""#,
            r#"2: block "}""#,
        ])
    );
}
