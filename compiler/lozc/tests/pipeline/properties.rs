//! Whole-pipeline properties.

use lozc::{Compiler, ListingHandler, ParserConfig};
use proptest::prelude::*;

fn fragments() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "a", "if", " ", "\n", "\t", "◊", "◊◊", "◊x", "◊(", ")", "◊{", "◊^{", "}", "\"", "`",
            "\\", "◊.if c {◊", "◊.for c {◊", "◊}", "} else {◊", "} else if d {◊",
        ]),
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn compile_never_panics(text in fragments(), trim in any::<bool>()) {
        let compiler = Compiler::new(ParserConfig::default().with_trim_spaces(trim));
        let _ = compiler.compile("page.tpl", &text, &mut ListingHandler::new());
    }

    #[test]
    fn arbitrary_text_never_panics(text in "\\PC{0,80}") {
        let _ = Compiler::default().compile("page.tpl", &text, &mut ListingHandler::new());
    }

    #[test]
    fn text_without_marker_lists_every_line(text in "[a-z ]{1,20}(\n[a-z ]{1,20}){0,5}") {
        let out = Compiler::default()
            .compile("page.tpl", &text, &mut ListingHandler::new())
            .unwrap();
        prop_assert!(out.lines().all(|line| line.contains(": text ")));
    }
}
