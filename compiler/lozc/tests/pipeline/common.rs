//! Shared helpers for pipeline tests.

use lozc::{Compiler, ListingHandler, ParserConfig, TemplateError};

/// Compile with default settings through a fresh listing handler.
pub fn compile(text: &str) -> Result<String, TemplateError> {
    lozc::init_tracing();
    Compiler::default().compile("page.tpl", text, &mut ListingHandler::new())
}

/// Compile with trim-spaces on.
pub fn compile_trimmed(text: &str) -> Result<String, TemplateError> {
    lozc::init_tracing();
    Compiler::new(ParserConfig::default().with_trim_spaces(true)).compile(
        "page.tpl",
        text,
        &mut ListingHandler::new(),
    )
}

/// Join expected listing lines, each terminated by a newline.
pub fn listing(lines: &[&str]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}
