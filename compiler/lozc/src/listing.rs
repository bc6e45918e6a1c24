//! Reference handler that renders instructions as a line listing.
//!
//! Each instruction keeps the template line it came from, so the listing
//! doubles as a source map. Global blocks are hoisted above everything else:
//!
//! ```text
//! 1: global " import \"fmt\" "
//! 2: text "Hello "
//! 2: expr "name"
//! ```

use std::fmt::{self, Write as _};

use loz_diagnostic::TemplateError;
use loz_ir::{Sink, Slice};
use loz_parse::Handler;

/// Which sink method produced an instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    Text,
    Global,
    Block,
    Expr,
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InstructionKind::Text => "text",
            InstructionKind::Global => "global",
            InstructionKind::Block => "block",
            InstructionKind::Expr => "expr",
        })
    }
}

/// One recorded instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub kind: InstructionKind,
    /// Template line of the token's start.
    pub line: u32,
    pub text: String,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {:?}", self.line, self.kind, self.text)
    }
}

/// Records instructions and renders them in `done`.
#[derive(Clone, Debug, Default)]
pub struct ListingHandler {
    globals: Vec<Instruction>,
    body: Vec<Instruction>,
}

impl ListingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded instructions in listing order: globals first.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.globals.iter().chain(&self.body)
    }

    fn record(&mut self, kind: InstructionKind, slice: &Slice) {
        let instruction = Instruction {
            kind,
            line: slice.start().line,
            text: slice.text().to_owned(),
        };
        if kind == InstructionKind::Global {
            self.globals.push(instruction);
        } else {
            self.body.push(instruction);
        }
    }
}

impl Sink for ListingHandler {
    fn write_text_content(&mut self, slice: &Slice) {
        self.record(InstructionKind::Text, slice);
    }

    fn write_code_global_block(&mut self, slice: &Slice) {
        self.record(InstructionKind::Global, slice);
    }

    fn write_code_local_block(&mut self, slice: &Slice) {
        self.record(InstructionKind::Block, slice);
    }

    fn write_code_local_expression(&mut self, slice: &Slice) {
        self.record(InstructionKind::Expr, slice);
    }
}

impl Handler for ListingHandler {
    /// Forget anything recorded by an aborted compilation.
    fn begin(&mut self) {
        self.globals.clear();
        self.body.clear();
    }

    /// Render the listing and reset the handler for the next document.
    fn done(&mut self) -> Result<String, TemplateError> {
        let mut listing = String::new();
        for instruction in self.instructions() {
            writeln!(listing, "{instruction}")
                .map_err(|e| TemplateError::handler(format!("cannot render listing: {e}")))?;
        }
        self.globals.clear();
        self.body.clear();
        Ok(listing)
    }
}
