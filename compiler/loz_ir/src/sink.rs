//! Write half of a code-emission handler.

use crate::Slice;

/// Receives template instructions in source order.
///
/// Implemented by code-emission handlers. Macro parse hooks write through
/// this trait as well, so they can emit instructions for the tokens they
/// consume.
pub trait Sink {
    /// Literal template text.
    fn write_text_content(&mut self, slice: &Slice);

    /// Code hoisted to the top level of the generated program.
    fn write_code_global_block(&mut self, slice: &Slice);

    /// Code run inline at this point.
    fn write_code_local_block(&mut self, slice: &Slice);

    /// Value rendered into the output at this point.
    fn write_code_local_expression(&mut self, slice: &Slice);
}
