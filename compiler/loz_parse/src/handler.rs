//! Code-emission handler contract.

use std::sync::Arc;

use loz_diagnostic::TemplateError;
use loz_ir::Sink;
use loz_lexer::Macro;

/// Backend that turns template instructions into target-language source.
///
/// The parser calls [`begin`], then the [`Sink`] methods in source order,
/// then [`done`] once the whole stream has been written. A compilation that
/// fails stops before `done`, so state left behind is discarded by the next
/// `begin`.
///
/// [`begin`]: Handler::begin
/// [`done`]: Handler::done
pub trait Handler: Sink {
    /// Macros this backend provides. They override the built-ins and are
    /// themselves overridden by macros the caller registers.
    fn default_macros(&self) -> Vec<Arc<dyn Macro>> {
        Vec::new()
    }

    /// Start a new document.
    fn begin(&mut self) {}

    /// Finish emission and return the generated source.
    fn done(&mut self) -> Result<String, TemplateError>;
}
