//! Macro extension protocol.
//!
//! A macro is invoked with the marker, a dot and its name (`◊.for ...`).
//! The lexer hands it the cursor; the macro consumes whatever syntax it
//! defines and returns the tokens it stands for. Macros may also emit
//! [`TokenType::Macro`](loz_ir::TokenType::Macro) tokens carrying their own
//! name, in which case the parser calls back into [`Macro::parse`] with the
//! tokens that follow.

mod builtins;

use std::fmt;
use std::sync::Arc;

use loz_diagnostic::TemplateError;
use loz_ir::{Sink, Slice, Token};
use rustc_hash::FxHashMap;

pub use builtins::{ForMacro, IfMacro};

use crate::Lexer;

/// A named grammar extension.
pub trait Macro: Send + Sync {
    /// Name used after `marker.` to invoke the macro.
    fn name(&self) -> &str;

    /// Consume the macro's syntax and return the tokens it produces.
    ///
    /// `call` spans the invocation (`◊.name`) and carries the name as text.
    /// The cursor sits right after the name.
    fn next_tokens(&self, lexer: &mut Lexer<'_>, call: &Slice) -> Result<Vec<Token>, TemplateError>;

    /// Parse-time hook, called for each macro token this macro emitted.
    ///
    /// Receives the tokens after the macro token and returns the ones left
    /// for the parser. The default consumes nothing.
    fn parse<'t>(
        &self,
        sink: &mut dyn Sink,
        token: &Token,
        rest: &'t [Token],
    ) -> Result<&'t [Token], TemplateError> {
        let _ = (sink, token);
        Ok(rest)
    }
}

/// Name → macro table.
///
/// Later registrations replace earlier ones with the same name.
#[derive(Clone, Default)]
pub struct MacroRegistry {
    macros: FxHashMap<Arc<str>, Arc<dyn Macro>>,
}

impl MacroRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in `for` and `if` macros.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ForMacro));
        registry.register(Arc::new(IfMacro));
        registry
    }

    /// Built-ins, then `defaults`, then `overrides`; the last registration
    /// of a name wins.
    pub fn resolve(
        defaults: impl IntoIterator<Item = Arc<dyn Macro>>,
        overrides: impl IntoIterator<Item = Arc<dyn Macro>>,
    ) -> Self {
        let mut registry = Self::with_builtins();
        registry.extend(defaults);
        registry.extend(overrides);
        registry
    }

    /// Register a macro, returning the one it replaced.
    pub fn register(&mut self, entry: Arc<dyn Macro>) -> Option<Arc<dyn Macro>> {
        self.macros.insert(Arc::from(entry.name()), entry)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Macro>> {
        self.macros.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.macros.keys().map(|name| &**name).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}

impl Extend<Arc<dyn Macro>> for MacroRegistry {
    fn extend<I: IntoIterator<Item = Arc<dyn Macro>>>(&mut self, iter: I) {
        for entry in iter {
            self.register(entry);
        }
    }
}

impl fmt::Debug for MacroRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
