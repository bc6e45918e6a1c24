//! Compilation driver.

use std::fmt;
use std::sync::Arc;

use loz_diagnostic::{SourceText, TemplateError};
use loz_lexer::{Lexer, Macro, MacroRegistry};
use loz_parse::{optimize, Handler, Parser, ParserConfig};

/// Post-processes the source a handler emitted.
///
/// Implementations report failures with [`TemplateError::formatter`].
pub trait SourceFormatter: Send + Sync {
    fn format(&self, raw: &str) -> Result<String, TemplateError>;
}

impl<F> SourceFormatter for F
where
    F: Fn(&str) -> Result<String, TemplateError> + Send + Sync,
{
    fn format(&self, raw: &str) -> Result<String, TemplateError> {
        self(raw)
    }
}

/// Compiles templates with one configuration.
///
/// Holds no per-document state, so one compiler can serve any number of
/// compilations, from any thread.
pub struct Compiler {
    config: ParserConfig,
    macros: Vec<Arc<dyn Macro>>,
    formatter: Option<Box<dyn SourceFormatter>>,
}

impl Compiler {
    pub fn new(config: ParserConfig) -> Self {
        Compiler {
            config,
            macros: Vec::new(),
            formatter: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Register a macro. Caller macros win over handler defaults and
    /// built-ins of the same name.
    #[must_use]
    pub fn with_macro(mut self, entry: Arc<dyn Macro>) -> Self {
        self.macros.push(entry);
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: impl SourceFormatter + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Compile `text` through `handler` and return the emitted source.
    ///
    /// The first error aborts the compilation; nothing is returned for a
    /// template that fails.
    #[tracing::instrument(level = "debug", skip_all, fields(source = name, len = text.len()))]
    pub fn compile<H: Handler>(
        &self,
        name: &str,
        text: &str,
        handler: &mut H,
    ) -> Result<String, TemplateError> {
        let source = SourceText::new(name, text);
        let macros = MacroRegistry::resolve(handler.default_macros(), self.macros.iter().cloned());

        let raw = Lexer::new(&source, self.config.marker, &macros).tokenize()?;
        let tokens = optimize(raw, self.config.trim_spaces);
        let emitted = Parser::new(&source, &macros).parse(&tokens, handler)?;

        match &self.formatter {
            Some(formatter) => formatter.format(&emitted),
            None => Ok(emitted),
        }
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler::new(ParserConfig::default())
    }
}

impl fmt::Debug for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let macros: Vec<&str> = self.macros.iter().map(|m| m.name()).collect();
        f.debug_struct("Compiler")
            .field("config", &self.config)
            .field("macros", &macros)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}
