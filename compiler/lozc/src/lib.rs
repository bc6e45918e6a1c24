//! The lozenge template compiler.
//!
//! Turns a template into target-language source in four steps:
//!
//! 1. lex (`loz_lexer`): marker constructs and macros into raw tokens
//! 2. optimize (`loz_parse::optimize`): merge runs, apply trim-spaces
//! 3. parse (`loz_parse::Parser`): write tokens to a [`Handler`]
//! 4. format: optional post-processing of the handler's output
//!
//! ```no_run
//! use lozc::{Compiler, ListingHandler, ParserConfig};
//!
//! let compiler = Compiler::new(ParserConfig::default().with_trim_spaces(true));
//! let mut handler = ListingHandler::new();
//! let listing = compiler.compile("page.tpl", "Hello ◊name!", &mut handler)?;
//! # Ok::<(), lozc::TemplateError>(())
//! ```
//!
//! # Tracing
//!
//! - `RUST_LOG=lozc=debug`: pipeline phases
//! - `RUST_LOG=loz_lexer=trace`: macro dispatch and lexer decisions

mod compiler;
mod listing;

use std::sync::Once;

pub use compiler::{Compiler, SourceFormatter};
pub use listing::{Instruction, InstructionKind, ListingHandler};

pub use loz_diagnostic::{ErrorCode, Phase, TemplateError};
pub use loz_lexer::{Macro, MacroRegistry};
pub use loz_parse::{Handler, ParserConfig};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
