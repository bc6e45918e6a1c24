//! Optimizer and parser for lozenge templates.
//!
//! The raw token stream from `loz_lexer` goes through two stages here:
//! - [`optimize`] merges adjacent runs and applies the trim-spaces policy
//! - [`Parser`] walks the optimized stream once and writes each token to a
//!   [`Handler`]

mod config;
mod handler;
mod optimize;
mod parser;

pub use config::{ParserConfig, DEFAULT_MARKER};
pub use handler::Handler;
pub use optimize::{optimize, MAX_MERGED_LEN};
pub use parser::Parser;
