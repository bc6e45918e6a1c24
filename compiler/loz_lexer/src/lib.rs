//! Lexer for lozenge templates.
//!
//! - `Input`: position-tracking cursor with quote-aware scanning helpers
//! - `Lexer`: marker-driven classification into raw tokens
//! - `Macro` / `MacroRegistry`: the `◊.name` extension protocol, with
//!   built-in `for` and `if`
//!
//! The raw stream is unoptimized: whitespace, newlines and content runs come
//! out as separate tokens. `loz_parse::optimize` merges them.

mod input;
mod lexer;
mod macros;
mod scan;

pub use input::{Input, ScanFailure};
pub use lexer::{is_ident_continue, is_ident_start, Lexer};
pub use macros::{ForMacro, IfMacro, Macro, MacroRegistry};
