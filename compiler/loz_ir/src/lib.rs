//! Lozenge IR - Token and Source Location Types
//!
//! This crate contains the data structures shared by every stage of the
//! template compiler:
//! - `Position` and `Slice` for source-located text
//! - `TokenType` and `Token` for lexer and optimizer output
//! - `TokenTypeRegistry` for custom token types registered by name
//! - `Sink`, the write half of a code-emission handler
//!
//! Tokens own copies of their text, so they outlive the input they were
//! scanned from.

mod position;
mod registry;
mod sink;
mod slice;
mod token;

pub use position::Position;
pub use registry::TokenTypeRegistry;
pub use sink::Sink;
pub use slice::{JoinError, Slice};
pub use token::{CustomTokenType, Extension, Token, TokenExtension, TokenType, CUSTOM_TOKEN_OFFSET};
