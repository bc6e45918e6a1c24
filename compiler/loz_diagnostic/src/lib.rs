//! Error reporting for the template compiler.
//!
//! Every failure the pipeline can report is a [`TemplateError`]:
//! - a phase (tokenizer, parse, emit)
//! - an error code for searchability
//! - the source location, when there is one
//! - a caret-pointed rendering of the offending line
//! - the inner cause message
//!
//! Invalid cursor indices are programmer errors and panic instead; they are
//! never reported through this crate.

mod error;
mod error_code;
mod source;
pub mod span_utils;

pub use error::{Location, Phase, TemplateError};
pub use error_code::ErrorCode;
pub use source::SourceText;
