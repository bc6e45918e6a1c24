//! Token definitions for the template lexer.
//!
//! A token is a type tag, the [`Slice`] it covers, and an optional opaque
//! extension payload. The parser forwards extensions to macro parse hooks
//! untouched; only the macro that produced a payload knows its concrete type.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::Slice;

/// First numeric id handed out to custom token types.
///
/// Ids below this value belong to the built-in [`TokenType`] variants.
pub const CUSTOM_TOKEN_OFFSET: u32 = 1000;

/// A token type registered at runtime through a
/// [`TokenTypeRegistry`](crate::TokenTypeRegistry).
///
/// Ids are unique for the lifetime of the process, across registries.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomTokenType(u32);

impl CustomTokenType {
    /// Wrap a raw id.
    ///
    /// # Panics
    /// Panics if `id` is below [`CUSTOM_TOKEN_OFFSET`].
    pub(crate) fn from_raw(id: u32) -> Self {
        assert!(
            id >= CUSTOM_TOKEN_OFFSET,
            "custom token id {id} is inside the built-in range"
        );
        CustomTokenType(id)
    }

    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Token type tag.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenType {
    /// Run of spaces and tabs.
    Whitespace,
    /// A single `\n`.
    Newline,
    /// Literal template text.
    Content,
    /// Code hoisted to the top level of the generated program.
    GlobalCodeBlock,
    /// Code run inline where it occurs.
    LocalCodeBlock,
    /// Inline value rendered into the output.
    LocalExpression,
    /// Macro invocation marker; the slice text is the macro name.
    Macro,
    /// Type registered by a macro at runtime.
    Custom(CustomTokenType),
}

impl TokenType {
    /// Numeric id of this type. Built-ins use `0..7`; custom types start at
    /// [`CUSTOM_TOKEN_OFFSET`].
    pub const fn id(self) -> u32 {
        match self {
            TokenType::Whitespace => 0,
            TokenType::Newline => 1,
            TokenType::Content => 2,
            TokenType::GlobalCodeBlock => 3,
            TokenType::LocalCodeBlock => 4,
            TokenType::LocalExpression => 5,
            TokenType::Macro => 6,
            TokenType::Custom(custom) => custom.id(),
        }
    }

    /// Returns `true` for global and local code blocks.
    #[inline]
    pub const fn is_code_block(self) -> bool {
        matches!(self, TokenType::GlobalCodeBlock | TokenType::LocalCodeBlock)
    }

    /// Returns `true` for types the optimizer passes through untouched.
    #[inline]
    pub const fn is_opaque(self) -> bool {
        matches!(self, TokenType::Macro | TokenType::Custom(_))
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Whitespace => f.write_str("whitespace"),
            TokenType::Newline => f.write_str("newline"),
            TokenType::Content => f.write_str("content"),
            TokenType::GlobalCodeBlock => f.write_str("global code block"),
            TokenType::LocalCodeBlock => f.write_str("local code block"),
            TokenType::LocalExpression => f.write_str("local expression"),
            TokenType::Macro => f.write_str("macro"),
            TokenType::Custom(custom) => write!(f, "custom token #{}", custom.id()),
        }
    }
}

/// Payload a macro attaches to the tokens it produces.
pub trait TokenExtension: fmt::Debug + Send + Sync {
    /// Human-readable rendering used in token dumps.
    fn describe(&self) -> Option<String> {
        None
    }

    /// Downcast hook for the macro that owns this payload.
    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a [`TokenExtension`].
///
/// Two handles compare equal only when they point at the same payload.
#[derive(Clone, Debug)]
pub struct Extension(Arc<dyn TokenExtension>);

impl Extension {
    pub fn new(payload: impl TokenExtension + 'static) -> Self {
        Extension(Arc::new(payload))
    }

    #[inline]
    pub fn payload(&self) -> &dyn TokenExtension {
        &*self.0
    }

    /// Downcast the payload to a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for Extension {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Extension {}

/// A lexed token.
#[derive(Clone, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenType,
    pub slice: Slice,
    pub extension: Option<Extension>,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenType, slice: Slice) -> Self {
        Token {
            kind,
            slice,
            extension: None,
        }
    }

    #[must_use]
    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extension = Some(extension);
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        self.slice.text()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})", self.kind, self.slice)?;
        if let Some(ext) = &self.extension {
            match ext.payload().describe() {
                Some(description) => write!(f, " [{description}]")?,
                None => write!(f, " [{:?}]", ext.payload())?,
            }
        }
        Ok(())
    }
}
