use std::fmt;

/// Error codes for all template diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Tokenizer errors
/// - E1xxx: Parser errors
/// - E2xxx: Emit errors (handler and formatter)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Tokenizer Errors (E0xxx)
    /// Unbalanced delimiter in a code block or expression
    E0001,
    /// Expected `{` followed by the marker to open a macro body
    E0002,
    /// Missing marker + `}` closing a macro body
    E0003,

    // Parser Errors (E1xxx)
    /// Unknown macro
    E1001,
    /// Unexpected token
    E1002,

    // Emit Errors (E2xxx)
    /// Handler failed to produce output
    E2001,
    /// Source formatter rejected the output
    E2002,
}

impl ErrorCode {
    /// Get the numeric code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
        }
    }

    /// Short description of the error class.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unbalanced delimiter",
            ErrorCode::E0002 => "expected block open",
            ErrorCode::E0003 => "unterminated macro body",
            ErrorCode::E1001 => "unknown macro",
            ErrorCode::E1002 => "unexpected token",
            ErrorCode::E2001 => "handler failed",
            ErrorCode::E2002 => "formatter failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E1001.to_string(), "E1001");
        assert_eq!(ErrorCode::E0002.as_str(), "E0002");
    }
}
