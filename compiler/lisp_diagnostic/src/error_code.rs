use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E1xxx: Parser errors
/// - E2xxx: Name and type errors (shared by interpreter and code generator)
/// - E3xxx: Runtime and unsupported-operation errors
/// - E9xxx: Internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Parser Errors (E1xxx)
    /// Unexpected character
    E1001,
    /// Unexpected end of input
    E1002,
    /// Integer literal out of range
    E1003,
    /// Function body without expressions
    E1004,
    /// Conditional whose condition is not a call
    E1005,
    /// Expected identifier
    E1006,

    // Name and Type Errors (E2xxx)
    /// Unbound name
    E2001,
    /// Call to an undefined function
    E2002,
    /// Wrong number of arguments
    E2003,
    /// Type mismatch
    E2004,

    // Runtime Errors (E3xxx)
    /// Unsupported operation
    E3001,
    /// Division by zero
    E3002,

    // Internal Errors (E9xxx)
    /// Malformed IR produced by the code generator
    E9001,
}

impl ErrorCode {
    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            // Parser
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            // Names and types
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            // Runtime
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            // Internal
            ErrorCode::E9001 => "E9001",
        }
    }

    /// Whether this code is reported by the parser.
    pub fn is_syntax_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Whether this code signals a bug in the compiler rather than the program.
    pub fn is_internal(&self) -> bool {
        self.as_str().starts_with("E9")
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
        assert_eq!(ErrorCode::E2004.as_str(), "E2004");
    }

    #[test]
    fn test_error_code_phase() {
        assert!(ErrorCode::E1003.is_syntax_error());
        assert!(!ErrorCode::E2001.is_syntax_error());
        assert!(ErrorCode::E9001.is_internal());
    }
}
