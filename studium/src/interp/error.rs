//! Runtime errors for the interpreter

use std::fmt;

/// Runtime error during interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Kinds of runtime errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Lookup or assignment target absent from the whole scope chain
    UndefinedVariable,
    /// Redeclaration within the same frame
    DuplicateDeclaration,
    /// Operator applied to an unsupported operand-type combination
    TypeMismatch,
    /// `/` or `%` with a zero divisor
    DivisionByZero,
    /// Malformed single-character literal
    InvalidLiteral,
}

impl RuntimeError {
    pub fn undefined_variable(name: &str) -> Self {
        RuntimeError {
            kind: ErrorKind::UndefinedVariable,
            message: format!("undefined variable: {name}"),
        }
    }

    pub fn duplicate_declaration(name: &str) -> Self {
        RuntimeError {
            kind: ErrorKind::DuplicateDeclaration,
            message: format!("variable already declared in this scope: {name}"),
        }
    }

    pub fn type_mismatch(expected: &str, got: &str) -> Self {
        RuntimeError {
            kind: ErrorKind::TypeMismatch,
            message: format!("type mismatch: expected {expected}, got {got}"),
        }
    }

    pub fn division_by_zero() -> Self {
        RuntimeError {
            kind: ErrorKind::DivisionByZero,
            message: "division by zero".to_string(),
        }
    }

    pub fn invalid_literal(raw: &str) -> Self {
        RuntimeError {
            kind: ErrorKind::InvalidLiteral,
            message: format!("char literal must be exactly one character, got {raw:?}"),
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Runtime error: {}", self.message)
    }
}

impl std::error::Error for RuntimeError {}

/// Result type for interpreter operations
pub type InterpResult<T> = Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_variable() {
        let err = RuntimeError::undefined_variable("foo");
        assert_eq!(err.kind, ErrorKind::UndefinedVariable);
        assert_eq!(err.message, "undefined variable: foo");
    }

    #[test]
    fn test_duplicate_declaration() {
        let err = RuntimeError::duplicate_declaration("x");
        assert_eq!(err.kind, ErrorKind::DuplicateDeclaration);
        assert!(err.message.contains("x"));
    }

    #[test]
    fn test_type_mismatch() {
        let err = RuntimeError::type_mismatch("numeric", "string");
        assert_eq!(err.kind, ErrorKind::TypeMismatch);
        assert!(err.message.contains("numeric"));
        assert!(err.message.contains("string"));
    }

    #[test]
    fn test_division_by_zero() {
        let err = RuntimeError::division_by_zero();
        assert_eq!(err.kind, ErrorKind::DivisionByZero);
        assert_eq!(err.message, "division by zero");
    }

    #[test]
    fn test_invalid_literal() {
        let err = RuntimeError::invalid_literal("ab");
        assert_eq!(err.kind, ErrorKind::InvalidLiteral);
        assert!(err.message.contains("ab"));
    }

    #[test]
    fn test_display() {
        let err = RuntimeError::division_by_zero();
        let display = format!("{err}");
        assert!(display.starts_with("Runtime error:"));
        assert!(display.contains("division by zero"));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = RuntimeError::division_by_zero();
        let std_err: &dyn std::error::Error = &err;
        assert!(std_err.source().is_none());
    }

    #[test]
    fn test_kinds_are_distinct() {
        let kinds = [
            ErrorKind::UndefinedVariable,
            ErrorKind::DuplicateDeclaration,
            ErrorKind::TypeMismatch,
            ErrorKind::DivisionByZero,
            ErrorKind::InvalidLiteral,
        ];
        for i in 0..kinds.len() {
            for j in (i + 1)..kinds.len() {
                assert_ne!(kinds[i], kinds[j]);
            }
        }
    }

    #[test]
    fn test_interp_result() {
        let ok: InterpResult<i64> = Ok(42);
        assert!(ok.is_ok());
        let err: InterpResult<i64> = Err(RuntimeError::division_by_zero());
        assert!(err.is_err());
    }
}
