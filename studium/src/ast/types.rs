//! Declared-type AST nodes

use serde::{Deserialize, Serialize};

/// Type written in a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Double,
    /// Boolean
    Boolean,
    /// Single character
    Char,
    /// Character sequence
    String,
}

impl Type {
    /// Name used by the assignability table; matches `Value::type_name`
    pub fn name(&self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Double => "double",
            Type::Boolean => "boolean",
            Type::Char => "char",
            Type::String => "string",
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
