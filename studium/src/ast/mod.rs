//! Abstract Syntax Tree definitions

mod expr;
mod span;
mod types;

pub use expr::*;
pub use span::*;
pub use types::*;

use serde::{Deserialize, Serialize};

/// A program is a sequence of top-level statements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub stmts: Vec<Spanned<Stmt>>,
}

/// Statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Stmt {
    /// Typed declaration: `int x = 5;` (initializer optional)
    Decl {
        ty: Spanned<Type>,
        name: Spanned<String>,
        init: Option<Spanned<Expr>>,
    },

    /// Assignment to an existing binding: `x = x + 1;`
    Assign {
        name: Spanned<String>,
        value: Spanned<Expr>,
    },

    /// Print a value followed by a newline
    Print(Spanned<Expr>),

    /// Clear the display surface
    Clear,

    /// Conditional; branches run in the enclosing scope
    If {
        cond: Spanned<Expr>,
        then_block: Vec<Spanned<Stmt>>,
        else_block: Option<Vec<Spanned<Stmt>>>,
    },

    /// While loop; body runs in the enclosing scope
    While {
        cond: Spanned<Expr>,
        body: Vec<Spanned<Stmt>>,
    },

    /// For loop; the whole statement runs in one child scope.
    /// Header parts are all optional; an absent condition means "always true".
    For {
        init: Option<Box<Spanned<Stmt>>>,
        cond: Option<Spanned<Expr>>,
        update: Option<Box<Spanned<Stmt>>>,
        body: Vec<Spanned<Stmt>>,
    },

    /// Braced statement group; runs in the enclosing scope
    Block(Vec<Spanned<Stmt>>),
}
