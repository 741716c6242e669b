//! Tree-walking interpreter: values, scope chain, evaluator, explain channel

mod error;
mod eval;
mod scope;
mod trace;
mod value;

pub use error::{ErrorKind, InterpResult, RuntimeError};
pub use eval::Interpreter;
pub use scope::ScopeStack;
pub use trace::{Explainer, LoopKind, TraceEvent, Tracer};
pub use value::{is_assignable, Value};
