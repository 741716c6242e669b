//! Explain channel: observes evaluation steps without affecting them
//!
//! The evaluator invokes an installed `Tracer` at fixed checkpoints and
//! nowhere influences control flow through it, so runs are identical with
//! and without one.

use super::Value;
use crate::ast::{BinOp, Span, Type};
use std::fmt;

/// Loop construct being narrated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    While,
    For,
}

impl fmt::Display for LoopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopKind::While => write!(f, "while"),
            LoopKind::For => write!(f, "for"),
        }
    }
}

/// One observed evaluation step
#[derive(Debug)]
pub enum TraceEvent<'a> {
    Declare {
        name: &'a str,
        ty: Type,
        value: &'a Value,
    },
    Assign {
        name: &'a str,
        value: &'a Value,
    },
    Binary {
        op: BinOp,
        left: &'a Value,
        right: &'a Value,
        result: &'a Value,
    },
    Branch {
        taken: bool,
        has_else: bool,
    },
    LoopEnter {
        kind: LoopKind,
    },
    LoopIteration {
        kind: LoopKind,
        count: usize,
    },
    LoopExit {
        kind: LoopKind,
        iterations: usize,
    },
}

impl fmt::Display for TraceEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Declare { name, ty, value } => {
                write!(f, "declare {ty} {name} = {value}")
            }
            TraceEvent::Assign { name, value } => write!(f, "assign {name} = {value}"),
            TraceEvent::Binary {
                op,
                left,
                right,
                result,
            } => write!(f, "evaluate {left} {op} {right} -> {result}"),
            TraceEvent::Branch {
                taken: true,
                ..
            } => write!(f, "condition is true, taking then branch"),
            TraceEvent::Branch {
                taken: false,
                has_else: true,
            } => write!(f, "condition is false, taking else branch"),
            TraceEvent::Branch {
                taken: false,
                has_else: false,
            } => write!(f, "condition is false, skipping"),
            TraceEvent::LoopEnter { kind } => write!(f, "enter {kind} loop"),
            TraceEvent::LoopIteration { kind, count } => {
                write!(f, "{kind} loop iteration {count}")
            }
            TraceEvent::LoopExit { kind, iterations } => {
                write!(f, "exit {kind} loop after {iterations} iteration(s)")
            }
        }
    }
}

/// Observer installed into the interpreter
pub trait Tracer {
    fn record(&mut self, depth: usize, span: Span, event: &TraceEvent<'_>);
}

/// Tracer that narrates evaluation to stderr, one indented line per event,
/// annotated with the originating source line
pub struct Explainer {
    source: String,
}

impl Explainer {
    pub fn new(source: impl Into<String>) -> Self {
        Explainer {
            source: source.into(),
        }
    }

    fn line_of(&self, span: Span) -> usize {
        let upto = span.start.min(self.source.len());
        self.source[..upto].matches('\n').count() + 1
    }
}

impl Tracer for Explainer {
    fn record(&mut self, depth: usize, span: Span, event: &TraceEvent<'_>) {
        let line = self.line_of(span);
        let text = self.source.lines().nth(line - 1).unwrap_or("").trim();
        eprintln!("{:indent$}{event} (line {line}: {text})", "", indent = depth * 2);
    }
}
