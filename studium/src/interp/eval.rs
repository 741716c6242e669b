//! Tree-walking evaluator

use super::error::{InterpResult, RuntimeError};
use super::scope::ScopeStack;
use super::trace::{LoopKind, TraceEvent, Tracer};
use super::value::{is_assignable, Value};
use crate::ast::{BinOp, Expr, Program, Span, Spanned, Stmt, Type, UnOp};
use std::cmp::Ordering;
use std::io::{self, Write};
use std::process::Command;

/// Stack growth parameters for deeply nested programs
const STACK_RED_ZONE: usize = 128 * 1024; // 128KB remaining triggers growth
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024; // Grow by 4MB each time

/// The interpreter
pub struct Interpreter {
    /// Active scope chain; the root frame lives for the whole run
    scopes: ScopeStack,
    /// Sink for print statements
    out: Box<dyn Write>,
    /// Optional explain-channel observer
    tracer: Option<Box<dyn Tracer>>,
    /// Control-structure nesting depth, used only for trace indentation
    depth: usize,
}

impl Interpreter {
    /// Create an interpreter printing to stdout
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Create an interpreter printing to the given sink
    pub fn with_output(out: Box<dyn Write>) -> Self {
        Interpreter {
            scopes: ScopeStack::new(),
            out,
            tracer: None,
            depth: 0,
        }
    }

    /// Install an explain-channel observer
    pub fn set_tracer(&mut self, tracer: Box<dyn Tracer>) {
        self.tracer = Some(tracer);
    }

    /// Run a program to completion; the first error aborts the run
    pub fn run(&mut self, program: &Program) -> InterpResult<()> {
        for stmt in &program.stmts {
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    /// Look up a binding in the active scope chain
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.scopes.get(name)
    }

    fn trace(&mut self, span: Span, event: TraceEvent<'_>) {
        if let Some(tracer) = self.tracer.as_deref_mut() {
            tracer.record(self.depth, span, &event);
        }
    }

    /// Execute a statement with automatic stack growth for deep nesting
    fn exec_stmt(&mut self, stmt: &Spanned<Stmt>) -> InterpResult<Value> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.exec_stmt_inner(stmt))
    }

    fn exec_stmt_inner(&mut self, stmt: &Spanned<Stmt>) -> InterpResult<Value> {
        match &stmt.node {
            Stmt::Decl { ty, name, init } => {
                // Initializer first: evaluation errors win over the
                // duplicate check, and declarations without one bind null
                let value = match init {
                    Some(expr) => {
                        let value = self.eval_expr(expr)?;
                        coerce_declared(ty.node, value)?
                    }
                    None => Value::Null,
                };
                if self.scopes.declared_in_current(&name.node) {
                    return Err(RuntimeError::duplicate_declaration(&name.node));
                }
                self.trace(
                    stmt.span,
                    TraceEvent::Declare {
                        name: &name.node,
                        ty: ty.node,
                        value: &value,
                    },
                );
                self.scopes.define(name.node.clone(), value.clone());
                Ok(value)
            }

            Stmt::Assign { name, value } => {
                let value = self.eval_expr(value)?;
                if !self.scopes.set(&name.node, value.clone()) {
                    return Err(RuntimeError::undefined_variable(&name.node));
                }
                self.trace(
                    stmt.span,
                    TraceEvent::Assign {
                        name: &name.node,
                        value: &value,
                    },
                );
                Ok(value)
            }

            Stmt::Print(expr) => {
                let value = self.eval_expr(expr)?;
                writeln!(self.out, "{value}").ok();
                self.out.flush().ok();
                Ok(Value::Null)
            }

            Stmt::Clear => {
                clear_screen();
                Ok(Value::Null)
            }

            // No scope is created; branches run in the active scope
            Stmt::If {
                cond,
                then_block,
                else_block,
            } => {
                let taken = self.eval_expr(cond)?.is_truthy();
                self.trace(
                    cond.span,
                    TraceEvent::Branch {
                        taken,
                        has_else: else_block.is_some(),
                    },
                );
                if taken {
                    self.exec_nested(then_block)
                } else if let Some(else_block) = else_block {
                    self.exec_nested(else_block)
                } else {
                    Ok(Value::Null)
                }
            }

            // No scope is created; a declaration in the body collides with
            // itself on the second iteration
            Stmt::While { cond, body } => {
                self.trace(
                    stmt.span,
                    TraceEvent::LoopEnter {
                        kind: LoopKind::While,
                    },
                );
                let mut iterations = 0usize;
                while self.eval_expr(cond)?.is_truthy() {
                    iterations += 1;
                    self.trace(
                        stmt.span,
                        TraceEvent::LoopIteration {
                            kind: LoopKind::While,
                            count: iterations,
                        },
                    );
                    self.exec_nested(body)?;
                }
                self.trace(
                    stmt.span,
                    TraceEvent::LoopExit {
                        kind: LoopKind::While,
                        iterations,
                    },
                );
                Ok(Value::Null)
            }

            // One child scope for the whole statement, restored on every
            // exit path: the result is captured before the frame is popped
            Stmt::For {
                init,
                cond,
                update,
                body,
            } => {
                self.scopes.push_scope();
                self.trace(
                    stmt.span,
                    TraceEvent::LoopEnter {
                        kind: LoopKind::For,
                    },
                );
                let result = self.run_for(
                    stmt.span,
                    init.as_deref(),
                    cond.as_ref(),
                    update.as_deref(),
                    body,
                );
                self.scopes.pop_scope();
                let iterations = result?;
                self.trace(
                    stmt.span,
                    TraceEvent::LoopExit {
                        kind: LoopKind::For,
                        iterations,
                    },
                );
                Ok(Value::Null)
            }

            Stmt::Block(stmts) => self.exec_block(stmts),
        }
    }

    /// For-loop driver; runs inside the child scope pushed by the caller
    fn run_for(
        &mut self,
        span: Span,
        init: Option<&Spanned<Stmt>>,
        cond: Option<&Spanned<Expr>>,
        update: Option<&Spanned<Stmt>>,
        body: &[Spanned<Stmt>],
    ) -> InterpResult<usize> {
        if let Some(init) = init {
            self.exec_stmt(init)?;
        }
        let mut iterations = 0usize;
        loop {
            // An absent condition means "always true"
            let keep_going = match cond {
                Some(cond) => self.eval_expr(cond)?.is_truthy(),
                None => true,
            };
            if !keep_going {
                return Ok(iterations);
            }
            iterations += 1;
            self.trace(
                span,
                TraceEvent::LoopIteration {
                    kind: LoopKind::For,
                    count: iterations,
                },
            );
            self.exec_nested(body)?;
            if let Some(update) = update {
                self.exec_stmt(update)?;
            }
        }
    }

    /// Run the statements of a branch or loop body one nesting level deeper
    fn exec_nested(&mut self, stmts: &[Spanned<Stmt>]) -> InterpResult<Value> {
        self.depth += 1;
        let result = self.exec_block(stmts);
        self.depth -= 1;
        result
    }

    /// Run statements in the active scope; yields the last statement's value
    fn exec_block(&mut self, stmts: &[Spanned<Stmt>]) -> InterpResult<Value> {
        let mut result = Value::Null;
        for stmt in stmts {
            result = self.exec_stmt(stmt)?;
        }
        Ok(result)
    }

    /// Evaluate an expression with automatic stack growth for deep nesting
    fn eval_expr(&mut self, expr: &Spanned<Expr>) -> InterpResult<Value> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.eval_expr_inner(expr))
    }

    fn eval_expr_inner(&mut self, expr: &Spanned<Expr>) -> InterpResult<Value> {
        match &expr.node {
            Expr::IntLit(n) => Ok(Value::Int(*n)),
            Expr::DoubleLit(x) => Ok(Value::Double(*x)),
            Expr::BoolLit(b) => Ok(Value::Bool(*b)),
            Expr::StringLit(s) => Ok(Value::Str(s.clone())),
            Expr::CharLit(raw) => {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Value::Char(c)),
                    _ => Err(RuntimeError::invalid_literal(raw)),
                }
            }
            Expr::NullLit => Ok(Value::Null),

            Expr::Var(name) => self
                .scopes
                .get(name)
                .ok_or_else(|| RuntimeError::undefined_variable(name)),

            // Both operands are always evaluated; && and || do not
            // short-circuit
            Expr::Binary { left, op, right } => {
                let lval = self.eval_expr(left)?;
                let rval = self.eval_expr(right)?;
                let result = self.eval_binary(*op, &lval, &rval)?;
                self.trace(
                    expr.span,
                    TraceEvent::Binary {
                        op: *op,
                        left: &lval,
                        right: &rval,
                        result: &result,
                    },
                );
                Ok(result)
            }

            Expr::Unary { op, expr: inner } => {
                let value = self.eval_expr(inner)?;
                self.eval_unary(*op, &value)
            }
        }
    }

    fn eval_binary(&self, op: BinOp, left: &Value, right: &Value) -> InterpResult<Value> {
        match op {
            BinOp::Add => match (left, right) {
                (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
                (Value::Double(a), Value::Double(b)) => Ok(Value::Double(a + b)),
                (Value::Int(a), Value::Double(b)) => Ok(Value::Double(*a as f64 + b)),
                (Value::Double(a), Value::Int(b)) => Ok(Value::Double(a + *b as f64)),
                // Text on either side concatenates the textual forms
                _ if left.is_textual() || right.is_textual() => {
                    Ok(Value::Str(format!("{left}{right}")))
                }
                _ => Err(RuntimeError::type_mismatch(
                    "numeric or string",
                    &format!("{} + {}", left.type_name(), right.type_name()),
                )),
            },

            BinOp::Sub => match (left, right) {
                (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a - b)),
                (Value::Double(a), Value::Double(b)) => Ok(Value::Double(a - b)),
                (Value::Int(a), Value::Double(b)) => Ok(Value::Double(*a as f64 - b)),
                (Value::Double(a), Value::Int(b)) => Ok(Value::Double(a - *b as f64)),
                _ => Err(RuntimeError::type_mismatch(
                    "numeric",
                    &format!("{} - {}", left.type_name(), right.type_name()),
                )),
            },

            BinOp::Mul => match (left, right) {
                (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a * b)),
                (Value::Double(a), Value::Double(b)) => Ok(Value::Double(a * b)),
                (Value::Int(a), Value::Double(b)) => Ok(Value::Double(*a as f64 * b)),
                (Value::Double(a), Value::Int(b)) => Ok(Value::Double(a * *b as f64)),
                _ => Err(RuntimeError::type_mismatch(
                    "numeric",
                    &format!("{} * {}", left.type_name(), right.type_name()),
                )),
            },

            // A zero divisor is checked before operand types, literal or
            // computed; division is true division and yields a double
            BinOp::Div => {
                if right.is_zero() {
                    return Err(RuntimeError::division_by_zero());
                }
                match (left, right) {
                    (Value::Int(a), Value::Int(b)) => Ok(Value::Double(*a as f64 / *b as f64)),
                    (Value::Double(a), Value::Double(b)) => Ok(Value::Double(a / b)),
                    (Value::Int(a), Value::Double(b)) => Ok(Value::Double(*a as f64 / b)),
                    (Value::Double(a), Value::Int(b)) => Ok(Value::Double(a / *b as f64)),
                    _ => Err(RuntimeError::type_mismatch(
                        "numeric",
                        &format!("{} / {}", left.type_name(), right.type_name()),
                    )),
                }
            }

            BinOp::Mod => {
                if right.is_zero() {
                    return Err(RuntimeError::division_by_zero());
                }
                match (left, right) {
                    (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a % b)),
                    (Value::Double(a), Value::Double(b)) => Ok(Value::Double(a % b)),
                    (Value::Int(a), Value::Double(b)) => Ok(Value::Double(*a as f64 % b)),
                    (Value::Double(a), Value::Int(b)) => Ok(Value::Double(a % *b as f64)),
                    _ => Err(RuntimeError::type_mismatch(
                        "numeric",
                        &format!("{} % {}", left.type_name(), right.type_name()),
                    )),
                }
            }

            // Equality across incompatible kinds never raises
            BinOp::Eq => Ok(Value::Bool(values_equal(left, right))),
            BinOp::Ne => Ok(Value::Bool(!values_equal(left, right))),

            BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge => self.compare(op, left, right),

            BinOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
            BinOp::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        }
    }

    /// Ordered comparison; operands must be mutually ordered
    fn compare(&self, op: BinOp, left: &Value, right: &Value) -> InterpResult<Value> {
        let ord = match (left, right) {
            (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
            (Value::Double(a), Value::Double(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Double(b)) => (*a as f64).partial_cmp(b),
            (Value::Double(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Str(a), Value::Str(b)) => a.partial_cmp(b),
            (Value::Char(a), Value::Char(b)) => a.partial_cmp(b),
            _ => {
                return Err(RuntimeError::type_mismatch(
                    "mutually ordered operands",
                    &format!("{} {} {}", left.type_name(), op, right.type_name()),
                ));
            }
        };
        let holds = match ord {
            Some(Ordering::Less) => matches!(op, BinOp::Lt | BinOp::Le),
            Some(Ordering::Equal) => matches!(op, BinOp::Le | BinOp::Ge),
            Some(Ordering::Greater) => matches!(op, BinOp::Gt | BinOp::Ge),
            // NaN comparisons are false
            None => false,
        };
        Ok(Value::Bool(holds))
    }

    fn eval_unary(&self, op: UnOp, value: &Value) -> InterpResult<Value> {
        match op {
            UnOp::Neg => match value {
                Value::Int(n) => Ok(Value::Int(-n)),
                Value::Double(x) => Ok(Value::Double(-x)),
                _ => Err(RuntimeError::type_mismatch("numeric", value.type_name())),
            },
            UnOp::Not => Ok(Value::Bool(!value.is_truthy())),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Equality with numeric promotion; any other cross-kind pair is unequal
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Int(a), Value::Double(b)) => *a as f64 == *b,
        (Value::Double(a), Value::Int(b)) => *a == *b as f64,
        _ => left == right,
    }
}

/// Pass a declaration initializer through the assignability table:
/// widening and narrowing are applied as conversions, anything the table
/// rejects is a type mismatch
fn coerce_declared(ty: Type, value: Value) -> InterpResult<Value> {
    match (ty, value) {
        (Type::Double, Value::Int(n)) => Ok(Value::Double(n as f64)),
        (Type::Int, Value::Double(x)) => Ok(Value::Int(x.trunc() as i64)),
        (ty, value) if is_assignable(ty.name(), value.type_name()) => Ok(value),
        (ty, value) => Err(RuntimeError::type_mismatch(ty.name(), value.type_name())),
    }
}

/// Clear the host display surface; failures are ignored
fn clear_screen() {
    let status = if cfg!(windows) {
        Command::new("cmd").args(["/C", "cls"]).status()
    } else {
        Command::new("clear").status()
    };
    status.ok();
}
