//! Scope stack for variable bindings
//!
//! The active scope chain is a stack of frames: the top frame is the current
//! scope, frame 0 is the root. Only the for statement pushes a frame, and
//! frame lifetimes are strictly LIFO (the language has no closures), so the
//! stack realizes the parent-pointer chain directly and popping after the
//! loop result is captured restores the prior scope on every exit path.

use super::Value;
use std::collections::HashMap;

/// Stack-based scope chain
#[derive(Debug)]
pub struct ScopeStack {
    /// Stack of frames, index 0 is the root scope
    frames: Vec<HashMap<String, Value>>,
}

impl ScopeStack {
    /// Create a new scope stack with a root frame
    pub fn new() -> Self {
        ScopeStack {
            frames: vec![HashMap::new()],
        }
    }

    /// Push a child frame onto the stack
    pub fn push_scope(&mut self) {
        self.frames.push(HashMap::new());
    }

    /// Pop the current frame from the stack.
    /// Panics if asked to pop the root frame; that is a logic error in the
    /// evaluator, never a user-facing condition.
    pub fn pop_scope(&mut self) {
        if self.frames.len() <= 1 {
            panic!("cannot pop the root scope");
        }
        self.frames.pop();
    }

    /// Current chain depth
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Insert or overwrite a binding in the current frame only.
    /// Duplicate-declaration checking is the evaluator's responsibility.
    pub fn define(&mut self, name: String, value: Value) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name, value);
        }
    }

    /// Look up a binding, walking from the current frame to the root
    pub fn get(&self, name: &str) -> Option<Value> {
        for frame in self.frames.iter().rev() {
            if let Some(value) = frame.get(name) {
                return Some(value.clone());
            }
        }
        None
    }

    /// Overwrite the nearest existing binding, walking from the current
    /// frame to the root. Returns false if the name is bound nowhere;
    /// never creates a binding.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        for frame in self.frames.iter_mut().rev() {
            if frame.contains_key(name) {
                frame.insert(name.to_string(), value);
                return true;
            }
        }
        false
    }

    /// Whether the name is bound in the current frame (ancestors are not
    /// consulted); drives duplicate-declaration checks
    pub fn declared_in_current(&self, name: &str) -> bool {
        self.frames
            .last()
            .is_some_and(|frame| frame.contains_key(name))
    }

    /// Whether the name is bound anywhere in the chain
    pub fn contains(&self, name: &str) -> bool {
        self.frames.iter().any(|frame| frame.contains_key(name))
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
