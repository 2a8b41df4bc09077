//! The origin stack: nested coordinate systems.

use crate::math::Transform;

/// POP was attempted with only the base coordinate system left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("origin stack underflow: cannot pop the base coordinate system")]
pub struct StackUnderflow;

/// LIFO of coordinate-frame transforms.
///
/// Never empty: the base entry is the identity and cannot be popped.
#[derive(Clone, Debug)]
pub struct OriginStack {
    frames: Vec<Transform>,
}

impl Default for OriginStack {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginStack {
    /// Create a stack holding only the identity.
    pub fn new() -> Self {
        Self {
            frames: vec![Transform::IDENTITY],
        }
    }

    /// Number of coordinate systems on the stack (at least 1).
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Copy of the current coordinate system.
    pub fn top(&self) -> Transform {
        // `frames` is never empty.
        self.frames[self.frames.len() - 1]
    }

    /// Duplicate the top entry.
    pub fn push(&mut self) {
        let top = self.top();
        self.frames.push(top);
    }

    /// Remove and return the top entry. The stack is unchanged on underflow.
    pub fn pop(&mut self) -> Result<Transform, StackUnderflow> {
        if self.frames.len() <= 1 {
            return Err(StackUnderflow);
        }
        self.frames.pop().ok_or(StackUnderflow)
    }

    /// Apply `t` inside the current coordinate system: `top = top * t`.
    pub fn compose(&mut self, t: &Transform) {
        let last = self.frames.len() - 1;
        self.frames[last] *= *t;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{scale, translation};

    #[test]
    fn test_new_stack_is_identity() {
        let stack = OriginStack::new();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top(), Transform::IDENTITY);
    }

    #[test]
    fn test_pop_base_is_refused() {
        let mut stack = OriginStack::new();
        stack.compose(&translation(1.0, 2.0, 3.0));
        let before = stack.top();
        assert_eq!(stack.pop(), Err(StackUnderflow));
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top(), before);
    }

    #[test]
    fn test_push_pop_restores() {
        let mut stack = OriginStack::new();
        stack.compose(&scale(2.0, 2.0, 2.0));
        let before = stack.top();
        stack.push();
        stack.compose(&translation(5.0, 0.0, 0.0));
        assert_ne!(stack.top(), before);
        stack.pop().unwrap();
        assert_eq!(stack.top(), before);
    }

    #[test]
    fn test_top_is_a_snapshot() {
        let mut stack = OriginStack::new();
        let snapshot = stack.top();
        stack.compose(&translation(1.0, 0.0, 0.0));
        assert_eq!(snapshot, Transform::IDENTITY);
    }
}
