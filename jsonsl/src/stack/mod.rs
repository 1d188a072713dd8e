// SPDX-License-Identifier: Apache-2.0

use core::num::NonZeroUsize;

use crate::Container;

/// Frames reserved up front; deeper documents grow the stack up to the limit.
const INITIAL_CAPACITY: usize = 32;

/// One currently open container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub container: Container,
    /// Stream offset of the opening bracket.
    pub start: usize,
    /// Array items or object members started so far.
    pub elements: usize,
    /// For objects: the next token must be a key. Always false for arrays.
    pub expect_key: bool,
}

/// Returned when a push would exceed the configured depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StackFull;

/// Explicit container stack indexed by depth.
///
/// Depth `d` (1-based) lives at index `d - 1`. Nothing here recurses, so the
/// lexer's own call stack is independent of document nesting.
#[derive(Debug, Clone)]
pub(crate) struct FrameStack {
    frames: Vec<Frame>,
    max_depth: usize,
}

impl FrameStack {
    pub fn new(max_depth: NonZeroUsize) -> Self {
        let max_depth = max_depth.get();
        Self {
            frames: Vec::with_capacity(max_depth.min(INITIAL_CAPACITY)),
            max_depth,
        }
    }

    /// Pushes a new frame and returns the resulting depth.
    pub fn push(&mut self, container: Container, start: usize) -> Result<usize, StackFull> {
        if self.frames.len() == self.max_depth {
            return Err(StackFull);
        }
        self.frames.push(Frame {
            container,
            start,
            elements: 0,
            expect_key: container == Container::Object,
        });
        Ok(self.frames.len())
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Frame> {
        self.frames.last_mut()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn as_slice(&self) -> &[Frame] {
        &self.frames
    }
}
