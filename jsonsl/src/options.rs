// SPDX-License-Identifier: Apache-2.0

use core::num::NonZeroUsize;

/// Nesting depth used when no explicit limit is configured.
pub const DEFAULT_MAX_DEPTH: NonZeroUsize = match NonZeroUsize::new(512) {
    Some(depth) => depth,
    None => unreachable!(),
};

/// Construction-time configuration for a [`Lexer`](crate::Lexer).
///
/// Options are fixed once the lexer is built; `reset` keeps them.
///
/// ```rust
/// use core::num::NonZeroUsize;
/// use jsonsl::{Lexer, LexerOptions};
///
/// let options = LexerOptions::default()
///     .with_max_depth(NonZeroUsize::new(16).unwrap())
///     .with_multiple_documents(true);
/// let lexer = Lexer::with_options(options);
/// assert_eq!(lexer.options().max_depth.get(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerOptions {
    /// Deepest allowed container nesting. Opening one more container fails
    /// with [`ErrorKind::MaxDepthReached`](crate::ErrorKind::MaxDepthReached).
    pub max_depth: NonZeroUsize,
    /// Accept a stream of concatenated documents. Each completed document
    /// emits `Done` and the lexer goes back to expecting a new root value.
    pub allow_multiple_documents: bool,
    /// Accept `// line` and `/* block */` comments wherever whitespace is
    /// allowed. Not standard JSON.
    pub allow_comments: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_multiple_documents: false,
            allow_comments: false,
        }
    }
}

impl LexerOptions {
    pub fn with_max_depth(mut self, max_depth: NonZeroUsize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_multiple_documents(mut self, allow: bool) -> Self {
        self.allow_multiple_documents = allow;
        self
    }

    pub fn with_comments(mut self, allow: bool) -> Self {
        self.allow_comments = allow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LexerOptions::default();
        assert_eq!(options.max_depth.get(), 512);
        assert!(!options.allow_multiple_documents);
        assert!(!options.allow_comments);
    }

    #[test]
    fn test_setters_chain() {
        let options = LexerOptions::default()
            .with_max_depth(NonZeroUsize::new(3).unwrap())
            .with_comments(true);
        assert_eq!(options.max_depth.get(), 3);
        assert!(options.allow_comments);
        assert!(!options.allow_multiple_documents);
    }
}
