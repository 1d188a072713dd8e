// SPDX-License-Identifier: Apache-2.0

use crate::{Event, Flow, LexError};

/// Receives lexer events synchronously, in input order.
///
/// Closures of type `FnMut(Event) -> Flow` implement this trait, so simple
/// callers never name it.
///
/// ```rust
/// use jsonsl::{Event, Flow, Handler, LexError, Lexer};
///
/// struct Counter {
///     events: usize,
///     failed: bool,
/// }
///
/// impl Handler for Counter {
///     fn on_event(&mut self, _event: Event) -> Flow {
///         self.events += 1;
///         Flow::Continue
///     }
///
///     fn on_error(&mut self, _error: &LexError) {
///         self.failed = true;
///     }
/// }
///
/// let mut counter = Counter { events: 0, failed: false };
/// let mut lexer = Lexer::new();
/// lexer.feed(b"[1, 2]", &mut counter).unwrap();
/// assert_eq!(counter.events, 5); // open, 1, 2, close, done
/// assert!(lexer.feed(b"]", &mut counter).is_err());
/// assert!(counter.failed);
/// ```
pub trait Handler {
    /// Handles one completed token or structural milestone.
    fn on_event(&mut self, event: Event) -> Flow;

    /// Called once with the error just before `feed`/`finish` returns it.
    /// The lexer is already errored; this is a notification only.
    fn on_error(&mut self, _error: &LexError) {}
}

impl<F> Handler for F
where
    F: FnMut(Event) -> Flow,
{
    fn on_event(&mut self, event: Event) -> Flow {
        self(event)
    }
}
