// SPDX-License-Identifier: Apache-2.0

/// Kind of an open container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Object,
    Array,
}

impl Container {
    pub(crate) fn from_open(byte: u8) -> Option<Self> {
        match byte {
            b'{' => Some(Container::Object),
            b'[' => Some(Container::Array),
            _ => None,
        }
    }

    pub(crate) fn from_close(byte: u8) -> Option<Self> {
        match byte {
            b'}' => Some(Container::Object),
            b']' => Some(Container::Array),
            _ => None,
        }
    }
}

/// Classification of a scalar value token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    /// A string value; `escaped` is set if it contains any backslash escape.
    String { escaped: bool },
    /// A number without fraction or exponent.
    Integer,
    /// A number with a fraction and/or exponent.
    Float,
    True,
    False,
    Null,
}

/// What an [`Event`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `{` or `[`.
    Open(Container),
    /// `}` or `]`. Carries the closed frame's start offset and the number of
    /// elements (array items or object members) it held.
    Close {
        container: Container,
        opened_at: usize,
        elements: usize,
    },
    /// An object key.
    Key { escaped: bool },
    /// A scalar value.
    Value(Scalar),
    /// A root value has been completed.
    Done,
}

/// Half-open byte range `[start, end)` in absolute stream offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A single lexer notification.
///
/// `span` covers the raw token: quotes included for strings and keys, the
/// bracket byte for opens and closes, and an empty range at the end of the
/// document for `Done`. `depth` is the container depth at emission: the
/// container's own depth for `Open`/`Close`, the enclosing depth otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Event {
    pub kind: EventKind,
    pub span: Span,
    pub depth: usize,
}

impl Event {
    /// Span of the token's content: strings and keys without their quotes,
    /// everything else unchanged.
    pub fn content(&self) -> Span {
        match self.kind {
            EventKind::Key { .. } | EventKind::Value(Scalar::String { .. }) => {
                Span::new(self.span.start + 1, self.span.end - 1)
            }
            _ => self.span,
        }
    }

    /// Slice this event's raw token out of `input`, where `input` starts at
    /// stream offset `base`. Returns `None` if the span is not inside it.
    pub fn slice<'a>(&self, input: &'a [u8], base: usize) -> Option<&'a [u8]> {
        let start = self.span.start.checked_sub(base)?;
        let end = self.span.end.checked_sub(base)?;
        input.get(start..end)
    }
}

/// Handler verdict after each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// End the parse without an error. The lexer must be reset before reuse.
    Stop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_strips_quotes() {
        let key = Event {
            kind: EventKind::Key { escaped: false },
            span: Span::new(1, 4),
            depth: 1,
        };
        assert_eq!(key.content(), Span::new(2, 3));

        let number = Event {
            kind: EventKind::Value(Scalar::Integer),
            span: Span::new(5, 7),
            depth: 1,
        };
        assert_eq!(number.content(), Span::new(5, 7));
    }

    #[test]
    fn test_slice_with_base() {
        let event = Event {
            kind: EventKind::Value(Scalar::String { escaped: false }),
            span: Span::new(10, 13),
            depth: 0,
        };
        assert_eq!(event.slice(b"xx\"a\"", 8), Some(b"\"a\"".as_slice()));
        assert_eq!(event.slice(b"\"a\"", 11), None);
    }

    #[test]
    fn test_container_bytes() {
        assert_eq!(Container::from_open(b'['), Some(Container::Array));
        assert_eq!(Container::from_close(b'}'), Some(Container::Object));
        assert_eq!(Container::from_open(b']'), None);
    }
}
