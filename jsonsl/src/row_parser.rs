// SPDX-License-Identifier: Apache-2.0

//! Splitting a result document into rows.
//!
//! Large query responses usually wrap one big array in a small object:
//!
//! ```text
//! {"total_rows":3,"rows":[{"id":1},{"id":2},{"id":3}],"status":"ok"}
//! ```
//!
//! [`RowParser`] hands out each element of the array named by a
//! [`JsonPointer`] as raw bytes as soon as it is complete, then a single
//! metadata document made of everything around the array (the array itself
//! left empty). Only the bytes of the row in progress and the metadata are
//! ever buffered.

use core::fmt;

use log::{debug, trace};
use thiserror::Error;

use crate::pointer::Step;
use crate::{
    Container, Event, EventKind, Flow, Handler, JsonPointer, LexError, Lexer, LexerOptions,
    LexerState, PointerError, Progress, Span,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    InvalidPointer(#[from] PointerError),
    /// Rows cannot be the document itself.
    #[error("row pointer must name an array below the root")]
    PointerTargetsRoot,
    #[error("row document root must be an object (offset {offset})")]
    RootNotObject { offset: usize },
}

/// One element of the row array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row<'a> {
    /// Position in the row array, from 0.
    pub index: usize,
    /// The element's raw JSON text.
    pub bytes: &'a [u8],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEvent<'a> {
    Row(Row<'a>),
    /// The document with the row array emptied, e.g.
    /// `{"total_rows":3,"rows":[],"status":"ok"}`. If the pointer matched
    /// nothing, the whole document. Always the last event.
    Meta(&'a [u8]),
}

/// A container on the pointer's path.
#[derive(Debug, Clone)]
struct Link {
    container: Container,
    /// Children completed so far, for arrays.
    next_index: usize,
    /// Most recent key, for objects.
    key: Option<Vec<u8>>,
}

impl Link {
    fn new(container: Container) -> Self {
        Self {
            container,
            next_index: 0,
            key: None,
        }
    }

    fn step(&self) -> Option<Step<'_>> {
        match self.container {
            Container::Object => self.key.as_deref().map(Step::Key),
            Container::Array => Some(Step::Index(self.next_index)),
        }
    }
}

/// Path tracking and buffer bookkeeping, separate from the buffer itself so
/// both can be borrowed while the lexer runs.
#[derive(Debug, Clone)]
struct Rows {
    pointer: JsonPointer,
    /// Containers from the root down that lie on the pointer's path.
    chain: Vec<Link>,
    /// Depth of the row array once found
    rows_depth: Option<usize>,
    rows_closed: bool,
    root_start: usize,
    /// Root start through the row array's `[`
    header: Vec<u8>,
    row_start: usize,
    /// Offset of the row array's `]`
    trailer_start: usize,
    /// Lowest offset that must stay buffered
    keep_from: usize,
    error: Option<RowError>,
}

impl Rows {
    fn new(pointer: JsonPointer) -> Self {
        Self {
            pointer,
            chain: Vec::new(),
            rows_depth: None,
            rows_closed: false,
            root_start: 0,
            header: Vec::new(),
            row_start: 0,
            trailer_start: 0,
            keep_from: 0,
            error: None,
        }
    }

    fn in_rows(&self) -> Option<usize> {
        self.rows_depth.filter(|_| !self.rows_closed)
    }

    /// A direct child of the chain's tip finished.
    fn child_done(&mut self, depth: usize) {
        if depth == self.chain.len() {
            if let Some(tip) = self.chain.last_mut() {
                tip.next_index += 1;
                tip.key = None;
            }
        }
    }
}

struct Tracker<'a, F> {
    rows: &'a mut Rows,
    buffer: &'a [u8],
    base: usize,
    sink: &'a mut F,
}

impl<'a, F> Tracker<'a, F>
where
    F: FnMut(RowEvent<'_>) -> Flow,
{
    fn bytes(&self, span: Span) -> &'a [u8] {
        let buffer: &'a [u8] = self.buffer;
        let range = span.start.saturating_sub(self.base)..span.end.saturating_sub(self.base);
        debug_assert!(span.start >= self.base, "row bytes were dropped");
        buffer.get(range).unwrap_or_default()
    }

    fn reject_root(&mut self, offset: usize) -> Flow {
        debug!("row document root is not an object at {}", offset);
        self.rows.error = Some(RowError::RootNotObject { offset });
        Flow::Stop
    }

    fn emit_row(&mut self, span: Span) -> Flow {
        let index = self.rows.chain.last().map_or(0, |tip| tip.next_index);
        trace!("row {} at {:?}", index, span);
        self.rows.keep_from = span.end;
        let bytes = self.bytes(span);
        (self.sink)(RowEvent::Row(Row { index, bytes }))
    }

    fn emit_meta(&mut self, end: usize) -> Flow {
        let flow = if self.rows.rows_depth.is_some() {
            let mut meta = core::mem::take(&mut self.rows.header);
            meta.extend_from_slice(self.bytes(Span::new(self.rows.trailer_start, end)));
            (self.sink)(RowEvent::Meta(&meta))
        } else {
            debug!("row pointer {} matched nothing", self.rows.pointer);
            let meta = self.bytes(Span::new(self.rows.root_start, end));
            (self.sink)(RowEvent::Meta(meta))
        };
        self.rows.keep_from = end;
        flow
    }

    fn open(&mut self, container: Container, span: Span, depth: usize) -> Flow {
        if depth == 1 {
            if container != Container::Object {
                return self.reject_root(span.start);
            }
            self.rows.chain.push(Link::new(container));
            self.rows.root_start = span.start;
            self.rows.keep_from = span.start;
            return Flow::Continue;
        }
        if let Some(rows_depth) = self.rows.in_rows() {
            if depth == rows_depth + 1 {
                self.rows.row_start = span.start;
            }
            return Flow::Continue;
        }
        let level = depth - 2;
        let on_path = depth == self.rows.chain.len() + 1
            && self.rows.rows_depth.is_none()
            && self.rows.chain.last().and_then(Link::step).is_some_and(|step| {
                self.rows.pointer.matches(level, step)
            });
        if !on_path {
            return Flow::Continue;
        }
        if level + 1 < self.rows.pointer.len() {
            self.rows.chain.push(Link::new(container));
        } else if container == Container::Array {
            debug!("row array found at {}", span.start);
            self.rows.chain.push(Link::new(container));
            self.rows.rows_depth = Some(depth);
            self.rows.header = self.bytes(Span::new(self.rows.root_start, span.end)).to_vec();
            self.rows.keep_from = span.end;
        }
        Flow::Continue
    }

    fn close(&mut self, span: Span, depth: usize) -> Flow {
        if self.rows.in_rows().is_some_and(|rows_depth| depth == rows_depth + 1) {
            let row = Span::new(self.rows.row_start, span.end);
            if self.emit_row(row) == Flow::Stop {
                return Flow::Stop;
            }
        }
        if depth == self.rows.chain.len() {
            self.rows.chain.pop();
            if self.rows.rows_depth == Some(depth) {
                self.rows.rows_closed = true;
                self.rows.trailer_start = span.start;
                self.rows.keep_from = span.start;
            }
        }
        self.rows.child_done(depth - 1);
        if depth == 1 {
            return self.emit_meta(span.end);
        }
        Flow::Continue
    }
}

impl<F> Handler for Tracker<'_, F>
where
    F: FnMut(RowEvent<'_>) -> Flow,
{
    fn on_event(&mut self, event: Event) -> Flow {
        let Event { kind, span, depth } = event;
        match kind {
            EventKind::Open(container) => self.open(container, span, depth),
            EventKind::Close { .. } => self.close(span, depth),
            EventKind::Key { .. } => {
                if depth == self.rows.chain.len() {
                    let key = self.bytes(event.content()).to_vec();
                    if let Some(tip) = self.rows.chain.last_mut() {
                        tip.key = Some(key);
                    }
                }
                Flow::Continue
            }
            EventKind::Value(_) if depth == 0 => self.reject_root(span.start),
            EventKind::Value(_) => {
                let flow = if self.rows.in_rows() == Some(depth) {
                    self.emit_row(span)
                } else {
                    Flow::Continue
                };
                self.rows.child_done(depth);
                flow
            }
            EventKind::Done => Flow::Continue,
        }
    }
}

/// Streams the elements of one array out of a JSON object document.
///
/// Rows are reported in order through `handler` as soon as each is complete,
/// followed by one [`RowEvent::Meta`] when the root object closes. The
/// handler may return [`Flow::Stop`] to end early. Multiple documents are
/// not supported; that option is ignored.
///
/// ```rust
/// use jsonsl::{Flow, RowEvent, RowParser};
///
/// let mut rows = Vec::new();
/// let mut meta = Vec::new();
/// let mut parser = RowParser::new("/rows/^", |event: RowEvent<'_>| {
///     match event {
///         RowEvent::Row(row) => rows.push(row.bytes.to_vec()),
///         RowEvent::Meta(bytes) => meta = bytes.to_vec(),
///     }
///     Flow::Continue
/// })
/// .unwrap();
/// parser.feed(br#"{"total":2,"rows":[{"id":1},"#).unwrap();
/// parser.feed(br#"{"id":2}],"ok":true}"#).unwrap();
/// parser.finish().unwrap();
/// drop(parser);
///
/// assert_eq!(rows, [br#"{"id":1}"#.to_vec(), br#"{"id":2}"#.to_vec()]);
/// assert_eq!(meta, br#"{"total":2,"rows":[],"ok":true}"#);
/// ```
pub struct RowParser<F> {
    lexer: Lexer,
    rows: Rows,
    /// Unconsumed input, starting at stream offset `base`
    buffer: Vec<u8>,
    base: usize,
    handler: F,
}

impl<F> RowParser<F>
where
    F: FnMut(RowEvent<'_>) -> Flow,
{
    pub fn new(pointer: &str, handler: F) -> Result<Self, RowError> {
        Self::with_options(pointer, LexerOptions::default(), handler)
    }

    pub fn with_options(
        pointer: &str,
        options: LexerOptions,
        handler: F,
    ) -> Result<Self, RowError> {
        let pointer = JsonPointer::parse(pointer)?;
        if pointer.is_empty() {
            return Err(RowError::PointerTargetsRoot);
        }
        let options = options.with_multiple_documents(false);
        Ok(Self {
            lexer: Lexer::with_options(options),
            rows: Rows::new(pointer),
            buffer: Vec::new(),
            base: 0,
            handler,
        })
    }

    pub fn pointer(&self) -> &JsonPointer {
        &self.rows.pointer
    }

    /// Bytes currently held back for an incomplete row or the metadata.
    pub fn buffered(&self) -> usize {
        self.buffer.len() + self.rows.header.len()
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn feed(&mut self, chunk: &[u8]) -> Result<Progress, RowError> {
        // Input after the document ends is never part of a row or the metadata
        if !matches!(
            self.lexer.state(),
            LexerState::Done | LexerState::Stopped | LexerState::Errored
        ) {
            self.buffer.extend_from_slice(chunk);
        }
        let mut tracker = Tracker {
            rows: &mut self.rows,
            buffer: &self.buffer,
            base: self.base,
            sink: &mut self.handler,
        };
        let progress = self.lexer.feed(chunk, &mut tracker)?;
        self.settle(progress)
    }

    /// Signals end of input. Fails if the document is incomplete.
    pub fn finish(&mut self) -> Result<Progress, RowError> {
        let mut tracker = Tracker {
            rows: &mut self.rows,
            buffer: &self.buffer,
            base: self.base,
            sink: &mut self.handler,
        };
        let progress = self.lexer.finish(&mut tracker)?;
        self.settle(progress)
    }

    /// Forgets all input so a new document can be parsed. The pointer and
    /// handler are kept.
    pub fn reset(&mut self) {
        self.lexer.reset();
        let pointer = self.rows.pointer.clone();
        self.rows = Rows::new(pointer);
        self.buffer.clear();
        self.base = 0;
    }

    /// Surfaces a row error raised inside the lexer callbacks, then drops
    /// bytes no longer needed.
    fn settle(&mut self, progress: Progress) -> Result<Progress, RowError> {
        if let Some(err) = self.rows.error.take() {
            return Err(err);
        }
        if self.lexer.state() == LexerState::Done {
            self.rows.keep_from = self.lexer.offset();
        }
        self.compact();
        Ok(progress)
    }

    fn compact(&mut self) {
        let drop = self.rows.keep_from.saturating_sub(self.base).min(self.buffer.len());
        if drop > 0 {
            trace!("dropping {} buffered bytes at {}", drop, self.base);
            self.buffer.drain(..drop);
            self.base += drop;
        }
    }
}

impl<F> fmt::Debug for RowParser<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowParser")
            .field("pointer", &self.rows.pointer.as_str())
            .field("offset", &self.lexer.offset())
            .field("buffered", &(self.buffer.len() + self.rows.header.len()))
            .field("rows_found", &self.rows.rows_depth.is_some())
            .finish()
    }
}
