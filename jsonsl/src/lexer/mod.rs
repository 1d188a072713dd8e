// SPDX-License-Identifier: Apache-2.0

use log::{debug, trace};

use crate::error::{ErrorKind, LexError};
use crate::stack::{Frame, FrameStack, StackFull};
use crate::utf8;
use crate::{Container, Event, EventKind, Flow, Handler, LexerOptions, Scalar, Span};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Object {
    FirstKeyOrEnd,
    Key,
    Colon,
    Value,
    CommaOrEnd,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Array {
    FirstItemOrEnd,
    Item,
    CommaOrEnd,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Str {
    Normal,
    Escaping,
    /// Number of hex digits seen after `\u` (0-3)
    Unicode(u8),
    Utf8(utf8::Pending),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Num {
    Sign,
    LeadingZero,
    BeforeDecimalPoint,
    Decimal,
    AfterDecimalPoint,
    Exponent,
    ExponentSign,
    AfterExponent,
}

impl Num {
    /// Whether a number in this state is complete if the next byte ends it.
    fn can_end(self) -> bool {
        matches!(
            self,
            Num::LeadingZero | Num::BeforeDecimalPoint | Num::AfterDecimalPoint | Num::AfterExponent
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Literal {
    True,
    False,
    Null,
}

impl Literal {
    const fn as_bytes(self) -> &'static [u8] {
        match self {
            Literal::True => b"true",
            Literal::False => b"false",
            Literal::Null => b"null",
        }
    }

    const fn scalar(self) -> Scalar {
        match self {
            Literal::True => Scalar::True,
            Literal::False => Scalar::False,
            Literal::Null => Scalar::Null,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Comment {
    /// Saw `/`, expecting `/` or `*`
    Start,
    Line,
    Block,
    /// Saw `*` inside a block comment
    BlockStar,
}

/// Between-token states a comment returns to.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Resume {
    Idle,
    Object(Object),
    Array(Array),
    Finished,
}

impl Resume {
    fn state(self) -> State {
        match self {
            Resume::Idle => State::Idle,
            Resume::Object(expect) => State::Object { expect },
            Resume::Array(expect) => State::Array { expect },
            Resume::Finished => State::Finished,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    /// Expecting a root value
    Idle,
    Object {
        expect: Object,
    },
    Array {
        expect: Array,
    },
    String {
        state: Str,
        key: bool,
        escaped: bool,
    },
    Number {
        state: Num,
        float: bool,
    },
    Literal {
        literal: Literal,
        matched: u8,
    },
    Comment {
        state: Comment,
        resume: Resume,
    },
    /// Single document complete; only whitespace may follow
    Finished,
    Errored,
    Stopped,
    /// `finish` was called
    Closed,
}

/// Coarse view of where the lexer is, for callers and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerState {
    /// Waiting for a root value.
    Ready,
    /// Between tokens inside containers, at the given depth.
    InContainer(usize),
    InString,
    /// Inside a backslash escape of a string or key.
    InEscape,
    InNumber,
    /// Inside `true`, `false` or `null`.
    InLiteral,
    InComment,
    /// The document is complete.
    Done,
    /// The handler requested a stop.
    Stopped,
    Errored,
}

/// Outcome of a successful [`Lexer::feed`] or [`Lexer::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The document is not complete yet; feed more input. In multi-document
    /// mode this is returned even after whole documents were seen.
    NeedMore,
    /// The (single) document is complete.
    Complete,
    /// The handler returned [`Flow::Stop`]. Bytes after the one that produced
    /// the stopping event were not consumed.
    Stopped,
}

/// A streaming JSON lexer.
///
/// Input is pushed in chunks of any size with [`feed`](Lexer::feed); tokens
/// may be split anywhere between chunks. Each completed token or structural
/// milestone is reported to a [`Handler`] as an [`Event`] carrying absolute
/// byte offsets. Nothing is decoded or copied.
///
/// ```rust
/// use jsonsl::{Container, Event, EventKind, Flow, Lexer, Progress};
///
/// let mut events = Vec::new();
/// let mut lexer = Lexer::new();
/// let mut handler = |event: Event| {
///     events.push(event.kind);
///     Flow::Continue
/// };
/// assert_eq!(lexer.feed(br#"{"a":[1,"#, &mut handler), Ok(Progress::NeedMore));
/// assert_eq!(lexer.feed(br#"2]}"#, &mut handler), Ok(Progress::Complete));
/// assert_eq!(events[0], EventKind::Open(Container::Object));
/// assert_eq!(events.last(), Some(&EventKind::Done));
/// ```
#[derive(Debug, Clone)]
pub struct Lexer {
    state: State,
    options: LexerOptions,
    frames: FrameStack,
    /// Absolute offset of the next byte
    offset: usize,
    /// Absolute offset of the first byte of the token in progress
    token_start: usize,
    documents: usize,
    /// `Finished` was reached before the current feed started
    done_before_feed: bool,
    /// Handler returned `Flow::Stop` during the current byte
    halted: bool,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    pub fn new() -> Self {
        Self::with_options(LexerOptions::default())
    }

    pub fn with_options(options: LexerOptions) -> Self {
        Lexer {
            state: State::Idle,
            options,
            frames: FrameStack::new(options.max_depth),
            offset: 0,
            token_start: 0,
            documents: 0,
            done_before_feed: false,
            halted: false,
        }
    }

    pub fn options(&self) -> &LexerOptions {
        &self.options
    }

    /// Total bytes consumed since construction or the last reset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of currently open containers.
    pub fn depth(&self) -> usize {
        self.frames.depth()
    }

    /// Open containers, outermost first.
    pub fn frames(&self) -> &[Frame] {
        self.frames.as_slice()
    }

    /// Root values completed since construction or the last reset.
    pub fn documents(&self) -> usize {
        self.documents
    }

    pub fn state(&self) -> LexerState {
        match self.state {
            State::Idle => LexerState::Ready,
            State::Object { .. } | State::Array { .. } => {
                LexerState::InContainer(self.frames.depth())
            }
            State::String {
                state: Str::Escaping | Str::Unicode(_),
                ..
            } => LexerState::InEscape,
            State::String { .. } => LexerState::InString,
            State::Number { .. } => LexerState::InNumber,
            State::Literal { .. } => LexerState::InLiteral,
            State::Comment { .. } => LexerState::InComment,
            State::Finished | State::Closed => LexerState::Done,
            State::Stopped => LexerState::Stopped,
            State::Errored => LexerState::Errored,
        }
    }

    /// Discards all stream state. Options are kept.
    pub fn reset(&mut self) {
        debug!("--reset-- at {}", self.offset);
        self.state = State::Idle;
        self.frames.clear();
        self.offset = 0;
        self.token_start = 0;
        self.documents = 0;
        self.done_before_feed = false;
        self.halted = false;
    }

    /// Scans the next chunk of input, reporting completed tokens to
    /// `handler`. An empty chunk is allowed.
    ///
    /// Any error leaves the lexer errored until [`reset`](Lexer::reset).
    pub fn feed<H>(&mut self, data: &[u8], handler: &mut H) -> Result<Progress, LexError>
    where
        H: Handler + ?Sized,
    {
        if let Some(kind) = self.misuse() {
            let err = LexError {
                kind,
                offset: self.offset,
                byte: data.first().copied(),
            };
            return Err(self.fail(err, handler));
        }
        self.done_before_feed = self.state == State::Finished;

        for &byte in data {
            let pos = self.offset;
            trace!(
                "Pos: {}, Byte: {:?}, State: {:?}, Depth: {}",
                pos,
                byte as char,
                self.state,
                self.frames.depth()
            );
            match self.step(byte, pos, handler) {
                Ok(state) => self.state = state,
                Err(err) => return Err(self.fail(err, handler)),
            }
            self.offset += 1;
            if self.halted {
                debug!("--stopped by handler-- at {}", pos);
                self.state = State::Stopped;
                return Ok(Progress::Stopped);
            }
        }
        trace!("Consumed: {}", data.len());
        Ok(self.progress())
    }

    /// Signals end of input.
    ///
    /// Flushes a root number that only end of input terminates, and fails if
    /// the input stopped inside a token or container. Afterwards the lexer
    /// only accepts [`reset`](Lexer::reset).
    pub fn finish<H>(&mut self, handler: &mut H) -> Result<Progress, LexError>
    where
        H: Handler + ?Sized,
    {
        debug!("--finish-- at {}, depth {}", self.offset, self.frames.depth());
        let end = self.offset;
        let result = match self.state {
            State::Finished => Ok(()),
            State::Idle if self.options.allow_multiple_documents || self.documents > 0 => Ok(()),
            State::Idle => LexError::at_end(ErrorKind::EmptyDocument, end),
            State::Object { .. } | State::Array { .. } => {
                LexError::at_end(ErrorKind::UnclosedContainer, end)
            }
            State::Number { .. } if !self.frames.is_empty() => {
                LexError::at_end(ErrorKind::UnclosedContainer, end)
            }
            State::Number { state, float } if state.can_end() => {
                self.end_number(float, end, handler);
                Ok(())
            }
            State::Comment {
                state: Comment::Line,
                resume,
            } => {
                self.state = resume.state();
                return self.finish(handler);
            }
            State::Number { .. }
            | State::String { .. }
            | State::Literal { .. }
            | State::Comment { .. } => LexError::at_end(ErrorKind::UnexpectedEof, end),
            State::Errored => LexError::at_end(ErrorKind::FeedAfterError, end),
            State::Stopped => LexError::at_end(ErrorKind::FeedAfterStop, end),
            State::Closed => LexError::at_end(ErrorKind::FeedAfterFinish, end),
        };
        if let Err(err) = result {
            return Err(self.fail(err, handler));
        }
        // A root number flushed above is still subject to the handler's verdict
        if self.halted {
            self.state = State::Stopped;
            return Ok(Progress::Stopped);
        }
        self.state = State::Closed;
        Ok(Progress::Complete)
    }

    fn progress(&self) -> Progress {
        match self.state {
            State::Finished | State::Closed => Progress::Complete,
            State::Stopped => Progress::Stopped,
            _ => Progress::NeedMore,
        }
    }

    fn misuse(&self) -> Option<ErrorKind> {
        match self.state {
            State::Errored => Some(ErrorKind::FeedAfterError),
            State::Stopped => Some(ErrorKind::FeedAfterStop),
            State::Closed => Some(ErrorKind::FeedAfterFinish),
            _ => None,
        }
    }

    fn fail<H>(&mut self, err: LexError, handler: &mut H) -> LexError
    where
        H: Handler + ?Sized,
    {
        debug!("--error-- {}", err);
        self.state = State::Errored;
        handler.on_error(&err);
        err
    }

    fn emit<H>(&mut self, handler: &mut H, kind: EventKind, span: Span, depth: usize)
    where
        H: Handler + ?Sized,
    {
        if self.halted {
            return;
        }
        if handler.on_event(Event { kind, span, depth }) == Flow::Stop {
            self.halted = true;
        }
    }

    fn is_whitespace(byte: u8) -> bool {
        matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
    }

    fn step<H>(&mut self, byte: u8, pos: usize, handler: &mut H) -> Result<State, LexError>
    where
        H: Handler + ?Sized,
    {
        match (self.state, byte) {
            (State::String { state, key, escaped }, _) => {
                self.string_byte(state, key, escaped, byte, pos, handler)
            }
            (State::Number { state, float }, _) => {
                self.number_byte(state, float, byte, pos, handler)
            }
            (State::Literal { literal, matched }, _) => {
                let expected = literal.as_bytes();
                if byte != expected[matched as usize] {
                    return LexError::new(ErrorKind::InvalidLiteral, byte, pos);
                }
                if matched as usize + 1 < expected.len() {
                    return Ok(State::Literal {
                        literal,
                        matched: matched + 1,
                    });
                }
                let depth = self.frames.depth();
                let span = Span::new(self.token_start, pos + 1);
                self.emit(handler, EventKind::Value(literal.scalar()), span, depth);
                Ok(self.value_complete(pos + 1, handler))
            }
            (State::Comment { state, resume }, _) => Self::comment_byte(state, resume, byte, pos),

            // Between tokens: whitespace and comments
            (State::Idle | State::Object { .. } | State::Array { .. } | State::Finished, _)
                if Self::is_whitespace(byte) =>
            {
                Ok(self.state)
            }
            (State::Idle | State::Object { .. } | State::Array { .. } | State::Finished, b'/')
                if self.options.allow_comments =>
            {
                let resume = match self.state {
                    State::Idle => Resume::Idle,
                    State::Object { expect } => Resume::Object(expect),
                    State::Array { expect } => Resume::Array(expect),
                    _ => Resume::Finished,
                };
                Ok(State::Comment {
                    state: Comment::Start,
                    resume,
                })
            }

            (State::Idle, b'}' | b']') => LexError::new(ErrorKind::UnopenedContainer, byte, pos),
            (State::Idle, _) => self.start_value(byte, pos, handler, ErrorKind::InvalidRoot),

            (
                State::Object {
                    expect: Object::FirstKeyOrEnd,
                },
                b'}' | b']',
            ) => self.close_container(byte, pos, handler),
            (
                State::Object {
                    expect: Object::Key,
                },
                b'}',
            ) => LexError::new(ErrorKind::TrailingComma, byte, pos),
            (
                State::Object {
                    expect: Object::FirstKeyOrEnd | Object::Key,
                },
                b'"',
            ) => {
                if let Some(frame) = self.frames.top_mut() {
                    frame.elements += 1;
                    frame.expect_key = false;
                }
                self.token_start = pos;
                Ok(State::String {
                    state: Str::Normal,
                    key: true,
                    escaped: false,
                })
            }
            (
                State::Object {
                    expect: Object::FirstKeyOrEnd | Object::Key,
                },
                _,
            ) => LexError::new(ErrorKind::ExpectedObjectKey, byte, pos),
            (
                State::Object {
                    expect: Object::Colon,
                },
                b':',
            ) => Ok(State::Object {
                expect: Object::Value,
            }),
            (
                State::Object {
                    expect: Object::Colon,
                },
                _,
            ) => LexError::new(ErrorKind::ExpectedColon, byte, pos),
            (
                State::Object {
                    expect: Object::Value,
                },
                _,
            ) => self.start_value(byte, pos, handler, ErrorKind::ExpectedObjectValue),
            (
                State::Object {
                    expect: Object::CommaOrEnd,
                },
                b',',
            ) => {
                if let Some(frame) = self.frames.top_mut() {
                    frame.expect_key = true;
                }
                Ok(State::Object {
                    expect: Object::Key,
                })
            }

            (
                State::Array {
                    expect: Array::FirstItemOrEnd,
                },
                b']' | b'}',
            ) => self.close_container(byte, pos, handler),
            (
                State::Array {
                    expect: Array::Item,
                },
                b']',
            ) => LexError::new(ErrorKind::TrailingComma, byte, pos),
            (
                State::Array {
                    expect: Array::FirstItemOrEnd | Array::Item,
                },
                _,
            ) => self.start_value(byte, pos, handler, ErrorKind::ExpectedArrayItem),
            (
                State::Array {
                    expect: Array::CommaOrEnd,
                },
                b',',
            ) => Ok(State::Array {
                expect: Array::Item,
            }),

            (
                State::Object {
                    expect: Object::CommaOrEnd,
                }
                | State::Array {
                    expect: Array::CommaOrEnd,
                },
                b'}' | b']',
            ) => self.close_container(byte, pos, handler),
            (
                State::Object {
                    expect: Object::CommaOrEnd,
                }
                | State::Array {
                    expect: Array::CommaOrEnd,
                },
                _,
            ) => LexError::new(ErrorKind::ExpectedCommaOrEnd, byte, pos),

            (State::Finished, _) => {
                let kind = if self.done_before_feed {
                    ErrorKind::FeedAfterDone
                } else {
                    ErrorKind::TrailingContent
                };
                LexError::new(kind, byte, pos)
            }
            (State::Errored | State::Stopped | State::Closed, _) => {
                let kind = self.misuse().unwrap_or(ErrorKind::FeedAfterError);
                LexError::new(kind, byte, pos)
            }
        }
    }

    /// Begins a value at a position where one is expected. `otherwise` is
    /// the error for bytes that cannot start a value here.
    fn start_value<H>(
        &mut self,
        byte: u8,
        pos: usize,
        handler: &mut H,
        otherwise: ErrorKind,
    ) -> Result<State, LexError>
    where
        H: Handler + ?Sized,
    {
        let state = match byte {
            b'{' | b'[' => return self.open_container(byte, pos, handler),
            b'"' => State::String {
                state: Str::Normal,
                key: false,
                escaped: false,
            },
            b'-' => State::Number {
                state: Num::Sign,
                float: false,
            },
            b'0' => State::Number {
                state: Num::LeadingZero,
                float: false,
            },
            b'1'..=b'9' => State::Number {
                state: Num::BeforeDecimalPoint,
                float: false,
            },
            b't' => State::Literal {
                literal: Literal::True,
                matched: 1,
            },
            b'f' => State::Literal {
                literal: Literal::False,
                matched: 1,
            },
            b'n' => State::Literal {
                literal: Literal::Null,
                matched: 1,
            },
            _ => return LexError::new(otherwise, byte, pos),
        };
        self.count_array_item();
        self.token_start = pos;
        Ok(state)
    }

    fn count_array_item(&mut self) {
        if let Some(frame) = self.frames.top_mut() {
            if frame.container == Container::Array {
                frame.elements += 1;
            }
        }
    }

    fn open_container<H>(&mut self, byte: u8, pos: usize, handler: &mut H) -> Result<State, LexError>
    where
        H: Handler + ?Sized,
    {
        let Some(container) = Container::from_open(byte) else {
            return LexError::new(ErrorKind::InvalidRoot, byte, pos);
        };
        self.count_array_item();
        let depth = match self.frames.push(container, pos) {
            Ok(depth) => depth,
            Err(StackFull) => return LexError::new(ErrorKind::MaxDepthReached, byte, pos),
        };
        self.emit(handler, EventKind::Open(container), Span::new(pos, pos + 1), depth);
        Ok(match container {
            Container::Object => State::Object {
                expect: Object::FirstKeyOrEnd,
            },
            Container::Array => State::Array {
                expect: Array::FirstItemOrEnd,
            },
        })
    }

    fn close_container<H>(&mut self, byte: u8, pos: usize, handler: &mut H) -> Result<State, LexError>
    where
        H: Handler + ?Sized,
    {
        let Some(container) = Container::from_close(byte) else {
            return LexError::new(ErrorKind::ExpectedCommaOrEnd, byte, pos);
        };
        let depth = self.frames.depth();
        let frame = match self.frames.top() {
            None => return LexError::new(ErrorKind::UnopenedContainer, byte, pos),
            Some(frame) if frame.container != container => {
                return LexError::new(ErrorKind::MismatchedBracket, byte, pos)
            }
            Some(frame) => *frame,
        };
        self.frames.pop();
        self.emit(
            handler,
            EventKind::Close {
                container,
                opened_at: frame.start,
                elements: frame.elements,
            },
            Span::new(pos, pos + 1),
            depth,
        );
        Ok(self.value_complete(pos + 1, handler))
    }

    /// State after a value ending just before `end`. Completing a root value
    /// emits `Done`.
    fn value_complete<H>(&mut self, end: usize, handler: &mut H) -> State
    where
        H: Handler + ?Sized,
    {
        match self.frames.top() {
            Some(frame) => match frame.container {
                Container::Object => State::Object {
                    expect: Object::CommaOrEnd,
                },
                Container::Array => State::Array {
                    expect: Array::CommaOrEnd,
                },
            },
            None => {
                self.documents += 1;
                debug!("--document {} done-- at {}", self.documents, end);
                self.emit(handler, EventKind::Done, Span::new(end, end), 0);
                if self.options.allow_multiple_documents {
                    State::Idle
                } else {
                    State::Finished
                }
            }
        }
    }

    fn string_byte<H>(
        &mut self,
        state: Str,
        key: bool,
        escaped: bool,
        byte: u8,
        pos: usize,
        handler: &mut H,
    ) -> Result<State, LexError>
    where
        H: Handler + ?Sized,
    {
        let next = match (state, byte) {
            (Str::Normal, b'"') => {
                let span = Span::new(self.token_start, pos + 1);
                let depth = self.frames.depth();
                if key {
                    self.emit(handler, EventKind::Key { escaped }, span, depth);
                    return Ok(State::Object {
                        expect: Object::Colon,
                    });
                }
                self.emit(handler, EventKind::Value(Scalar::String { escaped }), span, depth);
                return Ok(self.value_complete(pos + 1, handler));
            }
            (Str::Normal, b'\\') => {
                return Ok(State::String {
                    state: Str::Escaping,
                    key,
                    escaped: true,
                })
            }
            (Str::Normal, b'\x00'..=b'\x1F') => {
                return LexError::new(ErrorKind::UnescapedControlCharacter, byte, pos)
            }
            (Str::Normal, _) if utf8::is_1byte(byte) => Str::Normal,
            (Str::Normal, _) => match utf8::start(byte) {
                Some(pending) => Str::Utf8(pending),
                None => return LexError::new(ErrorKind::InvalidUtf8, byte, pos),
            },
            (Str::Utf8(pending), _) => match pending.advance(byte) {
                Ok(Some(pending)) => Str::Utf8(pending),
                Ok(None) => Str::Normal,
                Err(()) => return LexError::new(ErrorKind::InvalidUtf8, byte, pos),
            },
            (Str::Escaping, b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => Str::Normal,
            (Str::Escaping, b'u') => Str::Unicode(0),
            (Str::Escaping, _) => {
                return LexError::new(ErrorKind::InvalidStringEscape, byte, pos)
            }
            (Str::Unicode(3), b'0'..=b'9' | b'a'..=b'f' | b'A'..=b'F') => Str::Normal,
            (Str::Unicode(seen), b'0'..=b'9' | b'a'..=b'f' | b'A'..=b'F') => {
                Str::Unicode(seen + 1)
            }
            (Str::Unicode(_), _) => {
                return LexError::new(ErrorKind::InvalidUnicodeEscape, byte, pos)
            }
        };
        Ok(State::String {
            state: next,
            key,
            escaped,
        })
    }

    fn number_byte<H>(
        &mut self,
        state: Num,
        float: bool,
        byte: u8,
        pos: usize,
        handler: &mut H,
    ) -> Result<State, LexError>
    where
        H: Handler + ?Sized,
    {
        let (next, float) = match (state, byte) {
            (Num::Sign, b'0') => (Num::LeadingZero, float),
            (Num::Sign, b'1'..=b'9') => (Num::BeforeDecimalPoint, float),
            (Num::BeforeDecimalPoint, b'0'..=b'9') => (Num::BeforeDecimalPoint, float),
            (Num::LeadingZero | Num::BeforeDecimalPoint, b'.') => (Num::Decimal, true),
            (Num::LeadingZero | Num::BeforeDecimalPoint | Num::AfterDecimalPoint, b'e' | b'E') => {
                (Num::Exponent, true)
            }
            (Num::Decimal | Num::AfterDecimalPoint, b'0'..=b'9') => (Num::AfterDecimalPoint, float),
            (Num::Exponent, b'+' | b'-') => (Num::ExponentSign, float),
            (Num::Exponent | Num::ExponentSign | Num::AfterExponent, b'0'..=b'9') => {
                (Num::AfterExponent, float)
            }
            (_, b',' | b']' | b'}') if state.can_end() => {
                return self.end_number_then(float, byte, pos, handler)
            }
            (_, b'/') if state.can_end() && self.options.allow_comments => {
                return self.end_number_then(float, byte, pos, handler)
            }
            (_, _) if state.can_end() && Self::is_whitespace(byte) => {
                return self.end_number_then(float, byte, pos, handler)
            }
            (_, _) => return LexError::new(ErrorKind::InvalidNumber, byte, pos),
        };
        Ok(State::Number { state: next, float })
    }

    /// Emits the number ending at `end` and returns the follow-up state.
    fn end_number<H>(&mut self, float: bool, end: usize, handler: &mut H) -> State
    where
        H: Handler + ?Sized,
    {
        let scalar = if float { Scalar::Float } else { Scalar::Integer };
        let depth = self.frames.depth();
        self.emit(handler, EventKind::Value(scalar), Span::new(self.token_start, end), depth);
        self.value_complete(end, handler)
    }

    /// Numbers are only delimited by the byte after them, which is then
    /// processed again in the follow-up state.
    fn end_number_then<H>(
        &mut self,
        float: bool,
        byte: u8,
        pos: usize,
        handler: &mut H,
    ) -> Result<State, LexError>
    where
        H: Handler + ?Sized,
    {
        self.state = self.end_number(float, pos, handler);
        if self.halted {
            return Ok(self.state);
        }
        self.step(byte, pos, handler)
    }

    fn comment_byte(comment: Comment, resume: Resume, byte: u8, pos: usize) -> Result<State, LexError> {
        let next = match (comment, byte) {
            (Comment::Start, b'/') => Comment::Line,
            (Comment::Start, b'*') => Comment::Block,
            (Comment::Start, _) => return LexError::new(ErrorKind::InvalidComment, byte, pos),
            (Comment::Line, b'\n') => return Ok(resume.state()),
            (Comment::Line, _) => Comment::Line,
            (Comment::Block | Comment::BlockStar, b'*') => Comment::BlockStar,
            (Comment::BlockStar, b'/') => return Ok(resume.state()),
            (Comment::Block | Comment::BlockStar, _) => Comment::Block,
        };
        Ok(State::Comment {
            state: next,
            resume,
        })
    }
}
