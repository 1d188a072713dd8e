// SPDX-License-Identifier: Apache-2.0

//! A streaming JSON lexer.
//!
//! [`Lexer`] consumes input in chunks of any size and reports structural
//! events (container open/close, keys, scalar values, document completion)
//! with absolute byte offsets. Values are never decoded and no tree is built;
//! callers slice the raw tokens out of their own buffers.
//!
//! Nesting is tracked on an explicit frame stack bounded by
//! [`LexerOptions::max_depth`], so memory stays bounded for arbitrarily large
//! documents and the lexer never recurses.
//!
//! [`RowParser`] builds on the lexer to split a large result document into
//! the elements of one array (rows) plus the surrounding metadata.

mod error;
pub use error::{ErrorClass, ErrorKind, LexError};

mod event;
pub use event::{Container, Event, EventKind, Flow, Scalar, Span};

mod handler;
pub use handler::Handler;

mod options;
pub use options::{LexerOptions, DEFAULT_MAX_DEPTH};

mod stack;
pub use stack::Frame;

mod utf8;

mod lexer;
pub use lexer::{Lexer, LexerState, Progress};

mod pointer;
pub use pointer::{JsonPointer, PointerError};

mod row_parser;
pub use row_parser::{Row, RowError, RowEvent, RowParser};
