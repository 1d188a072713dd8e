// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Broad classification of a [`LexError`].
///
/// Callers use the class to decide what to do next: input errors mean the
/// stream is corrupt, a stack overflow may be retried with a larger
/// `max_depth`, and misuse is a bug in the calling code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Malformed token content: bad escape, number, literal or UTF-8.
    Token,
    /// Unexpected or mismatched bracket, comma, colon or value position.
    Structural,
    /// Nesting exceeded the configured maximum depth.
    StackOverflow,
    /// The lexer was fed while in a terminal state.
    Misuse,
}

/// The specific reason a feed failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    #[error("invalid number")]
    InvalidNumber,
    #[error("invalid escape sequence in string")]
    InvalidStringEscape,
    #[error("invalid \\u escape sequence")]
    InvalidUnicodeEscape,
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    #[error("unescaped control character in string")]
    UnescapedControlCharacter,
    #[error("invalid literal")]
    InvalidLiteral,
    #[error("invalid comment")]
    InvalidComment,
    #[error("unexpected end of input inside a token")]
    UnexpectedEof,
    #[error("expected a JSON value")]
    InvalidRoot,
    #[error("expected object key")]
    ExpectedObjectKey,
    #[error("expected ':' after object key")]
    ExpectedColon,
    #[error("expected object value")]
    ExpectedObjectValue,
    #[error("expected ',' or closing bracket")]
    ExpectedCommaOrEnd,
    #[error("expected array item")]
    ExpectedArrayItem,
    #[error("trailing comma")]
    TrailingComma,
    #[error("closing bracket does not match open container")]
    MismatchedBracket,
    #[error("closing bracket without open container")]
    UnopenedContainer,
    #[error("unexpected end of data")]
    UnclosedContainer,
    /// Non-whitespace after the document, in the same feed that completed it.
    #[error("content after end of document")]
    TrailingContent,
    #[error("no JSON value in input")]
    EmptyDocument,
    #[error("maximum nesting depth exceeded")]
    MaxDepthReached,
    #[error("fed after an error without reset")]
    FeedAfterError,
    #[error("fed after the handler stopped the parse")]
    FeedAfterStop,
    /// Non-whitespace after the document, in a later feed. The same bytes
    /// fed together with the document give [`TrailingContent`] instead, at
    /// the same offset.
    ///
    /// [`TrailingContent`]: ErrorKind::TrailingContent
    #[error("fed after the document was complete")]
    FeedAfterDone,
    #[error("fed after finish")]
    FeedAfterFinish,
}

impl ErrorKind {
    pub fn class(self) -> ErrorClass {
        match self {
            ErrorKind::InvalidNumber
            | ErrorKind::InvalidStringEscape
            | ErrorKind::InvalidUnicodeEscape
            | ErrorKind::InvalidUtf8
            | ErrorKind::UnescapedControlCharacter
            | ErrorKind::InvalidLiteral
            | ErrorKind::InvalidComment
            | ErrorKind::UnexpectedEof => ErrorClass::Token,
            ErrorKind::InvalidRoot
            | ErrorKind::ExpectedObjectKey
            | ErrorKind::ExpectedColon
            | ErrorKind::ExpectedObjectValue
            | ErrorKind::ExpectedCommaOrEnd
            | ErrorKind::ExpectedArrayItem
            | ErrorKind::TrailingComma
            | ErrorKind::MismatchedBracket
            | ErrorKind::UnopenedContainer
            | ErrorKind::UnclosedContainer
            | ErrorKind::TrailingContent
            | ErrorKind::EmptyDocument => ErrorClass::Structural,
            ErrorKind::MaxDepthReached => ErrorClass::StackOverflow,
            ErrorKind::FeedAfterError
            | ErrorKind::FeedAfterStop
            | ErrorKind::FeedAfterDone
            | ErrorKind::FeedAfterFinish => ErrorClass::Misuse,
        }
    }

    /// Stable numeric code, grouped by class: 0x1_ token, 0x2_ structural,
    /// 0x30 stack overflow, 0x4_ misuse.
    pub fn code(self) -> u8 {
        match self {
            ErrorKind::InvalidNumber => 0x10,
            ErrorKind::InvalidStringEscape => 0x11,
            ErrorKind::InvalidUnicodeEscape => 0x12,
            ErrorKind::InvalidUtf8 => 0x13,
            ErrorKind::UnescapedControlCharacter => 0x14,
            ErrorKind::InvalidLiteral => 0x15,
            ErrorKind::InvalidComment => 0x16,
            ErrorKind::UnexpectedEof => 0x17,
            ErrorKind::InvalidRoot => 0x20,
            ErrorKind::ExpectedObjectKey => 0x21,
            ErrorKind::ExpectedColon => 0x22,
            ErrorKind::ExpectedObjectValue => 0x23,
            ErrorKind::ExpectedCommaOrEnd => 0x24,
            ErrorKind::ExpectedArrayItem => 0x25,
            ErrorKind::TrailingComma => 0x26,
            ErrorKind::MismatchedBracket => 0x27,
            ErrorKind::UnopenedContainer => 0x28,
            ErrorKind::UnclosedContainer => 0x29,
            ErrorKind::TrailingContent => 0x2a,
            ErrorKind::EmptyDocument => 0x2b,
            ErrorKind::MaxDepthReached => 0x30,
            ErrorKind::FeedAfterError => 0x40,
            ErrorKind::FeedAfterStop => 0x41,
            ErrorKind::FeedAfterDone => 0x42,
            ErrorKind::FeedAfterFinish => 0x43,
        }
    }
}

/// Error returned by [`Lexer::feed`](crate::Lexer::feed) and
/// [`Lexer::finish`](crate::Lexer::finish).
///
/// `offset` is the absolute stream offset of the offending byte, counted
/// across all feeds since the last reset. `byte` is `None` when the error was
/// detected at end of input or before any byte was looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct LexError {
    pub kind: ErrorKind,
    pub offset: usize,
    pub byte: Option<u8>,
}

impl LexError {
    pub fn new<T>(kind: ErrorKind, byte: u8, offset: usize) -> Result<T, Self> {
        Err(Self {
            kind,
            offset,
            byte: Some(byte),
        })
    }

    pub fn at_end<T>(kind: ErrorKind, offset: usize) -> Result<T, Self> {
        Err(Self {
            kind,
            offset,
            byte: None,
        })
    }

    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    pub fn code(&self) -> u8 {
        self.kind.code()
    }
}
