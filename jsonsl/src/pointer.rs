// SPDX-License-Identifier: Apache-2.0

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

/// Trailing segment meaning "every element of this array".
const WILDCARD: &str = "^";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointerError {
    #[error("JSON pointer must be empty or start with '/'")]
    MissingLeadingSlash,
    #[error("invalid '~' escape at byte {0} of JSON pointer")]
    InvalidEscape(usize),
}

/// One step from a container to a child, as seen while lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step<'a> {
    /// Raw key bytes, without quotes and without unescaping.
    Key(&'a [u8]),
    Index(usize),
}

/// An RFC 6901 JSON Pointer.
///
/// A final `^` segment is accepted and dropped, so `/results/^` names the
/// same array as `/results`.
///
/// ```rust
/// use jsonsl::JsonPointer;
///
/// let pointer: JsonPointer = "/a~1b/0/^".parse().unwrap();
/// assert_eq!(pointer.segments().collect::<Vec<_>>(), ["a/b", "0"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPointer {
    source: String,
    segments: Vec<String>,
}

impl JsonPointer {
    pub fn parse(source: &str) -> Result<Self, PointerError> {
        if source.is_empty() {
            return Ok(Self {
                source: String::new(),
                segments: Vec::new(),
            });
        }
        let Some(rest) = source.strip_prefix('/') else {
            return Err(PointerError::MissingLeadingSlash);
        };
        let mut segments = Vec::new();
        let mut position = 1;
        for raw in rest.split('/') {
            segments.push(unescape(raw, position)?);
            position += raw.len() + 1;
        }
        if segments.last().map(String::as_str) == Some(WILDCARD) {
            segments.pop();
        }
        Ok(Self {
            source: source.to_owned(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the pointer names the document root.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether segment `level` (0-based) accepts `step`. Array indices must
    /// be written without leading zeros.
    pub(crate) fn matches(&self, level: usize, step: Step<'_>) -> bool {
        let Some(segment) = self.segments.get(level) else {
            return false;
        };
        match step {
            Step::Key(key) => segment.as_bytes() == key,
            Step::Index(index) => {
                let canonical = segment == "0" || !segment.starts_with('0');
                canonical && segment.parse::<usize>() == Ok(index)
            }
        }
    }
}

fn unescape(raw: &str, position: usize) -> Result<String, PointerError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some((_, '0')) => out.push('~'),
            Some((_, '1')) => out.push('/'),
            _ => return Err(PointerError::InvalidEscape(position + i)),
        }
    }
    Ok(out)
}

impl FromStr for JsonPointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
