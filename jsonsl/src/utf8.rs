// SPDX-License-Identifier: Apache-2.0

//! Incremental UTF-8 validation for string contents.
//!
//! The lexer never decodes characters, but it rejects byte sequences that are
//! not well-formed UTF-8 (RFC 3629): stray continuation bytes, overlong
//! encodings, UTF-16 surrogates and code points above U+10FFFF. Validation is
//! byte-at-a-time so a character split across two feeds is handled like any
//! other token split.

/// Continuation bytes still owed by a multi-byte character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pending {
    /// Continuation bytes left, 1 to 3.
    pub remaining: u8,
    /// Allowed range of the next byte. Only the first continuation byte has
    /// a range narrower than `0x80..=0xBF`.
    pub low: u8,
    pub high: u8,
}

const CONT_LOW: u8 = 0x80;
const CONT_HIGH: u8 = 0xBF;

/// Whether the byte is plain ASCII.
pub(crate) fn is_1byte(b: u8) -> bool {
    b <= 0x7F
}

/// Classifies a non-ASCII lead byte. `None` means the byte can never start a
/// character.
pub(crate) fn start(b: u8) -> Option<Pending> {
    let (remaining, low, high) = match b {
        // 0xC0 and 0xC1 could only produce overlong 2 byte encodings
        0xC2..=0xDF => (1, CONT_LOW, CONT_HIGH),
        // Excludes overlong 3 byte encodings
        0xE0 => (2, 0xA0, CONT_HIGH),
        0xE1..=0xEC | 0xEE..=0xEF => (2, CONT_LOW, CONT_HIGH),
        // Excludes surrogates U+D800..U+DFFF
        0xED => (2, CONT_LOW, 0x9F),
        // Excludes overlong 4 byte encodings
        0xF0 => (3, 0x90, CONT_HIGH),
        0xF1..=0xF3 => (3, CONT_LOW, CONT_HIGH),
        // Excludes code points above U+10FFFF
        0xF4 => (3, CONT_LOW, 0x8F),
        _ => return None,
    };
    Some(Pending {
        remaining,
        low,
        high,
    })
}

impl Pending {
    /// Consumes one continuation byte. `Err` if the byte is out of range,
    /// `Ok(None)` once the character is complete.
    pub fn advance(self, b: u8) -> Result<Option<Pending>, ()> {
        if b < self.low || b > self.high {
            return Err(());
        }
        if self.remaining == 1 {
            return Ok(None);
        }
        Ok(Some(Pending {
            remaining: self.remaining - 1,
            low: CONT_LOW,
            high: CONT_HIGH,
        }))
    }
}
