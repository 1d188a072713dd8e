// SPDX-License-Identifier: Apache-2.0

//! Token boundaries may fall anywhere between feeds: every split of a
//! document must produce exactly the events of the unsplit document.

use jsonsl::{ErrorKind, Event, EventKind, Flow, LexError, Lexer, LexerOptions, Progress};
use test_log::test;

fn lex_chunks<'a, I>(mut lexer: Lexer, chunks: I) -> (Vec<Event>, Result<Progress, LexError>)
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut events = Vec::new();
    let mut handler = |event: Event| {
        events.push(event);
        Flow::Continue
    };
    for chunk in chunks {
        if let Err(err) = lexer.feed(chunk, &mut handler) {
            return (events, Err(err));
        }
    }
    let result = lexer.finish(&mut handler);
    (events, result)
}

fn lex(chunks: &[&[u8]]) -> (Vec<Event>, Result<Progress, LexError>) {
    lex_chunks(Lexer::new(), chunks.iter().copied())
}

const VALID: &[&str] = &[
    r#"{"a":1,"b":[2,3]}"#,
    r#"  {"name" : "jsonsl", "tags": ["fast", "stream\"ing"], "n": -12.5e-3 }  "#,
    r#"[true,false,null,0,-0,1.5E+2,"",{},[],{"":[{}]}]"#,
    r#""é\\\/\b\f\n\r\t""#,
    "\"caf\u{e9} \u{20ac} \u{1d11e}\"",
    "[12345678901234567890, 0.000001, 9e99]",
    "12345",
    "-0.5e10",
    "true",
    "[[[[[[[[[[]]]]]]]]]]",
    "{\"nested\": {\"deeper\": {\"deepest\": [1, {\"x\": null}]}}}\n",
];

#[test]
fn test_split_object_matches_whole() {
    let whole = lex(&[br#"{"a":1,"b":2}"#]);
    let split = lex(&[br#"{"a":1"#, br#","b":2}"#]);
    assert_eq!(whole.1, Ok(Progress::Complete));
    assert_eq!(split, whole);
}

#[test]
fn test_every_two_way_split() {
    for doc in VALID {
        let doc = doc.as_bytes();
        let whole = lex(&[doc]);
        assert_eq!(whole.1, Ok(Progress::Complete), "{:?}", String::from_utf8_lossy(doc));
        for split in 0..=doc.len() {
            let (a, b) = doc.split_at(split);
            assert_eq!(lex(&[a, b]), whole, "split at {split} of {:?}", String::from_utf8_lossy(doc));
        }
    }
}

#[test]
fn test_byte_at_a_time() {
    for doc in VALID {
        let doc = doc.as_bytes();
        let whole = lex(&[doc]);
        let bytewise = lex_chunks(Lexer::new(), doc.chunks(1));
        assert_eq!(bytewise, whole);
    }
}

#[test]
fn test_three_way_splits() {
    let doc = br#"{"k\"ey":[1.25,"vA",true],"n":null}"#;
    let whole = lex(&[doc]);
    for i in 0..=doc.len() {
        for j in i..=doc.len() {
            let chunks = [&doc[..i], &doc[i..j], &doc[j..]];
            assert_eq!(lex(&chunks), whole, "splits at {i}, {j}");
        }
    }
}

#[test]
fn test_errors_are_split_invariant() {
    let invalid: &[(&[u8], ErrorKind, usize)] = &[
        (br#"{"a":}"#, ErrorKind::ExpectedObjectValue, 5),
        (br#"[1,2,]"#, ErrorKind::TrailingComma, 5),
        (br#"[1.e5]"#, ErrorKind::InvalidNumber, 3),
        (br#"["a\qb"]"#, ErrorKind::InvalidStringEscape, 4),
        (br#"["\u12G4"]"#, ErrorKind::InvalidUnicodeEscape, 6),
        (br#"{"a":[1}"#, ErrorKind::MismatchedBracket, 7),
        (br#"[tru]"#, ErrorKind::InvalidLiteral, 4),
        (b"[\"\xC3\x28\"]", ErrorKind::InvalidUtf8, 3),
        (br#"{"a":[1,2"#, ErrorKind::UnclosedContainer, 9),
        (br#""abc"#, ErrorKind::UnexpectedEof, 4),
    ];
    for &(doc, kind, offset) in invalid {
        let (whole_events, whole) = lex(&[doc]);
        let err = whole.unwrap_err();
        assert_eq!((err.kind, err.offset), (kind, offset), "{:?}", String::from_utf8_lossy(doc));
        for split in 0..=doc.len() {
            let (a, b) = doc.split_at(split);
            let (events, result) = lex(&[a, b]);
            assert_eq!(events, whole_events, "split at {split}");
            assert_eq!(result, Err(err), "split at {split}");
        }
    }
}

#[test]
fn test_trailing_content_depends_on_feed() {
    let doc: &[u8] = b"[1] x";
    let (whole_events, whole) = lex(&[doc]);
    let err = whole.unwrap_err();
    assert_eq!((err.kind, err.offset), (ErrorKind::TrailingContent, 4));
    for split in 0..=doc.len() {
        let (a, b) = doc.split_at(split);
        let (events, result) = lex(&[a, b]);
        assert_eq!(events, whole_events, "split at {split}");
        let split_err = result.unwrap_err();
        assert_eq!(split_err.offset, err.offset, "split at {split}");
        // Once the first feed has completed the document, later bytes are misuse
        let expected = if (3..=4).contains(&split) {
            ErrorKind::FeedAfterDone
        } else {
            ErrorKind::TrailingContent
        };
        assert_eq!(split_err.kind, expected, "split at {split}");
    }
}

#[test]
fn test_offsets_are_monotonic() {
    for doc in VALID {
        let (events, _) = lex_chunks(Lexer::new(), doc.as_bytes().chunks(3));
        for pair in events.windows(2) {
            assert!(
                pair[0].span.end <= pair[1].span.start,
                "{:?} overlaps {:?} in {doc:?}",
                pair[0],
                pair[1]
            );
        }
        let last = events.last().unwrap();
        assert_eq!(last.kind, EventKind::Done);
    }
}

#[test]
fn test_multi_document_split_invariant() {
    let doc = b"{\"a\":1} [2] 3 \"four\"\nnull";
    let options = LexerOptions::default().with_multiple_documents(true);
    let whole = lex_chunks(Lexer::with_options(options), [&doc[..]]);
    let dones = whole.0.iter().filter(|e| e.kind == EventKind::Done).count();
    assert_eq!(dones, 5);
    for split in 0..=doc.len() {
        let (a, b) = doc.split_at(split);
        assert_eq!(lex_chunks(Lexer::with_options(options), [a, b]), whole, "split at {split}");
    }
}

#[test]
fn test_comments_split_invariant() {
    let doc = b"// leading\n{\"a\" /* inline */ : [1 // one\n, 2]/**/}";
    let options = LexerOptions::default().with_comments(true);
    let whole = lex_chunks(Lexer::with_options(options), [&doc[..]]);
    assert_eq!(whole.1, Ok(Progress::Complete));
    for split in 0..=doc.len() {
        let (a, b) = doc.split_at(split);
        assert_eq!(lex_chunks(Lexer::with_options(options), [a, b]), whole, "split at {split}");
    }
}
