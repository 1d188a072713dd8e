// SPDX-License-Identifier: Apache-2.0

//! Pass/fail documents in the spirit of the JSON_checker suite from json.org.
//!
//! Each document is lexed whole and one byte per feed. Passing documents
//! must complete with identical events both ways; failing documents must
//! fail with the listed error kind, and at the same offset both ways.

use jsonsl::{ErrorKind, Event, Flow, LexError, Lexer, Progress};
use test_log::test;

fn lex_whole(doc: &[u8]) -> (Vec<Event>, Result<Progress, LexError>) {
    lex(doc.len().max(1), doc)
}

fn lex_bytewise(doc: &[u8]) -> (Vec<Event>, Result<Progress, LexError>) {
    lex(1, doc)
}

fn lex(chunk_size: usize, doc: &[u8]) -> (Vec<Event>, Result<Progress, LexError>) {
    let mut events = Vec::new();
    let mut lexer = Lexer::new();
    let mut handler = |event: Event| {
        events.push(event);
        Flow::Continue
    };
    for chunk in doc.chunks(chunk_size) {
        if let Err(err) = lexer.feed(chunk, &mut handler) {
            return (events, Err(err));
        }
    }
    let result = lexer.finish(&mut handler);
    (events, result)
}

macro_rules! generate_pass_tests {
    ($($name:ident: $doc:expr,)*) => {
        $(
            paste::paste! {
                #[test]
                fn [<test_pass_ $name>]() {
                    let doc: &str = $doc;
                    let (events, result) = lex_whole(doc.as_bytes());
                    assert_eq!(result, Ok(Progress::Complete), "{doc:?}");
                    assert_eq!(lex_bytewise(doc.as_bytes()), (events, result), "{doc:?}");
                }
            }
        )*
    };
}

macro_rules! generate_fail_tests {
    ($($name:ident: $doc:expr => $kind:ident,)*) => {
        $(
            paste::paste! {
                #[test]
                fn [<test_fail_ $name>]() {
                    let doc: &str = $doc;
                    let (_, result) = lex_whole(doc.as_bytes());
                    let err = result.expect_err(doc);
                    assert_eq!(err.kind, ErrorKind::$kind, "{doc:?}");
                    let (_, bytewise) = lex_bytewise(doc.as_bytes());
                    assert_eq!(bytewise.map_err(|e| e.offset), Err(err.offset), "{doc:?}");
                }
            }
        )*
    };
}

generate_pass_tests! {
    simple_object: r#"{"a":1}"#,
    nested: r#"{"a":[1,{"b":null}],"c":"d"}"#,
    empty_containers: r#"[{},[],{"":[]}]"#,
    numbers: "[0,-0,1,-1,0.5,-0.5e10,1E+2,1e-2,123456789012345678901234567890]",
    escapes: r#"["", "\"\\\/\b\f\n\r\t", "Aé𝄞"]"#,
    non_ascii: "[\"\u{e9}\u{4e2d}\u{1f600}\"]",
    literals: "[true,false,null]",
    whitespace: " \t\r\n [ 1 , 2 ] \n",
    root_string: r#""A JSON payload should be an object or array, not a string.""#,
    root_number: "42",
    root_float: "-3.25e-7",
    root_null: "null",
    deep: r#"[[[[[[[[[[[[[[[[[[["Not too deep"]]]]]]]]]]]]]]]]]]]"#,
    keys_with_escapes: r#"{"\"quoted\"": 1, "\u0000": 2, "/\\": 3}"#,
    json_checker_pass: r#"[
        "JSON Test Pattern pass1",
        {"object with 1 member":["array with 1 element"]},
        {},
        [],
        -42,
        true,
        false,
        null,
        {
            "integer": 1234567890,
            "real": -9876.543210,
            "e": 0.123456789e-12,
            "E": 1.234567890E+34,
            "":  23456789012E66,
            "zero": 0,
            "one": 1,
            "space": " ",
            "quote": "\"",
            "backslash": "\\",
            "controls": "\b\f\n\r\t",
            "slash": "/ & \/",
            "alpha": "abcdefghijklmnopqrstuvwyz",
            "digit": "0123456789",
            "special": "`1~!@#$%^&*()_+-={':[,]}|;.</>?",
            "hex": "ģ䕧覫췯ꯍ",
            "true": true,
            "url": "http://www.JSON.org/",
            "comment": "// /* <!-- --",
            " s p a c e d " :[1,2 , 3

,

4 , 5        ,          6           ,7        ],"compact":[1,2,3,4,5,6,7],
            "quotes": "&#34; \u0022 %22 0x22 034 &#x22;",
            "\/\\\"쫾몾ꮘﳞ볚\b\f\n\r\t`1~!@#$%^&*()_+-=[]{}|;:',./<>?"
: "A key can be any string"
        },
        0.5 ,98.6
,
99.44
,

1066,
1e1,
0.1e1,
1e-1,
1e00,2e+00,2e-00
,"rosebud"]"#,
}

generate_fail_tests! {
    unclosed_array: r#"["Unclosed array""# => UnclosedContainer,
    unquoted_key: r#"{unquoted_key: "keys must be quoted"}"# => ExpectedObjectKey,
    extra_comma: r#"["extra comma",]"# => TrailingComma,
    double_extra_comma: r#"["double extra comma",,]"# => ExpectedArrayItem,
    missing_value: r#"[   , "<-- missing value"]"# => ExpectedArrayItem,
    comma_after_close: r#"["Comma after the close"],"# => TrailingContent,
    extra_close: r#"["Extra close"]]"# => TrailingContent,
    extra_comma_object: r#"{"Extra comma": true,}"# => TrailingComma,
    extra_value_after_close: r#"{"Extra value after close": true} "misplaced quoted value""# => TrailingContent,
    illegal_expression: r#"{"Illegal expression": 1 + 2}"# => ExpectedCommaOrEnd,
    illegal_invocation: r#"{"Illegal invocation": alert()}"# => ExpectedObjectValue,
    leading_zero: r#"{"Numbers cannot have leading zeroes": 013}"# => InvalidNumber,
    hex_number: r#"{"Numbers cannot be hex": 0x14}"# => InvalidNumber,
    illegal_backslash: r#"["Illegal backslash escape: \x15"]"# => InvalidStringEscape,
    naked_escape: r#"[\naked]"# => ExpectedArrayItem,
    octal_escape: r#"["Illegal backslash escape: \017"]"# => InvalidStringEscape,
    missing_colon: r#"{"Missing colon" null}"# => ExpectedColon,
    double_colon: r#"{"Double colon":: null}"# => ExpectedObjectValue,
    comma_instead_of_colon: r#"{"Comma instead of colon", null}"# => ExpectedColon,
    colon_instead_of_comma: r#"["Colon instead of comma": false]"# => ExpectedCommaOrEnd,
    bad_value: r#"["Bad value", truth]"# => InvalidLiteral,
    single_quote: r#"['single quote']"# => ExpectedArrayItem,
    tab_in_string: "[\"\ttab\tcharacter\tin\tstring\t\"]" => UnescapedControlCharacter,
    line_break: "[\"line\nbreak\"]" => UnescapedControlCharacter,
    bad_exponent: "[0e]" => InvalidNumber,
    bad_exponent_sign: "[0e+]" => InvalidNumber,
    double_exponent_sign: "[0e+-1]" => InvalidNumber,
    comma_instead_of_close: r#"{"Comma instead if closing brace": true,"# => UnclosedContainer,
    mismatch: r#"["mismatch"}"# => MismatchedBracket,
    empty: "" => EmptyDocument,
    whitespace_only: " \n\t " => EmptyDocument,
    lone_minus: "-" => UnexpectedEof,
    fraction_without_digits: "[1.]" => InvalidNumber,
    plus_sign: "[+1]" => ExpectedArrayItem,
    short_unicode_escape: r#"["\u12"]"# => InvalidUnicodeEscape,
    unopened: "]" => UnopenedContainer,
    uppercase_literal: "[True]" => ExpectedArrayItem,
    unterminated_string: r#"{"a": "b"# => UnexpectedEof,
}
