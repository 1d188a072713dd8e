// SPDX-License-Identifier: Apache-2.0

// Example demonstrating the Lexer with chunked input and raw token slicing

use jsonsl::{Container, Event, EventKind, Flow, Handler, LexError, Lexer, Scalar};

/// Prints events as they arrive, slicing token text out of the bytes seen so far
struct EventPrinter {
    seen: Vec<u8>,
    event_count: usize,
}

impl EventPrinter {
    fn indent_str(depth: usize) -> String {
        "  ".repeat(depth)
    }

    fn text(&self, event: &Event) -> String {
        let bytes = event.slice(&self.seen, 0).unwrap_or_default();
        String::from_utf8_lossy(bytes).into_owned()
    }
}

impl Handler for EventPrinter {
    fn on_event(&mut self, event: Event) -> Flow {
        self.event_count += 1;
        let at = format!("@{}..{}", event.span.start, event.span.end);
        match event.kind {
            EventKind::Open(Container::Object) => {
                println!("{}🏁 StartObject {}", Self::indent_str(event.depth - 1), at)
            }
            EventKind::Open(Container::Array) => {
                println!("{}📋 StartArray {}", Self::indent_str(event.depth - 1), at)
            }
            EventKind::Close {
                container,
                opened_at,
                elements,
            } => println!(
                "{}🔚 End{:?} {} (opened @{}, {} elements)",
                Self::indent_str(event.depth - 1),
                container,
                at,
                opened_at,
                elements
            ),
            EventKind::Key { escaped } => println!(
                "{}🔑 Key {} {}{}",
                Self::indent_str(event.depth),
                self.text(&event),
                at,
                if escaped { " (escaped)" } else { "" }
            ),
            EventKind::Value(Scalar::String { escaped }) => println!(
                "{}📝 String {} {}{}",
                Self::indent_str(event.depth),
                self.text(&event),
                at,
                if escaped { " (escaped)" } else { "" }
            ),
            EventKind::Value(scalar) => println!(
                "{}🔢 {:?} {} {}",
                Self::indent_str(event.depth),
                scalar,
                self.text(&event),
                at
            ),
            EventKind::Done => println!("✅ Document complete {}", at),
        }
        Flow::Continue
    }

    fn on_error(&mut self, error: &LexError) {
        println!("❌ {} ({:?} error)", error, error.class());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🚀 Lexer Demo - streaming JSON token boundaries");
    println!("===============================================");
    println!();

    // Token boundaries fall in the middle of keys, strings and numbers
    let json_chunks = [
        br#"{"name": "js"#.as_slice(),
        br#"onsl", "version": 1."#.as_slice(),
        br#"5, "tags": ["fast", "stre"#.as_slice(),
        br#"aming"], "escapes": "tab\tnewline\n", "#.as_slice(),
        br#""nested": {"data": [1, -2.5e3, true, null]}}"#.as_slice(),
    ];

    let full_json = json_chunks.concat();
    println!("📄 Input JSON: {}", std::str::from_utf8(&full_json)?);
    println!("📦 Processing in {} chunks", json_chunks.len());
    println!();

    let mut printer = EventPrinter {
        seen: Vec::new(),
        event_count: 0,
    };
    let mut lexer = Lexer::new();
    for (i, chunk) in json_chunks.iter().enumerate() {
        println!("📨 Chunk {} ({} bytes): {:?}", i + 1, chunk.len(), std::str::from_utf8(chunk)?);
        printer.seen.extend_from_slice(chunk);
        let progress = lexer.feed(chunk, &mut printer)?;
        println!("   -> {:?}, state {:?}", progress, lexer.state());
    }
    lexer.finish(&mut printer)?;
    println!();
    println!("✅ {} events", printer.event_count);

    println!();
    println!("🧪 Feeding a broken document:");
    let mut lexer = Lexer::new();
    printer.seen.clear();
    printer.seen.extend_from_slice(br#"{"a": [1, 2}"#);
    if let Err(err) = lexer.feed(br#"{"a": [1, 2}"#, &mut printer) {
        println!("   feed returned: {}", err);
    }

    Ok(())
}
