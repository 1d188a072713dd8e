// SPDX-License-Identifier: Apache-2.0

// Example splitting a query response into rows without buffering the whole document

use jsonsl::{Flow, RowEvent, RowParser};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🚀 RowParser Demo");
    println!("=================");
    println!();

    let mut response = br#"{"total_rows": 1000, "rows": ["#.to_vec();
    for i in 0..1000 {
        if i > 0 {
            response.push(b',');
        }
        response.extend_from_slice(format!(r#"{{"id": "doc-{i}", "value": {i}}}"#).as_bytes());
    }
    response.extend_from_slice(br#"], "status": "success"}"#);
    println!("📏 Response size: {} bytes", response.len());

    let mut rows = 0;
    let mut peak = 0;
    let mut parser = RowParser::new("/rows/^", |event: RowEvent<'_>| {
        match event {
            RowEvent::Row(row) => {
                if row.index % 250 == 0 {
                    println!("   row {}: {}", row.index, String::from_utf8_lossy(row.bytes));
                }
                rows += 1;
            }
            RowEvent::Meta(meta) => println!("📋 meta: {}", String::from_utf8_lossy(meta)),
        }
        Flow::Continue
    })?;

    for chunk in response.chunks(100) {
        parser.feed(chunk)?;
        peak = peak.max(parser.buffered());
    }
    parser.finish()?;
    drop(parser);

    println!();
    println!("✅ {} rows, at most {} bytes buffered", rows, peak);
    Ok(())
}
