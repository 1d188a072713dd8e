// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::{self, BufWriter, ErrorKind, Read, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use jsonsl::{
    Event, Flow, Handler, LexError, Lexer, LexerOptions, Progress, RowError, RowEvent, RowParser,
    DEFAULT_MAX_DEPTH,
};
use log::{debug, info};
use thiserror::Error;

const DEFAULT_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(4096) {
    Some(size) => size,
    None => unreachable!(),
};

/// Stream a JSON document through the lexer and print what it reports.
#[derive(Parser, Debug)]
#[command(name = "jsonsl", version)]
struct Args {
    /// Input file; reads stdin when omitted
    path: Option<PathBuf>,

    /// Maximum container nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: NonZeroUsize,

    /// Accept a stream of whitespace separated documents
    #[arg(long)]
    multi: bool,

    /// Accept `//` and `/* */` comments between tokens
    #[arg(long)]
    comments: bool,

    /// Bytes read and fed per call
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: NonZeroUsize,

    /// Print the elements of the array at this JSON pointer instead of events
    #[arg(long, value_name = "POINTER")]
    rows: Option<String>,

    /// Validate only, print nothing on success
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("unable to read input: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Row(#[from] RowError),
}

/// Prints one line per event.
struct Printer<W: Write> {
    out: W,
    quiet: bool,
    events: usize,
    write_error: Option<io::Error>,
}

impl<W: Write> Handler for Printer<W> {
    fn on_event(&mut self, event: Event) -> Flow {
        self.events += 1;
        if self.quiet {
            return Flow::Continue;
        }
        let Event { kind, span, depth } = event;
        match writeln!(self.out, "{:>8} {:>8} {:>3} {:?}", span.start, span.end, depth, kind) {
            Ok(()) => Flow::Continue,
            Err(err) => {
                self.write_error = Some(err);
                Flow::Stop
            }
        }
    }

    fn on_error(&mut self, error: &LexError) {
        debug!("lexer failed after {} events: {:?}", self.events, error);
    }
}

/// Reads `input` in chunks of `chunk_size` and hands each to `feed` until end
/// of input or a stop.
fn pump<F>(input: &mut dyn Read, chunk_size: usize, mut feed: F) -> Result<Progress, CliError>
where
    F: FnMut(&[u8]) -> Result<Progress, CliError>,
{
    let mut buf = vec![0; chunk_size];
    let mut last = Progress::NeedMore;
    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => return Ok(last),
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        last = feed(&buf[..n])?;
        if last == Progress::Stopped {
            return Ok(last);
        }
    }
}

fn lex(args: &Args, options: LexerOptions, input: &mut dyn Read) -> Result<(), CliError> {
    let mut lexer = Lexer::with_options(options);
    let mut printer = Printer {
        out: BufWriter::new(io::stdout().lock()),
        quiet: args.quiet,
        events: 0,
        write_error: None,
    };
    let progress = pump(input, args.chunk_size.get(), |chunk| {
        Ok(lexer.feed(chunk, &mut printer)?)
    })?;
    if progress != Progress::Stopped {
        lexer.finish(&mut printer)?;
    }
    if let Some(err) = printer.write_error.take() {
        return Err(err.into());
    }
    printer.out.flush()?;
    info!(
        "{} events, {} documents, {} bytes",
        printer.events,
        lexer.documents(),
        lexer.offset()
    );
    Ok(())
}

fn split_rows(
    args: &Args,
    pointer: &str,
    options: LexerOptions,
    input: &mut dyn Read,
) -> Result<(), CliError> {
    let mut out = BufWriter::new(io::stdout().lock());
    let mut write_error = None;
    let mut count = 0;
    let quiet = args.quiet;
    let mut parser = RowParser::with_options(pointer, options, |event: RowEvent<'_>| {
        let written = match event {
            RowEvent::Row(row) => {
                count += 1;
                if quiet {
                    return Flow::Continue;
                }
                write!(out, "row {}: ", row.index)
                    .and_then(|()| out.write_all(row.bytes))
                    .and_then(|()| writeln!(out))
            }
            RowEvent::Meta(_) if quiet => return Flow::Continue,
            RowEvent::Meta(bytes) => out
                .write_all(b"meta: ")
                .and_then(|()| out.write_all(bytes))
                .and_then(|()| writeln!(out)),
        };
        match written {
            Ok(()) => Flow::Continue,
            Err(err) => {
                write_error = Some(err);
                Flow::Stop
            }
        }
    })?;
    let progress = pump(input, args.chunk_size.get(), |chunk| Ok(parser.feed(chunk)?))?;
    if progress != Progress::Stopped {
        parser.finish()?;
    }
    debug!("{:?}", parser);
    drop(parser);
    if let Some(err) = write_error {
        return Err(err.into());
    }
    out.flush()?;
    info!("{} rows", count);
    Ok(())
}

fn run(args: &Args) -> Result<(), CliError> {
    let options = LexerOptions::default()
        .with_max_depth(args.max_depth)
        .with_multiple_documents(args.multi)
        .with_comments(args.comments);
    let mut input: Box<dyn Read> = match &args.path {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin().lock()),
    };
    match &args.rows {
        Some(pointer) => split_rows(args, pointer, options, &mut input),
        None => lex(args, options, &mut input),
    }
}

fn report(err: &CliError) {
    match err {
        CliError::Lex(e) | CliError::Row(RowError::Lex(e)) => {
            eprintln!("error at {} position: (0x{:02X}) \"{}\"", e.offset, e.code(), e.kind)
        }
        other => eprintln!("error: {other}"),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    debug!("{:?}", args);
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}
