//! `textdup` - full-screen text duplicator
//!
//! # Usage
//!
//! ```bash
//! textdup              # start with an empty buffer
//! textdup notes.txt    # start with notes.txt loaded
//! ```
//!
//! Press Ctrl+Q to quit. Set `TEXTDUP_LOG=1` to print the session log to
//! stderr after the terminal is restored.

use std::collections::VecDeque;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use textdup::input::ParseError;
use textdup::ui::{Flow, Ui, layout};
use textdup::{
    App, InputParser, LogLevel, Options, Terminal, clear_log_callback, emit_log, is_tty,
    set_log_callback, terminal_size,
};

const TITLE: &str = "Text duplicator";

/// How long a read waits before a lone ESC is taken as the Escape key.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Log lines kept for the `TEXTDUP_LOG` dump.
const LOG_CAPACITY: usize = 1000;

const FALLBACK_SIZE: (usize, usize) = (80, 24);

type LogRing = Arc<Mutex<VecDeque<String>>>;

fn main() -> io::Result<()> {
    let log = install_log_ring();
    let path = std::env::args_os().nth(1).map(PathBuf::from);

    let result = run(path);

    clear_log_callback();
    if std::env::var_os("TEXTDUP_LOG").is_some() {
        dump_log(&log)?;
    }
    if let Err(err) = &result {
        eprintln!("textdup: {err}");
    }
    result
}

/// Collect log lines in memory; the terminal belongs to the UI while it runs.
fn install_log_ring() -> LogRing {
    let ring: LogRing = Arc::new(Mutex::new(VecDeque::with_capacity(LOG_CAPACITY)));
    let sink = Arc::clone(&ring);
    set_log_callback(move |level, message| {
        if let Ok(mut lines) = sink.lock() {
            if lines.len() == LOG_CAPACITY {
                lines.pop_front();
            }
            lines.push_back(format!("[{}] {message}", level.label()));
        }
    });
    ring
}

fn dump_log(log: &LogRing) -> io::Result<()> {
    let mut stderr = io::stderr().lock();
    if let Ok(lines) = log.lock() {
        for line in lines.iter() {
            writeln!(stderr, "{line}")?;
        }
    }
    Ok(())
}

fn run(path: Option<PathBuf>) -> io::Result<()> {
    if !is_tty(&io::stdin()) || !is_tty(&io::stdout()) {
        return Err(io::Error::other("stdin and stdout must be a terminal"));
    }

    let options = Options::default();
    let mut app = App::new(options);
    if let Some(path) = path {
        // A failed load is shown as a notice in the window.
        let _ = app.load(&path);
    }

    let mut terminal = Terminal::new(BufWriter::new(io::stdout()));
    terminal.enter_raw_mode()?;
    if options.use_alt_screen {
        terminal.enter_alt_screen()?;
    }
    terminal.hide_cursor()?;
    terminal.enable_bracketed_paste()?;
    terminal.set_title(TITLE)?;
    emit_log(LogLevel::Info, "terminal session started");

    let mut ui = Ui::new();
    let mut parser = InputParser::new();
    let mut pending: Vec<u8> = Vec::new();
    let mut buf = [0u8; 4096];
    let mut size = (0, 0);
    let mut dirty = true;

    loop {
        let current = terminal_size()
            .map(|(cols, rows)| (usize::from(cols), usize::from(rows)))
            .unwrap_or(FALLBACK_SIZE);
        if current != size {
            size = current;
            dirty = true;
        }
        if dirty {
            let frame = layout::render(&app, &mut ui, size.0, size.1);
            terminal.present(&frame.to_ansi())?;
            dirty = false;
        }

        let n = textdup::terminal::read_with_timeout(&mut buf, POLL_INTERVAL)?;
        if n == 0 {
            if let Some(event) = parser.flush(&pending) {
                pending.clear();
                dirty = true;
                if ui.handle_event(&mut app, &event) == Flow::Quit {
                    break;
                }
            }
            continue;
        }

        pending.extend_from_slice(&buf[..n]);
        let mut offset = 0;
        while offset < pending.len() {
            match parser.parse(&pending[offset..]) {
                Ok((event, consumed)) => {
                    offset += consumed;
                    dirty = true;
                    if ui.handle_event(&mut app, &event) == Flow::Quit {
                        emit_log(LogLevel::Info, "quit");
                        return Ok(());
                    }
                }
                Err(ParseError::Incomplete) => {
                    // Paste data has been taken into the parser already.
                    if parser.is_pasting() {
                        offset = pending.len();
                    }
                    break;
                }
                Err(ParseError::Empty) => break,
                Err(ParseError::UnrecognizedSequence(seq)) => {
                    emit_log(LogLevel::Debug, &format!("unrecognized input {seq:?}"));
                    offset += seq.len().max(1);
                }
                Err(ParseError::InvalidUtf8) => {
                    emit_log(LogLevel::Debug, "invalid UTF-8 in input");
                    offset += 1;
                }
                Err(ParseError::PasteBufferOverflow { consumed }) => {
                    emit_log(LogLevel::Warn, "paste too large, dropped");
                    offset += consumed;
                }
            }
        }
        pending.drain(..offset);
    }

    emit_log(LogLevel::Info, "quit");
    Ok(())
}
