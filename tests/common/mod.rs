#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Each test binary uses a different subset

use std::sync::Once;
use textdup::input::ParseError;
use textdup::ui::{Flow, Ui, layout};
use textdup::{App, InputParser, LogLevel, set_log_callback};
use tracing::Level;

/// Route test output through `tracing` and forward library log lines to it.
pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_test_writer()
            .try_init();
        set_log_callback(|level, message| match level {
            LogLevel::Debug => tracing::debug!(target: "textdup", "{message}"),
            LogLevel::Info => tracing::info!(target: "textdup", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "textdup", "{message}"),
            LogLevel::Error => tracing::error!(target: "textdup", "{message}"),
        });
    });
}

/// Drives an [`App`] the way the binary does: raw bytes in, screen out.
pub struct Session {
    pub app: App,
    pub ui: Ui,
    parser: InputParser,
    screen: vt100::Parser,
    width: u16,
    height: u16,
}

impl Session {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            app: App::default(),
            ui: Ui::new(),
            parser: InputParser::new(),
            screen: vt100::Parser::new(height, width, 0),
            width,
            height,
        }
    }

    /// Feed terminal input bytes. Returns false once the session quits.
    pub fn send(&mut self, bytes: &[u8]) -> bool {
        let mut offset = 0;
        while offset < bytes.len() {
            match self.parser.parse(&bytes[offset..]) {
                Ok((event, consumed)) => {
                    offset += consumed;
                    tracing::debug!(?event, "input");
                    if self.ui.handle_event(&mut self.app, &event) == Flow::Quit {
                        return false;
                    }
                }
                Err(ParseError::UnrecognizedSequence(seq)) => offset += seq.len().max(1),
                Err(ParseError::Incomplete) => {
                    if let Some(event) = self.parser.flush(&bytes[offset..]) {
                        if self.ui.handle_event(&mut self.app, &event) == Flow::Quit {
                            return false;
                        }
                    }
                    break;
                }
                Err(_) => break,
            }
        }
        true
    }

    /// Render a frame and run it through the terminal emulator.
    pub fn draw(&mut self) -> &vt100::Screen {
        let frame = layout::render(
            &self.app,
            &mut self.ui,
            usize::from(self.width),
            usize::from(self.height),
        );
        self.screen.process(&frame.to_ansi());
        self.screen.screen()
    }

    /// Row `y` of the emulated screen, trailing blanks trimmed.
    pub fn row(&mut self, y: u16) -> String {
        let width = self.width;
        let screen = self.draw();
        screen
            .rows(0, width)
            .nth(usize::from(y))
            .unwrap_or_default()
            .trim_end()
            .to_string()
    }

    /// Whole emulated screen as text.
    pub fn contents(&mut self) -> String {
        self.draw().contents()
    }
}
