//! Console sinks for runner messages and notifications

use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use minirun_core::interfaces::{InfoOptions, Messenger, NotifyImage, Notifier};
use std::io::{self, IsTerminal, Write};
use tracing::warn;

/// Prints runner messages to stdout, clearing the screen on `reset` when
/// attached to a terminal
#[derive(Debug, Clone, Copy)]
pub struct ConsoleMessenger {
    clear_on_reset: bool,
}

impl ConsoleMessenger {
    pub fn new() -> Self {
        Self {
            clear_on_reset: std::io::stdout().is_terminal(),
        }
    }
}

impl Default for ConsoleMessenger {
    fn default() -> Self {
        Self::new()
    }
}

impl Messenger for ConsoleMessenger {
    fn info(&self, message: &str, options: InfoOptions) {
        let clear = options.reset && self.clear_on_reset;
        if let Err(e) = write_message(&mut io::stdout().lock(), message, clear) {
            warn!("Failed to write to stdout: {}", e);
        }
    }
}

fn write_message(out: &mut impl Write, message: &str, clear: bool) -> io::Result<()> {
    if clear {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    }
    writeln!(out, "{message}")?;
    out.flush()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, title: &str, image: NotifyImage) {
        let icon = match image {
            NotifyImage::Success => "✅",
            NotifyImage::Failed => "❌",
        };
        println!("{icon} {title}: {message} ({image})");
    }
}
