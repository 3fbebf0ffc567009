//! Console progress indicator.

use std::io::Write;
use std::sync::Mutex;
use rollbook_work::ProgressSink;

/// Prints `Label.....` as ticks complete.
#[derive(Debug)]
pub struct ConsoleProgress<W> {
    out: Mutex<W>,
}

impl ConsoleProgress<std::io::Stdout> {
    /// Indicator on stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleProgress<W> {
    /// Indicator writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    fn emit(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            // Write failures never reach the store operation
            let _ = out.write_all(text.as_bytes());
            let _ = out.flush();
        }
    }
}

impl<W: Write + Send> ProgressSink for ConsoleProgress<W> {
    fn started(&self, label: &str) {
        self.emit(label);
    }

    fn ticked(&self, _label: &str, _tick: u32) {
        self.emit(".");
    }

    fn finished(&self, _label: &str) {
        self.emit("\n");
    }

    fn interrupted(&self, _label: &str, _completed: u32) {
        self.emit("\nLoading interrupted.\n");
    }
}
