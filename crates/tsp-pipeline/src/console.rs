// console.rs — Operator-facing status output and the confirmation prompt.
//
// Renders colored status lines to a writer and reads the confirmation answer
// from a reader. Both are injected, so tests drive the console with
// in-memory buffers instead of a real terminal.

use std::io::{BufRead, BufReader, Read, Write};
use std::sync::Mutex;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

pub struct Console {
    reader: Mutex<BufReader<Box<dyn Read + Send>>>,
    writer: Mutex<Box<dyn Write + Send>>,
    color: bool,
}

impl Console {
    /// Create a Console from raw reader/writer.
    /// Use `Console::stdio()` for a real terminal, or pass mock I/O for tests.
    pub fn new(reader: Box<dyn Read + Send>, writer: Box<dyn Write + Send>, color: bool) -> Self {
        Self {
            reader: Mutex::new(BufReader::new(reader)),
            writer: Mutex::new(writer),
            color,
        }
    }

    /// Console on stdin/stdout.
    pub fn stdio(color: bool) -> Self {
        Self::new(Box::new(std::io::stdin()), Box::new(std::io::stdout()), color)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn emit(&self, line: &str) {
        // Status output is best effort; a closed stdout must not fail the run.
        if let Ok(mut w) = self.writer.lock() {
            let _ = writeln!(w, "{}", line);
            let _ = w.flush();
        }
    }

    pub fn header(&self, title: &str) {
        self.emit("");
        self.emit(&self.paint(BOLD, title));
        self.emit(&"=".repeat(title.len().max(20)));
    }

    pub fn step(&self, number: usize, total: usize, title: &str) {
        self.emit("");
        self.emit(&self.paint(BOLD, &format!("[{}/{}] {}", number, total, title)));
    }

    pub fn info(&self, msg: &str) {
        self.emit(&format!("{} {}", self.paint(CYAN, "[INFO]"), msg));
    }

    pub fn success(&self, msg: &str) {
        self.emit(&format!("{} {}", self.paint(GREEN, "[OK]"), msg));
    }

    pub fn warn(&self, msg: &str) {
        self.emit(&format!("{} {}", self.paint(YELLOW, "[WARN]"), msg));
    }

    pub fn error(&self, msg: &str) {
        self.emit(&format!("{} {}", self.paint(RED, "[ERROR]"), msg));
    }

    /// Indented `label: value` line.
    pub fn field(&self, label: &str, value: &str) {
        self.emit(&format!("  {:<14} {}", format!("{}:", label), value));
    }

    /// Ask a yes/no question. Only `y` or `Y` counts as yes; empty input and
    /// end of input count as no.
    pub fn confirm(&self, question: &str) -> std::io::Result<bool> {
        {
            let mut w = self
                .writer
                .lock()
                .map_err(|_| std::io::Error::other("console writer poisoned"))?;
            write!(w, "{} [y/N] ", self.paint(BOLD, question))?;
            w.flush()?;
        }

        let mut line = String::new();
        let bytes = self
            .reader
            .lock()
            .map_err(|_| std::io::Error::other("console reader poisoned"))?
            .read_line(&mut line)?;
        if bytes == 0 {
            self.emit("");
            return Ok(false);
        }

        Ok(matches!(line.trim(), "y" | "Y"))
    }
}
