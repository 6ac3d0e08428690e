//! Where `print` output goes.
//!
//! - Stdout: the default for programs run from the command line
//! - Buffer: captures lines for tests and embedders
//! - Silent: discards everything

use std::sync::Arc;

use parking_lot::Mutex;

/// Writes each line to stdout.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn println(&self, msg: &str) {
        println!("{msg}");
    }
}

/// Captures printed lines in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    /// Everything printed so far, one line per `print`.
    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

/// Print handler implementation using enum dispatch.
pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
    Silent,
}

impl PrintHandlerImpl {
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.println(msg),
            Self::Buffer(h) => h.println(msg),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for handlers that do not capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    /// Captured output split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.get_output().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Shared print handler; the interpreter holds one clone, the caller may
/// keep another to read captured output.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_captures_lines_in_order() {
        let handler = buffer_handler();
        handler.println("1");
        handler.println("true");
        assert_eq!(handler.get_output(), "1\ntrue\n");
        assert_eq!(handler.lines(), vec!["1", "true"]);
    }

    #[test]
    fn test_buffer_clear() {
        let handler = buffer_handler();
        handler.println("x");
        handler.clear();
        assert!(handler.get_output().is_empty());
    }

    #[test]
    fn test_silent_discards() {
        let handler = silent_handler();
        handler.println("hello");
        assert_eq!(handler.get_output(), "");
        assert!(handler.lines().is_empty());
    }
}
