//! Terminal I/O abstraction layer.
//!
//! Handles TTY detection, color support, terminal width, and output capture
//! for testing.

use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex, PoisonError};

use console::Term;

/// Default terminal width when detection fails.
pub const DEFAULT_WIDTH: usize = 80;

/// Writer that shares a buffer with test code via `Arc<Mutex<Vec<u8>>>`.
struct SharedWriter(Arc<Mutex<Vec<u8>>>);

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

type SharedSink = Arc<Mutex<Box<dyn Write + Send>>>;

/// Captured test output that can be inspected after command execution.
#[derive(Debug, Clone)]
pub struct TestOutput {
    out_buf: Arc<Mutex<Vec<u8>>>,
    err_buf: Arc<Mutex<Vec<u8>>>,
}

impl TestOutput {
    /// Get the captured stdout content as a string.
    pub fn stdout(&self) -> String {
        let buf = self.out_buf.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Get the captured stderr content as a string.
    pub fn stderr(&self) -> String {
        let buf = self.err_buf.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).to_string()
    }
}

/// I/O streams for terminal interaction.
///
/// Commands write through [`ios_println!`](crate::ios_println) and
/// [`ios_eprintln!`](crate::ios_eprintln) instead of `println!()` so output
/// can be captured in tests.
pub struct IOStreams {
    stdin_is_tty: bool,
    stdout_is_tty: bool,
    color_forced: Option<bool>,
    never_prompt: bool,
    width_override: Option<usize>,
    out: SharedSink,
    err: SharedSink,
}

impl std::fmt::Debug for IOStreams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IOStreams")
            .field("stdin_is_tty", &self.stdin_is_tty)
            .field("stdout_is_tty", &self.stdout_is_tty)
            .field("color_forced", &self.color_forced)
            .field("never_prompt", &self.never_prompt)
            .finish_non_exhaustive()
    }
}

impl IOStreams {
    /// Create `IOStreams` for the real terminal.
    pub fn system() -> Self {
        Self {
            stdin_is_tty: io::stdin().is_terminal(),
            stdout_is_tty: io::stdout().is_terminal(),
            color_forced: std::env::var_os("NO_COLOR").map(|_| false),
            never_prompt: false,
            width_override: None,
            out: Arc::new(Mutex::new(Box::new(io::stdout()))),
            err: Arc::new(Mutex::new(Box::new(io::stderr()))),
        }
    }

    /// Create `IOStreams` for testing with output captured to buffers.
    ///
    /// No stream is a TTY, colors are off, and prompting is disabled.
    ///
    /// ```ignore
    /// let (ios, output) = IOStreams::test_with_output();
    /// ios.println_out("hello");
    /// assert_eq!(output.stdout(), "hello\n");
    /// ```
    pub fn test_with_output() -> (Self, TestOutput) {
        let out_buf = Arc::new(Mutex::new(Vec::<u8>::new()));
        let err_buf = Arc::new(Mutex::new(Vec::<u8>::new()));

        let ios = Self {
            stdin_is_tty: false,
            stdout_is_tty: false,
            color_forced: Some(false),
            never_prompt: true,
            width_override: None,
            out: Arc::new(Mutex::new(Box::new(SharedWriter(out_buf.clone())))),
            err: Arc::new(Mutex::new(Box::new(SharedWriter(err_buf.clone())))),
        };

        (ios, TestOutput { out_buf, err_buf })
    }

    /// Set the stdout TTY state (for test configuration).
    pub fn set_stdout_tty(&mut self, is_tty: bool) {
        self.stdout_is_tty = is_tty;
    }

    /// Set the stdin TTY state (for test configuration).
    pub fn set_stdin_tty(&mut self, is_tty: bool) {
        self.stdin_is_tty = is_tty;
    }

    /// Pin the terminal width instead of querying the terminal.
    pub fn set_terminal_width(&mut self, width: usize) {
        self.width_override = Some(width);
    }

    // --- Output methods ---

    /// Write a string to stdout followed by a newline.
    pub fn println_out(&self, s: &str) {
        self.writeln_out(format_args!("{s}"));
    }

    /// Write a string to stderr followed by a newline.
    pub fn println_err(&self, s: &str) {
        self.writeln_err(format_args!("{s}"));
    }

    /// Write formatted output to stdout with trailing newline.
    pub fn writeln_out(&self, args: std::fmt::Arguments<'_>) {
        write_line(&self.out, args);
    }

    /// Write formatted output to stderr with trailing newline.
    pub fn writeln_err(&self, args: std::fmt::Arguments<'_>) {
        write_line(&self.err, args);
    }

    // --- Query methods ---

    /// Whether stdin is connected to a terminal.
    pub fn is_stdin_tty(&self) -> bool {
        self.stdin_is_tty
    }

    /// Whether stdout is connected to a terminal.
    pub fn is_stdout_tty(&self) -> bool {
        self.stdout_is_tty
    }

    /// Whether color output is enabled.
    pub fn color_enabled(&self) -> bool {
        self.color_forced.unwrap_or(self.stdout_is_tty)
    }

    /// Whether prompts should never be shown.
    pub fn never_prompt(&self) -> bool {
        self.never_prompt
    }

    /// Set never-prompt mode.
    pub fn set_never_prompt(&mut self, never: bool) {
        self.never_prompt = never;
    }

    /// Get the terminal width, or the default if not a TTY.
    pub fn terminal_width(&self) -> usize {
        if let Some(width) = self.width_override {
            return width;
        }
        if self.stdout_is_tty {
            match Term::stdout().size_checked() {
                Some((_, cols)) if cols > 0 => usize::from(cols),
                _ => DEFAULT_WIDTH,
            }
        } else {
            DEFAULT_WIDTH
        }
    }

    /// Check if interactive mode is available (stdin and stdout are TTY, prompts not disabled).
    pub fn can_prompt(&self) -> bool {
        self.stdin_is_tty && self.stdout_is_tty && !self.never_prompt
    }

    /// Create a `ColorScheme` based on the current color settings.
    pub fn color_scheme(&self) -> ColorScheme {
        ColorScheme {
            enabled: self.color_enabled(),
        }
    }
}

fn write_line(sink: &SharedSink, args: std::fmt::Arguments<'_>) {
    let mut w = sink.lock().unwrap_or_else(PoisonError::into_inner);
    // Write errors (e.g. a closed pipe) are ignored.
    let _ = w.write_fmt(args);
    let _ = w.write_all(b"\n");
}

/// Terminal color scheme for themed output.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    enabled: bool,
}

impl ColorScheme {
    /// Apply success (green) styling.
    pub fn success(&self, text: &str) -> String {
        if self.enabled {
            console::style(text).green().to_string()
        } else {
            text.to_string()
        }
    }

    /// Style for successful icon.
    pub fn success_icon(&self) -> String {
        self.success("✓")
    }
}

/// Write to IOStreams stdout with newline, similar to `println!()`.
#[macro_export]
macro_rules! ios_println {
    ($ios:expr) => {
        $ios.println_out("")
    };
    ($ios:expr, $($arg:tt)*) => {
        $ios.writeln_out(format_args!($($arg)*))
    };
}

/// Write to IOStreams stderr with newline, similar to `eprintln!()`.
#[macro_export]
macro_rules! ios_eprintln {
    ($ios:expr) => {
        $ios.println_err("")
    };
    ($ios:expr, $($arg:tt)*) => {
        $ios.writeln_err(format_args!($($arg)*))
    };
}
