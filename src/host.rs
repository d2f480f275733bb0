use std::io::{BufRead, Write};

use crate::error::ExitCode;

/// The collaborators the interpreter core is wired to.
///
/// The core never touches stdout, stderr or stdin directly; everything goes
/// through a `Host`. The CLI installs a standard-stream host, tests install
/// [`BufferHost`] and inspect the transcript afterwards.
pub trait Host {
    /// Writes program output (`log`, `logln`).
    fn write_out(&mut self, text: &str);
    /// Writes diagnostics (error messages, debug formatting).
    fn write_err(&mut self, text: &str);
    /// Reads one line from the input, without its trailing newline.
    /// Returns `None` at end of input. The prompt, when given, is shown to
    /// the user before reading.
    fn read_line(&mut self, prompt: Option<&str>) -> Option<String>;

    /// Called once before the first statement runs.
    fn on_start(&mut self) {}
    /// Called after the program ran to completion.
    fn on_success(&mut self) {}
    /// Called when the program aborted, with the exit code it will report.
    fn on_error(&mut self, _code: ExitCode) {}
    /// Called last in every run, successful or not.
    fn on_end(&mut self, _code: ExitCode) {}
}

/// A [`Host`] over the process standard streams.
///
/// Error output is wrapped in ANSI red when `color` is set.
pub struct StdHost {
    /// Whether `write_err` colours its output.
    pub color: bool,
}

impl StdHost {
    /// Creates a standard-stream host. Colour is enabled when stderr is a
    /// terminal.
    #[must_use]
    pub fn new() -> Self {
        Self { color: std::io::IsTerminal::is_terminal(&std::io::stderr()) }
    }
}

impl Default for StdHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for StdHost {
    fn write_out(&mut self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }

    fn write_err(&mut self, text: &str) {
        if self.color {
            eprint!("\x1b[31m{text}\x1b[0m");
        } else {
            eprint!("{text}");
        }
    }

    fn read_line(&mut self, prompt: Option<&str>) -> Option<String> {
        if let Some(prompt) = prompt {
            self.write_out(prompt);
        }

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(line)
            },
        }
    }
}

/// A [`Host`] that records everything in memory, for tests.
///
/// Input lines are queued up front with [`BufferHost::with_input`]; output
/// and error transcripts are inspected after the run.
///
/// # Example
/// ```
/// use luz::host::{BufferHost, Host};
///
/// let mut host = BufferHost::new();
/// host.write_out("hello");
/// assert_eq!(host.out, "hello");
/// ```
#[derive(Default)]
pub struct BufferHost {
    /// Everything written through `write_out`, concatenated.
    pub out:   String,
    /// Everything written through `write_err`, concatenated.
    pub err:   String,
    /// Remaining input lines, consumed front to back.
    pub input: std::collections::VecDeque<String>,
    /// Exit codes seen by `on_end`.
    pub ended: Vec<ExitCode>,
}

impl BufferHost {
    /// Creates a host with no queued input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a host whose `read_line` serves the given lines in order.
    #[must_use]
    pub fn with_input(lines: &[&str]) -> Self {
        Self { input: lines.iter().map(|&l| l.to_string()).collect(),
               ..Self::default() }
    }
}

impl Host for BufferHost {
    fn write_out(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn write_err(&mut self, text: &str) {
        self.err.push_str(text);
    }

    fn read_line(&mut self, prompt: Option<&str>) -> Option<String> {
        if let Some(prompt) = prompt {
            self.out.push_str(prompt);
        }
        self.input.pop_front()
    }

    fn on_end(&mut self, code: ExitCode) {
        self.ended.push(code);
    }
}
