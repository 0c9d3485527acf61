//! Directive interpreter
//!
//! The Interpreter owns the directive table and drives the script stream.
//! It is stateless config — one interpreter can run many scripts.
//!
//! Each line is matched against the table in order; the first matching
//! entry's handler runs with access to the remaining script stream, which
//! is how `create file` switches the stream into raw-capture mode. The
//! loop exits as soon as any handler signals a stop or fails, so no
//! directive after a stopping condition is ever read.

use std::env;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::error::ShellError;
use crate::parser::Matcher;

/// Process exit status of a script run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// All directives completed, or a stopping directive succeeded
    Success,
    /// A directive failed
    Failure,
    /// A line matched no known directive
    Unrecognized,
}

impl ExitStatus {
    /// The numeric code reported to the calling environment.
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Unrecognized => 127,
        }
    }
}

/// Result returned by a directive execution
pub enum CmdResult {
    /// Directive completed, keep reading lines
    Ok,
    /// Directive completed and ends interpretation with status 0
    Stop,
}

/// Interpreter configuration
///
/// The destination root is explicit here rather than read from the ambient
/// environment inside the copy routine; its absence only matters once a
/// `copy files` directive actually executes.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Destination root for `copy files`
    pub dest_root: Option<PathBuf>,
    /// Echo each directive line to the error channel before running it
    pub trace: bool,
}

impl Config {
    /// Build a config from the conventional environment: `DESTDIR` supplies
    /// the destination root. Tracing defaults off.
    pub fn from_env() -> Self {
        Self {
            dest_root: env::var_os("DESTDIR").map(PathBuf::from),
            trace: false,
        }
    }
}

/// What a directive handler sees while running
pub struct Context<'a> {
    /// The script stream, positioned just past the directive line.
    /// `create file` consumes the entire remainder through this.
    pub script: &'a mut dyn BufRead,
    /// Standard output sink
    pub stdout: &'a mut dyn Write,
    /// Interpreter configuration
    pub config: &'a Config,
}

/// A directive that can be executed from a script line
pub trait Cmd: Send + Sync {
    /// Execute the directive. `arg` is the remainder of the line after the
    /// matched prefix, verbatim.
    fn run(&self, ctx: &mut Context<'_>, arg: &str) -> Result<CmdResult, ShellError>;
}

/// A boxed directive
pub type BoxedCmd = Box<dyn Cmd>;

/// The directive interpreter — holds the ordered directive table
pub struct Interpreter {
    /// (matcher, handler) pairs, tried in order per line
    pub commands: Vec<(Matcher, BoxedCmd)>,
    config: Config,
}

impl Interpreter {
    /// Create an interpreter with the default directive table.
    pub fn new(config: Config) -> Self {
        Self {
            commands: crate::commands::default_commands(),
            config,
        }
    }

    /// Register an extra directive, tried after the built-in table.
    pub fn register_command(&mut self, matcher: Matcher, cmd: BoxedCmd) {
        self.commands.push((matcher, cmd));
    }

    /// Run a script to completion or first failure.
    ///
    /// Reads one line at a time until end of stream, strips exactly one
    /// trailing newline, and dispatches through the directive table.
    /// Unmatched lines are reported to `stderr` and yield status 127; a
    /// failed directive reports its diagnostic (unless silent) and yields
    /// its status; a stopping directive yields status 0 immediately.
    pub fn run(
        &self,
        script: &mut dyn BufRead,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> ExitStatus {
        let mut line = String::new();
        loop {
            line.clear();
            match script.read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    let _ = writeln!(stderr, "read script: {}", e);
                    return ExitStatus::Failure;
                }
            }
            if line.ends_with('\n') {
                line.pop();
            }
            if self.config.trace {
                let _ = writeln!(stderr, "> {}", line);
            }

            let matched = self
                .commands
                .iter()
                .find_map(|(matcher, cmd)| matcher.matches(&line).map(|arg| (cmd, arg)));

            let result = match matched {
                Some((cmd, arg)) => {
                    let mut ctx = Context {
                        script: &mut *script,
                        stdout: &mut *stdout,
                        config: &self.config,
                    };
                    cmd.run(&mut ctx, arg)
                }
                None => Err(ShellError::unrecognized(&line)),
            };

            match result {
                Ok(CmdResult::Ok) => {}
                Ok(CmdResult::Stop) => return ExitStatus::Success,
                Err(e) => {
                    if !e.is_silent() {
                        let _ = writeln!(stderr, "{}", e);
                    }
                    return e.status();
                }
            }
        }
        ExitStatus::Success
    }
}
