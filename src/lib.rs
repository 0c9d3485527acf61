//! test-shell: a minimal shell for deployment test sandboxes
//!
//! Stands in for `/bin/sh` when install and deploy test scripts run in
//! constrained environments that have no real shell. A script is a sequence
//! of line-oriented directives from a small fixed vocabulary, executed in
//! order with fail-fast semantics: the first failing directive ends the run
//! and its status becomes the process exit status.
//!
//! # Directives
//!
//! | Directive | Effect |
//! |-----------|--------|
//! | `copy files` | replicate the working tree under the destination root |
//! | `false [anything]` | fail immediately, exit status 1 |
//! | `echo <text>` | print `<text>` and a newline |
//! | `printvar <var>` | print the environment variable's value and a newline |
//! | `create file <name>` | create/truncate `<name>`, then capture all remaining input into it |
//! | `file exists <name>` | stop with status 0 if `<name>` exists, else fail |
//! | `#<anything>` | comment, ignored |
//! | `set <anything>` | accepted and ignored |
//! | anything else | unrecognized, exit status 127 |
//!
//! `create file` consumes the entire remainder of the script stream — there
//! is no terminator that resumes directive interpretation, so it is
//! effectively the last directive of any script that uses it.
//!
//! # Invocation
//!
//! ```text
//! test-shell SCRIPT            # run a script file
//! test-shell [-x] -c COMMANDS  # run a literal directive string
//! ```
//!
//! `copy files` replicates the current working directory under the
//! destination root taken from `DESTDIR`, preserving file modes and
//! symlinks (the walk never follows links) and skipping walk-root entries
//! whose names begin with `.git`.

mod capture;
mod commands;
mod copy;
mod engine;
mod error;
mod parser;

pub use capture::capture_remaining;
pub use commands::default_commands;
pub use copy::{classify, copy_tree, read_link_target, Entry, EntryKind};
pub use engine::{BoxedCmd, Cmd, CmdResult, Config, Context, ExitStatus, Interpreter};
pub use error::{ErrorKind, ShellError};
pub use parser::Matcher;
