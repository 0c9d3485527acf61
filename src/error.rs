//! Shell errors

use std::fmt;

use crate::engine::ExitStatus;

/// The kind of shell error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Line matched no known directive
    Unrecognized,
    /// The `false` directive — fail with no diagnostic
    Fail,
    /// `copy files` ran without a configured destination root
    MissingDest,
    /// Any open/read/write/mkdir/symlink failure during a directive
    Io,
}

impl ErrorKind {
    /// The process exit status this kind of failure reports.
    pub fn status(self) -> ExitStatus {
        match self {
            ErrorKind::Unrecognized => ExitStatus::Unrecognized,
            _ => ExitStatus::Failure,
        }
    }
}

/// A directive failure with a preformatted diagnostic
#[derive(Debug)]
pub struct ShellError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ShellError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The `false` directive: status 1, nothing printed.
    pub fn fail() -> Self {
        Self::new(ErrorKind::Fail, String::new())
    }

    pub fn unrecognized(line: &str) -> Self {
        Self::new(ErrorKind::Unrecognized, format!("unrecognized directive: {}", line))
    }

    pub fn missing_dest() -> Self {
        Self::new(ErrorKind::MissingDest, "copy files: no destination root configured")
    }

    /// Whether this failure is reported on the error channel.
    pub fn is_silent(&self) -> bool {
        self.kind == ErrorKind::Fail
    }

    pub fn status(&self) -> ExitStatus {
        self.kind.status()
    }
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ShellError {}

impl From<std::io::Error> for ShellError {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, e.to_string())
    }
}
