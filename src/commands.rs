//! Built-in directives
//!
//! One handler per directive, assembled into the ordered table the
//! interpreter consults per line. The order reproduces the original
//! vocabulary's priority: some patterns are prefixes of semantically
//! different directives, so earlier entries must win.

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::capture::capture_remaining;
use crate::copy::copy_tree;
use crate::engine::{BoxedCmd, Cmd, CmdResult, Context};
use crate::error::{ErrorKind, ShellError};
use crate::parser::Matcher;

/// The default directive table, in priority order.
pub fn default_commands() -> Vec<(Matcher, BoxedCmd)> {
    vec![
        (Matcher::Exact("copy files"), Box::new(CopyFilesCmd) as BoxedCmd),
        (Matcher::Word("false"), Box::new(FalseCmd)),
        (Matcher::Prefix("echo "), Box::new(EchoCmd)),
        (Matcher::Prefix("printvar "), Box::new(PrintVarCmd)),
        (Matcher::Prefix("create file "), Box::new(CreateFileCmd)),
        (Matcher::Prefix("file exists "), Box::new(FileExistsCmd)),
        (Matcher::Prefix("#"), Box::new(IgnoreCmd)),
        (Matcher::Prefix("set "), Box::new(IgnoreCmd)),
    ]
}

// ──────────────────────────────────────────────────────────
// copy files — replicate the working tree under the destination root
// ──────────────────────────────────────────────────────────

struct CopyFilesCmd;

impl Cmd for CopyFilesCmd {
    fn run(&self, ctx: &mut Context<'_>, _arg: &str) -> Result<CmdResult, ShellError> {
        let dest_root = ctx
            .config
            .dest_root
            .as_deref()
            .ok_or_else(ShellError::missing_dest)?;
        copy_tree(Path::new("."), dest_root)?;
        Ok(CmdResult::Ok)
    }
}

// ──────────────────────────────────────────────────────────
// false — fail immediately, no output
// ──────────────────────────────────────────────────────────

struct FalseCmd;

impl Cmd for FalseCmd {
    fn run(&self, _ctx: &mut Context<'_>, _arg: &str) -> Result<CmdResult, ShellError> {
        Err(ShellError::fail())
    }
}

// ──────────────────────────────────────────────────────────
// echo — print the rest of the line
// ──────────────────────────────────────────────────────────

struct EchoCmd;

impl Cmd for EchoCmd {
    fn run(&self, ctx: &mut Context<'_>, arg: &str) -> Result<CmdResult, ShellError> {
        writeln!(ctx.stdout, "{}", arg)
            .map_err(|e| ShellError::new(ErrorKind::Io, format!("echo: {}", e)))?;
        Ok(CmdResult::Ok)
    }
}

// ──────────────────────────────────────────────────────────
// printvar — print an environment variable's value
// ──────────────────────────────────────────────────────────

struct PrintVarCmd;

impl Cmd for PrintVarCmd {
    fn run(&self, ctx: &mut Context<'_>, arg: &str) -> Result<CmdResult, ShellError> {
        // An unset variable prints as an empty line.
        let value = env::var_os(arg).unwrap_or_default();
        writeln!(ctx.stdout, "{}", value.to_string_lossy())
            .map_err(|e| ShellError::new(ErrorKind::Io, format!("printvar {}: {}", arg, e)))?;
        Ok(CmdResult::Ok)
    }
}

// ──────────────────────────────────────────────────────────
// create file — capture the rest of the script stream into a file
// ──────────────────────────────────────────────────────────

struct CreateFileCmd;

impl Cmd for CreateFileCmd {
    fn run(&self, ctx: &mut Context<'_>, arg: &str) -> Result<CmdResult, ShellError> {
        let mut file = fs::File::create(arg)
            .map_err(|e| ShellError::new(ErrorKind::Io, format!("create file {}: {}", arg, e)))?;
        capture_remaining(&mut *ctx.script, &mut file)
            .map_err(|e| ShellError::new(ErrorKind::Io, format!("write {}: {}", arg, e)))?;
        // The whole remainder of the stream is now file content, so there
        // is nothing left to interpret.
        Ok(CmdResult::Stop)
    }
}

// ──────────────────────────────────────────────────────────
// file exists — probe a path and end the script
// ──────────────────────────────────────────────────────────

struct FileExistsCmd;

impl Cmd for FileExistsCmd {
    fn run(&self, _ctx: &mut Context<'_>, arg: &str) -> Result<CmdResult, ShellError> {
        fs::metadata(arg)
            .map_err(|e| ShellError::new(ErrorKind::Io, format!("file exists {}: {}", arg, e)))?;
        Ok(CmdResult::Stop)
    }
}

// ──────────────────────────────────────────────────────────
// comments and set — accepted, ignored
// ──────────────────────────────────────────────────────────

struct IgnoreCmd;

impl Cmd for IgnoreCmd {
    fn run(&self, _ctx: &mut Context<'_>, _arg: &str) -> Result<CmdResult, ShellError> {
        Ok(CmdResult::Ok)
    }
}
