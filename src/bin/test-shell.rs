//! test-shell CLI
//!
//! Selects the script source (file or literal string), hands the stream to
//! the interpreter, and reports the resulting exit status.

use std::fs::File;
use std::io::{self, BufReader, Cursor};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use test_shell::{Config, ExitStatus, Interpreter};

#[derive(Parser, Debug)]
#[command(name = "test-shell")]
#[command(version)]
#[command(about = "Run deployment test scripts without a full shell")]
struct Cli {
    /// Trace each directive to stderr before executing it
    #[arg(short = 'x')]
    trace: bool,

    /// Run directives from a literal string instead of a script file
    #[arg(short = 'c', long = "command", conflicts_with = "script")]
    command: Option<String>,

    /// Script file to run
    #[arg(required_unless_present = "command")]
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(status) => ExitCode::from(status.code()),
        Err(err) => {
            eprintln!("test-shell: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitStatus> {
    let mut config = Config::from_env();
    config.trace = cli.trace;
    let interp = Interpreter::new(config);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let status = match (cli.command, cli.script) {
        (Some(command), _) => interp.run(&mut Cursor::new(command), &mut out, &mut err),
        (None, Some(path)) => {
            let file = File::open(&path)
                .with_context(|| format!("opening script {}", path.display()))?;
            interp.run(&mut BufReader::new(file), &mut out, &mut err)
        }
        (None, None) => anyhow::bail!("either a script file or -c COMMANDS is required"),
    };
    Ok(status)
}
