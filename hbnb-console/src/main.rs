//! HBNB console
//!
//! Interactive shell over the JSON object store.
//!
//! Usage:
//!   hbnb                       # interactive prompt
//!   echo "all User" | hbnb     # piped commands
//!   hbnb --file db.json create State

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hbnb_console::{Console, Shell};
use hbnb_storage::{DEFAULT_PATH, FileStorage};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hbnb")]
#[command(about = "Command console for the HBNB object store")]
struct Args {
    /// Path to the JSON object store
    #[arg(short, long, env = "HBNB_FILE", default_value = DEFAULT_PATH)]
    file: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Run a single command and exit instead of starting the prompt
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    let storage = FileStorage::open(&args.file)
        .with_context(|| format!("failed to open object store {}", args.file.display()))?;
    info!(objects = storage.len(), "HBNB console starting");

    let mut shell = Shell::new(Console::new(storage), io::stdout().lock());

    if args.command.is_empty() {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        shell.run(stdin.lock(), interactive).context("console I/O failed")?;
    } else {
        shell
            .execute(&rejoin(&args.command))
            .context("console I/O failed")?;
    }

    let (console, _) = shell.into_parts();
    console
        .into_storage()
        .close()
        .context("failed to save object store on exit")?;
    Ok(())
}

/// Joins shell-split arguments back into one line, re-quoting words with spaces.
fn rejoin(words: &[String]) -> String {
    words
        .iter()
        .map(|w| {
            if w.chars().any(char::is_whitespace) {
                format!("\"{}\"", w.replace('\\', "\\\\").replace('"', "\\\""))
            } else {
                w.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
