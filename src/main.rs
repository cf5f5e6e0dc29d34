// File: src/main.rs
//
// Main entry point for the Vinyl interpreter.
// Handles command-line argument parsing, logging setup, and dispatches to the
// appropriate subcommand (run, repl, or test). Maps failures to exit codes:
// 1 usage error, 2 unsupported file extension, 3 runtime error.

use anyhow::Context;
use clap::error::ErrorKind as ClapErrorKind;
use clap::{ArgAction, Parser as ClapParser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use vinyl::interpreter::{Environment, Interpreter};
use vinyl::repl::Repl;
use vinyl::runner;

const EXIT_USAGE: u8 = 1;
const EXIT_UNSUPPORTED_EXTENSION: u8 = 2;
const EXIT_RUNTIME: u8 = 3;

#[derive(ClapParser)]
#[command(
    name = "vinyl",
    about = "Vinyl: a small line-oriented scripting language",
    version = env!("CARGO_PKG_VERSION"),
    args_conflicts_with_subcommands = true,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a .vy script (same as `vinyl run <file>`)
    file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a Vinyl script file
    Run {
        /// Path to the .vy file
        file: PathBuf,
    },

    /// Launch interactive Vinyl REPL
    Repl,

    /// Run every .vy script in a directory against its .out snapshot
    Test {
        /// Directory holding the scripts
        #[arg(default_value = "tests/scripts")]
        dir: PathBuf,

        /// Regenerate all .out files based on actual output
        #[arg(long)]
        update: bool,
    },
}

fn display_homepage() {
    println!(
        "
Vinyl Interpreter [v{}]
==========================
Usage: vinyl <filename.vy>

Features:
- Variable declarations (int, float, bool, string)
- Arithmetic and logical expressions
- Input, print, and wait commands
==========================
",
        env!("CARGO_PKG_VERSION")
    );
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(level)
        .init();
}

fn run_script(file: &Path) -> ExitCode {
    if !runner::has_vinyl_extension(file) {
        println!("Error: Only '.{}' files are supported.", runner::SOURCE_EXTENSION);
        return ExitCode::from(EXIT_UNSUPPORTED_EXTENSION);
    }

    let display_name = file.display().to_string();
    let source = match runner::load_source(file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error: {}: {}", display_name, err);
            return ExitCode::from(EXIT_RUNTIME);
        }
    };

    let mut interpreter = Interpreter::new();
    let mut env = Environment::new();
    match runner::run_source(&source, &mut interpreter, &mut env) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(kind = %err.kind(), "run aborted");
            eprint!("{}", runner::render_error(&err, &source, Some(&display_name), &env));
            ExitCode::from(EXIT_RUNTIME)
        }
    }
}

fn run_repl() -> anyhow::Result<()> {
    let mut repl = Repl::new().context("starting line editor")?;
    repl.run()
}

fn run_tests(dir: &Path, update: bool) -> anyhow::Result<bool> {
    let report = runner::run_snapshot_suite(dir, update)
        .with_context(|| format!("running scripts in {}", dir.display()))?;
    Ok(report.all_passed())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(err.kind(), ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion) {
                err.exit();
            }
            let _ = err.print();
            display_homepage();
            return ExitCode::from(EXIT_USAGE);
        }
    };

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Run { file }) => run_script(&file),
        Some(Commands::Repl) => match run_repl() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("Error: {:#}", err);
                ExitCode::from(EXIT_RUNTIME)
            }
        },
        Some(Commands::Test { dir, update }) => match run_tests(&dir, update) {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::from(EXIT_RUNTIME),
            Err(err) => {
                eprintln!("Error: {:#}", err);
                ExitCode::from(EXIT_RUNTIME)
            }
        },
        None => match cli.file {
            Some(file) => run_script(&file),
            None => {
                display_homepage();
                ExitCode::from(EXIT_USAGE)
            }
        },
    }
}
