// File: src/runner.rs
//
// Program driver for the Vinyl scripting language.
// Sequences tokenizer -> parser -> interpreter over one source unit, and
// runs directories of snapshot scripts (`*.vy` with expected `*.out`).

use crate::ast::Stmt;
use crate::errors::{find_closest_match, Diagnostic, Result, VinylError};
use crate::interpreter::{Environment, Interpreter};
use crate::lexer;
use crate::parser::Parser;
use colored::Colorize;
use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, info};

pub const SOURCE_EXTENSION: &str = "vy";

/// True when the path names a Vinyl source file
pub fn has_vinyl_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// Tokenizes and parses a whole source unit
pub fn parse_source(source: &str) -> Result<Vec<Stmt>> {
    let tokens = lexer::tokenize(source)?;
    debug!(count = tokens.len(), "tokenized source");
    let stmts = Parser::new(tokens).parse()?;
    debug!(count = stmts.len(), "parsed statements");
    Ok(stmts)
}

/// Parses the complete source, then evaluates each statement in order.
/// Nothing runs unless the whole program parses.
pub fn run_source(source: &str, interp: &mut Interpreter, env: &mut Environment) -> Result<()> {
    let stmts = parse_source(source)?;
    interp.eval_stmts(&stmts, env)
}

/// Reads a script from disk; the file is closed once fully read
pub fn load_source(path: &Path) -> Result<String> {
    let source = fs::read_to_string(path)?;
    info!(path = %path.display(), bytes = source.len(), "loaded script");
    Ok(source)
}

/// Reads a script from disk and runs it
pub fn run_file(path: &Path, interp: &mut Interpreter, env: &mut Environment) -> Result<()> {
    let source = load_source(path)?;
    run_source(&source, interp, env)
}

/// Formats an error for the terminal, pointing into `source` and
/// suggesting a close variable name for undefined-variable errors
pub fn render_error(
    error: &VinylError,
    source: &str,
    file: Option<&str>,
    env: &Environment,
) -> String {
    let suggestion = match error {
        VinylError::Name { name, .. } => find_closest_match(name, env.names()),
        _ => None,
    };
    let mut diagnostic = Diagnostic::new(error).with_source(source).with_suggestion(suggestion);
    if let Some(file) = file {
        diagnostic = diagnostic.with_file(file);
    }
    diagnostic.to_string()
}

/// Outcome of a snapshot run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteReport {
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
    pub failures: Vec<PathBuf>,
}

impl SuiteReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Runs one script with captured output and no input.
/// An error ends the script and is appended as `Error: <message>`.
pub fn capture_script(source: &str) -> String {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let mut interp = Interpreter::new();
    interp.set_output(buffer.clone());
    interp.set_input(Box::new(Cursor::new(Vec::new())));
    let mut env = Environment::new();

    let result = run_source(source, &mut interp, &mut env);

    let mut output = {
        let lock = buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&lock).to_string()
    };
    if let Err(err) = result {
        output.push_str(&format!("Error: {}\n", err));
    }
    output.trim().to_string()
}

/// Runs every `*.vy` script in `dir` and compares its output against the
/// sibling `.out` file, writing the snapshot when it is missing or when
/// `update` is set
pub fn run_snapshot_suite(dir: &Path, update: bool) -> io::Result<SuiteReport> {
    let mut scripts: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| has_vinyl_extension(path))
        .collect();
    scripts.sort();

    let mut report = SuiteReport::default();

    for path in scripts {
        report.total += 1;
        let start = Instant::now();
        let content = fs::read_to_string(&path)?;
        let expected_path = path.with_extension("out");

        let actual = capture_script(&content);

        let expected = if expected_path.exists() && !update {
            fs::read_to_string(&expected_path)?.trim().to_string()
        } else {
            fs::write(&expected_path, &actual)?;
            actual.clone()
        };

        if actual == expected {
            println!("{} {} ({:.2?})", "[✓]".green(), path.display(), start.elapsed());
            report.passed += 1;
        } else {
            println!("{} {}", "[✗]".red(), path.display());
            println!("Expected:\n{}\nGot:\n{}\n", expected, actual);
            report.failed += 1;
            report.failures.push(path);
        }
    }

    println!("\n{} Passed {}/{} tests", "[✓]".green(), report.passed, report.total);
    Ok(report)
}
