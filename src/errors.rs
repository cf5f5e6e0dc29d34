// File: src/errors.rs
//
// Error handling and reporting for the Vinyl scripting language.
// Provides the error type shared by the tokenizer, parser and interpreter,
// plus a pretty-printed diagnostic with source location information.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Source location information for tracking where code appears in a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Classes of errors that can stop a Vinyl program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SyntaxError,
    NameError,
    TypeError,
    DivisionByZero,
    OverflowError,
    IoError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::SyntaxError => write!(f, "Syntax Error"),
            ErrorKind::NameError => write!(f, "Name Error"),
            ErrorKind::TypeError => write!(f, "Type Error"),
            ErrorKind::DivisionByZero => write!(f, "Division By Zero"),
            ErrorKind::OverflowError => write!(f, "Overflow Error"),
            ErrorKind::IoError => write!(f, "I/O Error"),
        }
    }
}

/// Every way a Vinyl run can fail. The first error ends the run.
#[derive(Debug, Error)]
pub enum VinylError {
    #[error("Unexpected token: {found}, expected: {expected}")]
    Syntax {
        expected: String,
        found: String,
        location: Option<SourceLocation>,
    },

    #[error("Undefined variable: {name}")]
    Name {
        name: String,
        location: Option<SourceLocation>,
    },

    #[error("{message}")]
    Type { message: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in '{op}'")]
    Overflow { op: String },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VinylError>;

impl VinylError {
    pub fn syntax(
        expected: impl Into<String>,
        found: impl Into<String>,
        location: Option<SourceLocation>,
    ) -> Self {
        VinylError::Syntax { expected: expected.into(), found: found.into(), location }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        VinylError::Type { message: message.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            VinylError::Syntax { .. } => ErrorKind::SyntaxError,
            VinylError::Name { .. } => ErrorKind::NameError,
            VinylError::Type { .. } => ErrorKind::TypeError,
            VinylError::DivisionByZero => ErrorKind::DivisionByZero,
            VinylError::Overflow { .. } => ErrorKind::OverflowError,
            VinylError::Io(_) => ErrorKind::IoError,
        }
    }

    /// Where in the source the error was detected, when known
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            VinylError::Syntax { location, .. } | VinylError::Name { location, .. } => *location,
            _ => None,
        }
    }
}

/// Renders a `VinylError` for humans: kind, message, location arrow,
/// the offending source line with a caret, and an optional suggestion.
pub struct Diagnostic<'a> {
    error: &'a VinylError,
    file: Option<String>,
    source_line: Option<String>,
    suggestion: Option<String>,
}

impl<'a> Diagnostic<'a> {
    pub fn new(error: &'a VinylError) -> Self {
        Self { error, file: None, source_line: None, suggestion: None }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Attaches the source line the error points at, if the error has a location
    pub fn with_source(mut self, source: &str) -> Self {
        if let Some(location) = self.error.location() {
            self.source_line = source
                .lines()
                .nth(location.line.saturating_sub(1))
                .map(|line| line.to_string());
        }
        self
    }

    pub fn with_suggestion(mut self, suggestion: Option<&str>) -> Self {
        self.suggestion = suggestion.map(|s| s.to_string());
        self
    }
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind_str = format!("{}", self.error.kind());
        writeln!(f, "{}: {}", kind_str.red().bold(), self.error.to_string().bold())?;

        if let Some(location) = self.error.location() {
            let location_str = match &self.file {
                Some(file) => format!("  --> {}:{}", file, location),
                None => format!("  --> {}", location),
            };
            writeln!(f, "{}", location_str.bright_blue())?;

            if let Some(ref source) = self.source_line {
                writeln!(f, "   {}", "|".bright_blue())?;
                writeln!(
                    f,
                    "{} {} {}",
                    format!("{:3}", location.line).bright_blue(),
                    "|".bright_blue(),
                    source
                )?;
                writeln!(
                    f,
                    "   {} {}{}",
                    "|".bright_blue(),
                    " ".repeat(location.column.saturating_sub(1)),
                    "^".red().bold()
                )?;
                writeln!(f, "   {}", "|".bright_blue())?;
            }
        } else if let Some(ref file) = self.file {
            writeln!(f, "{}", format!("  --> {}", file).bright_blue())?;
        }

        if let Some(ref suggestion) = self.suggestion {
            writeln!(
                f,
                "   {} {}",
                "=".bright_green(),
                format!("Did you mean '{}'?", suggestion).bright_green()
            )?;
        }

        Ok(())
    }
}

/// Computes the Levenshtein distance between two strings
/// Used for "Did you mean?" suggestions
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    if s1_chars.is_empty() {
        return s2_chars.len();
    }
    if s2_chars.is_empty() {
        return s1_chars.len();
    }

    // Two rolling rows instead of the full matrix
    let mut previous: Vec<usize> = (0..=s2_chars.len()).collect();
    let mut current = vec![0; s2_chars.len() + 1];

    for (i, a) in s1_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b) in s2_chars.iter().enumerate() {
            let cost = if a == b { 0 } else { 1 };
            current[j + 1] = (previous[j + 1] + 1).min(current[j] + 1).min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[s2_chars.len()]
}

/// Find the closest match from a set of candidates using Levenshtein distance
/// Returns None if no good match is found (distance > 3)
pub fn find_closest_match<'a, I>(target: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best_match = None;
    let mut best_distance = usize::MAX;

    for candidate in candidates {
        let distance = levenshtein_distance(target, candidate);
        if distance <= 3 && distance < best_distance {
            best_distance = distance;
            best_match = Some(candidate);
        }
    }

    best_match
}
