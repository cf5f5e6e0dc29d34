// File: src/interpreter/mod.rs
//
// Tree-walking interpreter for the Vinyl scripting language.
// Executes Vinyl programs by traversing the Abstract Syntax Tree (AST).
//
// The interpreter evaluates expressions to produce values and executes the
// four statement forms:
// - typed declarations, which cast the value to the declared type
// - print, which writes one line
// - input, which writes a prompt and blocks for one line of input
// - wait, which blocks the thread for a number of seconds
//
// Variables live in an `Environment` owned by the caller and passed in by
// `&mut`. The interpreter itself only holds the I/O handles, so the same
// interpreter can be pointed at captured buffers for testing.

mod environment;
mod operators;
mod value;

pub use environment::Environment;
pub use operators::apply_binary;
pub use value::Value;

use crate::ast::{Expr, Stmt};
use crate::errors::{Result, VinylError};
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;
use tracing::{debug, trace};

/// Evaluation context for Vinyl statements
pub struct Interpreter {
    output: Option<Arc<Mutex<Vec<u8>>>>,
    input: Option<Box<dyn BufRead>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter wired to stdin and stdout
    pub fn new() -> Self {
        Interpreter { output: None, input: None }
    }

    /// Sets the output sink for print statements and prompts (used for testing)
    pub fn set_output(&mut self, output: Arc<Mutex<Vec<u8>>>) {
        self.output = Some(output);
    }

    /// Sets the line source for input statements (used for testing)
    pub fn set_input(&mut self, input: Box<dyn BufRead>) {
        self.input = Some(input);
    }

    /// Executes statements in order, stopping at the first error
    pub fn eval_stmts(&mut self, stmts: &[Stmt], env: &mut Environment) -> Result<()> {
        for stmt in stmts {
            self.eval_stmt(stmt, env)?;
        }
        Ok(())
    }

    /// Executes a single statement.
    ///
    /// Returns the value the statement produced: the cast value for a
    /// declaration, the printed value for print, the text read for input,
    /// and nothing for wait.
    pub fn eval_stmt(&mut self, stmt: &Stmt, env: &mut Environment) -> Result<Option<Value>> {
        trace!(?stmt, "executing statement");
        match stmt {
            Stmt::Assign { var_type, name, value } => {
                let value = self.eval_expr(value, env)?.cast(*var_type)?;
                debug!(name = %name, var_type = %var_type, value = %value, "stored variable");
                env.set(name.clone(), value.clone());
                Ok(Some(value))
            }
            Stmt::Print(expr) => {
                let value = self.eval_expr(expr, env)?;
                self.write_output(&format!("{}\n", value))?;
                Ok(Some(value))
            }
            Stmt::Input { name, prompt } => {
                let prompt = self.eval_expr(prompt, env)?;
                self.write_output(&format!("{}: ", prompt))?;
                let line = self.read_line()?;
                debug!(name = %name, "stored input line");
                let value = Value::Str(line);
                env.set(name.clone(), value.clone());
                Ok(Some(value))
            }
            Stmt::Wait(expr) => {
                let value = self.eval_expr(expr, env)?;
                let duration = wait_duration(&value)?;
                trace!(?duration, "waiting");
                thread::sleep(duration);
                Ok(None)
            }
        }
    }

    /// Evaluates an expression; both operands of a binary node are
    /// evaluated left first, with no short-circuiting
    pub fn eval_expr(&self, expr: &Expr, env: &Environment) -> Result<Value> {
        match expr {
            Expr::Int(n) => Ok(Value::Int(*n)),
            Expr::Float(n) => Ok(Value::Float(*n)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Var { name, location } => env.get(name).cloned().ok_or_else(|| {
                VinylError::Name { name: name.clone(), location: Some(*location) }
            }),
            Expr::Binary { op, left, right } => {
                let l = self.eval_expr(left, env)?;
                let r = self.eval_expr(right, env)?;
                apply_binary(*op, &l, &r)
            }
        }
    }

    /// Helper to write output to either the output buffer or stdout
    fn write_output(&self, text: &str) -> Result<()> {
        if let Some(out) = &self.output {
            let mut buffer = out.lock().unwrap_or_else(PoisonError::into_inner);
            buffer.extend_from_slice(text.as_bytes());
        } else {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
        Ok(())
    }

    /// Reads one line without its line ending; end of input yields ""
    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        match self.input.as_mut() {
            Some(input) => input.read_line(&mut line)?,
            None => io::stdin().lock().read_line(&mut line)?,
        };
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}

fn wait_duration(value: &Value) -> Result<Duration> {
    let seconds = value.as_f64().ok_or_else(|| {
        VinylError::type_error(format!(
            "wait expects a number of seconds, got {}",
            value.type_name()
        ))
    })?;
    Duration::try_from_secs_f64(seconds).map_err(|_| {
        VinylError::type_error(format!("invalid wait duration: {} seconds", value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_duration_accepts_numbers() {
        assert_eq!(wait_duration(&Value::Int(0)).unwrap(), Duration::ZERO);
        assert_eq!(wait_duration(&Value::Float(0.25)).unwrap(), Duration::from_millis(250));
        assert_eq!(wait_duration(&Value::Bool(true)).unwrap(), Duration::from_secs(1));
    }

    #[test]
    fn test_wait_duration_rejects_bad_values() {
        assert!(matches!(wait_duration(&Value::Int(-1)), Err(VinylError::Type { .. })));
        assert!(matches!(wait_duration(&Value::Float(f64::NAN)), Err(VinylError::Type { .. })));
        assert!(matches!(wait_duration(&Value::Str("1".into())), Err(VinylError::Type { .. })));
    }
}
