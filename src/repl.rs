// File: src/repl.rs
//
// Interactive REPL (Read-Eval-Print Loop) for the Vinyl scripting language.
// Provides an interactive shell for executing Vinyl code with:
// - Command history with up/down arrow navigation
// - Continuation lines while parentheses or a string are left open
// - Echo of bare expressions (`vinyl> 7 / 2` prints 3.5)
// - Special commands (:help, :vars, :reset, :quit)
// - One Environment that persists across inputs; errors do not end the session

use crate::errors::Result;
use crate::interpreter::{Environment, Interpreter, Value};
use crate::lexer;
use crate::parser::Parser;
use crate::runner;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// What a complete REPL input turned out to be
#[derive(Debug, PartialEq)]
pub enum Evaluated {
    /// One or more statements ran
    Statements,
    /// A bare expression, evaluated for display
    Expression(Value),
}

/// REPL session that maintains interpreter state and handles user interaction
pub struct Repl {
    interpreter: Interpreter,
    env: Environment,
    editor: DefaultEditor,
}

impl Repl {
    /// Creates a new REPL session with a fresh environment
    pub fn new() -> anyhow::Result<Self> {
        let editor = DefaultEditor::new()?;
        Ok(Repl { interpreter: Interpreter::new(), env: Environment::new(), editor })
    }

    fn show_banner(&self) {
        println!(
            "{}",
            format!("Vinyl REPL v{}", env!("CARGO_PKG_VERSION")).bright_cyan().bold()
        );
        println!(
            "  Type {} for commands or {} to exit",
            ":help".bright_yellow(),
            ":quit".bright_yellow()
        );
        println!();
    }

    /// Starts the REPL loop
    pub fn run(&mut self) -> anyhow::Result<()> {
        self.show_banner();

        let mut buffer = String::new();

        loop {
            let prompt = if buffer.is_empty() { "vinyl> " } else { "....> " };

            match self.editor.readline(prompt) {
                Ok(line) => {
                    let _ = self.editor.add_history_entry(line.as_str());

                    if buffer.is_empty() && line.trim().starts_with(':') {
                        if self.handle_command(line.trim()) {
                            continue;
                        } else {
                            break;
                        }
                    }

                    buffer.push_str(&line);
                    buffer.push('\n');

                    if is_input_complete(&buffer) {
                        let input = std::mem::take(&mut buffer);
                        match eval_input(&mut self.interpreter, &mut self.env, &input) {
                            Ok(Some(Evaluated::Expression(value))) => {
                                println!("{}", value.to_string().bright_white())
                            }
                            Ok(_) => {}
                            Err(err) => {
                                eprint!("{}", runner::render_error(&err, &input, None, &self.env))
                            }
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "^C (:quit to exit)".bright_yellow());
                    buffer.clear();
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }

    /// Handles special REPL commands starting with ':'
    /// Returns true to continue REPL, false to quit
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            ":help" | ":h" => {
                self.show_help();
                true
            }
            ":quit" | ":q" | ":exit" => {
                println!("{}", "Goodbye!".bright_cyan());
                false
            }
            ":vars" | ":v" => {
                self.show_variables();
                true
            }
            ":reset" | ":r" => {
                self.env = Environment::new();
                println!("{}", "Environment reset".bright_green());
                true
            }
            _ => {
                println!(
                    "{} Unknown command: {}. Type {} for available commands.",
                    "Error:".bright_red(),
                    cmd.bright_yellow(),
                    ":help".bright_yellow()
                );
                true
            }
        }
    }

    fn show_help(&self) {
        println!();
        println!("{}", "REPL Commands:".bright_cyan().bold());
        println!("  {}{}  Display this help message", ":help".bright_yellow(), " or :h ".dimmed());
        println!("  {}{}  Exit the REPL", ":quit".bright_yellow(), " or :q ".dimmed());
        println!("  {}{}  Show defined variables", ":vars".bright_yellow(), " or :v ".dimmed());
        println!("  {}{} Reset environment", ":reset".bright_yellow(), " or :r ".dimmed());
        println!();
        println!("{}", "Examples:".bright_cyan().bold());
        println!("  {}", "vinyl> int x = 42".dimmed());
        println!("  {}", "vinyl> print \"x is \" + x".dimmed());
        println!("  {}", "vinyl> x / 5".dimmed());
        println!();
    }

    fn show_variables(&self) {
        println!();
        println!("{}", "Defined Variables:".bright_cyan().bold());
        if self.env.is_empty() {
            println!("  {}", "(none)".dimmed());
        }
        for (name, value) in self.env.sorted_entries() {
            println!("  {} = {} {}", name.bright_yellow(), value, format!("({})", value.type_name()).dimmed());
        }
        println!();
    }
}

/// Checks if the input is complete: parentheses balanced and no string
/// left open. Comments are ignored, matching how the tokenizer strips them.
pub fn is_input_complete(input: &str) -> bool {
    let stripped = lexer::strip_comments(input);
    let mut paren_count = 0i32;
    let mut in_string = false;

    for ch in stripped.chars() {
        match ch {
            '"' => in_string = !in_string,
            '(' if !in_string => paren_count += 1,
            ')' if !in_string => paren_count -= 1,
            _ => {}
        }
    }

    !in_string && paren_count <= 0
}

/// Runs one complete REPL input against the session state.
///
/// Input is first parsed as statements. When that fails and the whole
/// input is one expression, the expression's value is returned for
/// display instead.
pub fn eval_input(
    interpreter: &mut Interpreter,
    env: &mut Environment,
    input: &str,
) -> Result<Option<Evaluated>> {
    let tokens = lexer::tokenize(input)?;
    if tokens.is_empty() {
        return Ok(None);
    }

    match Parser::new(tokens.clone()).parse() {
        Ok(stmts) => {
            interpreter.eval_stmts(&stmts, env)?;
            Ok(Some(Evaluated::Statements))
        }
        Err(stmt_err) => {
            let mut parser = Parser::new(tokens);
            match parser.parse_expr() {
                Ok(expr) if parser.is_at_end() => {
                    let value = interpreter.eval_expr(&expr, env)?;
                    Ok(Some(Evaluated::Expression(value)))
                }
                _ => Err(stmt_err),
            }
        }
    }
}
