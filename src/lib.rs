// File: src/lib.rs
//
// Library interface for the Vinyl interpreter.
// Exposes modules for integration testing and external use.

pub mod ast;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runner;
