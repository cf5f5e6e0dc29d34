// File: src/ast.rs
//
// Abstract Syntax Tree (AST) definitions for the Vinyl scripting language.
// Defines the structure of parsed Vinyl programs.
//
// Expressions (Expr) represent values and computations, while Statements (Stmt)
// represent the four top-level actions: declarations, print, input and wait.
// Every node owns its children; the tree has no sharing.

use crate::errors::SourceLocation;
use std::fmt;

/// Declared type of a variable in `int x = ...` style declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeAnnotation {
    Int,
    Float,
    Bool,
    String,
}

impl TypeAnnotation {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "int" => Some(TypeAnnotation::Int),
            "float" => Some(TypeAnnotation::Float),
            "bool" => Some(TypeAnnotation::Bool),
            "string" => Some(TypeAnnotation::String),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            TypeAnnotation::Int => "int",
            TypeAnnotation::Float => "float",
            TypeAnnotation::Bool => "bool",
            TypeAnnotation::String => "string",
        }
    }
}

impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Gt,
    Lt,
    GtEq,
    LtEq,
}

impl BinaryOp {
    /// Operators of the additive/relational tier (one shared precedence level)
    pub fn expression_op(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "==" => Some(BinaryOp::Eq),
            "!=" => Some(BinaryOp::NotEq),
            ">" => Some(BinaryOp::Gt),
            "<" => Some(BinaryOp::Lt),
            ">=" => Some(BinaryOp::GtEq),
            "<=" => Some(BinaryOp::LtEq),
            _ => None,
        }
    }

    /// Operators of the multiplicative tier
    pub fn term_op(symbol: &str) -> Option<Self> {
        match symbol {
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Gt => ">",
            BinaryOp::Lt => "<",
            BinaryOp::GtEq => ">=",
            BinaryOp::LtEq => "<=",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Var {
        name: String,
        location: SourceLocation,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `int x = expr`: evaluate, cast to the declared type, store
    Assign {
        var_type: TypeAnnotation,
        name: String,
        value: Expr,
    },
    Print(Expr),
    /// `input name = "prompt"`: the prompt is always a string literal
    Input {
        name: String,
        prompt: Expr,
    },
    Wait(Expr),
}
