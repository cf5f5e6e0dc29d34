// File: src/parser.rs
//
// Recursive descent parser for the Vinyl scripting language.
// Transforms a sequence of tokens into a list of statements.
//
// Grammar:
//   program    := statement*
//   statement  := varDecl | printStmt | inputStmt | waitStmt
//   varDecl    := ('int'|'float'|'bool'|'string') IDENT '=' expression
//   printStmt  := 'print' expression
//   inputStmt  := 'input' IDENT '=' STRING
//   waitStmt   := 'wait' expression
//   expression := term (('+'|'-'|'=='|'!='|'>'|'<'|'>='|'<=') term)*
//   term       := factor (('*'|'/') factor)*
//   factor     := FLOAT | INT | STRING | 'true' | 'false' | IDENT | '(' expression ')'
//
// Additive and relational operators share one left-associative precedence
// tier. The parser uses a single-token lookahead and fails on the first
// token that does not fit; no statement is returned unless all of them parse.

use crate::ast::{BinaryOp, Expr, Stmt, TypeAnnotation};
use crate::errors::{Result, VinylError};
use crate::lexer::{Token, TokenKind};

/// Parser maintains position in token stream and provides methods to parse statements and expressions
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a new parser from a vector of tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    /// Peek at the current token without consuming it
    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    /// Consume and return the current token, then advance to the next
    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// Builds a syntax error describing the current token
    fn unexpected(&self, expected: impl Into<String>) -> VinylError {
        match self.tokens.get(self.pos) {
            Some(tok) => VinylError::syntax(expected, tok.kind.to_string(), Some(tok.location())),
            None => VinylError::syntax(expected, "end of input", None),
        }
    }

    /// Advances past the current token only if it equals `expected`
    fn eat(&mut self, expected: &TokenKind) -> Result<()> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected(format!("'{}'", expected)))
        }
    }

    fn expect_identifier(&mut self) -> Result<String> {
        match self.peek() {
            Some(TokenKind::Identifier(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// True once every token has been consumed
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Parse the entire token stream into a vector of statements
    pub fn parse(&mut self) -> Result<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while !self.is_at_end() {
            stmts.push(self.parse_stmt()?);
        }
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Stmt> {
        let keyword = match self.peek() {
            Some(TokenKind::Keyword(k)) => k.clone(),
            _ => return Err(self.unexpected("statement")),
        };

        if let Some(var_type) = TypeAnnotation::from_keyword(&keyword) {
            return self.parse_declaration(var_type);
        }

        match keyword.as_str() {
            "print" => {
                self.advance();
                Ok(Stmt::Print(self.parse_expr()?))
            }
            "input" => self.parse_input(),
            "wait" => {
                self.advance();
                Ok(Stmt::Wait(self.parse_expr()?))
            }
            _ => Err(self.unexpected("statement")),
        }
    }

    fn parse_declaration(&mut self, var_type: TypeAnnotation) -> Result<Stmt> {
        self.advance(); // type keyword
        let name = self.expect_identifier()?;
        self.eat(&TokenKind::Operator("=".into()))?;
        let value = self.parse_expr()?;
        Ok(Stmt::Assign { var_type, name, value })
    }

    fn parse_input(&mut self) -> Result<Stmt> {
        self.advance(); // input
        let name = self.expect_identifier()?;
        self.eat(&TokenKind::Operator("=".into()))?;
        match self.peek() {
            Some(TokenKind::String(prompt)) => {
                let prompt = Expr::Str(prompt.clone());
                self.advance();
                Ok(Stmt::Input { name, prompt })
            }
            _ => Err(self.unexpected("string literal")),
        }
    }

    /// Parses the additive/relational tier
    pub fn parse_expr(&mut self) -> Result<Expr> {
        let mut left = self.parse_term()?;
        while let Some(op) = self.peek_operator(BinaryOp::expression_op) {
            self.advance();
            let right = self.parse_term()?;
            left = Expr::Binary { op, left: Box::new(left), right: Box::new(right) };
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut left = self.parse_factor()?;
        while let Some(op) = self.peek_operator(BinaryOp::term_op) {
            self.advance();
            let right = self.parse_factor()?;
            left = Expr::Binary { op, left: Box::new(left), right: Box::new(right) };
        }
        Ok(left)
    }

    fn peek_operator(&self, classify: fn(&str) -> Option<BinaryOp>) -> Option<BinaryOp> {
        match self.peek() {
            Some(TokenKind::Operator(op)) => classify(op),
            _ => None,
        }
    }

    fn parse_factor(&mut self) -> Result<Expr> {
        let Some(tok) = self.tokens.get(self.pos) else {
            return Err(self.unexpected("expression"));
        };
        let location = tok.location();

        let expr = match tok.kind.clone() {
            TokenKind::Float(n) => Expr::Float(n),
            TokenKind::Int(n) => Expr::Int(n),
            TokenKind::String(s) => Expr::Str(s),
            TokenKind::Bool(b) => Expr::Bool(b),
            TokenKind::Identifier(name) => Expr::Var { name, location },
            TokenKind::Punctuation('(') => {
                self.advance();
                let expr = self.parse_expr()?;
                self.eat(&TokenKind::Punctuation(')'))?;
                return Ok(expr);
            }
            _ => return Err(self.unexpected("expression")),
        };
        self.advance();
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse(source: &str) -> Result<Vec<Stmt>> {
        Parser::new(tokenize(source)?).parse()
    }

    fn int(n: i64) -> Box<Expr> {
        Box::new(Expr::Int(n))
    }

    #[test]
    fn test_parse_declaration() {
        let stmts = parse("float ratio = 1.5").unwrap();
        assert_eq!(
            stmts,
            vec![Stmt::Assign {
                var_type: TypeAnnotation::Float,
                name: "ratio".into(),
                value: Expr::Float(1.5),
            }]
        );
    }

    #[test]
    fn test_statements_need_no_terminator() {
        let stmts = parse("int a = 1 print a wait 0").unwrap();
        assert_eq!(stmts.len(), 3);
        assert!(matches!(stmts[2], Stmt::Wait(Expr::Int(0))));
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let stmts = parse("print 1 + 2 * 3").unwrap();
        assert_eq!(
            stmts[0],
            Stmt::Print(Expr::Binary {
                op: BinaryOp::Add,
                left: int(1),
                right: Box::new(Expr::Binary { op: BinaryOp::Mul, left: int(2), right: int(3) }),
            })
        );
    }

    #[test]
    fn test_relational_and_additive_share_one_tier() {
        // 1 < 2 + 3 parses as (1 < 2) + 3
        let stmts = parse("print 1 < 2 + 3").unwrap();
        assert_eq!(
            stmts[0],
            Stmt::Print(Expr::Binary {
                op: BinaryOp::Add,
                left: Box::new(Expr::Binary { op: BinaryOp::Lt, left: int(1), right: int(2) }),
                right: int(3),
            })
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let stmts = parse("int a = (1 + 2) * 3").unwrap();
        let Stmt::Assign { value, .. } = &stmts[0] else {
            panic!("Expected declaration");
        };
        assert!(matches!(value, Expr::Binary { op: BinaryOp::Mul, .. }));
    }

    #[test]
    fn test_input_requires_string_prompt() {
        let stmts = parse("input name = \"Your name\"").unwrap();
        assert_eq!(
            stmts[0],
            Stmt::Input { name: "name".into(), prompt: Expr::Str("Your name".into()) }
        );

        let err = parse("input name = 5").unwrap_err();
        assert!(matches!(err, VinylError::Syntax { ref expected, .. } if expected == "string literal"));

        let err = parse("input name").unwrap_err();
        assert!(matches!(err, VinylError::Syntax { ref found, .. } if found == "end of input"));
    }

    #[test]
    fn test_missing_equals_reports_expected_and_found() {
        let err = parse("int x 5").unwrap_err();
        match err {
            VinylError::Syntax { expected, found, location } => {
                assert_eq!(expected, "'='");
                assert_eq!(found, "5");
                assert_eq!(location.map(|l| l.column), Some(7));
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_expression_is_not_a_statement() {
        let err = parse("x").unwrap_err();
        assert!(matches!(err, VinylError::Syntax { ref expected, .. } if expected == "statement"));
    }

    #[test]
    fn test_semicolon_is_never_consumed() {
        assert!(parse("print 1;").is_err());
    }

    #[test]
    fn test_unary_minus_is_not_an_expression() {
        assert!(parse("print -1").is_err());
    }

    #[test]
    fn test_unclosed_parenthesis() {
        let err = parse("print (1 + 2").unwrap_err();
        assert!(matches!(err, VinylError::Syntax { ref expected, .. } if expected == "')'"));
    }

    #[test]
    fn test_error_anywhere_discards_whole_program() {
        assert!(parse("print 1\nprint 2\nprint").is_err());
    }
}
