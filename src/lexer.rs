// File: src/lexer.rs
//
// Lexical analyzer (tokenizer) for the Vinyl scripting language.
// Converts source code text into a sequence of tokens for parsing.
//
// Supports:
// - Keywords: int, float, bool, string, input, wait, print
// - Identifiers, integer and floating-point literals, true/false
// - String literals (no escape processing, may span lines)
// - Operators: =, +, -, *, /, ==, !=, <, >, <=, >=, =>
// - Punctuation: ( ) { } , ; :
// - Comments starting with # (stripped before scanning)
//
// Characters that start no token are skipped.

use crate::errors::{Result, SourceLocation, VinylError};
use std::fmt;

pub const KEYWORDS: [&str; 7] = ["int", "float", "bool", "string", "input", "wait", "print"];

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Identifier(String),
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Operator(String),
    Punctuation(char),
    Keyword(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Identifier(name) => write!(f, "{}", name),
            TokenKind::Int(n) => write!(f, "{}", n),
            TokenKind::Float(n) => write!(f, "{:?}", n),
            TokenKind::String(s) => write!(f, "\"{}\"", s),
            TokenKind::Bool(b) => write!(f, "{}", b),
            TokenKind::Operator(op) | TokenKind::Keyword(op) => write!(f, "{}", op),
            TokenKind::Punctuation(c) => write!(f, "{}", c),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Removes every `#`-to-end-of-line comment from a copy of the source.
///
/// Runs over the whole text before scanning, so a `#` inside a string
/// literal also starts a comment. Newlines are kept so token positions
/// still match the original lines.
pub fn strip_comments(source: &str) -> String {
    source
        .split_inclusive('\n')
        .map(|line| match line.find('#') {
            Some(idx) if line.ends_with('\n') => format!("{}\n", &line[..idx]),
            Some(idx) => line[..idx].to_string(),
            None => line.to_string(),
        })
        .collect()
}

/// Character cursor that tracks 1-based line and column
struct Cursor {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Cursor {
    fn new(text: &str) -> Self {
        Cursor { chars: text.chars().collect(), pos: 0, line: 1, column: 1 }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            out.push(ch);
            self.bump();
        }
        out
    }

    /// Index of the next `"` after the current position, if any
    fn closing_quote(&self) -> Option<usize> {
        self.chars[self.pos + 1..].iter().position(|&c| c == '"').map(|i| self.pos + 1 + i)
    }
}

/// Tokenizes Vinyl source code into a vector of tokens.
///
/// Comments are stripped first, then the text is scanned left to right,
/// taking the longest token that starts at each position. The only
/// failure is an integer literal that does not fit in 64 bits.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let text = strip_comments(source);
    let mut cursor = Cursor::new(&text);
    let mut tokens = Vec::new();

    while let Some(c) = cursor.peek() {
        if c.is_whitespace() {
            cursor.bump();
            continue;
        }

        let (line, column) = (cursor.line, cursor.column);
        let kind = match c {
            '=' | '<' | '>' | '!' => {
                cursor.bump();
                match (c, cursor.peek()) {
                    ('=', Some('=')) | ('<', Some('=')) | ('>', Some('=')) | ('!', Some('=')) => {
                        cursor.bump();
                        Some(TokenKind::Operator(format!("{}=", c)))
                    }
                    ('=', Some('>')) => {
                        cursor.bump();
                        Some(TokenKind::Operator("=>".into()))
                    }
                    // A lone '!' starts no token
                    ('!', _) => None,
                    _ => Some(TokenKind::Operator(c.to_string())),
                }
            }
            '+' | '-' | '*' | '/' => {
                cursor.bump();
                Some(TokenKind::Operator(c.to_string()))
            }
            '(' | ')' | ',' | '{' | '}' | ':' | ';' => {
                cursor.bump();
                Some(TokenKind::Punctuation(c))
            }
            '0'..='9' => {
                let digits = cursor.take_while(|ch| ch.is_ascii_digit());
                let is_float = cursor.peek() == Some('.')
                    && cursor.peek_at(1).is_some_and(|ch| ch.is_ascii_digit());

                if is_float {
                    cursor.bump(); // '.'
                    let fraction = cursor.take_while(|ch| ch.is_ascii_digit());
                    let literal = format!("{}.{}", digits, fraction);
                    let value = literal.parse::<f64>().map_err(|_| {
                        VinylError::syntax(
                            "floating-point literal",
                            literal.clone(),
                            Some(SourceLocation::new(line, column)),
                        )
                    })?;
                    Some(TokenKind::Float(value))
                } else {
                    let value = digits.parse::<i64>().map_err(|_| {
                        VinylError::syntax(
                            "integer literal within 64-bit range",
                            digits.clone(),
                            Some(SourceLocation::new(line, column)),
                        )
                    })?;
                    Some(TokenKind::Int(value))
                }
            }
            '"' => match cursor.closing_quote() {
                Some(end) => {
                    cursor.bump(); // opening quote
                    let mut s = String::new();
                    while cursor.pos < end {
                        if let Some(ch) = cursor.bump() {
                            s.push(ch);
                        }
                    }
                    cursor.bump(); // closing quote
                    Some(TokenKind::String(s))
                }
                None => {
                    // Unterminated: the quote itself is skipped
                    cursor.bump();
                    None
                }
            },
            'a'..='z' | 'A'..='Z' | '_' => {
                let word = cursor.take_while(|ch| ch.is_alphanumeric() || ch == '_');
                Some(match word.as_str() {
                    "true" => TokenKind::Bool(true),
                    "false" => TokenKind::Bool(false),
                    _ if KEYWORDS.contains(&word.as_str()) => TokenKind::Keyword(word),
                    _ => TokenKind::Identifier(word),
                })
            }
            _ => {
                cursor.bump();
                None
            }
        };

        if let Some(kind) = kind {
            tokens.push(Token { kind, line, column });
        }
    }

    Ok(tokens)
}
