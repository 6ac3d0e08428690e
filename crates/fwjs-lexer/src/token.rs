//! Token definitions for FWJS.
//! FWJS 的 token 定义。

use std::fmt;

use fwjs_common::Span;
use logos::Logos;

/// A token with its kind and span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Why a piece of input could not be turned into a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexError {
    #[default]
    UnexpectedCharacter,
    IntegerOverflow,
}

fn parse_int(lex: &mut logos::Lexer<'_, TokenKind>) -> Result<i32, LexError> {
    lex.slice()
        .parse()
        .map_err(|_| LexError::IntegerOverflow)
}

/// The kind of a token.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
pub enum TokenKind {
    // Literals
    #[regex("[0-9]+", parse_int)]
    Int(i32),

    // Identifiers
    #[regex("[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    // Keywords
    #[token("var")]
    Var,
    #[token("function")]
    Function,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("print")]
    Print,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,

    // Punctuation
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,

    // Special, never produced by the logos state machine
    Eof,
    Error,
}

impl TokenKind {
    /// Returns true if this token is a keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Var
                | TokenKind::Function
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }

    /// How the token is written, for "expected ..." messages.
    pub fn describe(&self) -> String {
        let text = match self {
            TokenKind::Int(n) => return format!("integer `{n}`"),
            TokenKind::Ident(name) => return format!("identifier `{name}`"),
            TokenKind::Eof => return "end of input".to_string(),
            TokenKind::Error => return "invalid token".to_string(),
            TokenKind::Var => "var",
            TokenKind::Function => "function",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Print => "print",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
        };
        format!("`{text}`")
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
