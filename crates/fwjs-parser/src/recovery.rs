//! Error recovery helpers for the parser.
//!
//! After an error the parser skips tokens until it reaches a point where
//! a fresh statement can start.

use fwjs_lexer::TokenKind;

/// Tokens that start a statement and are safe to resume parsing at.
pub const STMT_STARTS: &[TokenKind] = &[TokenKind::Var, TokenKind::If, TokenKind::While];

/// Check if a token kind is in a set.
pub fn is_in_set(kind: &TokenKind, set: &[TokenKind]) -> bool {
    set.iter()
        .any(|k| std::mem::discriminant(k) == std::mem::discriminant(kind))
}

/// Check if a token starts a statement.
pub fn is_stmt_start(kind: &TokenKind) -> bool {
    is_in_set(kind, STMT_STARTS)
}

/// Tracks how deeply nested the skipped tokens are, so recovery does not
/// stop at a `;` or `}` that belongs to an inner block.
#[derive(Debug, Default)]
pub struct NestingDepth {
    parens: usize,
    braces: usize,
}

impl NestingDepth {
    pub fn update(&mut self, kind: &TokenKind) {
        match kind {
            TokenKind::LParen => self.parens += 1,
            TokenKind::RParen => self.parens = self.parens.saturating_sub(1),
            TokenKind::LBrace => self.braces += 1,
            TokenKind::RBrace => self.braces = self.braces.saturating_sub(1),
            _ => {}
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.parens == 0 && self.braces == 0
    }
}
