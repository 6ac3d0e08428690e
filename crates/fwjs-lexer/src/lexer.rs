//! The FWJS lexer.
//! FWJS 词法分析器。

use crate::token::{LexError, Token, TokenKind};
use fwjs_common::Span;
use fwjs_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode};
use logos::Logos;

/// The FWJS lexer.
/// FWJS 词法分析器。
///
/// Converts source code into a sequence of tokens. Invalid input becomes
/// an `Error` token plus a diagnostic, so the parser always sees the
/// whole file and the token stream always ends with `Eof`.
/// 非法输入会产生 `Error` token 和一条诊断信息，token 序列总是以 `Eof` 结尾。
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source code.
    /// 为给定的源代码创建新的词法分析器。
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            diagnostics: Vec::new(),
        }
    }

    /// Tokenize the entire source and return tokens and diagnostics.
    /// 对整个源代码进行词法分析，返回 token 列表和诊断信息。
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        let mut tokens = Vec::new();

        while let Some(result) = self.inner.next() {
            let span = Span::from(self.inner.span());
            match result {
                Ok(kind) => tokens.push(Token::new(kind, span)),
                Err(error) => {
                    let diagnostic = self.report(error, span);
                    self.diagnostics.push(diagnostic);
                    tokens.push(Token::new(TokenKind::Error, span));
                }
            }
        }

        let end = self.inner.source().len();
        tokens.push(Token::new(TokenKind::Eof, Span::from_usize(end, end)));

        (tokens, self.diagnostics)
    }

    fn report(&self, error: LexError, span: Span) -> Diagnostic {
        let slice = self.inner.slice();
        match error {
            LexError::IntegerOverflow => Diagnostic::new(
                DiagnosticKind::Lexer,
                ErrorCode::IntegerOverflow,
                span,
                format!("integer literal `{slice}` is too large"),
            )
            .with_label(span, "does not fit in a 32-bit integer")
            .with_note(format!(
                "the largest integer literal is {}",
                i32::MAX
            )),
            LexError::UnexpectedCharacter => Diagnostic::new(
                DiagnosticKind::Lexer,
                ErrorCode::UnexpectedCharacter,
                span,
                format!("unexpected character `{slice}`"),
            )
            .with_label(span, "not valid here"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let (tokens, _) = Lexer::new(source).tokenize();
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_source_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("   \n\t"), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_spans_are_byte_ranges() {
        let (tokens, _) = Lexer::new("var xy = 10;").tokenize();
        assert_eq!(tokens[1].span, Span::from_usize(4, 6));
        assert_eq!(tokens[3].span, Span::from_usize(9, 11));
        assert_eq!(tokens.last().map(|t| t.span), Some(Span::from_usize(12, 12)));
    }

    #[test]
    fn test_unexpected_character_is_reported() {
        let (tokens, diagnostics) = Lexer::new("1 # 2").tokenize();
        assert_eq!(tokens[1].kind, TokenKind::Error);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, ErrorCode::UnexpectedCharacter);
    }
}
