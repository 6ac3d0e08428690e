//! The FWJS parser.

use std::rc::Rc;

use fwjs_common::Span;
use fwjs_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode};
use fwjs_stack::ensure_sufficient_stack;
use fwjs_lexer::{Token, TokenKind};
use fwjs_syntax::*;

use crate::recovery::{NestingDepth, is_stmt_start};

/// The FWJS parser.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    /// The token list must end with `Eof`, as produced by the lexer.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Parse a complete program.
    pub fn parse_program(&mut self) -> Expr {
        let start = self.current_span();
        let mut stmts = Vec::new();

        while !self.at_end() {
            let before = self.pos;

            if self.check(TokenKind::RBrace) {
                self.error_code("unmatched `}`", ErrorCode::UnexpectedToken);
                self.advance();
                continue;
            }

            if let Some(stmt) = self.parse_stmt() {
                stmts.push(stmt);
            }

            // Every iteration must consume something.
            if self.pos == before {
                self.advance();
            }
        }

        let span = start.merge(self.current_span());
        Self::sequence_or_null(stmts, span)
    }

    /// Parse one statement. Returns `None` for an empty statement `;`.
    fn parse_stmt(&mut self) -> Option<Expr> {
        match self.current_kind() {
            TokenKind::Semicolon => {
                self.advance();
                None
            }
            TokenKind::If => Some(self.parse_if()),
            TokenKind::While => Some(self.parse_while()),
            _ => {
                let errors_before = self.diagnostics.len();
                let expr = self.parse_expr();

                if !self.eat(TokenKind::Semicolon) {
                    if self.diagnostics.len() == errors_before {
                        let span = self.previous_span();
                        self.diagnostics.push(
                            Diagnostic::new(
                                DiagnosticKind::Parser,
                                ErrorCode::MissingSemicolon,
                                span,
                                format!(
                                    "expected `;` after expression, found {}",
                                    self.current_kind()
                                ),
                            )
                            .with_label(span, "statement ends here"),
                        );
                    }
                    self.synchronize();
                }

                Some(expr)
            }
        }
    }

    /// `{ stmt* }` or a single statement.
    fn parse_block(&mut self) -> Expr {
        ensure_sufficient_stack(|| self.parse_block_inner())
    }

    fn parse_block_inner(&mut self) -> Expr {
        let start = self.current_span();

        if !self.check(TokenKind::LBrace) {
            return match self.parse_stmt() {
                Some(stmt) => stmt,
                None => Expr::new(ExprKind::Literal(Literal::Null), start),
            };
        }

        self.advance(); // {
        let mut stmts = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.at_end() {
            let before = self.pos;
            if let Some(stmt) = self.parse_stmt() {
                stmts.push(stmt);
            }
            if self.pos == before {
                self.advance();
            }
        }

        self.expect_closing(TokenKind::RBrace, start);
        let span = start.merge(self.previous_span());
        Self::sequence_or_null(stmts, span)
    }

    // ========== Expressions ==========

    /// Every nesting construct (parentheses, call arguments, function
    /// bodies, conditions) comes back through here or `parse_block`, so
    /// these two are where the stack is grown.
    fn parse_expr(&mut self) -> Expr {
        ensure_sufficient_stack(|| self.parse_expr_inner())
    }

    fn parse_expr_inner(&mut self) -> Expr {
        match self.current_kind() {
            TokenKind::Var => self.parse_var_decl(),
            TokenKind::Ident(_) if self.peek_kind() == &TokenKind::Eq => self.parse_assign(),
            _ => self.parse_comparison_expr(),
        }
    }

    fn parse_var_decl(&mut self) -> Expr {
        let start = self.current_span();
        self.advance(); // var

        let Some(name) = self.parse_ident() else {
            return self.recover_expr();
        };
        if !self.expect(TokenKind::Eq) {
            return self.recover_expr();
        }
        let value = self.parse_expr();

        let span = start.merge(value.span);
        Expr::new(
            ExprKind::VarDecl {
                name,
                value: Box::new(value),
            },
            span,
        )
    }

    fn parse_assign(&mut self) -> Expr {
        let Some(name) = self.parse_ident() else {
            return self.recover_expr();
        };
        self.advance(); // =
        let value = self.parse_expr();

        let span = name.span.merge(value.span);
        Expr::new(
            ExprKind::Assign {
                name,
                value: Box::new(value),
            },
            span,
        )
    }

    fn parse_comparison_expr(&mut self) -> Expr {
        let mut left = self.parse_additive_expr();

        loop {
            let op = match self.current_kind() {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::Lt => BinOp::Lt,
                TokenKind::LtEq => BinOp::Le,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::GtEq => BinOp::Ge,
                _ => break,
            };
            self.advance();
            let right = self.parse_additive_expr();
            left = Self::binary(op, left, right);
        }

        left
    }

    fn parse_additive_expr(&mut self) -> Expr {
        let mut left = self.parse_multiplicative_expr();

        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative_expr();
            left = Self::binary(op, left, right);
        }

        left
    }

    fn parse_multiplicative_expr(&mut self) -> Expr {
        let mut left = self.parse_postfix_expr();

        loop {
            let op = match self.current_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_postfix_expr();
            left = Self::binary(op, left, right);
        }

        left
    }

    fn parse_postfix_expr(&mut self) -> Expr {
        let mut expr = self.parse_primary_expr();

        while self.check(TokenKind::LParen) {
            let open = self.current_span();
            self.advance();
            let args = self.parse_comma_list(TokenKind::RParen, |p| Some(p.parse_expr()));
            self.expect_closing(TokenKind::RParen, open);
            let span = expr.span.merge(self.previous_span());
            expr = Expr::new(
                ExprKind::Call {
                    func: Box::new(expr),
                    args,
                },
                span,
            );
        }

        expr
    }

    fn parse_primary_expr(&mut self) -> Expr {
        let start = self.current_span();

        match self.current_kind().clone() {
            TokenKind::Int(n) => {
                self.advance();
                Expr::new(ExprKind::Literal(Literal::Int(n)), start)
            }
            TokenKind::True => {
                self.advance();
                Expr::new(ExprKind::Literal(Literal::Bool(true)), start)
            }
            TokenKind::False => {
                self.advance();
                Expr::new(ExprKind::Literal(Literal::Bool(false)), start)
            }
            TokenKind::Null => {
                self.advance();
                Expr::new(ExprKind::Literal(Literal::Null), start)
            }
            TokenKind::Ident(name) => {
                self.advance();
                Expr::new(ExprKind::Var(name), start)
            }
            TokenKind::LParen => {
                self.advance();
                let mut inner = self.parse_expr();
                self.expect_closing(TokenKind::RParen, start);
                // Keep the parenthesized span for error labels.
                inner.span = start.merge(self.previous_span());
                inner
            }
            TokenKind::Print => self.parse_print(),
            TokenKind::Function => self.parse_function(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Error => {
                // Already reported by the lexer.
                self.advance();
                Expr::new(ExprKind::Literal(Literal::Null), start)
            }
            other => {
                self.error_code(
                    &format!("expected expression, found {other}"),
                    ErrorCode::ExpectedExpression,
                );
                self.recover_expr()
            }
        }
    }

    fn parse_print(&mut self) -> Expr {
        let start = self.current_span();
        self.advance(); // print

        let open = self.current_span();
        if !self.expect(TokenKind::LParen) {
            return self.recover_expr();
        }
        let arg = self.parse_expr();
        self.expect_closing(TokenKind::RParen, open);

        let span = start.merge(self.previous_span());
        Expr::new(ExprKind::Print(Box::new(arg)), span)
    }

    fn parse_function(&mut self) -> Expr {
        let start = self.current_span();
        self.advance(); // function

        let open = self.current_span();
        if !self.expect(TokenKind::LParen) {
            return self.recover_expr();
        }
        let params = self.parse_comma_list(TokenKind::RParen, Self::parse_ident);
        self.expect_closing(TokenKind::RParen, open);

        let body = self.parse_block();
        let span = start.merge(self.previous_span());
        Expr::new(
            ExprKind::Function(Rc::new(FunctionDef { params, body })),
            span,
        )
    }

    fn parse_if(&mut self) -> Expr {
        let start = self.current_span();
        self.advance(); // if

        let condition = self.parse_condition();
        let then_branch = self.parse_block();
        let else_branch = if self.eat(TokenKind::Else) {
            Some(Box::new(self.parse_block()))
        } else {
            None
        };

        let span = start.merge(self.previous_span());
        Expr::new(
            ExprKind::If {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch,
            },
            span,
        )
    }

    fn parse_while(&mut self) -> Expr {
        let start = self.current_span();
        self.advance(); // while

        let condition = self.parse_condition();
        let body = self.parse_block();

        let span = start.merge(self.previous_span());
        Expr::new(
            ExprKind::While {
                condition: Box::new(condition),
                body: Box::new(body),
            },
            span,
        )
    }

    /// `( expr )` after `if` or `while`.
    fn parse_condition(&mut self) -> Expr {
        let open = self.current_span();
        if !self.expect(TokenKind::LParen) {
            return self.recover_expr();
        }
        let condition = self.parse_expr();
        self.expect_closing(TokenKind::RParen, open);
        condition
    }

    fn parse_ident(&mut self) -> Option<Ident> {
        let span = self.current_span();
        if let TokenKind::Ident(name) = self.current_kind() {
            let ident = Ident::new(name.clone(), span);
            self.advance();
            Some(ident)
        } else {
            let found = self.current_kind().clone();
            let mut diagnostic = Diagnostic::new(
                DiagnosticKind::Parser,
                ErrorCode::ExpectedIdentifier,
                span,
                format!("expected identifier, found {found}"),
            )
            .with_label(span, "here");
            if found.is_keyword() {
                diagnostic = diagnostic.with_note(format!("{found} is a reserved word"));
            }
            self.diagnostics.push(diagnostic);
            None
        }
    }

    fn parse_comma_list<T, F>(&mut self, closing: TokenKind, mut parse_item: F) -> Vec<T>
    where
        F: FnMut(&mut Self) -> Option<T>,
    {
        let mut items = Vec::new();

        while !self.check(closing.clone()) && !self.at_end() {
            if let Some(item) = parse_item(self) {
                items.push(item);
            } else {
                // Recovery: skip to comma or closing delimiter
                while !self.check(TokenKind::Comma)
                    && !self.check(closing.clone())
                    && !self.at_end()
                {
                    self.advance();
                }
            }

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        items
    }

    // ========== Helpers ==========

    fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
        let span = left.span.merge(right.span);
        Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        )
    }

    fn sequence_or_null(stmts: Vec<Expr>, span: Span) -> Expr {
        if stmts.is_empty() {
            Expr::new(ExprKind::Literal(Literal::Null), span)
        } else {
            Expr::sequence(stmts)
        }
    }

    fn current(&self) -> &Token {
        // The lexer always appends `Eof`, which `advance` never moves past.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn current_span(&self) -> Span {
        self.current().span
    }

    fn peek_kind(&self) -> &TokenKind {
        let idx = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    fn at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    fn check(&self, kind: TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(&kind)
    }

    fn advance(&mut self) {
        if !self.at_end() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> bool {
        if self.eat(kind.clone()) {
            return true;
        }
        let found = self.current_kind().clone();
        self.error_code(
            &format!("expected {kind}, found {found}"),
            ErrorCode::UnexpectedToken,
        );
        false
    }

    /// Expect a closing delimiter, pointing back at the opening one when
    /// it is missing.
    fn expect_closing(&mut self, kind: TokenKind, open: Span) -> bool {
        if self.eat(kind.clone()) {
            return true;
        }
        let span = self.current_span();
        let found = self.current_kind().clone();
        self.diagnostics.push(
            Diagnostic::new(
                DiagnosticKind::Parser,
                ErrorCode::UnclosedDelimiter,
                span,
                format!("expected {kind}, found {found}"),
            )
            .with_label(open, "unclosed delimiter opened here")
            .with_label(span, format!("expected {kind} here")),
        );
        false
    }

    fn error_code(&mut self, message: &str, code: ErrorCode) {
        let span = self.current_span();
        self.diagnostics.push(
            Diagnostic::new(DiagnosticKind::Parser, code, span, message).with_label(span, "here"),
        );
    }

    // ========== Error Recovery ==========

    /// Placeholder for an expression that failed to parse. Skips the
    /// offending token unless it can end or close the current construct.
    fn recover_expr(&mut self) -> Expr {
        let span = self.current_span();
        if !matches!(
            self.current_kind(),
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::RParen | TokenKind::Eof
        ) && !is_stmt_start(self.current_kind())
        {
            self.advance();
        }
        Expr::new(ExprKind::Literal(Literal::Null), span)
    }

    /// Skip to the next statement boundary: just past a top-level `;`, or
    /// before a top-level `}` or statement keyword.
    fn synchronize(&mut self) {
        let mut depth = NestingDepth::default();

        while !self.at_end() {
            let kind = self.current_kind().clone();

            if depth.is_top_level() {
                if kind == TokenKind::Semicolon {
                    self.advance();
                    return;
                }
                if kind == TokenKind::RBrace || is_stmt_start(&kind) {
                    return;
                }
            }

            depth.update(&kind);
            self.advance();
        }
    }
}
