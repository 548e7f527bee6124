//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure:
//! token helpers, diagnostic reporting, and the [`Parser::parse_all`] entry
//! point that produces one tree per top-level statement.
//!
//! # Parser Architecture
//!
//! - This module: Parser struct, helper methods, and coordination
//! - `expressions`: atoms, operator chaining, and precedence repair
//! - `statements`: statements, argument lists, and brace blocks
//!
//! Parser methods are split across these files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! # Error handling
//!
//! The parser never fails. Problems are reported as [`Diagnostic`]s and a
//! best-effort tree is still returned.

use crate::parser::ast::*;
use crate::parser::diagnostic::Diagnostic;
use crate::parser::lexer::{Lexer, Token, TokenKind};
use log::Level;

/// Deepest nesting of groups, prefixes, arguments, blocks and right-hand
/// assignment sides before the rest of the construct is skipped.
pub const MAX_NESTING: usize = 256;

/// Parse a token sequence into a forest, one root per top-level statement.
pub fn parse_all(tokens: Vec<Token>) -> Ast {
    Parser::new(tokens).parse_all()
}

/// Recursive parser over a materialized token sequence
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) ast: Ast,
    pub(crate) depth: usize,
    diagnostics: Vec<Diagnostic>,
    end_location: SourceLocation,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let end_location = tokens
            .last()
            .map(|t| t.location.advanced_over(&t.source_text()))
            .unwrap_or_else(SourceLocation::start);

        Self {
            tokens,
            position: 0,
            ast: Ast::new(),
            depth: 0,
            diagnostics: Vec::new(),
            end_location,
        }
    }

    /// Tokenize `source` and prepare a parser over the result.
    ///
    /// Lexer warnings are carried over into the parser's diagnostics.
    pub fn from_source(source: &str) -> Self {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize();
        let mut parser = Parser::new(tokens);
        parser.diagnostics.extend_from_slice(lexer.diagnostics());
        parser
    }

    /// Parse every remaining statement.
    pub fn parse_all(&mut self) -> Ast {
        while !self.is_at_end() {
            if let Some(root) = self.parse_statement(None) {
                self.ast.roots.push(root);
            }
        }

        log::debug!(
            "parsed {} statements ({} nodes, {} diagnostics)",
            self.ast.roots.len(),
            self.ast.len(),
            self.diagnostics.len()
        );
        std::mem::take(&mut self.ast)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    // ===== Helper methods =====

    pub(crate) fn error(&mut self, message: impl Into<String>, location: SourceLocation) {
        self.diagnostics
            .push(Diagnostic::report(Level::Error, message, location));
    }

    /// Error at the current token, naming what was found there.
    pub(crate) fn error_here(&mut self, message: &str) {
        let found = self.describe_current();
        let loc = self.current_location();
        self.error(format!("{}, found {}", message, found), loc);
    }

    pub(crate) fn describe_current(&self) -> String {
        match self.peek() {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report `message`. Nothing is consumed on failure.
    pub(crate) fn expect_token(&mut self, kind: TokenKind, message: &str) -> bool {
        if self.match_token(kind) {
            true
        } else {
            self.error_here(message);
            false
        }
    }

    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned()?;
        self.position += 1;
        Some(token)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek()
            .map(|t| t.location)
            .unwrap_or(self.end_location)
    }
}
