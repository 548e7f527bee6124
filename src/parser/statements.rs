//! Statement parsing implementation
//!
//! A statement is a single expression, optionally terminated by `;`. Blocks
//! (`{ ... }`) and argument lists (`( ... )`) attach to the word, integer or
//! string that precedes them.
//!
//! # Grammar
//!
//! ```text
//! statement ::= ";"* atom ";"?
//! atom      ::= "(" atom ")" trailing*
//!             | OPERATOR atom
//!             | value arguments? block? trailing*
//! arguments ::= "(" ( atom ( "," atom )* )? ")"
//! block     ::= "{" statement* "}"
//! trailing  ::= OPERATOR atom | "[" atom "]"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::NodeId;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::Parser;

impl Parser {
    /// Parse a statement, consuming a trailing `;` if present.
    ///
    /// Returns `None` when nothing is left to parse, or when the current token
    /// cannot start an expression; such a token is reported and skipped so the
    /// caller always makes progress.
    pub(crate) fn parse_statement(&mut self, parent: Option<NodeId>) -> Option<NodeId> {
        while self.match_token(TokenKind::Semicolon) {}

        let kind = self.peek_kind()?;
        if !starts_expression(kind) {
            self.error_here("Unexpected token at start of statement");
            self.advance();
            return None;
        }

        let node = self.parse_atom(parent, true);
        self.match_token(TokenKind::Semicolon);
        Some(node)
    }

    /// Parse `( arg, arg, ... )` after a value. The opening paren must be the
    /// current token.
    pub(crate) fn parse_arguments(&mut self, owner: NodeId) -> Vec<NodeId> {
        self.advance(); // consume '('
        let mut args = Vec::new();

        if self.match_token(TokenKind::RParen) {
            return args;
        }

        loop {
            if self.is_at_end() {
                self.error_here("Expected ')' after arguments");
                break;
            }

            args.push(self.parse_atom(Some(owner), true));

            if self.match_token(TokenKind::Comma) {
                continue;
            }
            self.expect_token(TokenKind::RParen, "Expected ',' or ')' after argument");
            break;
        }

        args
    }

    /// Parse `{ statement* }` after a value. The opening brace must be the
    /// current token.
    pub(crate) fn parse_block(&mut self, owner: NodeId) -> Vec<NodeId> {
        self.advance(); // consume '{'
        let mut statements = Vec::new();

        loop {
            while self.match_token(TokenKind::Semicolon) {}

            if self.match_token(TokenKind::RBrace) {
                break;
            }
            if self.is_at_end() {
                self.error_here("Expected '}' after block");
                break;
            }

            if let Some(statement) = self.parse_statement(Some(owner)) {
                statements.push(statement);
            }
        }

        statements
    }
}

fn starts_expression(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Word
            | TokenKind::Integer
            | TokenKind::String
            | TokenKind::Operator
            | TokenKind::LParen
    )
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::Parser;

    fn parse(source: &str) -> (Ast, Parser) {
        let mut parser = Parser::new(tokenize(source));
        let ast = parser.parse_all();
        (ast, parser)
    }

    fn values(ast: &Ast, ids: &[NodeId]) -> Vec<Value> {
        ids.iter().map(|id| ast.node(*id).primary.clone()).collect()
    }

    #[test]
    fn test_call_arguments() {
        let (ast, parser) = parse("f(1, 2)");
        assert!(parser.diagnostics().is_empty());
        assert_eq!(ast.roots().len(), 1);

        let f = ast.node(ast.roots()[0]);
        assert_eq!(f.primary, Value::Word("f".to_string()));
        assert_eq!(
            values(&ast, f.parens.as_ref().unwrap()),
            vec![Value::Integer(1), Value::Integer(2)]
        );
        assert!(f.braces.is_none());
    }

    #[test]
    fn test_empty_call_with_block() {
        let (ast, parser) = parse("f() { 1; 2 }");
        assert!(parser.diagnostics().is_empty());

        let f = ast.node(ast.roots()[0]);
        assert_eq!(f.parens.as_ref().map(Vec::len), Some(0));
        assert_eq!(
            values(&ast, f.braces.as_ref().unwrap()),
            vec![Value::Integer(1), Value::Integer(2)]
        );
    }

    #[test]
    fn test_block_without_arguments() {
        let (ast, _) = parse("loop { x = x + 1 }");
        let node = ast.node(ast.roots()[0]);
        assert!(node.parens.is_none());
        assert_eq!(node.braces.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_block_children_point_to_owner() {
        let (ast, _) = parse("f() { a; b(c) }");
        let root = ast.roots()[0];
        for child in ast.node(root).braces.as_ref().unwrap() {
            assert_eq!(ast.node(*child).parent, Some(root));
        }
    }

    #[test]
    fn test_arguments_are_full_expressions() {
        let (ast, _) = parse("g(a + b * c, -d)");
        let g = ast.node(ast.roots()[0]);
        let args = g.parens.as_ref().unwrap();
        assert_eq!(args.len(), 2);
        assert!(ast.node(args[0]).primary.is_operator("+"));
        assert!(ast.node(args[1]).is_prefix());
    }

    #[test]
    fn test_semicolons_separate_statements() {
        let (ast, parser) = parse(";; a;; b ;");
        assert!(parser.diagnostics().is_empty());
        assert_eq!(
            values(&ast, ast.roots()),
            vec![Value::Word("a".to_string()), Value::Word("b".to_string())]
        );
    }

    #[test]
    fn test_missing_close_paren_is_reported() {
        let (ast, parser) = parse("f(1, 2");
        assert!(parser.has_errors());
        assert_eq!(ast.roots().len(), 1);
        assert_eq!(ast.node(ast.roots()[0]).parens.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_missing_close_brace_is_reported() {
        let (ast, parser) = parse("f() { 1; 2");
        assert!(parser.has_errors());
        assert_eq!(ast.node(ast.roots()[0]).braces.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_stray_closer_is_skipped() {
        let (ast, parser) = parse(") a } b");
        assert_eq!(parser.diagnostics().len(), 2);
        assert_eq!(
            values(&ast, ast.roots()),
            vec![Value::Word("a".to_string()), Value::Word("b".to_string())]
        );
    }

    #[test]
    fn test_trailing_comma_gets_placeholder() {
        let (ast, parser) = parse("f(1,)");
        assert!(parser.has_errors());
        let f = ast.node(ast.roots()[0]);
        assert_eq!(
            values(&ast, f.parens.as_ref().unwrap()),
            vec![Value::Integer(1), Value::placeholder()]
        );
    }

    #[test]
    fn test_error_location_names_row_and_column() {
        let (_, parser) = parse("x = (1 + 2\ny");
        let error = parser
            .diagnostics()
            .iter()
            .find(|d| d.is_error())
            .expect("missing ')' is reported");
        assert_eq!((error.location.line, error.location.column), (2, 1));
        assert!(error.to_string().ends_with("at 2, 1"));
    }
}
