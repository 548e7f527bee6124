//! Expression parsing implementation
//!
//! The grammar does not encode precedence. [`Parser::parse_atom`] reads one
//! operand and then chains every following infix operator strictly left to
//! right, so `1 + 2 * 3` is first built as `(1 + 2) * 3`. Right after each new
//! infix node is built, [`Parser::repair_precedence`] compares it with its left
//! child and, if the left child binds looser, rotates the pair so the looser
//! operator ends up on top:
//!
//! ```text
//!        *                +
//!       / \              / \
//!      +   3    ==>     1   *
//!     / \                  / \
//!    1   2                2   3
//! ```
//!
//! The rotation swaps primaries between the two arena slots and reassigns their
//! child lists, so the node id held by the caller stays the root. The demoted
//! node is then checked against its own new left child, which is what makes
//! longer mixed chains such as `a || b + c * d` come out right.
//!
//! Assignment-family operators parse their right side with trailing operators
//! allowed. Everything after `=` therefore lands in its right operand, which
//! gives right associativity (`a = b = 3` is `a = (b = 3)`).
//!
//! A prefix operator applies to its operand together with any member access
//! or index directly after it, so `-a.b` is `-(a.b)` and `!a[0]` is `!(a[0])`.
//!
//! Nesting deeper than [`MAX_NESTING`] is reported as an error and the rest of the
//! nested construct is skipped, leaving a placeholder in its place.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Parser, MAX_NESTING};
use crate::parser::precedence::{is_assignment, Precedence};

impl Parser {
    /// Parse one operand and, when `allow_trailing` is set, every infix
    /// operator and `[...]` index that follows it.
    pub(crate) fn parse_atom(&mut self, parent: Option<NodeId>, allow_trailing: bool) -> NodeId {
        if self.depth >= MAX_NESTING {
            return self.skip_nested(parent);
        }
        self.depth += 1;

        let base = match self.peek_kind() {
            Some(TokenKind::LParen) => self.parse_group(parent),
            Some(TokenKind::Operator) => self.parse_prefix(parent),
            _ => self.parse_primary(parent),
        };

        let node = if allow_trailing {
            self.parse_trailing(base, parent, false)
        } else {
            base
        };

        self.depth -= 1;
        node
    }

    /// Skip tokens up to the closer, `,` or `;` that ends the construct being
    /// parsed, and stand a placeholder in for them.
    fn skip_nested(&mut self, parent: Option<NodeId>) -> NodeId {
        let loc = self.current_location();
        self.error(
            format!("Expression nested more than {} levels deep", MAX_NESTING),
            loc,
        );

        let mut open = 0usize;
        while let Some(kind) = self.peek_kind() {
            match kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => open += 1,
                TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
                | TokenKind::Comma
                | TokenKind::Semicolon
                    if open == 0 =>
                {
                    break
                }
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => open -= 1,
                _ => {}
            }
            self.advance();
        }

        self.ast.alloc(Node::new(Value::placeholder(), parent, loc))
    }

    /// `( expr )`, kept as a transparent `()` prefix node so the rotation
    /// never reaches inside the parentheses.
    fn parse_group(&mut self, parent: Option<NodeId>) -> NodeId {
        let loc = self.current_location();
        self.advance(); // consume '('

        let group = self.ast.alloc(Node::new(
            Value::Operator(GROUP_OPERATOR.to_string()),
            parent,
            loc,
        ));
        let inner = self.parse_atom(Some(group), true);
        self.ast.node_mut(group).parens = Some(vec![inner]);

        self.expect_token(TokenKind::RParen, "Expected ')' after expression");
        group
    }

    /// Prefix operator applied to the next operand and its member/index
    /// postfixes
    fn parse_prefix(&mut self, parent: Option<NodeId>) -> NodeId {
        let loc = self.current_location();
        let op = self.advance().map(|t| t.text).unwrap_or_default();

        let node = self.ast.alloc(Node::new(Value::Operator(op), parent, loc));
        let operand = self.parse_atom(Some(node), false);
        let operand = self.parse_trailing(operand, Some(node), true);
        self.ast.node_mut(node).parens = Some(vec![operand]);
        node
    }

    /// Word, integer or string, with an optional argument list and block
    fn parse_primary(&mut self, parent: Option<NodeId>) -> NodeId {
        let loc = self.current_location();

        let Some(token) = self.peek().cloned() else {
            self.error_here("Expected a value");
            return self.ast.alloc(Node::new(Value::placeholder(), parent, loc));
        };

        let value = match token.kind {
            TokenKind::Word => Value::Word(token.text),
            TokenKind::String => Value::String(token.text),
            TokenKind::Integer => match token.text.parse::<i64>() {
                Ok(n) => Value::Integer(n),
                Err(_) => {
                    self.error(format!("Invalid integer literal: {}", token.text), loc);
                    Value::placeholder()
                }
            },
            _ => {
                // Leave the token for whoever is waiting for it
                self.error_here("Expected a value");
                return self.ast.alloc(Node::new(Value::placeholder(), parent, loc));
            }
        };
        self.advance();

        let node = self.ast.alloc(Node::new(value, parent, loc));

        if self.check(TokenKind::LParen) {
            let args = self.parse_arguments(node);
            self.ast.node_mut(node).parens = Some(args);
        }

        if self.check(TokenKind::LBrace) {
            let body = self.parse_block(node);
            self.ast.node_mut(node).braces = Some(body);
        }

        node
    }

    /// Operator chaining: each infix operator or index takes the tree built so
    /// far as its left operand, then the result is repaired. With
    /// `postfix_only`, chaining stops at the first operator looser than member
    /// access.
    fn parse_trailing(
        &mut self,
        mut left: NodeId,
        parent: Option<NodeId>,
        postfix_only: bool,
    ) -> NodeId {
        loop {
            let loc = self.current_location();
            if postfix_only && !self.at_postfix() {
                break;
            }

            let node = match self.peek_kind() {
                Some(TokenKind::LBracket) => {
                    self.advance();
                    let node = self.ast.alloc(Node::new(
                        Value::Operator(INDEX_OPERATOR.to_string()),
                        parent,
                        loc,
                    ));
                    let index = self.parse_atom(Some(node), true);
                    self.expect_token(TokenKind::RBracket, "Expected ']' after index");
                    self.attach_operands(node, left, index)
                }
                Some(TokenKind::Operator) => {
                    let op = self.advance().map(|t| t.text).unwrap_or_default();
                    let right_assoc = is_assignment(&op);
                    let node = self.ast.alloc(Node::new(Value::Operator(op), parent, loc));
                    let right = self.parse_atom(Some(node), right_assoc);
                    self.attach_operands(node, left, right)
                }
                _ => break,
            };

            self.repair_precedence(node);
            left = node;
        }

        left
    }

    fn at_postfix(&self) -> bool {
        match self.peek() {
            Some(token) if token.kind == TokenKind::LBracket => true,
            Some(token) if token.kind == TokenKind::Operator => {
                Precedence::of(&token.text) == Precedence::Member
            }
            _ => false,
        }
    }

    fn attach_operands(&mut self, node: NodeId, left: NodeId, right: NodeId) -> NodeId {
        self.ast.node_mut(node).parens = Some(vec![left, right]);
        self.ast.set_parent(left, node);
        self.ast.set_parent(right, node);
        node
    }

    /// Rotate `node` around its left child for as long as the left child binds
    /// looser, following the demoted node down the right spine.
    pub(crate) fn repair_precedence(&mut self, node: NodeId) {
        let mut current = node;
        while let Some(demoted) = self.rotate_right_if_inverted(current) {
            current = demoted;
        }
    }

    /// Single-step right rotation.
    ///
    /// `outer(left(ll, lr), r)` with `prec(left) < prec(outer)` becomes
    /// `left'(ll, outer'(lr, r))`, where `left'` reuses the `outer` slot and
    /// `outer'` reuses the `left` slot. Returns the slot now holding the demoted
    /// operator, or `None` when the shape is already correct.
    fn rotate_right_if_inverted(&mut self, outer: NodeId) -> Option<NodeId> {
        let (left, right) = self.ast.node(outer).operands()?;
        let (left_left, left_right) = self.ast.node(left).operands()?;

        let outer_rank = Precedence::of(self.ast.node(outer).primary.as_operator()?);
        let left_rank = Precedence::of(self.ast.node(left).primary.as_operator()?);
        if left_rank >= outer_rank {
            return None;
        }

        log::trace!(
            "rotating '{}' above '{}'",
            self.ast.node(left).primary,
            self.ast.node(outer).primary
        );

        let outer_primary = std::mem::take(&mut self.ast.node_mut(outer).primary);
        let left_primary = std::mem::replace(&mut self.ast.node_mut(left).primary, outer_primary);
        self.ast.node_mut(outer).primary = left_primary;

        let outer_loc = self.ast.node(outer).location;
        let left_loc = std::mem::replace(&mut self.ast.node_mut(left).location, outer_loc);
        self.ast.node_mut(outer).location = left_loc;

        self.ast.node_mut(left).parens = Some(vec![left_right, right]);
        self.ast.node_mut(outer).parens = Some(vec![left_left, left]);
        self.ast.set_parent(right, left);
        self.ast.set_parent(left_left, outer);

        Some(left)
    }
}
