//! Token and tree printing
//!
//! Read-only views over lexer and parser output, used by the command-line
//! entry point and by debug logging:
//! - [`Printer::print_tokens`]: one line per token with its location
//! - [`Printer::print_node`]: a node tree with `W:`/`O:`/`S:`/`I:` value tags
//! - [`sexpr`]: a compact single-line s-expression, handy in tests
//!
//! Grouping nodes (`( ... )` in the source) carry no structure of their own and
//! are never printed; their content is printed in their place.

pub mod theme;

use crate::parser::ast::{Ast, NodeId, Value};
use crate::parser::lexer::Token;
use crossterm::style::{style, Color, Stylize};
use crossterm::tty::IsTty;
use std::io::{self, Write};
use theme::DEFAULT_THEME;

/// Writes tokens and trees, optionally with ANSI colors.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new(color: bool) -> Self {
        Printer { color }
    }

    /// Colored only when stdout is a terminal.
    pub fn for_stdout() -> Self {
        Printer::new(io::stdout().is_tty())
    }

    pub fn print_tokens(&self, out: &mut impl Write, tokens: &[Token]) -> io::Result<()> {
        for token in tokens {
            let kind = format!("{:<15}", token.kind.to_string());
            let text = format!("{:<10}", token.text);
            let loc = format!("({},{})", token.location.line, token.location.column);
            writeln!(
                out,
                "{}{}{}",
                self.paint(&kind, DEFAULT_THEME.tag),
                text,
                self.paint(&loc, DEFAULT_THEME.location)
            )?;
        }
        Ok(())
    }

    pub fn print_node(&self, out: &mut impl Write, ast: &Ast, id: NodeId) -> io::Result<()> {
        let mut pending = vec![Step::Node(id, 0)];

        while let Some(step) = pending.pop() {
            let (id, depth) = match step {
                Step::Text(text) => {
                    write!(out, "{}", text)?;
                    continue;
                }
                Step::Punct(text) => {
                    write!(out, "{}", self.paint(text, DEFAULT_THEME.punctuation))?;
                    continue;
                }
                Step::Node(id, depth) => (id, depth),
            };

            let node = ast.node(id);
            let first = node.parens.as_ref().and_then(|p| p.first());
            if let (true, Some(inner)) = (node.is_group(), first) {
                pending.push(Step::Node(*inner, depth));
                continue;
            }

            self.write_value(out, &node.primary)?;

            let mut rest = Vec::new();
            if let Some(parens) = &node.parens {
                rest.push(Step::Punct("("));
                for (i, child) in parens.iter().enumerate() {
                    if i > 0 {
                        rest.push(Step::Text(", ".to_string()));
                    }
                    rest.push(Step::Node(*child, depth));
                }
                rest.push(Step::Punct(")"));
            }
            if let Some(braces) = &node.braces {
                rest.push(Step::Text(" ".to_string()));
                rest.push(Step::Punct("{"));
                rest.push(Step::Text("\n".to_string()));
                for child in braces {
                    rest.push(Step::Text("  ".repeat(depth + 1)));
                    rest.push(Step::Node(*child, depth + 1));
                    rest.push(Step::Text("\n".to_string()));
                }
                rest.push(Step::Text("  ".repeat(depth)));
                rest.push(Step::Punct("}"));
            }
            pending.extend(rest.into_iter().rev());
        }

        writeln!(out)
    }

    fn write_value(&self, out: &mut impl Write, value: &Value) -> io::Result<()> {
        let (tag, color) = match value {
            Value::Word(_) => ("W:", DEFAULT_THEME.word),
            Value::Operator(_) => ("O:", DEFAULT_THEME.operator),
            Value::String(_) => ("S:", DEFAULT_THEME.string),
            Value::Integer(_) => ("I:", DEFAULT_THEME.number),
        };
        write!(
            out,
            "{} {}",
            self.paint(tag, DEFAULT_THEME.tag),
            self.paint(&value.to_string(), color)
        )
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Pending output while walking a tree without recursion.
enum Step {
    Node(NodeId, usize),
    Text(String),
    Punct(&'static str),
}

/// Render a subtree on one line.
///
/// Operators become `(op operand...)`, values print as themselves, argument
/// lists as `f(a b)` and blocks as `{s1; s2}`.
pub fn sexpr(ast: &Ast, id: NodeId) -> String {
    let mut text = String::new();
    let mut pending = vec![Step::Node(id, 0)];

    while let Some(step) = pending.pop() {
        let id = match step {
            Step::Text(part) => {
                text.push_str(&part);
                continue;
            }
            Step::Punct(part) => {
                text.push_str(part);
                continue;
            }
            Step::Node(id, _) => id,
        };

        let node = ast.node(id);
        let children = node.parens.as_deref().unwrap_or_default();
        let mut rest = Vec::new();

        if let Value::Operator(op) = &node.primary {
            if let (true, Some(inner)) = (node.is_group(), children.first()) {
                pending.push(Step::Node(*inner, 0));
                continue;
            }
            if !children.is_empty() {
                rest.push(Step::Text(format!("({}", op)));
                for child in children {
                    rest.push(Step::Punct(" "));
                    rest.push(Step::Node(*child, 0));
                }
                rest.push(Step::Punct(")"));
                pending.extend(rest.into_iter().rev());
                continue;
            }
        }

        rest.push(Step::Text(node.primary.to_string()));
        if let Some(parens) = &node.parens {
            rest.push(Step::Punct("("));
            push_separated(&mut rest, parens, " ");
            rest.push(Step::Punct(")"));
        }
        if let Some(braces) = &node.braces {
            rest.push(Step::Punct(" {"));
            push_separated(&mut rest, braces, "; ");
            rest.push(Step::Punct("}"));
        }
        pending.extend(rest.into_iter().rev());
    }

    text
}

fn push_separated(steps: &mut Vec<Step>, ids: &[NodeId], separator: &'static str) {
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            steps.push(Step::Punct(separator));
        }
        steps.push(Step::Node(*id, 0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::parse_all;

    fn render(source: &str) -> String {
        let ast = parse_all(tokenize(source));
        let mut out = Vec::new();
        let printer = Printer::new(false);
        for root in ast.roots() {
            printer.print_node(&mut out, &ast, *root).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_print_binary() {
        assert_eq!(render("1 + 2 * 3"), "O: +(I: 1, O: *(I: 2, I: 3))\n");
    }

    #[test]
    fn test_group_is_elided() {
        assert_eq!(render("(a)"), "W: a\n");
        assert_eq!(render("-(1 + 2)"), "O: -(O: +(I: 1, I: 2))\n");
    }

    #[test]
    fn test_print_block() {
        assert_eq!(
            render("f(\"s\") { 1; g() { 2 } }"),
            "W: f(S: \"s\") {\n  I: 1\n  W: g() {\n    I: 2\n  }\n}\n"
        );
    }

    #[test]
    fn test_print_tokens() {
        let mut out = Vec::new();
        Printer::new(false)
            .print_tokens(&mut out, &tokenize("x +"))
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Word"));
        assert!(lines[0].ends_with("(1,1)"));
        assert!(lines[1].starts_with("Operator"));
        assert!(lines[1].ends_with("(1,3)"));
    }

    #[test]
    fn test_long_chain_prints_without_recursion() {
        let source = format!("x{}", " + 1".repeat(100_000));
        let ast = parse_all(tokenize(&source));
        let root = ast.roots()[0];

        let text = sexpr(&ast, root);
        assert!(text.starts_with(&"(+ ".repeat(3)));
        assert!(text.ends_with(" 1) 1) 1)"));

        let mut out = Vec::new();
        Printer::new(false).print_node(&mut out, &ast, root).unwrap();
        assert!(out.ends_with(b"I: 1)\n"));
    }

    #[test]
    fn test_sexpr_forms() {
        let ast = parse_all(tokenize("x = f(1, -y) { z }[0]"));
        assert_eq!(sexpr(&ast, ast.roots()[0]), "(= x ([] f(1 (- y)) {z} 0))");
    }
}
