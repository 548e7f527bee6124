//! # Introduction
//!
//! Rotor tokenizes source text for a small expression-oriented language and
//! builds a syntax tree from the token stream. The grammar is flat: operators
//! are chained left to right and precedence is restored by local tree
//! rotations as each operator is appended.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST forest → Function table / Printer
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds an arena-backed
//!    [`parser::ast::Ast`], one root per top-level statement.
//! 2. [`symbols`] — collects `fn(...) { ... }` definitions from the tree.
//! 3. [`printer`] — token tables, indented trees and s-expressions.
//!
//! ## Example
//!
//! ```
//! use rotor::parser::{lexer::tokenize, parse::parse_all};
//! use rotor::printer::sexpr;
//!
//! let ast = parse_all(tokenize("1 + 2 * 3"));
//! assert_eq!(sexpr(&ast, ast.roots()[0]), "(+ 1 (* 2 3))");
//! ```
//!
//! Malformed input never aborts either stage. Problems are logged through the
//! [`log`] facade and kept as [`parser::diagnostic::Diagnostic`]s.

pub mod parser;
pub mod printer;
pub mod symbols;
