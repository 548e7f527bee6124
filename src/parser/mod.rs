//! Expression-language front end
//!
//! This module transforms source text into an arena-backed syntax tree:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → [`ast::Ast`]), with [`expressions`] and
//!   [`statements`] extending the [`parse::Parser`]
//! - [`precedence`]: the operator ranking used to repair operator chains
//! - [`ast`]: tree node definitions
//! - [`diagnostic`]: located warnings and errors shared by both stages
//!
//! # Parser Implementation
//!
//! Hand-written recursive parser. Operators are chained left to right and the
//! tree is fixed up by local rotations as each operator is appended, instead of
//! encoding precedence levels in the grammar.
//! No external parser generator dependencies.

pub mod ast;
pub mod diagnostic;
pub mod expressions;
pub mod lexer;
pub mod parse;
pub mod precedence;
pub mod statements;
