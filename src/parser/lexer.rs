//! Lexer (tokenizer) for the expression language
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Whitespace and comments (`// ...` and nestable `/* ... */`) produce no
//! tokens. Characters outside every recognized class are reported as warnings
//! and skipped; the lexer itself never fails.

use super::ast::SourceLocation;
use super::diagnostic::Diagnostic;
use log::Level;
use std::fmt;

/// Characters that may appear in an operator run.
pub const OPERATOR_CHARS: &[char] = &[
    '+', '-', '*', '/', '%', '=', '<', '>', '!', '&', '|', '^', '~', '.', ':', '?',
];

/// Token classes produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    LBrace,    // {
    RBrace,    // }
    Comma,     // ,
    Semicolon, // ;

    Word,
    Integer,
    String,
    Operator,
}

impl TokenKind {
    /// Punctuation kind for a single character, if it is one.
    pub fn punctuation(ch: char) -> Option<TokenKind> {
        match ch {
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            '[' => Some(TokenKind::LBracket),
            ']' => Some(TokenKind::RBracket),
            '{' => Some(TokenKind::LBrace),
            '}' => Some(TokenKind::RBrace),
            ',' => Some(TokenKind::Comma),
            ';' => Some(TokenKind::Semicolon),
            _ => None,
        }
    }

    pub fn is_punctuation(self) -> bool {
        !matches!(
            self,
            TokenKind::Word | TokenKind::Integer | TokenKind::String | TokenKind::Operator
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::LParen => "ParenL",
            TokenKind::RParen => "ParenR",
            TokenKind::LBracket => "BracketL",
            TokenKind::RBracket => "BracketR",
            TokenKind::LBrace => "BraceL",
            TokenKind::RBrace => "BraceR",
            TokenKind::Comma => "Comma",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::Word => "Word",
            TokenKind::Integer => "Integer",
            TokenKind::String => "String",
            TokenKind::Operator => "Operator",
        };
        f.write_str(name)
    }
}

/// A classified, located lexical unit.
///
/// `text` holds the identifier, the digits, the operator run, the string
/// contents without quotes, or the punctuation character itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Token {
            kind,
            text: text.into(),
            location,
        }
    }

    /// The token as it was spelled in the source.
    pub fn source_text(&self) -> String {
        match self.kind {
            TokenKind::String => format!("\"{}\"", self.text),
            _ => self.text.clone(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Word => write!(f, "identifier '{}'", self.text),
            TokenKind::Integer => write!(f, "integer literal {}", self.text),
            TokenKind::String => write!(f, "string literal \"{}\"", self.text),
            TokenKind::Operator => write!(f, "operator '{}'", self.text),
            _ => write!(f, "'{}'", self.text),
        }
    }
}

pub fn is_word_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

pub fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

pub fn is_operator_char(ch: char) -> bool {
    OPERATOR_CHARS.contains(&ch)
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

/// Tokenize `text`, discarding diagnostics (they are still logged).
pub fn tokenize(text: &str) -> Vec<Token> {
    Lexer::new(text).tokenize()
}

/// Lexer for expression-language source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    offset: usize,
    line: usize,
    column: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        let start = SourceLocation::start();
        Self {
            input: input.chars().collect(),
            position: 0,
            offset: start.offset,
            line: start.line,
            column: start.column,
            diagnostics: Vec::new(),
        }
    }

    /// Warnings collected while tokenizing.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            let loc = self.current_location();

            if let Some(kind) = TokenKind::punctuation(ch) {
                self.advance();
                tokens.push(Token::new(kind, ch.to_string(), loc));
                continue;
            }

            match ch {
                c if is_word_start(c) => tokens.push(self.word()),
                c if c.is_ascii_digit() => tokens.push(self.integer()),
                '"' => tokens.push(self.string_literal()),
                '/' if self.peek_ahead(1) == Some('/') => self.skip_line_comment(),
                '/' if self.peek_ahead(1) == Some('*') => self.skip_block_comment(),
                c if is_whitespace(c) => {
                    self.advance();
                }
                c if is_operator_char(c) => tokens.push(self.operator()),
                c => {
                    self.warn(format!("Skipping unrecognized character {:?}", c), loc);
                    self.advance();
                }
            }
        }

        log::debug!("tokenized {} characters into {} tokens", self.position, tokens.len());
        tokens
    }

    /// Maximal run of identifier characters
    fn word(&mut self) -> Token {
        let loc = self.current_location();
        let text = self.take_while(is_word_char);
        Token::new(TokenKind::Word, text, loc)
    }

    /// Maximal run of digits; the value is parsed later by the parser
    fn integer(&mut self) -> Token {
        let loc = self.current_location();
        let text = self.take_while(|c| c.is_ascii_digit());
        Token::new(TokenKind::Integer, text, loc)
    }

    /// Everything up to the next `"`; no escape processing
    fn string_literal(&mut self) -> Token {
        let loc = self.current_location();
        self.advance(); // opening quote
        let text = self.take_while(|c| c != '"');

        if self.advance().is_none() {
            self.warn("Unterminated string literal", loc);
        }

        Token::new(TokenKind::String, text, loc)
    }

    /// Maximal run of operator characters, stopping short of a comment opener
    fn operator(&mut self) -> Token {
        let loc = self.current_location();
        let mut text = String::new();

        while let Some(ch) = self.peek() {
            if !is_operator_char(ch) || self.at_comment_start() {
                break;
            }
            text.push(ch);
            self.advance();
        }

        Token::new(TokenKind::Operator, text, loc)
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.advance() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip a nestable block comment (/* ... /* ... */ ... */)
    fn skip_block_comment(&mut self) {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'
        let mut depth = 1usize;

        while !self.is_at_end() {
            if self.peek() == Some('/') && self.peek_ahead(1) == Some('*') {
                self.advance();
                self.advance();
                depth += 1;
            } else if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                depth -= 1;
                if depth == 0 {
                    return;
                }
            } else {
                self.advance();
            }
        }

        self.warn(
            format!("Unterminated block comment ({} level(s) still open)", depth),
            start_loc,
        );
    }

    fn at_comment_start(&self) -> bool {
        self.peek() == Some('/') && matches!(self.peek_ahead(1), Some('/') | Some('*'))
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            text.push(ch);
            self.advance();
        }
        text
    }

    fn warn(&mut self, message: impl Into<String>, location: SourceLocation) {
        self.diagnostics
            .push(Diagnostic::report(Level::Warn, message, location));
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        self.offset += ch.len_utf8();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.offset, self.line, self.column)
    }
}
