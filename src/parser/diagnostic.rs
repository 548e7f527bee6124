//! Diagnostics shared by the lexer and the parser
//!
//! Neither stage stops on malformed input. Every problem becomes a
//! [`Diagnostic`], which is forwarded to the [`log`] facade at the moment it is
//! found and also kept on the lexer/parser so callers can inspect it afterwards.

use super::ast::SourceLocation;
use log::Level;
use std::fmt;

/// A located, leveled message about the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub location: SourceLocation,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>, location: SourceLocation) -> Self {
        Diagnostic {
            level,
            message: message.into(),
            location,
        }
    }

    /// Build the diagnostic and emit it through `log` at its own level.
    pub fn report(level: Level, message: impl Into<String>, location: SourceLocation) -> Self {
        let diagnostic = Diagnostic::new(level, message, location);
        log::log!(level, "{}", diagnostic);
        diagnostic
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.location)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_has_row_column_suffix() {
        let d = Diagnostic::new(
            Level::Error,
            "Expected ')'",
            SourceLocation::new(12, 3, 7),
        );
        assert_eq!(d.to_string(), "Expected ')' at 3, 7");
        assert!(d.is_error());
    }

    #[test]
    fn test_warning_is_not_error() {
        let d = Diagnostic::new(Level::Warn, "skipped", SourceLocation::start());
        assert!(!d.is_error());
    }
}
