//! Parser error types for DsDoc records

use crate::lexer::{Position, TokenKind};
use thiserror::Error;

/// A syntax error with location information
///
/// The record being parsed is discarded; nothing is registered for the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// The kind of error
    pub kind: ParseErrorKind,
    /// Name of the file (or other origin) of the batch
    pub origin: String,
    /// Where the error occurred
    pub position: Position,
    /// Optional hint for fixing the error
    pub hint: Option<String>,
}

impl ParseError {
    /// Create a new parse error
    #[must_use]
    pub fn new(kind: ParseErrorKind, origin: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            origin: origin.into(),
            position,
            hint: None,
        }
    }

    /// Add a hint to this error
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.origin, self.position, self.kind)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// The kind of parse error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("illegal character {0:?}")]
    IllegalCharacter(char),

    #[error("found {found:?}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: ExpectedToken,
    },

    #[error("record ended early, expected {expected}")]
    UnexpectedEof { expected: ExpectedToken },

    #[error("@{attribute} is only allowed on Action records, not {kind}")]
    ActionOnly {
        attribute: TokenKind,
        kind: crate::DocKind,
    },

    #[error("missing required name: give one after the record kind or with @MetaType")]
    MissingName,

    #[error("missing required @Parent field")]
    MissingParent,
}

/// What token was expected
#[derive(Debug, Clone, PartialEq)]
pub enum ExpectedToken {
    /// A specific token kind
    Token(TokenKind),
    /// One of several possible tokens
    OneOf(Vec<TokenKind>),
    /// A description of what was expected
    Description(&'static str),
}

impl std::fmt::Display for ExpectedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpectedToken::Token(kind) => write!(f, "{kind}"),
            ExpectedToken::OneOf(kinds) => {
                let names: Vec<String> = kinds.iter().map(|k| format!("{k}")).collect();
                write!(f, "one of: {}", names.join(", "))
            }
            ExpectedToken::Description(desc) => write!(f, "{desc}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_source_and_position() {
        let err = ParseError::new(
            ParseErrorKind::UnexpectedToken {
                found: "Foo".into(),
                expected: ExpectedToken::OneOf(vec![TokenKind::Action, TokenKind::Node]),
            },
            "device.dart",
            Position::new(12, 2),
        );
        assert_eq!(
            err.to_string(),
            "device.dart:12:2: found \"Foo\", expected one of: Action, Node"
        );
    }

    #[test]
    fn display_appends_hint() {
        let err = ParseError::new(ParseErrorKind::MissingParent, "a.go", Position::new(1, 1))
            .with_hint("top-level records use `@Parent root`");
        assert!(err.to_string().ends_with("(hint: top-level records use `@Parent root`)"));
    }
}
