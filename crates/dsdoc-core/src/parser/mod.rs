//! Parser for DsDoc annotation batches
//!
//! [`RecordParser`] turns the tokens of one batch into a [`DocumentRecord`].
//! [`DocParser`] is a parse session: it feeds batches through the record
//! parser in order, registers every record, and links the finished tree.
//!
//! # Example
//!
//! ```
//! use dsdoc_core::DocParser;
//!
//! let mut parser = DocParser::new();
//! parser
//!     .parse(&["@Node version", "@Parent root", "", "Link version", "", "@Value string"], "main.dart")
//!     .unwrap();
//! let tree = parser.finalize().unwrap();
//! assert_eq!(tree.root().children().count(), 1);
//! ```

mod error;

pub use error::{ExpectedToken, ParseError, ParseErrorKind};

use crate::extract::Batch;
use crate::lexer::{Lexer, Position, Rune, Token, TokenKind};
use crate::record::{DocKind, DocumentRecord, Parameter};
use crate::registry::{LinkError, Registry};
use crate::tree::DocumentTree;
use crate::Error;

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

const RECORD_KINDS: [TokenKind; 3] = [TokenKind::Action, TokenKind::Node, TokenKind::Link];

const ATTRIBUTES: [TokenKind; 7] = [
    TokenKind::MetaType,
    TokenKind::Is,
    TokenKind::Parent,
    TokenKind::Param,
    TokenKind::Return,
    TokenKind::Column,
    TokenKind::Value,
];

/// Parses the tokens of a single batch into one record
pub struct RecordParser<'src, S: AsRef<str>> {
    lexer: Lexer<'src, S>,
    /// One token of push-back
    pending: Option<Token>,
    source: &'src str,
    /// Lines preceding the batch in its source file
    line_offset: u32,
}

impl<'src, S: AsRef<str>> RecordParser<'src, S> {
    /// Create a parser for one batch. `first_line` is the 1-based line of
    /// the batch in its source, used for error positions.
    #[must_use]
    pub fn new(lines: &'src [S], source: &'src str, first_line: u32) -> Self {
        Self {
            lexer: Lexer::new(lines),
            pending: None,
            source,
            line_offset: first_line.saturating_sub(1),
        }
    }

    /// Parse a batch into a record without registering it
    pub fn parse_record(lines: &'src [S], source: &'src str) -> ParseResult<DocumentRecord> {
        Self::new(lines, source, 1).record()
    }

    // ==================== Token Management ====================

    fn scan(&mut self) -> Token {
        match self.pending.take() {
            Some(token) => token,
            None => self.lexer.next_token(),
        }
    }

    fn unscan(&mut self, token: Token) {
        debug_assert!(self.pending.is_none(), "only one token of push-back");
        self.pending = Some(token);
    }

    fn scan_ignore_ws(&mut self) -> Token {
        let token = self.scan();
        if token.kind == TokenKind::Whitespace {
            self.scan()
        } else {
            token
        }
    }

    /// Consume a single end of line if one is next
    fn skip_eol(&mut self) {
        let token = self.scan();
        if token.kind != TokenKind::Eol {
            self.unscan(token);
        }
    }

    /// Lexer access for the text and type modes, which bypass push-back
    fn raw_lexer(&mut self) -> &mut Lexer<'src, S> {
        debug_assert!(self.pending.is_none(), "mode switch with a pushed-back token");
        &mut self.lexer
    }

    // ==================== Errors ====================

    fn error_at(&self, kind: ParseErrorKind, position: Position) -> ParseError {
        ParseError::new(kind, self.source, position.offset_lines(self.line_offset))
    }

    fn unexpected(&self, token: &Token, expected: ExpectedToken) -> ParseError {
        let kind = match token.kind {
            TokenKind::Illegal => {
                ParseErrorKind::IllegalCharacter(token.lexeme.chars().next().unwrap_or('\u{FFFD}'))
            }
            TokenKind::Eof => ParseErrorKind::UnexpectedEof { expected },
            TokenKind::Eol => ParseErrorKind::UnexpectedToken {
                found: "end of line".to_string(),
                expected,
            },
            _ => ParseErrorKind::UnexpectedToken {
                found: token.lexeme.clone(),
                expected,
            },
        };
        let err = self.error_at(kind, token.position);
        if token.kind.is_keyword() {
            err.with_hint(format!("`{}` is a reserved word", token.lexeme))
        } else {
            err
        }
    }

    fn expect_ident(&mut self) -> ParseResult<String> {
        let token = self.scan_ignore_ws();
        if token.kind == TokenKind::Ident {
            Ok(token.lexeme)
        } else {
            Err(self.unexpected(&token, ExpectedToken::Token(TokenKind::Ident)))
        }
    }

    fn expect_type(&mut self) -> ParseResult<String> {
        let token = self.raw_lexer().next_type_identifier();
        if token.kind == TokenKind::TypeIdent {
            Ok(token.lexeme)
        } else {
            Err(self.unexpected(&token, ExpectedToken::Token(TokenKind::TypeIdent)))
        }
    }

    // ==================== Grammar ====================

    /// Parse the whole batch
    pub fn record(&mut self) -> ParseResult<DocumentRecord> {
        let start = self.lexer.position();

        let token = self.scan();
        if token.kind != TokenKind::Attr {
            return Err(self.unexpected(&token, ExpectedToken::Token(TokenKind::Attr)));
        }

        let token = self.scan();
        let kind = match token.kind {
            TokenKind::Action => DocKind::Action,
            TokenKind::Node => DocKind::Node,
            TokenKind::Link => DocKind::Link,
            _ => return Err(self.unexpected(&token, ExpectedToken::OneOf(RECORD_KINDS.to_vec()))),
        };

        let mut record = DocumentRecord::new(kind);
        record.origin = self.source.to_string();

        let token = self.scan_ignore_ws();
        match token.kind {
            TokenKind::Ident => {
                record.name.clone_from(&token.lexeme);
                record.identity_key = token.lexeme;
            }
            // Leave the line end for the body so a description may follow a blank line
            TokenKind::Eol => self.unscan(token),
            _ => {
                return Err(self.unexpected(
                    &token,
                    ExpectedToken::OneOf(vec![TokenKind::Ident, TokenKind::Eol]),
                ))
            }
        }

        self.body(&mut record)?;

        if record.name.is_empty() {
            return Err(self.error_at(ParseErrorKind::MissingName, start));
        }
        if record.parent_key.is_none() {
            return Err(self
                .error_at(ParseErrorKind::MissingParent, start)
                .with_hint("top-level records use `@Parent root`"));
        }
        Ok(record)
    }

    /// Attributes and description runs up to the end of the batch
    fn body(&mut self, record: &mut DocumentRecord) -> ParseResult<()> {
        loop {
            self.skip_eol();
            let token = self.scan();
            match token.kind {
                TokenKind::Eof => return Ok(()),
                TokenKind::Whitespace => {}
                TokenKind::Eol => {
                    if self.lexer.peek() != Rune::Char('@') {
                        let text = self.raw_lexer().next_text();
                        record.push_text(&text.lexeme);
                    }
                }
                TokenKind::Attr => self.attribute(record)?,
                _ => {
                    return Err(self.unexpected(
                        &token,
                        ExpectedToken::Description("an attribute or a blank line before text"),
                    ))
                }
            }
        }
    }

    /// Dispatch on the keyword following an `@`
    fn attribute(&mut self, record: &mut DocumentRecord) -> ParseResult<()> {
        let token = self.scan();
        if matches!(token.kind, TokenKind::Param | TokenKind::Return | TokenKind::Column)
            && record.kind != DocKind::Action
        {
            return Err(self.error_at(
                ParseErrorKind::ActionOnly {
                    attribute: token.kind,
                    kind: record.kind,
                },
                token.position,
            ));
        }

        match token.kind {
            TokenKind::MetaType => {
                let key = self.expect_ident()?;
                if record.name.is_empty() {
                    record.name.clone_from(&key);
                }
                record.identity_key = key;
            }
            TokenKind::Is => record.alias = Some(self.expect_ident()?),
            TokenKind::Parent => record.parent_key = Some(self.expect_ident()?),
            TokenKind::Param => {
                let param = self.parameter()?;
                record.params.push(param);
            }
            TokenKind::Return => record.return_type = Some(self.expect_ident()?),
            TokenKind::Column => {
                let column = self.parameter()?;
                record.columns.push(column);
            }
            TokenKind::Value => {
                record.value_type = Some(self.expect_type()?);
                record.writable = self.value_permission()?;
            }
            _ => return Err(self.unexpected(&token, ExpectedToken::OneOf(ATTRIBUTES.to_vec()))),
        }
        Ok(())
    }

    /// `<name> <type> <description...>`
    fn parameter(&mut self) -> ParseResult<Parameter> {
        let name = self.expect_ident()?;
        let ty = self.expect_type()?;
        let description = self.raw_lexer().next_text();
        Ok(Parameter::new(name, ty, description.lexeme))
    }

    /// Optional permission after a value type on the same line
    fn value_permission(&mut self) -> ParseResult<Option<String>> {
        if !matches!(self.lexer.peek(), Rune::Char(' ' | '\t')) {
            return Ok(None);
        }
        let token = self.scan_ignore_ws();
        match token.kind {
            TokenKind::Ident => Ok(Some(token.lexeme)),
            TokenKind::Eol | TokenKind::Eof => {
                self.unscan(token);
                Ok(None)
            }
            _ => Err(self.unexpected(&token, ExpectedToken::Description("a write permission"))),
        }
    }
}

/// A parse session over any number of batches
///
/// Batches must be fed in input order: duplicate detection and eager parent
/// resolution both depend on what has been registered so far.
#[derive(Debug, Default)]
pub struct DocParser {
    registry: Registry,
}

impl DocParser {
    /// Create a session whose registry holds only the root
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one batch of lines and register the resulting record
    pub fn parse<S: AsRef<str>>(&mut self, lines: &[S], source: &str) -> Result<(), Error> {
        self.parse_at(lines, source, 1)
    }

    /// Parse an extracted batch, reporting errors at file positions
    pub fn parse_batch(&mut self, batch: &Batch) -> Result<(), Error> {
        self.parse_at(&batch.lines, &batch.source, batch.start_line)
    }

    fn parse_at<S: AsRef<str>>(&mut self, lines: &[S], source: &str, first_line: u32) -> Result<(), Error> {
        let record = RecordParser::new(lines, source, first_line).record()?;
        self.registry.insert(record)?;
        Ok(())
    }

    /// The records registered so far
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolve the remaining parent references and return the tree
    pub fn finalize(self) -> Result<DocumentTree, LinkError> {
        self.registry.finalize()
    }
}
