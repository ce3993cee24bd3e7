//! Lexer for DsDoc annotation batches
//!
//! A batch is the ordered list of comment lines making up one record, with
//! the comment prefix already stripped. The lexer walks it with a
//! `(line, byte offset)` cursor and hands out tokens lazily in one of three
//! modes chosen by the parser:
//! - [`Lexer::next_token`]: keywords, identifiers, `@`, whitespace and line structure
//! - [`Lexer::next_type_identifier`]: the laxer type names used by `@Param`, `@Column` and `@Value`
//! - [`Lexer::next_text`]: free text runs, joining wrapped lines
//!
//! The lexer never fails. Characters no rule accepts come back as
//! [`TokenKind::Illegal`] tokens for the parser to reject.

mod span;
mod token;

pub use span::Position;
pub use token::TokenKind;

use logos::Logos;

/// A token with its kind, position and source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// Where the token starts, relative to the batch
    pub position: Position,
    /// The source text of the token
    pub lexeme: String,
}

impl Token {
    /// Create a new token
    #[must_use]
    pub fn new(kind: TokenKind, position: Position, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            lexeme: lexeme.into(),
        }
    }
}

/// The next scalar unit of input, as seen by [`Lexer::peek`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rune {
    /// A character on the current line
    Char(char),
    /// The end of the current line, with more lines to follow
    Eol,
    /// The end of the batch
    Eof,
}

/// Characters accepted inside a type name besides letters, digits and `_`
const TYPE_PUNCTUATION: &[char] = &[
    '[', ']', '(', ')', '{', '}', '<', '>', ',', '.', ':', '|', '?', '*', '-',
];

fn is_ws(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_type_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || TYPE_PUNCTUATION.contains(&c)
}

/// The DsDoc lexer
pub struct Lexer<'src, S: AsRef<str>> {
    lines: &'src [S],
    /// Index of the current line
    line: usize,
    /// Byte offset into the current line
    offset: usize,
}

impl<'src, S: AsRef<str>> Lexer<'src, S> {
    /// Create a new lexer over the lines of one batch
    #[must_use]
    pub fn new(lines: &'src [S]) -> Self {
        Self {
            lines,
            line: 0,
            offset: 0,
        }
    }

    /// Tokenize a whole batch in `next_token` mode, up to and including `Eof`
    #[must_use]
    pub fn tokenize(lines: &'src [S]) -> Vec<Token> {
        let mut lexer = Self::new(lines);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                return tokens;
            }
        }
    }

    /// Current cursor position, relative to the batch
    #[must_use]
    pub fn position(&self) -> Position {
        let text = self.lines.get(self.line).map_or("", |l| l.as_ref());
        Position::from_cursor(self.line, text, self.offset)
    }

    /// Text of the current line that has not been consumed yet
    fn rest(&self) -> &'src str {
        self.lines
            .get(self.line)
            .map_or("", |l| l.as_ref().get(self.offset..).unwrap_or(""))
    }

    /// Returns the next rune without consuming it
    #[must_use]
    pub fn peek(&self) -> Rune {
        if self.line >= self.lines.len() {
            return Rune::Eof;
        }
        match self.rest().chars().next() {
            Some(c) => Rune::Char(c),
            None if self.line + 1 < self.lines.len() => Rune::Eol,
            None => Rune::Eof,
        }
    }

    /// The rune that follows the end of the current line
    fn peek_after_eol(&self) -> Rune {
        let next = self.line + 1;
        match self.lines.get(next).and_then(|l| l.as_ref().chars().next()) {
            Some(c) => Rune::Char(c),
            None if next + 1 < self.lines.len() => Rune::Eol,
            None => Rune::Eof,
        }
    }

    /// Consume and return the next rune
    fn bump(&mut self) -> Rune {
        let rune = self.peek();
        match rune {
            Rune::Char(c) => self.offset += c.len_utf8(),
            Rune::Eol => {
                self.line += 1;
                self.offset = 0;
            }
            Rune::Eof => {
                self.line = self.lines.len();
                self.offset = 0;
            }
        }
        rune
    }

    /// Skip spaces and tabs on the current line
    fn skip_ws(&mut self) {
        while let Rune::Char(c) = self.peek() {
            if !is_ws(c) {
                break;
            }
            self.bump();
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Token {
        let position = self.position();
        match self.peek() {
            Rune::Eof => {
                self.bump();
                Token::new(TokenKind::Eof, position, "")
            }
            Rune::Eol => {
                self.bump();
                Token::new(TokenKind::Eol, position, "")
            }
            Rune::Char(_) => self.lex_rule(position),
        }
    }

    /// Classify the rest of the current line using logos
    fn lex_rule(&mut self, position: Position) -> Token {
        let remaining = self.rest();
        let mut logos_lexer = TokenKind::lexer(remaining);

        match logos_lexer.next() {
            Some(Ok(kind)) => {
                let lexeme = logos_lexer.slice();
                self.offset += logos_lexer.span().end;
                Token::new(kind, position, lexeme)
            }
            Some(Err(())) | None => {
                // Hand back exactly one character so multi-byte input stays intact
                let illegal = remaining.chars().next().unwrap_or('\u{FFFD}');
                self.offset += illegal.len_utf8();
                Token::new(TokenKind::Illegal, position, illegal.to_string())
            }
        }
    }

    /// Get the next type name, skipping leading whitespace
    ///
    /// Type names accept identifier characters plus the punctuation used by
    /// compound types such as `enum[on,off]` or `map<string,int>`. If no type
    /// character follows, the token found there is returned instead.
    pub fn next_type_identifier(&mut self) -> Token {
        self.skip_ws();
        let position = self.position();
        let remaining = self.rest();
        let len: usize = remaining
            .chars()
            .take_while(|&c| is_type_char(c))
            .map(char::len_utf8)
            .sum();

        if len == 0 {
            return self.next_token();
        }
        self.offset += len;
        Token::new(TokenKind::TypeIdent, position, &remaining[..len])
    }

    /// Get the next free text run
    ///
    /// Leading whitespace is skipped. The run ends at the end of the batch or
    /// at a line end followed by a blank line, by a line starting with `@`,
    /// or by the end of the batch. The terminating line end is left
    /// unconsumed. Interior line ends become a single space.
    pub fn next_text(&mut self) -> Token {
        self.skip_ws();
        let position = self.position();
        let mut text = String::new();

        loop {
            match self.peek() {
                Rune::Eof => break,
                Rune::Eol => {
                    if matches!(
                        self.peek_after_eol(),
                        Rune::Eof | Rune::Eol | Rune::Char('@')
                    ) {
                        break;
                    }
                    self.bump();
                    self.skip_ws();
                    text.push(' ');
                }
                Rune::Char(c) => {
                    self.bump();
                    text.push(c);
                }
            }
        }

        Token::new(TokenKind::Text, position, text.trim())
    }
}
