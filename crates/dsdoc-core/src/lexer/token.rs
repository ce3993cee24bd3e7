//! Token types for the DsDoc lexer

use logos::Logos;

/// The kind of token produced by the lexer
///
/// Only the variants carrying a `logos` attribute are produced by the
/// generated scanner. The remaining ones are synthesized by the
/// [`Lexer`](super::Lexer) for line structure, free text and type names.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Reserved words ==========
    #[token("Action")]
    Action,
    #[token("Node")]
    Node,
    #[token("Link")]
    Link,
    #[token("MetaType")]
    MetaType,
    #[token("Is")]
    Is,
    #[token("Parent")]
    Parent,
    #[token("Param")]
    Param,
    #[token("Return")]
    Return,
    #[token("Column")]
    Column,
    #[token("Value")]
    Value,

    // ========== Structure ==========
    /// The attribute marker `@`
    #[token("@")]
    Attr,

    /// A run of spaces and tabs
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Identifier such as a display name, meta type or parameter name
    #[regex(r"[A-Za-z0-9_]+")]
    Ident,

    /// Parameter, column or value type name (scanned by the lexer's type mode)
    TypeIdent,

    /// A run of free text, wrapped lines joined by single spaces
    Text,

    /// End of a line inside the batch
    Eol,

    /// End of the batch
    Eof,

    /// A character that no rule accepts
    Illegal,
}

impl TokenKind {
    /// Returns true if this token is a reserved word
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::Action
                | Self::Node
                | Self::Link
                | Self::MetaType
                | Self::Is
                | Self::Parent
                | Self::Param
                | Self::Return
                | Self::Column
                | Self::Value
        )
    }

    /// Returns true if this token may open a record (`@Action`, `@Node`, `@Link`)
    #[must_use]
    pub const fn is_record_kind(&self) -> bool {
        matches!(self, Self::Action | Self::Node | Self::Link)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Action => write!(f, "Action"),
            Self::Node => write!(f, "Node"),
            Self::Link => write!(f, "Link"),
            Self::MetaType => write!(f, "MetaType"),
            Self::Is => write!(f, "Is"),
            Self::Parent => write!(f, "Parent"),
            Self::Param => write!(f, "Param"),
            Self::Return => write!(f, "Return"),
            Self::Column => write!(f, "Column"),
            Self::Value => write!(f, "Value"),
            Self::Attr => write!(f, "@"),
            Self::Whitespace => write!(f, "whitespace"),
            Self::Ident => write!(f, "identifier"),
            Self::TypeIdent => write!(f, "type name"),
            Self::Text => write!(f, "text"),
            Self::Eol => write!(f, "end of line"),
            Self::Eof => write!(f, "end of input"),
            Self::Illegal => write!(f, "illegal character"),
        }
    }
}
