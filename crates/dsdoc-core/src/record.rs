//! Document records produced by the parser

use serde::Serialize;

/// Identity key of the synthetic root record
pub const ROOT_KEY: &str = "root";

/// The top-level category of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DocKind {
    /// The link itself
    Link,
    /// A structural or container node
    Node,
    /// A callable action
    Action,
}

impl DocKind {
    /// Get the display name for the record kind
    pub fn display_name(&self) -> &'static str {
        match self {
            DocKind::Link => "Link",
            DocKind::Node => "Node",
            DocKind::Action => "Action",
        }
    }
}

impl std::fmt::Display for DocKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// An action parameter or return column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
}

impl Parameter {
    /// Create a new parameter
    pub fn new(name: impl Into<String>, ty: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            description: description.into(),
        }
    }
}

/// One parsed documentation record
///
/// Records are parsed from a single batch and registered under their
/// `identity_key`. Parent and child edges live in the
/// [`DocumentTree`](crate::DocumentTree), not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    pub kind: DocKind,
    /// Display name
    pub name: String,
    /// Key used for registration and parent references
    pub identity_key: String,
    /// Implementation marker from `@Is`
    #[serde(rename = "is", skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Identity of the parent record; `None` only for the root
    #[serde(rename = "parent", skip_serializing_if = "Option::is_none")]
    pub parent_key: Option<String>,
    /// First text run
    pub short: String,
    /// All later text runs, joined by single spaces
    #[serde(skip_serializing_if = "String::is_empty")]
    pub long: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Parameter>,
    #[serde(rename = "return", skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    /// Write permission of a value node, from the second `@Value` token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writable: Option<String>,
    /// Name of the file (or other origin) the record was parsed from
    #[serde(skip)]
    pub origin: String,
}

impl DocumentRecord {
    /// Create an empty record of the given kind
    pub fn new(kind: DocKind) -> Self {
        Self {
            kind,
            name: String::new(),
            identity_key: String::new(),
            alias: None,
            parent_key: None,
            short: String::new(),
            long: String::new(),
            params: Vec::new(),
            return_type: None,
            columns: Vec::new(),
            value_type: None,
            writable: None,
            origin: String::new(),
        }
    }

    /// The synthetic root every tree hangs from
    pub fn root() -> Self {
        Self {
            name: ROOT_KEY.to_string(),
            identity_key: ROOT_KEY.to_string(),
            short: "Root node of the DsLink".to_string(),
            ..Self::new(DocKind::Node)
        }
    }

    /// Returns true for the synthetic root record
    pub fn is_root(&self) -> bool {
        self.parent_key.is_none() && self.identity_key == ROOT_KEY
    }

    /// Returns true if the record also documents a readable value
    pub fn is_value(&self) -> bool {
        self.value_type.is_some()
    }

    /// Write permission to display for a value node
    pub fn writable_or_default(&self) -> &str {
        self.writable.as_deref().unwrap_or("never")
    }

    /// Add a free text run: the first becomes `short`, later ones extend `long`
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.short.is_empty() {
            self.short = text.to_string();
        } else if self.long.is_empty() {
            self.long = text.to_string();
        } else {
            self.long.push(' ');
            self.long.push_str(text);
        }
    }

    /// Names of the action's parameters, in declaration order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }
}
