//! JSON documentation generator

use std::fmt::{self, Write};

use serde::Serialize;

use crate::record::DocumentRecord;
use crate::tree::{DocumentTree, NodeRef};

/// Generates a JSON document mirroring the tree
///
/// Each record is an object of its fields plus a `children` array in link
/// order.
pub struct JsonGenerator;

#[derive(Serialize)]
struct JsonNode<'t> {
    #[serde(flatten)]
    record: &'t DocumentRecord,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<JsonNode<'t>>,
}

impl<'t> JsonNode<'t> {
    fn build(node: NodeRef<'t>) -> Self {
        Self {
            record: node.record(),
            children: node.children().map(Self::build).collect(),
        }
    }
}

impl JsonGenerator {
    /// Generate pretty-printed JSON as a string
    #[must_use]
    pub fn generate(tree: &DocumentTree) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail
        let _ = Self::write_to(&mut output, tree);
        output
    }

    /// Write pretty-printed JSON into `output`
    pub fn write_to<W: Write>(output: &mut W, tree: &DocumentTree) -> fmt::Result {
        let json = serde_json::to_string_pretty(&JsonNode::build(tree.root())).map_err(|_| fmt::Error)?;
        writeln!(output, "{json}")
    }

    /// The tree as a JSON value
    #[must_use]
    pub fn to_value(tree: &DocumentTree) -> serde_json::Value {
        serde_json::to_value(JsonNode::build(tree.root())).unwrap_or_default()
    }
}
