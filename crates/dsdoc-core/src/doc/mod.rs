//! Documentation generation for a linked document tree
//!
//! Every generator is a pure function of the [`DocumentTree`]: it writes into
//! the accumulator it is given and keeps no state between calls. The text and
//! Markdown generators produce a tree overview followed by one detail section
//! per record; the JSON generator serializes the tree as nested objects.

mod json;
mod markdown;
mod text;

pub use json::JsonGenerator;
pub use markdown::MarkdownGenerator;
pub use text::TextGenerator;

use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::record::{DocKind, DocumentRecord};
use crate::tree::{DocumentTree, NodeRef};

/// Output format of a generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Format {
    #[default]
    #[serde(rename = "md", alias = "markdown")]
    Markdown,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "json")]
    Json,
}

impl Format {
    /// Render `tree` in this format
    #[must_use]
    pub fn render(self, tree: &DocumentTree) -> String {
        match self {
            Format::Markdown => MarkdownGenerator::generate(tree),
            Format::Text => TextGenerator::generate(tree),
            Format::Json => JsonGenerator::generate(tree),
        }
    }

    /// Conventional file extension for the format
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Format::Markdown => "md",
            Format::Text => "txt",
            Format::Json => "json",
        }
    }
}

/// An output format name that is not recognized
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown output format {0:?}, expected one of: md, text, json")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "md" | "markdown" => Ok(Format::Markdown),
            "text" | "txt" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Markdown => write!(f, "md"),
            Format::Text => write!(f, "text"),
            Format::Json => write!(f, "json"),
        }
    }
}

/// Children of `node` with Actions moved ahead of everything else
///
/// The partition is stable: within each group discovery order is kept.
pub(crate) fn ordered_children<'t>(node: &NodeRef<'t>) -> Vec<NodeRef<'t>> {
    let (mut actions, others): (Vec<_>, Vec<_>) =
        node.children().partition(|child| child.kind == DocKind::Action);
    actions.extend(others);
    actions
}

/// Depth-first walk from the root, each record paired with its depth
pub(crate) fn walk(tree: &DocumentTree) -> Vec<(usize, NodeRef<'_>)> {
    let mut out = Vec::with_capacity(tree.len());
    let mut stack = vec![(0, tree.root())];
    while let Some((depth, node)) = stack.pop() {
        stack.extend(
            ordered_children(&node)
                .into_iter()
                .rev()
                .map(|child| (depth + 1, child)),
        );
        out.push((depth, node));
    }
    out
}

/// Overview indentation for a record at `depth`
pub(crate) fn indent(depth: usize) -> String {
    " |".repeat(depth)
}

/// `@Name(param1, param2)` as shown in overviews
pub(crate) fn signature(record: &DocumentRecord) -> String {
    let params: Vec<&str> = record.param_names().collect();
    format!("@{}({})", record.name, params.join(", "))
}

#[cfg(test)]
pub(crate) fn sample_tree() -> DocumentTree {
    use crate::DocParser;

    let batches: [&[&str]; 5] = [
        &[
            "@Node version",
            "@Parent root",
            "",
            "Version of the link.",
            "",
            "@Value string",
        ],
        &[
            "@Action Add_Device",
            "@Is addDevice",
            "@Parent root",
            "",
            "Adds a device to the link.",
            "",
            "Creates the device node and starts polling it.",
            "",
            "@Param name string Name of the device.",
            "@Param port number Port to poll.",
            "@Return value",
            "@Column success bool True when the device was added.",
        ],
        &[
            "@Node devices",
            "@Parent root",
            "",
            "Holds configured devices.",
        ],
        &[
            "@Node power",
            "@Parent devices",
            "",
            "Power state.",
            "",
            "@Value enum[on,off] write",
        ],
        &["@Action Remove", "@Parent devices", "", "Removes the device."],
    ];

    let mut parser = DocParser::new();
    for (i, batch) in batches.iter().enumerate() {
        parser.parse(batch, &format!("batch{i}.dart")).unwrap();
    }
    parser.finalize().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(nodes: &[(usize, NodeRef<'_>)]) -> Vec<(usize, String)> {
        nodes
            .iter()
            .map(|(depth, node)| (*depth, node.identity_key.clone()))
            .collect()
    }

    #[test]
    fn walk_puts_actions_first_at_each_level() {
        let tree = sample_tree();
        assert_eq!(
            keys(&walk(&tree)),
            [
                (0, "root".to_string()),
                (1, "Add_Device".to_string()),
                (1, "version".to_string()),
                (1, "devices".to_string()),
                (2, "Remove".to_string()),
                (2, "power".to_string()),
            ]
        );
    }

    #[test]
    fn ordered_children_is_stable() {
        let tree = sample_tree();
        let names: Vec<_> = ordered_children(&tree.root())
            .iter()
            .map(|n| n.name.clone())
            .collect();
        assert_eq!(names, ["Add_Device", "version", "devices"]);
    }

    #[test]
    fn signature_lists_param_names() {
        let tree = sample_tree();
        let action = tree.get("Add_Device").unwrap();
        assert_eq!(signature(&action), "@Add_Device(name, port)");
        assert_eq!(indent(2), " | |");
    }

    #[test]
    fn format_names() {
        assert_eq!("md".parse::<Format>().unwrap(), Format::Markdown);
        assert_eq!("markdown".parse::<Format>().unwrap(), Format::Markdown);
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert_eq!(
            "html".parse::<Format>().unwrap_err(),
            UnknownFormat("html".into())
        );
        assert_eq!(Format::Text.to_string(), "text");
        assert_eq!(Format::default().extension(), "md");
    }
}
