//! Markdown documentation generator

use std::fmt::{self, Write};

use super::{indent, signature, walk};
use crate::record::{DocKind, DocumentRecord, Parameter};
use crate::tree::{DocumentTree, NodeRef};

/// Generates Markdown documentation from a document tree
pub struct MarkdownGenerator;

impl MarkdownGenerator {
    /// Generate the Markdown document as a string
    #[must_use]
    pub fn generate(tree: &DocumentTree) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail
        let _ = Self::write_to(&mut output, tree);
        output
    }

    /// Write the overview and detail sections into `output`
    pub fn write_to<W: Write>(output: &mut W, tree: &DocumentTree) -> fmt::Result {
        let nodes = walk(tree);

        // Tree overview
        writeln!(output, " <pre>")?;
        for (depth, node) in &nodes {
            Self::write_overview_line(output, *depth, node)?;
        }
        writeln!(output, " </pre>")?;
        writeln!(output)?;
        writeln!(output, "---")?;
        writeln!(output)?;

        for (_, node) in &nodes {
            Self::write_record(output, node)?;
        }
        Ok(())
    }

    /// Heading anchor for a record name
    pub fn anchor(name: &str) -> String {
        name.to_lowercase()
    }

    fn write_overview_line<W: Write>(output: &mut W, depth: usize, node: &NodeRef<'_>) -> fmt::Result {
        let sep = indent(depth);
        let anchor = Self::anchor(&node.name);
        if node.kind == DocKind::Action {
            return writeln!(output, "{sep}-[{}](#{anchor})", signature(node));
        }
        write!(output, "{sep}-[{}](#{anchor})", node.name)?;
        if let Some(ty) = &node.value_type {
            write!(output, " - {ty}")?;
        }
        writeln!(output)
    }

    fn write_record<W: Write>(output: &mut W, node: &NodeRef<'_>) -> fmt::Result {
        let record: &DocumentRecord = node;

        // Trailing double spaces are Markdown line breaks
        writeln!(output, "### {}  ", record.name)?;
        writeln!(output)?;
        writeln!(output, "{}  ", record.short)?;
        writeln!(output)?;
        writeln!(output, "Type: {}  ", record.kind)?;
        if let Some(alias) = &record.alias {
            writeln!(output, "$is: {alias}  ")?;
        }
        if let Some(parent) = node.parent() {
            writeln!(output, "Parent: [{}](#{})  ", parent.name, Self::anchor(&parent.name))?;
        }
        if !record.long.is_empty() {
            writeln!(output)?;
            writeln!(output, "Description:  ")?;
            writeln!(output, "{}  ", record.long)?;
            writeln!(output)?;
        }

        if record.kind == DocKind::Action {
            if !record.params.is_empty() {
                writeln!(output, "Params:  ")?;
                writeln!(output)?;
                Self::write_table(output, &record.params)?;
                writeln!(output)?;
            }
            match &record.return_type {
                Some(ty) => writeln!(output, "Return type: {ty}  ")?,
                None => writeln!(output, "Return type:  ")?,
            }
            if !record.columns.is_empty() {
                writeln!(output, "Columns:  ")?;
                writeln!(output)?;
                Self::write_table(output, &record.columns)?;
            }
        }

        if let Some(ty) = &record.value_type {
            writeln!(output, "Value Type: `{ty}`  ")?;
            writeln!(output, "Writable: `{}`  ", record.writable_or_default())?;
        }

        writeln!(output)?;
        writeln!(output, "---")?;
        writeln!(output)
    }

    fn write_table<W: Write>(output: &mut W, params: &[Parameter]) -> fmt::Result {
        writeln!(output, "Name | Type | Description")?;
        writeln!(output, "--- | --- | ---")?;
        for param in params {
            writeln!(
                output,
                "{} | `{}` | {}",
                param.name,
                escape_cell(&param.ty),
                escape_cell(&param.description)
            )?;
        }
        Ok(())
    }
}

/// Pipes would otherwise split a table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
