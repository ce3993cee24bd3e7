//! Plain text documentation generator

use std::fmt::{self, Write};

use super::{indent, signature, walk};
use crate::record::{DocKind, DocumentRecord, Parameter};
use crate::tree::{DocumentTree, NodeRef};

/// Generates plain text documentation from a document tree
pub struct TextGenerator;

impl TextGenerator {
    /// Generate the overview and detail sections as a string
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

        for (depth, node) in &nodes {
            Self::write_overview_line(output, *depth, node)?;
        }
        writeln!(output)?;
        writeln!(output, "---")?;
        writeln!(output)?;

        for (_, node) in &nodes {
            Self::write_record(output, node)?;
        }
        Ok(())
    }

    fn write_overview_line<W: Write>(output: &mut W, depth: usize, node: &NodeRef<'_>) -> fmt::Result {
        let sep = indent(depth);
        if node.kind == DocKind::Action {
            return writeln!(output, "{sep}- {}", signature(node));
        }
        write!(output, "{sep}- {}", node.name)?;
        if let Some(ty) = &node.value_type {
            write!(output, " *{ty} ({})*", node.writable_or_default())?;
        }
        writeln!(output)
    }

    fn write_record<W: Write>(output: &mut W, node: &NodeRef<'_>) -> fmt::Result {
        let record: &DocumentRecord = node;

        writeln!(output, "Name: {}", record.name)?;
        writeln!(output)?;
        writeln!(output, "{}", record.short)?;
        writeln!(output)?;
        writeln!(output, "Type: {}", record.kind)?;
        if let Some(alias) = &record.alias {
            writeln!(output, "$is: {alias}")?;
        }
        if let Some(parent) = node.parent() {
            writeln!(output, "Parent: {}", parent.name)?;
        }
        if !record.long.is_empty() {
            writeln!(output, "Description:")?;
            writeln!(output, "{}", record.long)?;
            writeln!(output)?;
        }

        if record.kind == DocKind::Action {
            if !record.params.is_empty() {
                writeln!(output, "Params:")?;
                Self::write_parameters(output, &record.params)?;
                writeln!(output)?;
            }
            match &record.return_type {
                Some(ty) => writeln!(output, "Return type: {ty}")?,
                None => writeln!(output, "Return type:")?,
            }
            if !record.columns.is_empty() {
                writeln!(output, "Columns:")?;
                Self::write_parameters(output, &record.columns)?;
            }
        }

        if let Some(ty) = &record.value_type {
            writeln!(output, "Value Type: {ty}")?;
            writeln!(output, "Writable: {}", record.writable_or_default())?;
        }

        writeln!(output)?;
        writeln!(output, "---")?;
        writeln!(output)
    }

    fn write_parameters<W: Write>(output: &mut W, params: &[Parameter]) -> fmt::Result {
        for param in params {
            writeln!(output, "     Name: {}", param.name)?;
            writeln!(output, "     Type: {}", param.ty)?;
            if !param.description.is_empty() {
                writeln!(output, "     {}", param.description)?;
            }
            writeln!(output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::sample_tree;

    #[test]
    fn test_overview() {
        let text = TextGenerator::generate(&sample_tree());
        let overview: Vec<&str> = text.split("\n---\n").next().unwrap().lines().collect();
        assert_eq!(
            overview,
            [
                "- root",
                " |- @Add_Device(name, port)",
                " |- version *string (never)*",
                " |- devices",
                " | |- @Remove()",
                " | |- power *enum[on,off] (write)*",
            ]
        );
    }

    #[test]
    fn test_action_details() {
        let text = TextGenerator::generate(&sample_tree());
        assert!(text.contains(
            "Name: Add_Device\n\nAdds a device to the link.\n\nType: Action\n$is: addDevice\nParent: root\n"
        ));
        assert!(text.contains("Description:\nCreates the device node and starts polling it.\n"));
        assert!(text.contains("Params:\n     Name: name\n     Type: string\n     Name of the device.\n"));
        assert!(text.contains("Return type: value\n"));
        assert!(text.contains("Columns:\n     Name: success\n     Type: bool\n"));
    }

    #[test]
    fn test_value_details() {
        let text = TextGenerator::generate(&sample_tree());
        assert!(text.contains("Value Type: enum[on,off]\nWritable: write\n"));
        assert!(text.contains("Value Type: string\nWritable: never\n"));
    }

    #[test]
    fn test_root_has_no_parent_line() {
        let text = TextGenerator::generate(&sample_tree());
        let details = text.split_once("\n---\n").unwrap().1;
        let root_section = details.split("---").next().unwrap();
        assert!(root_section.contains("Name: root"));
        assert!(!root_section.contains("Parent:"));
    }
}
