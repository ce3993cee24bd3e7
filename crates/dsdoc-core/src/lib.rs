//! DsDoc Core - annotation front end for DsLink documentation
//!
//! This crate turns `//*` comment batches into a linked tree of records:
//! - Extract: batches of documentation lines from source text
//! - Lexer: tokenization of batch lines
//! - Parser: one record per batch, registered in a parse session
//! - Registry: identity keys and two-phase parent linking
//! - Doc: text, Markdown and JSON output

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Batch extraction from source text
pub mod extract;

/// Lexer module - tokenization of batch lines
pub mod lexer;

/// Parser module - batches to records
pub mod parser;

/// Parsed documentation records
pub mod record;

/// Identity registry and parent linking
pub mod registry;

/// The linked document tree
pub mod tree;

/// Documentation generation module
pub mod doc;

mod error;

pub use error::Error;

/// Convenience re-export of batch extraction
pub use extract::{Batch, Extractor};

/// Convenience re-export of the parse session and record parser
pub use parser::{DocParser, RecordParser};

/// Convenience re-export of record types
pub use record::{DocKind, DocumentRecord, Parameter};

/// Convenience re-export of registry types
pub use registry::{IdentityError, LinkError, Registry};

/// Convenience re-export of tree types
pub use tree::{DocumentTree, NodeRef, RecordId};

/// Extract, parse and link every batch of a single source
///
/// Stops at the first error. Callers that need to skip bad batches drive a
/// [`DocParser`] themselves.
pub fn parse_source(source: &str, text: &str) -> Result<DocumentTree, Error> {
    let mut parser = DocParser::new();
    for batch in Extractor::default().extract(source, text) {
        parser.parse_batch(&batch)?;
    }
    Ok(parser.finalize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn parse_source_links_batches() {
        let text = "\
//* @Node devices
//* @Parent root
//*
//* Configured devices.
class Devices {}

//* @Action Reset
//* @Parent devices
void reset() {}
";
        let tree = parse_source("lib.dart", text).unwrap();
        let reset = tree.get("Reset").unwrap();
        assert_eq!(reset.parent().unwrap().identity_key, "devices");
        assert_eq!(tree.get("devices").unwrap().short, "Configured devices.");
    }

    #[test]
    fn parse_source_reports_file_line() {
        let text = "void main() {}\n//* @Node a\n//* @Parent root%\n";
        let err = parse_source("main.dart", text).unwrap_err();
        assert_eq!(err.origin(), "main.dart");
        assert_eq!(err.to_string(), "main.dart:3:13: illegal character '%'");
    }
}
